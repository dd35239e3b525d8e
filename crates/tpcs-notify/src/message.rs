use serde::Serialize;
use tpcs_scoring::ClassificationResult;

const TEST_NAME: &str = "TPCS-DIFA";
const SIGNATURE: &str = "L'équipe DIFA";

/// Plain-text email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub subject: String,
    pub text: String,
}

pub fn compose(result: &ClassificationResult) -> Message {
    let quality = &result.quality;
    let flags = quality
        .flags
        .iter()
        .map(|flag| flag.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let subject = format!(
        "Ton résultat {TEST_NAME} : {} ({})",
        result.family, result.code
    );
    let text = format!(
        "Bonjour,\n\
         \n\
         Merci d'avoir passé le test {TEST_NAME}.\n\
         Famille : {family}\n\
         Code 4L : {code}\n\
         \n\
         Qualité:\n\
         - Cohérence miroirs: {consistency:.2}\n\
         - Variabilité réponses: {variability:.2}\n\
         Flags: {flags}\n\
         \n\
         À bientôt,\n\
         {SIGNATURE}",
        family = result.family,
        code = result.code,
        consistency = quality.mirror_consistency,
        variability = quality.response_variability,
    );

    Message { subject, text }
}

#[cfg(test)]
mod tests {
    use tpcs_scoring::{AnswerSet, Scorer};

    use super::*;

    #[test]
    fn message_carries_family_code_and_quality() {
        let result = Scorer::default().score(&AnswerSet::new([0; 24]).unwrap());
        let message = compose(&result);

        assert_eq!(message.subject, "Ton résultat TPCS-DIFA : Delta (XXXX)");
        assert!(message.text.starts_with("Bonjour,\n\nMerci d'avoir passé le test TPCS-DIFA.\n"));
        assert!(message.text.contains("Famille : Delta\nCode 4L : XXXX\n"));
        assert!(message.text.contains("- Cohérence miroirs: 1.00\n"));
        assert!(message.text.contains("- Variabilité réponses: 0.00\n"));
        assert!(message.text.contains("Flags: low_variability\n"));
        assert!(message.text.ends_with("L'équipe DIFA"));
    }
}
