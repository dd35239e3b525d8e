use serde_json::Value;

/// Folded label -> score. Labels are matched after [`fold`].
const LABELS: &[(&str, i64)] = &[
    ("pas du tout d'accord", -3),
    ("plutot pas d'accord", -1),
    ("neutre", 0),
    ("plutot d'accord", 1),
    ("tout a fait d'accord", 3),
];

/// Maps a Likert label to its score.
///
/// Numbers are returned unchanged, as are strings that match no label: the
/// scorer is the one place that decides whether a value is acceptable.
pub fn normalize_answer(value: &Value) -> Value {
    let Value::String(text) = value else {
        return value.clone();
    };

    let folded = fold(text);
    LABELS
        .iter()
        .find(|(label, _)| *label == folded)
        .map(|&(_, score)| Value::from(score))
        .unwrap_or_else(|| value.clone())
}

/// Combining diacritical marks left behind by decomposed (NFD) input.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Lower-cases, trims and strips French diacritics, precomposed or decomposed;
/// curly apostrophes become `'`.
pub fn fold(text: &str) -> String {
    text.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !COMBINING_MARKS.contains(c))
        .map(|c| match c {
            'à' | 'â' | 'ä' | 'á' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' | 'í' => 'i',
            'ô' | 'ö' | 'ó' => 'o',
            'ù' | 'û' | 'ü' | 'ú' => 'u',
            'ç' => 'c',
            '\u{2019}' | '\u{2018}' => '\'',
            other => other,
        })
        .collect()
}
