use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "tpcs", version, about = "TPCS questionnaire scoring")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score a webhook payload and print the result as JSON.
    Score {
        /// Payload file, or `-` for stdin.
        payload: PathBuf,
        #[command(flatten)]
        scorer: ScorerArgs,
        /// Email the result to the respondent (RESEND_API_KEY / FROM_EMAIL).
        #[arg(long, default_value_t = false)]
        notify: bool,
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Check that a payload carries 24 usable answers without scoring it.
    Validate {
        /// Payload file, or `-` for stdin.
        payload: PathBuf,
    },
    /// Print the effective scorer configuration as TOML.
    Config {
        #[command(flatten)]
        scorer: ScorerArgs,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub struct ScorerArgs {
    /// TOML scorer config; takes precedence over `--preset`.
    #[arg(long, env = "TPCS_CONFIG")]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = PresetChoice::Difa)]
    pub preset: PresetChoice,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PresetChoice {
    Difa,
    Dynamics,
}

impl From<PresetChoice> for tpcs_scoring::Preset {
    fn from(value: PresetChoice) -> Self {
        match value {
            PresetChoice::Difa => tpcs_scoring::Preset::Difa,
            PresetChoice::Dynamics => tpcs_scoring::Preset::Dynamics,
        }
    }
}
