pub mod report;

use crate::types::Modality;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for neuroscan
#[derive(Parser, Debug)]
#[command(name = "neuroscan")]
#[command(about = "Scan classification and treatment suggestion tool")]
#[command(version)]
pub struct Cli {
    /// Path to scan file (.nii, .nii.gz, .mgh, .dcm, .png, .jpg, .jpeg, .bmp)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Scanner modality of the input
    #[arg(short, long, default_value = "mri")]
    pub modality: ModalityArg,

    /// Path to a safetensors model checkpoint; without it the demo
    /// placeholder backend is used
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

/// Scanner modality argument
#[derive(Debug, Clone, ValueEnum)]
pub enum ModalityArg {
    Mri,
    Fmri,
    Pet,
    Ct,
    /// Unrecognized modality; 2D image fallback
    Other,
}

impl From<ModalityArg> for Modality {
    fn from(arg: ModalityArg) -> Self {
        match arg {
            ModalityArg::Mri => Modality::Mri,
            ModalityArg::Fmri => Modality::Fmri,
            ModalityArg::Pet => Modality::Pet,
            ModalityArg::Ct => Modality::Ct,
            ModalityArg::Other => Modality::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modality_arg_conversion() {
        assert_eq!(Modality::from(ModalityArg::Mri), Modality::Mri);
        assert_eq!(Modality::from(ModalityArg::Fmri), Modality::Fmri);
        assert_eq!(Modality::from(ModalityArg::Pet), Modality::Pet);
        assert_eq!(Modality::from(ModalityArg::Ct), Modality::Ct);
        assert_eq!(Modality::from(ModalityArg::Other), Modality::Unknown);
    }

    #[test]
    fn test_cli_parses_minimal_invocation() {
        let cli = Cli::try_parse_from(["neuroscan", "scan.nii.gz"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("scan.nii.gz"));
        assert!(matches!(cli.modality, ModalityArg::Mri));
        assert!(cli.model.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parses_full_invocation() {
        let cli = Cli::try_parse_from([
            "neuroscan",
            "slice.dcm",
            "--modality",
            "ct",
            "--format",
            "json",
            "--verbose",
        ])
        .unwrap();
        assert!(matches!(cli.modality, ModalityArg::Ct));
        assert!(matches!(cli.format, OutputFormat::Json));
        assert!(cli.verbose);
    }
}
