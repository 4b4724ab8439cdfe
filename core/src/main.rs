use clap::Parser;
use log::{error, info};
use neuroscan_core::cli::{Cli, OutputFormat};
use neuroscan_core::{Modality, ScanPipeline, TextReport};
use std::collections::HashMap;
use std::process;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if !cli.file.is_file() {
        eprintln!("Error: {} is not a file", cli.file.display());
        process::exit(1);
    }

    // Backend is selected once here, not per call
    let pipeline = match &cli.model {
        Some(path) => match ScanPipeline::with_model(path) {
            Ok(p) => {
                info!("loaded model checkpoint from {}", path.display());
                p
            }
            Err(e) => {
                error!("failed to load model: {}", e);
                eprintln!("Error: failed to load model: {}", e);
                process::exit(1);
            }
        },
        None => {
            info!("no model checkpoint given, using placeholder backend");
            ScanPipeline::placeholder()
        }
    };

    let modality: Modality = cli.modality.clone().into();
    let modality_str = modality.simple_name();

    let (tensor, scan_info) =
        match pipeline.preprocess(&cli.file, modality_str, &HashMap::new()) {
            Ok(out) => out,
            Err(e) => {
                error!("preprocess failed: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };

    info!(
        "normalized {} to tensor shape {:?}",
        cli.file.display(),
        tensor.shape()
    );

    let record = match pipeline.predict(&tensor, modality_str, &scan_info) {
        Ok(record) => record,
        Err(e) => {
            error!("prediction failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match cli.format {
        OutputFormat::Text => {
            let report = TextReport::new(&record);
            println!("{}", report);
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match serde_json::to_string_pretty(&record) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("failed to serialize to JSON: {}", e);
                        eprintln!("Error: failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}
