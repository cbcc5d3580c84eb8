//! Extract command - pull the SP2D fields out of a single OCR text.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use sp2d_core::{ExtractionResult, Reading};

use super::{load_config, read_input};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text file (`-` for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Number and purpose on one line
    Text,
    /// JSON object
    Json,
    /// CSV with a header row
    Csv,
}

#[derive(Serialize)]
struct ReadingOutput<'a> {
    document_number: &'a str,
    purpose: &'a str,
    combined: String,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let extractor = config.extractor()?;

    info!("Extracting from {}", args.input.display());
    let text = read_input(&args.input)?;

    let reading = match extractor.extract(&text) {
        ExtractionResult::Complete(reading) => reading,
        ExtractionResult::Empty => {
            anyhow::bail!(
                "No complete SP2D reading found in {}",
                args.input.display()
            );
        }
    };

    let output = format_reading(&reading, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render a reading in the requested format.
pub fn format_reading(reading: &Reading, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(reading.combined()),
        OutputFormat::Json => {
            let output = ReadingOutput {
                document_number: reading.document_number(),
                purpose: reading.purpose(),
                combined: reading.combined(),
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Csv => format_csv(reading),
    }
}

fn format_csv(reading: &Reading) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let combined = reading.combined();

    wtr.write_record(["document_number", "purpose", "combined"])?;
    wtr.write_record([
        reading.document_number(),
        reading.purpose(),
        combined.as_str(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp2d_core::extract_sp2d;

    fn reading() -> Reading {
        extract_sp2d("12345/SP2D/LS-01 Keperluan Untuk: Belanja, modal \"gedung\" NO.")
            .into_reading()
            .unwrap()
    }

    #[test]
    fn test_format_text() {
        assert_eq!(
            format_reading(&reading(), OutputFormat::Text).unwrap(),
            "12345/SP2D/LS-01 Belanja, modal \"gedung\""
        );
    }

    #[test]
    fn test_format_json() {
        let json = format_reading(&reading(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["document_number"], "12345/SP2D/LS-01");
        assert_eq!(value["purpose"], "Belanja, modal \"gedung\"");
    }

    #[test]
    fn test_format_csv_quotes_fields() {
        let csv = format_reading(&reading(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "document_number,purpose,combined");
        assert_eq!(
            lines[1],
            "12345/SP2D/LS-01,\"Belanja, modal \"\"gedung\"\"\",\"12345/SP2D/LS-01 Belanja, modal \"\"gedung\"\"\""
        );
    }
}
