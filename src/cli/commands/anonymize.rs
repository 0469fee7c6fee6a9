//! Anonymize command implementation
//!
//! Reads PII as JSON Lines (`{"tag": "...", "text": "...", "id": 1}`) and writes
//! one anonymized JSON object per input line, in input order.

use crate::anonymization::Anonymizer;
use crate::config::load_config;
use crate::domain::Pii;
use anyhow::Context;
use clap::Args;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::time::Instant;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// JSON Lines input file, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// JSON Lines output file, or `-` for stdout
    #[arg(short, long, default_value = "-")]
    pub output: String,
}

/// How a run over a JSON Lines stream ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every line was anonymized
    Completed { total: usize, modified: usize },
    /// A line could not be read as PII
    InvalidLine { line: usize, reason: String },
    /// A mechanism rejected an item
    Failed {
        line: usize,
        tag: String,
        reason: String,
    },
}

impl RunOutcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Completed { .. } => 0,
            RunOutcome::InvalidLine { .. } | RunOutcome::Failed { .. } => 3,
        }
    }
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting anonymization");

        let settings = match load_config(config_path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let mut anonymizer = match Anonymizer::new(&settings.anonymizer) {
            Ok(anonymizer) => anonymizer,
            Err(e) => {
                eprintln!("❌ Invalid anonymizer configuration: {e}");
                return Ok(2);
            }
        };

        let reader: Box<dyn BufRead> = if self.input == "-" {
            Box::new(io::stdin().lock())
        } else {
            let file = File::open(&self.input)
                .with_context(|| format!("Failed to open input file {}", self.input))?;
            Box::new(BufReader::new(file))
        };

        let writer: Box<dyn Write> = if self.output == "-" {
            Box::new(io::stdout().lock())
        } else {
            let file = File::create(&self.output)
                .with_context(|| format!("Failed to create output file {}", self.output))?;
            Box::new(file)
        };

        let started = Instant::now();
        let outcome = anonymize_lines(&mut anonymizer, reader, BufWriter::new(writer))?;

        match &outcome {
            RunOutcome::Completed { total, modified } => {
                crate::log_run_complete!(*total, *modified, started.elapsed());
            }
            RunOutcome::InvalidLine { line, reason } => {
                tracing::error!(line, "Invalid input line");
                eprintln!("❌ Line {line}: {reason}");
            }
            RunOutcome::Failed { line, tag, reason } => {
                tracing::error!(line, tag = %tag, "Anonymization failed");
                eprintln!("❌ Line {line} (tag '{tag}'): {reason}");
            }
        }

        Ok(outcome.exit_code())
    }
}

/// Anonymize a JSON Lines stream item by item
///
/// Blank lines are skipped. Processing stops at the first line that is not valid
/// PII JSON or that its mechanism rejects; results for earlier lines are already
/// written. Error reasons never contain the PII text.
///
/// # Errors
///
/// Returns an error only for I/O failures on the reader or writer.
pub fn anonymize_lines<R: BufRead, W: Write>(
    anonymizer: &mut Anonymizer,
    reader: R,
    mut writer: W,
) -> anyhow::Result<RunOutcome> {
    let mut total = 0;
    let mut modified = 0;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("Failed to read input line {line_number}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let pii: Pii = match serde_json::from_str(&line) {
            Ok(pii) => pii,
            Err(e) => {
                writer.flush().context("Failed to flush output")?;
                return Ok(RunOutcome::InvalidLine {
                    line: line_number,
                    reason: format!("invalid PII JSON at column {}", e.column()),
                });
            }
        };

        let tag = pii.tag.clone();
        match anonymizer.anonymize_one(pii) {
            Ok(result) => {
                total += 1;
                if result.modified {
                    modified += 1;
                }
                serde_json::to_writer(&mut writer, &result)
                    .context("Failed to write anonymized PII")?;
                writer
                    .write_all(b"\n")
                    .context("Failed to write anonymized PII")?;
            }
            Err(e) => {
                writer.flush().context("Failed to flush output")?;
                return Ok(RunOutcome::Failed {
                    line: line_number,
                    tag,
                    reason: e.to_string(),
                });
            }
        }
    }

    writer.flush().context("Failed to flush output")?;
    Ok(RunOutcome::Completed { total, modified })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::AnonymizerConfig;
    use crate::domain::AnonymizedPii;
    use crate::mechanisms::{MechanismConfig, PseudonymizationConfig, RandomizedResponseConfig};
    use std::io::Cursor;

    fn anonymizer() -> Anonymizer {
        let config = AnonymizerConfig::new()
            .with_tag(
                "PER",
                MechanismConfig::new(PseudonymizationConfig::new("Person {}")).with_stateful(true),
            )
            .with_tag(
                "ANSWER",
                MechanismConfig::new(RandomizedResponseConfig::coin(
                    vec!["Yes".to_string(), "No".to_string()],
                    1.0,
                )),
            );
        Anonymizer::new(&config).unwrap()
    }

    fn run(input: &str) -> (RunOutcome, Vec<AnonymizedPii>) {
        let mut anonymizer = anonymizer();
        let mut output = Vec::new();
        let outcome = anonymize_lines(&mut anonymizer, Cursor::new(input), &mut output).unwrap();
        let results = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (outcome, results)
    }

    #[test]
    fn test_anonymize_lines_in_order() {
        let input = concat!(
            r#"{"tag": "PER", "text": "Jane", "id": 1}"#,
            "\n\n",
            r#"{"tag": "LOC", "text": "Berlin"}"#,
            "\n",
            r#"{"tag": "PER", "text": "Jane", "id": 2}"#,
            "\n",
        );
        let (outcome, results) = run(input);

        assert_eq!(
            outcome,
            RunOutcome::Completed {
                total: 3,
                modified: 2
            }
        );
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].text, "Person 1");
        assert_eq!(results[0].id, Some(1));
        assert_eq!(results[1].text, "Berlin");
        assert!(!results[1].modified);
        assert_eq!(results[2].text, "Person 1");
    }

    #[test]
    fn test_stops_at_first_failure() {
        let input = concat!(
            r#"{"tag": "ANSWER", "text": "Yes"}"#,
            "\n",
            r#"{"tag": "ANSWER", "text": "Secret answer"}"#,
            "\n",
            r#"{"tag": "ANSWER", "text": "No"}"#,
            "\n",
        );
        let (outcome, results) = run(input);

        match &outcome {
            RunOutcome::Failed { line, tag, reason } => {
                assert_eq!(*line, 2);
                assert_eq!(tag, "ANSWER");
                assert!(!reason.contains("Secret answer"), "{reason}");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(outcome.exit_code(), 3);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_invalid_json_line() {
        let input = "{\"tag\": \"PER\", \"text\": \"Jane\"}\nnot json\n";
        let (outcome, results) = run(input);

        assert!(matches!(outcome, RunOutcome::InvalidLine { line: 2, .. }));
        assert_eq!(outcome.exit_code(), 3);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let (outcome, results) = run("");
        assert_eq!(
            outcome,
            RunOutcome::Completed {
                total: 0,
                modified: 0
            }
        );
        assert_eq!(outcome.exit_code(), 0);
        assert!(results.is_empty());
    }
}
