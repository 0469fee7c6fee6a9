// PII Anonymizer - tag-routed anonymization of PII fragments
// Copyright (c) 2025 PII Anonymizer Contributors
// Licensed under the MIT License

//! # PII Anonymizer
//!
//! Anonymizes tagged fragments of personally identifiable information. Each
//! [`Pii`](domain::Pii) carries a tag such as `PER` or `DATE`; the
//! [`Anonymizer`](anonymization::Anonymizer) routes it to the mechanism bound to
//! that tag and returns an [`AnonymizedPii`](domain::AnonymizedPii).
//!
//! ## Mechanisms
//!
//! - **Generalization**: replace the value with a constant or computed replacement
//! - **Suppression**: mask the value with a repeated character
//! - **Pseudonymization**: numbered pseudonyms such as `Person 1`
//! - **Randomized Response**: report the true category or a randomly drawn one,
//!   with custom, coin-toss or ε-differentially private distributions
//! - **Laplace Noise**: add noise calibrated to sensitivity and ε
//!
//! Any mechanism can be made stateful (identical inputs get identical outputs) and
//! numeric mechanisms can anonymize dates or formatted numbers through an encoder.
//!
//! ## Architecture
//!
//! - [`distribution`] - Discrete and cumulative distributions for sampling
//! - [`encoders`] - Reversible text to number transforms
//! - [`mechanisms`] - The anonymization mechanisms and their wrappers
//! - [`anonymization`] - Tag-routed dispatch
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Settings file loading
//! - [`logging`] - Structured logging
//! - [`cli`] - Command-line interface
//!
//! ## Quick Start
//!
//! ```rust
//! use pii_anonymizer::anonymization::{Anonymizer, AnonymizerConfig};
//! use pii_anonymizer::domain::Pii;
//!
//! # fn example() -> pii_anonymizer::domain::Result<()> {
//! let config: AnonymizerConfig = serde_json::from_str(
//!     r#"{
//!         "default_mechanism": {"mechanism": "suppression"},
//!         "mechanisms_by_tag": {
//!             "foo": {"mechanism": "suppression", "char": "Y", "length": 3},
//!             "bar": {"mechanism": "pseudonymization", "format": "Bar {}"}
//!         }
//!     }"#,
//! )?;
//! let mut anonymizer = Anonymizer::new(&config)?;
//!
//! let piis = vec![
//!     Pii::new("test", "Alpha"),
//!     Pii::new("foo", "Beta"),
//!     Pii::new("bar", "Gamma"),
//!     Pii::new("bar", "Gamma"),
//! ];
//! let texts: Vec<String> = anonymizer
//!     .anonymize(piis)
//!     .map(|result| result.map(|pii| pii.text))
//!     .collect::<pii_anonymizer::domain::Result<_>>()?;
//! assert_eq!(texts, ["XXXXX", "YYY", "Bar 1", "Bar 2"]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`]. Invalid configurations are
//! rejected when the anonymizer is built; per-item failures such as an unknown
//! category are returned for that item only, and the anonymizer stays usable.
//!
//! ## Logging
//!
//! The library emits `tracing` events carrying tags, ids and mechanism kinds. PII
//! text is never logged.

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod distribution;
pub mod domain;
pub mod encoders;
pub mod logging;
pub mod mechanisms;
