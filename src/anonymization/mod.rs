//! Tag-routed anonymization of PII fragments
//!
//! # Architecture
//!
//! - **Configuration** ([`AnonymizerConfig`]): a default mechanism plus one
//!   mechanism per tag, validated before anything is built
//! - **Dispatch** ([`Anonymizer`]): owns the built mechanism instances and routes
//!   each [`Pii`](crate::domain::Pii) by its tag
//!
//! # Usage
//!
//! ```rust
//! use pii_anonymizer::anonymization::{Anonymizer, AnonymizerConfig};
//! use pii_anonymizer::domain::Pii;
//! use pii_anonymizer::mechanisms::{MechanismConfig, PseudonymizationConfig};
//!
//! # fn example() -> pii_anonymizer::domain::Result<()> {
//! let config = AnonymizerConfig::new().with_tag(
//!     "PER",
//!     MechanismConfig::new(PseudonymizationConfig::new("Person {}")).with_stateful(true),
//! );
//! let mut anonymizer = Anonymizer::new(&config)?;
//!
//! let piis = vec![Pii::new("PER", "Jane"), Pii::new("PER", "John"), Pii::new("PER", "Jane")];
//! let texts = anonymizer
//!     .anonymize(piis)
//!     .map(|result| result.map(|pii| pii.text))
//!     .collect::<pii_anonymizer::domain::Result<Vec<_>>>()?;
//! assert_eq!(texts, ["Person 1", "Person 2", "Person 1"]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod engine;

pub use config::AnonymizerConfig;
pub use engine::Anonymizer;
