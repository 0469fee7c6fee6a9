//! Domain models and types for the anonymizer.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Input and output units** ([`Pii`], [`AnonymizedPii`])
//! - **Error types** ([`AnonymizerError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, AnonymizerError>`]:
//!
//! ```rust
//! use pii_anonymizer::domain::{AnonymizerError, Result};
//! use pii_anonymizer::mechanisms::MechanismConfig;
//!
//! fn example() -> Result<()> {
//!     let config: MechanismConfig = serde_json::from_str(r#"{"mechanism": "suppression"}"#)?;
//!     let mut mechanism = config.build()?;
//!     assert_eq!(mechanism.anonymize("secret")?, "XXXXXX");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod errors;
pub mod pii;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::AnonymizerError;
pub use pii::{AnonymizedPii, Pii};
pub use result::Result;
