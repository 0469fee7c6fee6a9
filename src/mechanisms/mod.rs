//! Anonymization mechanisms
//!
//! A mechanism turns one piece of cleartext into its anonymized replacement. Five
//! base mechanisms are available:
//!
//! - [`Generalization`]: replace with a constant or computed value
//! - [`Suppression`]: mask with a repeated character
//! - [`Pseudonymization`]: numbered pseudonyms from a format string
//! - [`RandomizedResponse`]: categorical values resampled from a distribution
//! - [`LaplaceNoise`]: numeric values with additive Laplace noise
//!
//! Any of them can be wrapped in [`Stateful`], which memoizes outputs so repeated
//! inputs anonymize identically, and in [`Encoding`], which lets numeric mechanisms
//! work on dates and delimited numbers.
//!
//! Mechanisms are usually built from a [`MechanismConfig`]:
//!
//! ```rust
//! use pii_anonymizer::mechanisms::MechanismConfig;
//!
//! # fn example() -> pii_anonymizer::domain::Result<()> {
//! let config: MechanismConfig = serde_json::from_str(
//!     r#"{"mechanism": "pseudonymization", "format": "Person {}", "stateful": true}"#,
//! )?;
//! let mut mechanism = config.build()?;
//!
//! assert_eq!(mechanism.anonymize("Alice")?, "Person 1");
//! assert_eq!(mechanism.anonymize("Bob")?, "Person 2");
//! assert_eq!(mechanism.anonymize("Alice")?, "Person 1");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod encoding;
pub mod generalization;
pub mod laplace_noise;
pub mod pseudonymization;
pub mod randomized_response;
pub mod stateful;
pub mod suppression;

pub use encoding::Encoding;
pub use generalization::{Generalization, GeneralizationConfig, Replacement};
pub use laplace_noise::{LaplaceNoise, LaplaceNoiseConfig};
pub use pseudonymization::{Pseudonymization, PseudonymizationConfig};
pub use randomized_response::{RandomizedResponse, RandomizedResponseConfig, ResponseMode};
pub use stateful::Stateful;
pub use suppression::{Suppression, SuppressionConfig, SuppressionLength};

use crate::domain::Result;
use crate::encoders::EncoderKind;
use serde::{Deserialize, Serialize};

/// Trait for anonymization mechanisms
///
/// Takes `&mut self` because mechanisms may keep state (counters, caches, random
/// sources). Callers sharing a mechanism across threads must serialize access.
pub trait Mechanism: Send {
    /// Anonymize a single value
    fn anonymize(&mut self, input: &str) -> Result<String>;

    /// Configuration name of the underlying base mechanism
    fn kind(&self) -> &'static str;
}

impl<M: Mechanism + ?Sized> Mechanism for Box<M> {
    fn anonymize(&mut self, input: &str) -> Result<String> {
        (**self).anonymize(input)
    }

    fn kind(&self) -> &'static str {
        (**self).kind()
    }
}

/// Base mechanism and its parameters, discriminated by the `mechanism` field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mechanism", rename_all = "camelCase")]
pub enum MechanismKind {
    Generalization(GeneralizationConfig),
    Suppression(SuppressionConfig),
    Pseudonymization(PseudonymizationConfig),
    RandomizedResponse(RandomizedResponseConfig),
    LaplaceNoise(LaplaceNoiseConfig),
}

impl MechanismKind {
    /// Configuration name of the mechanism
    pub fn name(&self) -> &'static str {
        match self {
            Self::Generalization(_) => generalization::KIND,
            Self::Suppression(_) => suppression::KIND,
            Self::Pseudonymization(_) => pseudonymization::KIND,
            Self::RandomizedResponse(_) => randomized_response::KIND,
            Self::LaplaceNoise(_) => laplace_noise::KIND,
        }
    }

    /// Check the parameters without building
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Generalization(_) => Ok(()),
            Self::Suppression(config) => config.validate(),
            Self::Pseudonymization(config) => config.validate(),
            Self::RandomizedResponse(config) => config.validate(),
            Self::LaplaceNoise(config) => config.validate(),
        }
    }

    /// Build a fresh instance of the base mechanism
    pub fn build(&self) -> Result<Box<dyn Mechanism>> {
        Ok(match self {
            Self::Generalization(config) => Box::new(config.build()),
            Self::Suppression(config) => Box::new(config.build()?),
            Self::Pseudonymization(config) => Box::new(config.build()?),
            Self::RandomizedResponse(config) => Box::new(config.build()?),
            Self::LaplaceNoise(config) => Box::new(config.build()?),
        })
    }
}

impl From<GeneralizationConfig> for MechanismKind {
    fn from(config: GeneralizationConfig) -> Self {
        Self::Generalization(config)
    }
}

impl From<SuppressionConfig> for MechanismKind {
    fn from(config: SuppressionConfig) -> Self {
        Self::Suppression(config)
    }
}

impl From<PseudonymizationConfig> for MechanismKind {
    fn from(config: PseudonymizationConfig) -> Self {
        Self::Pseudonymization(config)
    }
}

impl From<RandomizedResponseConfig> for MechanismKind {
    fn from(config: RandomizedResponseConfig) -> Self {
        Self::RandomizedResponse(config)
    }
}

impl From<LaplaceNoiseConfig> for MechanismKind {
    fn from(config: LaplaceNoiseConfig) -> Self {
        Self::LaplaceNoise(config)
    }
}

/// Configuration of one mechanism, including the wrappers around it
///
/// Building produces `Encoding(Stateful(base))`: with both options set, the cache
/// is keyed on the encoded value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MechanismConfig {
    #[serde(flatten)]
    pub kind: MechanismKind,

    /// Memoize outputs so identical inputs anonymize identically
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub stateful: bool,

    /// Encode the input before and decode the output after anonymization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoder: Option<EncoderKind>,
}

impl MechanismConfig {
    /// Plain configuration without wrappers
    pub fn new(kind: impl Into<MechanismKind>) -> Self {
        Self {
            kind: kind.into(),
            stateful: false,
            encoder: None,
        }
    }

    /// Enable or disable memoization
    pub fn with_stateful(mut self, stateful: bool) -> Self {
        self.stateful = stateful;
        self
    }

    /// Set the encoder
    pub fn with_encoder(mut self, encoder: EncoderKind) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Configuration name of the base mechanism
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Run every static check on the parameters
    ///
    /// # Errors
    ///
    /// Returns [`AnonymizerError::InvalidConfig`](crate::domain::AnonymizerError::InvalidConfig)
    /// describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.kind.validate()
    }

    /// Validate and build a fresh mechanism instance
    ///
    /// Each call returns an independent instance with its own state.
    pub fn build(&self) -> Result<Box<dyn Mechanism>> {
        self.validate()?;

        let mut mechanism = self.kind.build()?;
        if self.stateful {
            mechanism = Box::new(Stateful::new(mechanism));
        }
        if let Some(encoder) = self.encoder {
            mechanism = Box::new(Encoding::new(mechanism, Some(encoder.to_encoder())));
        }

        tracing::debug!(
            mechanism = self.name(),
            stateful = self.stateful,
            encoder = self.encoder.map(|e| e.name()),
            "Built mechanism"
        );
        Ok(mechanism)
    }
}
