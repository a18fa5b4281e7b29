//! Configuration types for a document scan.
//!
//! Every knob lives in [`AnalysisConfig`], built via its
//! [`AnalysisConfigBuilder`]. One struct keeps scans reproducible: two runs
//! with equal configs send identical instruction blocks, and the config can
//! be logged to explain why two results differ.

use crate::error::DocwiseError;
use crate::provider::AnalysisProvider;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// User context that biases the instruction text toward relevant warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Persona {
    #[default]
    Individual,
    #[serde(rename = "Small Business")]
    SmallBusiness,
    Student,
    Freelancer,
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Persona::Individual => "Individual",
            Persona::SmallBusiness => "Small Business",
            Persona::Student => "Student",
            Persona::Freelancer => "Freelancer",
        };
        f.write_str(s)
    }
}

/// Configuration for a document scan.
///
/// Built via [`AnalysisConfig::builder()`] or [`AnalysisConfig::default()`].
///
/// # Example
/// ```rust
/// use docwise::{AnalysisConfig, Persona};
///
/// let config = AnalysisConfig::builder()
///     .persona(Persona::Student)
///     .target_language("Spanish")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct AnalysisConfig {
    /// User persona embedded in the instruction block. Default: Individual.
    pub persona: Persona,

    /// Target output language, a free-form label. Default: "Simple English".
    ///
    /// Free-form because the service handles arbitrary language names; an
    /// enum here would only restrict what the model already accepts.
    pub target_language: String,

    /// Lighter model variant, used for single-document scans without URLs.
    /// Default: "gemini-3-flash-preview".
    pub flash_model: String,

    /// Higher-capability variant, used for comparisons and whenever a URL
    /// input needs live retrieval. Default: "gemini-3-pro-preview".
    ///
    /// This split is a cost/quality policy, not a correctness requirement:
    /// pin both fields to the same model on single-model deployments.
    pub pro_model: String,

    /// Service API key. If None, the provider reads `GEMINI_API_KEY` from
    /// the environment at construction time.
    pub api_key: Option<String>,

    /// Pre-constructed provider. Takes precedence over `api_key`; the seam
    /// tests use to substitute a mock without touching request building.
    pub provider: Option<Arc<dyn AnalysisProvider>>,

    /// Override the entire instruction block. If None, uses the built-in
    /// template from [`crate::prompts`].
    pub instructions: Option<String>,

    /// Transport-level timeout for the single remote call, in seconds.
    /// Default: 120.
    ///
    /// The scan is one request/response exchange that can take tens of
    /// seconds on large documents; there is no mid-flight cancellation, so
    /// this is the only bound on how long a caller waits.
    pub api_timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            persona: Persona::Individual,
            target_language: "Simple English".to_string(),
            flash_model: "gemini-3-flash-preview".to_string(),
            pro_model: "gemini-3-pro-preview".to_string(),
            api_key: None,
            provider: None,
            instructions: None,
            api_timeout_secs: 120,
        }
    }
}

impl fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("persona", &self.persona)
            .field("target_language", &self.target_language)
            .field("flash_model", &self.flash_model)
            .field("pro_model", &self.pro_model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("provider", &self.provider.as_ref().map(|_| "<dyn AnalysisProvider>"))
            .field("api_timeout_secs", &self.api_timeout_secs)
            .finish()
    }
}

impl AnalysisConfig {
    /// Create a new builder for `AnalysisConfig`.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`AnalysisConfig`].
#[derive(Debug)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    pub fn persona(mut self, persona: Persona) -> Self {
        self.config.persona = persona;
        self
    }

    pub fn target_language(mut self, lang: impl Into<String>) -> Self {
        self.config.target_language = lang.into();
        self
    }

    pub fn flash_model(mut self, model: impl Into<String>) -> Self {
        self.config.flash_model = model.into();
        self
    }

    pub fn pro_model(mut self, model: impl Into<String>) -> Self {
        self.config.pro_model = model.into();
        self
    }

    /// Pin both variants to a single model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        let m = model.into();
        self.config.flash_model = m.clone();
        self.config.pro_model = m;
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn AnalysisProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.config.instructions = Some(instructions.into());
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AnalysisConfig, DocwiseError> {
        let c = &self.config;
        if c.target_language.trim().is_empty() {
            return Err(DocwiseError::InvalidConfig(
                "target_language must not be empty".into(),
            ));
        }
        if c.flash_model.trim().is_empty() || c.pro_model.trim().is_empty() {
            return Err(DocwiseError::InvalidConfig(
                "model identifiers must not be empty".into(),
            ));
        }
        if c.api_timeout_secs == 0 {
            return Err(DocwiseError::InvalidConfig(
                "api_timeout_secs must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = AnalysisConfig::default();
        assert_eq!(c.persona, Persona::Individual);
        assert_eq!(c.target_language, "Simple English");
        assert_eq!(c.flash_model, "gemini-3-flash-preview");
        assert_eq!(c.pro_model, "gemini-3-pro-preview");
    }

    #[test]
    fn builder_rejects_empty_language() {
        let err = AnalysisConfig::builder()
            .target_language("  ")
            .build()
            .unwrap_err();
        assert!(matches!(err, DocwiseError::InvalidConfig(_)));
    }

    #[test]
    fn single_model_pin() {
        let c = AnalysisConfig::builder().model("gemini-3-pro-preview").build().unwrap();
        assert_eq!(c.flash_model, c.pro_model);
    }

    #[test]
    fn persona_wire_names() {
        assert_eq!(
            serde_json::to_string(&Persona::SmallBusiness).unwrap(),
            r#""Small Business""#
        );
        assert_eq!(Persona::Freelancer.to_string(), "Freelancer");
    }

    #[test]
    fn debug_redacts_api_key() {
        let c = AnalysisConfig::builder().api_key("secret").build().unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("secret"));
        assert!(dbg.contains("redacted"));
    }
}
