//! Identification settings.
//!
//! ```toml
//! max_enumeration_vertices = 12
//! formula_style = "latex"
//! ```
//!
//! Missing keys fall back to [`defaults`].

use serde::{Deserialize, Serialize};

use crate::error::IdentifyError;

/// Compiled defaults.
pub mod defaults {
    use super::FormulaStyle;

    /// Largest candidate universe an exhaustive enumerator will sweep.
    pub const DEFAULT_MAX_ENUMERATION_VERTICES: usize = 20;
    pub const DEFAULT_FORMULA_STYLE: FormulaStyle = FormulaStyle::Plain;
}

/// How estimands are rendered by [`crate::Identifier::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormulaStyle {
    /// Unicode text: `Σ_z P(y | x, z) P(z)`.
    #[default]
    Plain,
    /// LaTeX: `\sum_{z} P(y \mid x, z) P(z)`.
    Latex,
}

/// Settings for an [`crate::Identifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifyConfig {
    /// Exhaustive enumerators refuse candidate universes larger than this.
    pub max_enumeration_vertices: usize,
    pub formula_style: FormulaStyle,
}

impl Default for IdentifyConfig {
    fn default() -> Self {
        Self {
            max_enumeration_vertices: defaults::DEFAULT_MAX_ENUMERATION_VERTICES,
            formula_style: defaults::DEFAULT_FORMULA_STYLE,
        }
    }
}

impl IdentifyConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(toml_str: &str) -> Result<Self, IdentifyError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), IdentifyError> {
        if self.max_enumeration_vertices == 0 {
            return Err(IdentifyError::Validation {
                field: "max_enumeration_vertices".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_formula_style(mut self, style: FormulaStyle) -> Self {
        self.formula_style = style;
        self
    }

    pub fn with_max_enumeration_vertices(mut self, limit: usize) -> Self {
        self.max_enumeration_vertices = limit;
        self
    }

    /// `true` if a sweep over `size` free vertices is allowed.
    pub(crate) fn allows_enumeration(&self, size: usize) -> bool {
        size <= self.max_enumeration_vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IdentifyConfig::default();
        assert_eq!(config.max_enumeration_vertices, 20);
        assert_eq!(config.formula_style, FormulaStyle::Plain);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = IdentifyConfig::from_toml("formula_style = \"latex\"").unwrap();
        assert_eq!(config.formula_style, FormulaStyle::Latex);
        assert_eq!(config.max_enumeration_vertices, 20);

        let empty = IdentifyConfig::from_toml("").unwrap();
        assert_eq!(empty, IdentifyConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_bad_input() {
        assert!(matches!(
            IdentifyConfig::from_toml("formula_style = \"html\""),
            Err(IdentifyError::InvalidConfig(_))
        ));
        assert!(matches!(
            IdentifyConfig::from_toml("max_enumeration_vertices = 0"),
            Err(IdentifyError::Validation { .. })
        ));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = IdentifyConfig::default()
            .with_formula_style(FormulaStyle::Latex)
            .with_max_enumeration_vertices(8);
        let text = toml::to_string(&config).unwrap();
        assert_eq!(IdentifyConfig::from_toml(&text).unwrap(), config);
    }
}
