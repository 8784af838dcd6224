//! Engine configuration.
//!
//! [`RenderConfig`] deserializes from camelCase keys with every field
//! optional. [`ConfigOverrides`] merges a partial set of options over an
//! existing configuration.

use serde::Deserialize;
use shahneshan_renderer::DEFAULT_MAX_DEPTH;

/// Output format of the rendered document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
}

/// Rendering configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Base heading level. Accepted for page assembly; the scanner keeps the
    /// levels written in the source.
    pub heading_level: u8,
    /// Output format. Only HTML is produced.
    pub output_format: OutputFormat,
    /// Stylesheet passed through untouched to whoever assembles the page.
    pub custom_styles: String,
    /// Maximum nesting depth of blockquotes, list items, table cells and alerts.
    pub max_depth: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            heading_level: 1,
            output_format: OutputFormat::Html,
            custom_styles: String::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Partial configuration merged over an existing [`RenderConfig`].
///
/// All fields are optional. Only non-None values override the current config.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub heading_level: Option<u8>,
    pub output_format: Option<OutputFormat>,
    pub custom_styles: Option<String>,
    pub max_depth: Option<usize>,
}

impl RenderConfig {
    /// Apply overrides to the configuration.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(heading_level) = overrides.heading_level {
            self.heading_level = heading_level;
        }
        if let Some(output_format) = overrides.output_format {
            self.output_format = output_format;
        }
        if let Some(custom_styles) = &overrides.custom_styles {
            self.custom_styles.clone_from(custom_styles);
        }
        if let Some(max_depth) = overrides.max_depth {
            self.max_depth = max_depth;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.heading_level, 1);
        assert_eq!(config.output_format, OutputFormat::Html);
        assert_eq!(config.custom_styles, "");
        assert_eq!(config.max_depth, 64);
    }

    #[test]
    fn test_deserialize_empty_object_uses_defaults() {
        let config: RenderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_deserialize_camel_case_keys() {
        let config: RenderConfig = serde_json::from_str(
            r#"{"headingLevel": 2, "outputFormat": "html", "customStyles": "body{}", "maxDepth": 8}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            RenderConfig {
                heading_level: 2,
                output_format: OutputFormat::Html,
                custom_styles: "body{}".to_owned(),
                max_depth: 8,
            }
        );
    }

    #[test]
    fn test_unknown_output_format_is_rejected() {
        let result = serde_json::from_str::<RenderConfig>(r#"{"outputFormat": "pdf"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_overrides_keeps_unset_fields() {
        let mut config = RenderConfig {
            custom_styles: "a".to_owned(),
            ..Default::default()
        };
        let overrides: ConfigOverrides = serde_json::from_str(r#"{"maxDepth": 4}"#).unwrap();
        config.apply_overrides(&overrides);

        assert_eq!(config.max_depth, 4);
        assert_eq!(config.custom_styles, "a");
        assert_eq!(config.heading_level, 1);
    }

    #[test]
    fn test_apply_overrides_all_fields() {
        let mut config = RenderConfig::default();
        config.apply_overrides(&ConfigOverrides {
            heading_level: Some(3),
            output_format: Some(OutputFormat::Html),
            custom_styles: Some("p{}".to_owned()),
            max_depth: Some(10),
        });
        assert_eq!(config.heading_level, 3);
        assert_eq!(config.custom_styles, "p{}");
        assert_eq!(config.max_depth, 10);
    }
}
