use serde::Deserialize;

use crate::config::{ConfigError, Result};
use crate::core::record::RecordOptions;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrgchartConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_group_separator")]
    pub group_separator: String,
    #[serde(default = "default_field_separator")]
    pub field_separator: String,
    #[serde(default)]
    pub trim_fields: bool,
    #[serde(default)]
    pub skip_header: bool,
    #[serde(default)]
    pub comment_prefix: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            group_separator: default_group_separator(),
            field_separator: default_field_separator(),
            trim_fields: false,
            skip_header: false,
            comment_prefix: None,
        }
    }
}

impl InputConfig {
    pub fn record_options(&self) -> Result<RecordOptions> {
        Ok(RecordOptions {
            group_separator: single_char("group_separator", &self.group_separator)?,
            field_separator: single_char("field_separator", &self.field_separator)?,
            trim_fields: self.trim_fields,
            skip_header: self.skip_header,
            comment_prefix: self.comment_prefix.clone().filter(|p| !p.is_empty()),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Readable,
    Tree,
    Dot,
    Json,
}

fn single_char(name: &'static str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::InvalidSeparator {
            name,
            value: value.to_string(),
        }),
    }
}

fn default_group_separator() -> String {
    "\t".to_string()
}

fn default_field_separator() -> String {
    ",".to_string()
}

#[cfg(test)]
mod tests {
    use super::{OrgchartConfig, OutputFormat};
    use crate::config::ConfigError;
    use crate::core::record::RecordOptions;

    #[test]
    fn empty_config_reproduces_default_record_options() {
        let config: OrgchartConfig = toml::from_str("").expect("parse");
        assert_eq!(
            config.input.record_options().expect("options"),
            RecordOptions::default()
        );
        assert_eq!(config.output.format, OutputFormat::Readable);
    }

    #[test]
    fn reads_all_sections() {
        let config: OrgchartConfig = toml::from_str(
            r##"[input]
group_separator = "|"
field_separator = ";"
trim_fields = true
skip_header = true
comment_prefix = "#"

[output]
format = "tree"
"##,
        )
        .expect("parse");
        let options = config.input.record_options().expect("options");
        assert_eq!(options.group_separator, '|');
        assert_eq!(options.field_separator, ';');
        assert!(options.trim_fields);
        assert!(options.skip_header);
        assert_eq!(options.comment_prefix.as_deref(), Some("#"));
        assert_eq!(config.output.format, OutputFormat::Tree);
    }

    #[test]
    fn multi_char_separator_is_rejected() {
        let config: OrgchartConfig =
            toml::from_str("[input]\nfield_separator = \"::\"\n").expect("parse");
        assert!(matches!(
            config.input.record_options(),
            Err(ConfigError::InvalidSeparator { name: "field_separator", .. })
        ));

        let config: OrgchartConfig =
            toml::from_str("[input]\ngroup_separator = \"\"\n").expect("parse");
        assert!(config.input.record_options().is_err());
    }
}
