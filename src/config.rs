use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub api: ApiConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            api: ApiConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub model: String,
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Title of standalone HTML pages
    pub title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Html,
            title: "SEO Strategy Report".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The raw model response
    Markdown,
    #[default]
    Html,
    Typst,
    Pdf,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
            OutputFormat::Typst => "typ",
            OutputFormat::Pdf => "pdf",
        }
    }

    pub fn is_binary(self) -> bool {
        self == OutputFormat::Pdf
    }
}

impl Config {
    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::Config(format!("{}: {}", path.display(), e))),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.api.model, "gemini-2.5-flash");
        assert_eq!(config.api.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.output.format, OutputFormat::Html);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seo-strategy.toml");
        fs::write(
            &path,
            "[api]\nmodel = \"gemini-2.5-pro\"\n\n[output]\nformat = \"pdf\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.model, "gemini-2.5-pro");
        assert_eq!(config.api.timeout_secs, 120);
        assert_eq!(config.output.format, OutputFormat::Pdf);
        assert_eq!(config.output.title, "SEO Strategy Report");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(matches!(
            Config::from_toml("[api\nmodel = 1"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_toml("[output]\nformat = \"docx\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn format_extensions() {
        assert_eq!(OutputFormat::Markdown.extension(), "md");
        assert_eq!(OutputFormat::Typst.extension(), "typ");
        assert!(OutputFormat::Pdf.is_binary());
        assert!(!OutputFormat::Html.is_binary());
    }
}
