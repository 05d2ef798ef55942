use adocx_engine::{HtmlOptions, Stylesheet};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read stylesheet at {stylesheet_path}: {source}")]
    StylesheetReadError {
        stylesheet_path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Xml,
    /// AsciiDoc text; only meaningful for Markdown inputs.
    Adoc,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Xml => "xml",
            OutputFormat::Adoc => "adoc",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    pub standalone: bool,
    pub xhtml: bool,
    /// `none`, `cdn`, or a path/URL linked from the document head.
    pub stylesheet: Option<String>,
    /// CSS file embedded into the document head. Takes precedence over `stylesheet`.
    pub inline_stylesheet: Option<PathBuf>,
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputFormat,
    pub output_dir: Option<PathBuf>,
    pub html: HtmlConfig,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in path settings
        config.output_dir = config
            .output_dir
            .map(|dir| Self::expand_path(&dir).unwrap_or(dir));
        config.html.inline_stylesheet = config
            .html
            .inline_stylesheet
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/adocx");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Renderer options for the `[html]` table. Inline stylesheets are read here.
    pub fn html_options(&self) -> Result<HtmlOptions, ConfigError> {
        let stylesheet = match (&self.html.inline_stylesheet, self.html.stylesheet.as_deref()) {
            (Some(path), _) => {
                let css = std::fs::read_to_string(path).map_err(|source| {
                    ConfigError::StylesheetReadError {
                        stylesheet_path: path.clone(),
                        source,
                    }
                })?;
                Stylesheet::Inline(css)
            }
            (None, None | Some("none")) => Stylesheet::None,
            (None, Some("cdn")) => Stylesheet::Cdn,
            (None, Some(link)) => Stylesheet::Link(link.to_string()),
        };

        Ok(HtmlOptions {
            standalone: self.html.standalone,
            xhtml: self.html.xhtml,
            stylesheet,
            lang: self.html.lang.clone(),
            ..HtmlOptions::default()
        })
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
