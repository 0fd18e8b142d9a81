//! Layered configuration.
//!
//! Sources are merged in increasing priority: built-in defaults, then a
//! `docinfo.toml` or `docinfo.json` in the working directory (or an explicit
//! file), then `DOCINFO_*` environment variables. Nested keys use a double
//! underscore, e.g. `DOCINFO_RESOLVER__EXTENSIONS`.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::doclet::DocletStyle;
use crate::error::{DocInfoError, Result};
use crate::fs::FileSystem;
use crate::resolver::{Resolver, ResolverOptions};

/// File names probed in the working directory, in order.
pub const CONFIG_FILES: &[&str] = &["docinfo.toml", "docinfo.json"];

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "DOCINFO_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocInfoConfig {
    /// Capture verbatim node text in `meta.text`.
    pub include_nodes: bool,
    pub resolver: ResolverOptions,
    pub doclet: DocletStyle,
}

impl DocInfoConfig {
    /// Loads configuration from every source.
    ///
    /// An explicit `path` must exist; its format follows the extension
    /// (`.json`, anything else is read as TOML).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::figment(path)?
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(config_error)
    }

    /// Defaults merged with the configuration file, without environment
    /// overrides.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match path {
            Some(path) if !path.is_file() => {
                return Err(DocInfoError::Config {
                    message: format!("config file '{}' not found", path.display()),
                });
            }
            Some(path) => Some(path.to_path_buf()),
            None => CONFIG_FILES
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.is_file()),
        };

        if let Some(file) = config_file {
            figment = if file.extension().is_some_and(|ext| ext == "json") {
                figment.merge(Json::file(file))
            } else {
                figment.merge(Toml::file(file))
            };
        }

        Ok(figment)
    }

    /// A resolver over `fs` with these settings.
    pub fn resolver(&self, fs: impl FileSystem + 'static) -> Resolver {
        Resolver::with_options(fs, self.resolver.clone()).include_nodes(self.include_nodes)
    }
}

fn config_error(error: figment::Error) -> DocInfoError {
    DocInfoError::Config {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn extract(figment: Figment) -> DocInfoConfig {
        figment.extract().map_err(config_error).unwrap()
    }

    #[test]
    fn defaults() {
        let config = DocInfoConfig::default();
        assert!(!config.include_nodes);
        assert_eq!(config.resolver.extensions, vec![".d.ts", ".ts"]);
        assert_eq!(config.doclet.max_line_width, 80);
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docinfo.toml");
        fs::write(
            &path,
            "include_nodes = true\n\n[resolver]\nnative_types = [\"Options\"]\n",
        )
        .unwrap();

        let config = extract(DocInfoConfig::figment(Some(&path)).unwrap());
        assert!(config.include_nodes);
        assert_eq!(config.resolver.native_types, vec!["Options"]);
        assert_eq!(config.resolver.extensions, vec![".d.ts", ".ts"]);
    }

    #[test]
    fn json_file_is_detected_by_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "doclet": { "max_line_width": 100 } }"#).unwrap();

        let config = extract(DocInfoConfig::figment(Some(&path)).unwrap());
        assert_eq!(config.doclet.max_line_width, 100);
        assert_eq!(config.doclet.min_break_column, 40);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let error = DocInfoConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(error, DocInfoError::Config { .. }));
    }

    #[test]
    fn malformed_values_are_config_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docinfo.toml");
        fs::write(&path, "include_nodes = \"sometimes\"\n").unwrap();

        let error = DocInfoConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(error, DocInfoError::Config { .. }));
    }
}
