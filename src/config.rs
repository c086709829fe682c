//! Startup configuration.
//!
//! Two settings, the snapshot directory and the keyword list. Each is taken
//! from the first layer that sets it: command line, then the `datapath` and
//! `keyword_list` environment variables, then the nearest `.env` file, then
//! the optional config file (`~/.config/jobtrend/config.toml` or the platform
//! equivalent).

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{Error, Result};

pub const DATA_DIR_VAR: &str = "datapath";
pub const KEYWORDS_VAR: &str = "keyword_list";

pub struct Config {
    pub data_dir: PathBuf,
    pub keywords: Vec<String>,
    pub verbose: bool,
}

/// Contents of `config.toml`. Both keys are optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub keywords: Option<Vec<String>>,
}

/// Location of the config file, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "jobtrend")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Read a config file. A missing file is an empty config, a malformed one is an error.
pub fn read_file_config(path: &Path) -> Result<FileConfig> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(FileConfig::default()),
        Err(source) => {
            return Err(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
}

fn collect_dotenv<R: Read>(iter: dotenvy::Iter<R>) -> Result<HashMap<String, String>> {
    iter.map(|item| item.map_err(|e| Error::Config(format!("malformed .env file: {e}"))))
        .collect()
}

/// Variables from the nearest `.env`, searching upward from the working directory.
pub fn dotenv_vars() -> Result<HashMap<String, String>> {
    match dotenvy::dotenv_iter() {
        Ok(iter) => collect_dotenv(iter),
        Err(e) if e.not_found() => Ok(HashMap::new()),
        Err(e) => Err(Error::Config(format!(".env: {e}"))),
    }
}

/// Variables from a specific `.env` file. A missing file yields nothing.
pub fn read_dotenv(path: &Path) -> Result<HashMap<String, String>> {
    match dotenvy::from_path_iter(path) {
        Ok(iter) => collect_dotenv(iter),
        Err(e) if e.not_found() => Ok(HashMap::new()),
        Err(e) => Err(Error::Config(format!("{}: {e}", path.display()))),
    }
}

/// Process environment first, `.env` values only for unset variables.
pub fn env_with_dotenv<'a>(
    real: impl Fn(&str) -> Option<String> + 'a,
    dotenv: &'a HashMap<String, String>,
) -> impl Fn(&str) -> Option<String> + 'a {
    move |key: &str| real(key).or_else(|| dotenv.get(key).cloned())
}

fn parse_keywords(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw).map_err(|e| {
        Error::Config(format!("{KEYWORDS_VAR} must be a JSON array of strings: {e}"))
    })
}

impl Config {
    /// Resolve from the real environment and the default config file.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = match config_path() {
            Some(path) => {
                log::debug!("reading config file {}", path.display());
                read_file_config(&path)?
            }
            None => FileConfig::default(),
        };

        let dotenv = dotenv_vars()?;
        if !dotenv.is_empty() {
            log::debug!("read {} variables from .env", dotenv.len());
        }

        Self::resolve(
            file,
            env_with_dotenv(|key| std::env::var(key).ok(), &dotenv),
            cli.data_dir.clone(),
            cli.verbose,
        )
    }

    /// Merge the layers. `env` looks up a variable by name.
    pub fn resolve(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
        data_dir_override: Option<PathBuf>,
        verbose: bool,
    ) -> Result<Self> {
        let data_dir = data_dir_override
            .or_else(|| env(DATA_DIR_VAR).filter(|v| !v.is_empty()).map(PathBuf::from))
            .or(file.data_dir)
            .ok_or_else(|| {
                Error::Config(format!(
                    "no data directory: set {DATA_DIR_VAR}, pass --data-dir or add data_dir to the config file"
                ))
            })?;

        let keywords = match env(KEYWORDS_VAR) {
            Some(raw) => parse_keywords(&raw)?,
            None => file.keywords.ok_or_else(|| {
                Error::Config(format!(
                    "no keyword list: set {KEYWORDS_VAR} or add keywords to the config file"
                ))
            })?,
        };

        Ok(Config {
            data_dir,
            keywords,
            verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn reads_both_settings_from_env() {
        let env = env_of(&[("datapath", "/data/jobs"), ("keyword_list", r#"["python", "rust"]"#)]);
        let config = Config::resolve(FileConfig::default(), env, None, false).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/data/jobs"));
        assert_eq!(config.keywords, vec!["python", "rust"]);
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let file = FileConfig {
            data_dir: Some(PathBuf::from("/from/file")),
            keywords: Some(vec!["go".to_string()]),
        };
        let env = env_of(&[("datapath", "/from/env"), ("keyword_list", r#"["python"]"#)]);

        let config =
            Config::resolve(file, env, Some(PathBuf::from("/from/cli")), true).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/from/cli"));
        assert_eq!(config.keywords, vec!["python"]);
        assert!(config.verbose);
    }

    #[test]
    fn file_fills_missing_env() {
        let file = FileConfig {
            data_dir: Some(PathBuf::from("/from/file")),
            keywords: Some(vec!["go".to_string()]),
        };
        let config = Config::resolve(file, env_of(&[]), None, false).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/from/file"));
        assert_eq!(config.keywords, vec!["go"]);
    }

    #[test]
    fn missing_data_dir_is_an_error() {
        let env = env_of(&[("keyword_list", r#"["python"]"#)]);
        let result = Config::resolve(FileConfig::default(), env, None, false);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn missing_keywords_is_an_error() {
        let env = env_of(&[("datapath", "/data")]);
        let result = Config::resolve(FileConfig::default(), env, None, false);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn malformed_keyword_list_is_an_error() {
        for raw in ["python, rust", r#"{"a": 1}"#, "[1, 2]", ""] {
            let env = env_of(&[("datapath", "/data"), ("keyword_list", raw)]);
            let result = Config::resolve(FileConfig::default(), env, None, false);
            assert!(matches!(result, Err(Error::Config(_))), "accepted {raw:?}");
        }
    }

    #[test]
    fn config_file_round_trip_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_dir = \"/srv/jobs\"\nkeywords = [\"python\", \"aws\"]\n").unwrap();

        let file = read_file_config(&path).unwrap();
        assert_eq!(file.data_dir, Some(PathBuf::from("/srv/jobs")));
        assert_eq!(file.keywords, Some(vec!["python".to_string(), "aws".to_string()]));
    }

    #[test]
    fn missing_config_file_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = read_file_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(file, FileConfig::default());
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "keywords = \"python\"\n").unwrap();
        assert!(matches!(read_file_config(&path), Err(Error::Config(_))));
    }

    #[test]
    fn dotenv_fills_unset_variables_only() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "datapath=/from/dotenv\nkeyword_list='[\"python\", \"rust\"]'\n",
        )
        .unwrap();

        let dotenv = read_dotenv(&path).unwrap();
        let real = env_of(&[("datapath", "/from/env")]);
        let config =
            Config::resolve(FileConfig::default(), env_with_dotenv(real, &dotenv), None, false)
                .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/from/env"));
        assert_eq!(config.keywords, vec!["python", "rust"]);
    }

    #[test]
    fn missing_dotenv_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(read_dotenv(&dir.path().join(".env")).unwrap().is_empty());
    }

    #[test]
    fn malformed_dotenv_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "keyword_list='[\"python\"]\n").unwrap();

        assert!(matches!(read_dotenv(&path), Err(Error::Config(_))));
    }
}
