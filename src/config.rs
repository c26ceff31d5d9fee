use std::fs;
use std::io;
use std::path::Path;

use crate::lexer::DEFAULT_MAX_LINE_LENGTH;

pub const DEFAULT_PROMPT: &str = "shell: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    pub max_line_length: usize,
    pub show_prompt: bool,
}

impl Default for Config {
    fn default() -> Self {
        ConfigLoader::default_config()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] io::Error),
    #[error("config line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: DEFAULT_PROMPT.to_string(),
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            show_prompt: true,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let src = fs::read_to_string(path)?;
        Self::load_from_str(&src)
    }

    /// Parses `key=value` lines. Blank lines and lines starting with '#'
    /// are skipped. The prompt value is kept verbatim so it may end in a
    /// space.
    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = Self::default_config();

        for (idx, line) in src.lines().enumerate() {
            let lineno = idx + 1;
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(parse_error(lineno, format!("no '=' found: {}", line)));
            };

            match key.trim() {
                "prompt" => config.prompt = value.to_string(),
                "max_line_length" => {
                    config.max_line_length = match value.trim().parse::<usize>() {
                        Ok(n) if n > 0 => n,
                        _ => return Err(parse_error(lineno, format!("invalid length: {}", value))),
                    };
                }
                "show_prompt" => {
                    config.show_prompt = match value.trim() {
                        "true" => true,
                        "false" => false,
                        other => return Err(parse_error(lineno, format!("invalid boolean: {}", other))),
                    };
                }
                other => return Err(parse_error(lineno, format!("unknown key: {}", other))),
            }
        }

        Ok(config)
    }
}

fn parse_error(line: usize, message: String) -> ConfigError {
    ConfigError::Parse { line, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigLoader::load_from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.prompt, "shell: ");
        assert_eq!(config.max_line_length, 512);
        assert!(config.show_prompt);
    }

    #[test]
    fn test_all_keys() {
        let src = "# pipesh config\n\nprompt=$ \nmax_line_length = 1024\nshow_prompt=false\n";
        let config = ConfigLoader::load_from_str(src).unwrap();
        assert_eq!(
            config,
            Config {
                prompt: "$ ".to_string(),
                max_line_length: 1024,
                show_prompt: false,
            }
        );
    }

    #[test]
    fn test_unknown_key() {
        let err = ConfigLoader::load_from_str("prompt=> \nhistory=100\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_invalid_values() {
        assert!(ConfigLoader::load_from_str("max_line_length=0").is_err());
        assert!(ConfigLoader::load_from_str("max_line_length=lots").is_err());
        assert!(ConfigLoader::load_from_str("show_prompt=yes").is_err());
        assert!(ConfigLoader::load_from_str("prompt").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeshrc");
        fs::write(&path, "show_prompt=false\n").unwrap();
        assert!(!ConfigLoader::load_from_file(&path).unwrap().show_prompt);
        assert!(matches!(
            ConfigLoader::load_from_file(dir.path().join("missing")),
            Err(ConfigError::Io(_))
        ));
    }
}
