//! Log settings for the dcat binary.
//!
//! Sources, lowest to highest precedence:
//! - built-in defaults (human format, `warn`)
//! - `DCAT_LOG` / `DCAT_LOG_FORMAT`
//! - `-v`/`-q` and `--log-format`

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Environment variable selecting the level.
pub const ENV_LOG_LEVEL: &str = "DCAT_LOG";
/// Environment variable selecting the format.
pub const ENV_LOG_FORMAT: &str = "DCAT_LOG_FORMAT";

/// How events are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Plain text lines.
    #[default]
    #[value(alias = "console", alias = "pretty")]
    Human,
    /// One JSON object per event.
    #[value(alias = "json")]
    Jsonl,
}

/// Most verbose level emitted for the workspace crates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    #[value(alias = "warning")]
    Warn,
    Error,
    #[value(alias = "none", alias = "quiet")]
    Off,
}

/// Accepts any name or alias, case-insensitively.
fn parse_value<T: ValueEnum>(s: &str, what: &str) -> Result<T, String> {
    T::from_str(s.trim(), true).map_err(|_| format!("unknown log {what}: {s}"))
}

fn value_name<T: ValueEnum>(value: &T) -> String {
    value
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value(s, "format")
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&value_name(self))
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value(s, "level")
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&value_name(self))
    }
}

impl LogLevel {
    /// Level selected by `-v` repetitions; `None` keeps the configured level.
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Option<Self> {
        if quiet {
            return Some(LogLevel::Off);
        }
        match verbose {
            0 => None,
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
}

impl LogConfig {
    /// Layer the environment and then the command line over the defaults.
    ///
    /// Unparseable environment values are ignored.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        let env_level = std::env::var(ENV_LOG_LEVEL)
            .ok()
            .and_then(|v| v.parse().ok());
        let env_format = std::env::var(ENV_LOG_FORMAT)
            .ok()
            .and_then(|v| v.parse().ok());

        LogConfig {
            format: cli_format.or(env_format).unwrap_or_default(),
            level: cli_level.or(env_level).unwrap_or_default(),
        }
    }

    /// `EnvFilter` directives applying the level to the binary and every
    /// workspace library.
    pub fn directives(&self) -> String {
        ["dcat", "dcat_core", "dcat_math", "dcat_config"]
            .iter()
            .map(|target| format!("{}={}", target, self.level))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_parse_with_aliases() {
        assert_eq!("HUMAN".parse::<LogFormat>(), Ok(LogFormat::Human));
        assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Human));
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Jsonl));
        assert_eq!(
            "xml".parse::<LogFormat>(),
            Err("unknown log format: xml".to_string())
        );
    }

    #[test]
    fn levels_parse_with_aliases() {
        assert_eq!(" Trace ".parse::<LogLevel>(), Ok(LogLevel::Trace));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("none".parse::<LogLevel>(), Ok(LogLevel::Off));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn display_uses_canonical_names() {
        assert_eq!(LogFormat::Jsonl.to_string(), "jsonl");
        assert_eq!(LogLevel::Warn.to_string(), "warn");
        assert_eq!(LogLevel::Off.to_string(), "off");
    }

    #[test]
    fn verbosity_flags() {
        assert_eq!(LogLevel::from_verbosity(0, false), None);
        assert_eq!(LogLevel::from_verbosity(1, false), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_verbosity(2, false), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_verbosity(9, false), Some(LogLevel::Trace));
        assert_eq!(LogLevel::from_verbosity(2, true), Some(LogLevel::Off));
    }

    #[test]
    fn cli_values_win() {
        let config = LogConfig::from_env(Some(LogLevel::Error), Some(LogFormat::Jsonl));
        assert_eq!(config.level, LogLevel::Error);
        assert_eq!(config.format, LogFormat::Jsonl);
    }

    #[test]
    fn directives_cover_binary_and_libraries() {
        let config = LogConfig {
            format: LogFormat::Jsonl,
            level: LogLevel::Debug,
        };
        let directives = config.directives();
        assert_eq!(
            directives,
            "dcat=debug,dcat_core=debug,dcat_math=debug,dcat_config=debug"
        );
        assert!(directives.split(',').any(|d| d == "dcat=debug"));
        assert_eq!(LogConfig::default().level, LogLevel::Warn);
    }
}
