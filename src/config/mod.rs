use crate::core::calculator::PayrollPolicy;
use crate::core::seed::DEFAULT_LEADER_COMMENT;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
    #[serde(default = "default_leader_comment")]
    pub default_leader_comment: String,

    // payroll policy, rates in basis points
    #[serde(default = "default_insurance_rate_bp")]
    pub insurance_rate_bp: i64,
    #[serde(default = "default_provident_fund_rate_bp")]
    pub provident_fund_rate_bp: i64,
    #[serde(default = "default_tax_rate_bp")]
    pub tax_rate_bp: i64,
    #[serde(default = "default_standard_threshold")]
    pub standard_threshold: i64,
    #[serde(default = "default_special_threshold")]
    pub special_threshold: i64,
}

fn default_separator_char() -> String {
    "-".to_string()
}
fn default_leader_comment() -> String {
    DEFAULT_LEADER_COMMENT.to_string()
}
fn default_insurance_rate_bp() -> i64 {
    PayrollPolicy::default().insurance_rate_bp
}
fn default_provident_fund_rate_bp() -> i64 {
    PayrollPolicy::default().provident_fund_rate_bp
}
fn default_tax_rate_bp() -> i64 {
    PayrollPolicy::default().tax_rate_bp
}
fn default_standard_threshold() -> i64 {
    PayrollPolicy::default().standard_threshold
}
fn default_special_threshold() -> i64 {
    PayrollPolicy::default().special_threshold
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        let policy = PayrollPolicy::default();
        Self {
            database: db_path.to_string_lossy().to_string(),
            separator_char: default_separator_char(),
            default_leader_comment: default_leader_comment(),
            insurance_rate_bp: policy.insurance_rate_bp,
            provident_fund_rate_bp: policy.provident_fund_rate_bp,
            tax_rate_bp: policy.tax_rate_bp,
            standard_threshold: policy.standard_threshold,
            special_threshold: policy.special_threshold,
        }
    }

    /// `~/.perfpay`, or `./.perfpay` when no home directory is known.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".perfpay")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("perfpay.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("perfpay.sqlite")
    }

    pub fn policy(&self) -> PayrollPolicy {
        PayrollPolicy {
            insurance_rate_bp: self.insurance_rate_bp,
            provident_fund_rate_bp: self.provident_fund_rate_bp,
            tax_rate_bp: self.tax_rate_bp,
            standard_threshold: self.standard_threshold,
            special_threshold: self.special_threshold,
        }
    }

    /// Load the configuration file, or defaults if there is none.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> AppResult<Self> {
        let cfg: Config = serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("cannot parse configuration: {e}")))?;
        cfg.policy()
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Create the config directory and file. Returns the resolved database path.
    ///
    /// A relative `custom_db` is placed inside the config directory.
    /// In test mode the config file is left alone.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(":memory:") => PathBuf::from(":memory:"),
            Some(name) => {
                let p = Path::new(name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Self::with_database(db_path);

        if !is_test {
            fs::create_dir_all(&dir)?;
            fs::write(Self::config_file(), config.to_yaml()?)?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        if let Some(parent) = Path::new(&config.database).parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = Config::parse("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.policy(), PayrollPolicy::default());
        assert_eq!(cfg.default_leader_comment, DEFAULT_LEADER_COMMENT);
        assert_eq!(cfg.separator_char, "-");
    }

    #[test]
    fn policy_fields_are_read() {
        let cfg = Config::parse(
            "database: db.sqlite\ntax_rate_bp: 500\nspecial_threshold: 12000\n",
        )
        .unwrap();
        let p = cfg.policy();
        assert_eq!(p.tax_rate_bp, 500);
        assert_eq!(p.special_threshold, 12000);
        assert_eq!(p.insurance_rate_bp, 1250);
    }

    #[test]
    fn invalid_policy_is_a_config_error() {
        let err = Config::parse("database: db.sqlite\ninsurance_rate_bp: 20000\n").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = Config::parse("database: [unclosed").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn yaml_round_trips() {
        let cfg = Config::default();
        let back = Config::parse(&cfg.to_yaml().unwrap()).unwrap();
        assert_eq!(back.database, cfg.database);
        assert_eq!(back.policy(), cfg.policy());
    }
}
