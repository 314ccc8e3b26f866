use crate::error::{Result, SiteError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub assets_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub exclude_pattern: Option<String>,
    /// マニフェストに書き込むURLの接頭辞
    pub source_prefix: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SiteError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("reunion-site").join("config.json"))
    }

    pub fn default_config() -> Self {
        Self {
            assets_dir: None,
            output: None,
            exclude_pattern: None,
            source_prefix: "assets".into(),
        }
    }

    /// コマンドライン引数 > 環境変数 > 設定ファイル の順で解決
    pub fn resolve_assets_dir(&self, arg: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = arg {
            return Ok(dir);
        }
        if let Ok(dir) = std::env::var("REUNION_ASSETS_DIR") {
            return Ok(PathBuf::from(dir));
        }
        self.assets_dir.clone().ok_or(SiteError::MissingAssetsDir)
    }

    pub fn set_assets_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.assets_dir = Some(dir);
        self.save()
    }

    pub fn set_exclude_pattern(&mut self, pattern: String) -> Result<()> {
        regex::Regex::new(&pattern)?;
        self.exclude_pattern = Some(pattern);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_config();
        assert!(config.assets_dir.is_none());
        assert_eq!(config.source_prefix, "assets");
    }

    #[test]
    fn test_argument_takes_precedence() {
        let config = Config {
            assets_dir: Some(PathBuf::from("/from/config")),
            ..Config::default_config()
        };
        let dir = config.resolve_assets_dir(Some(PathBuf::from("/from/arg"))).unwrap();
        assert_eq!(dir, PathBuf::from("/from/arg"));
    }

    #[test]
    fn test_partial_config_json() {
        let config: Config = serde_json::from_str(r#"{"exclude_pattern": "-draft$"}"#).unwrap();
        assert_eq!(config.exclude_pattern.as_deref(), Some("-draft$"));
        assert!(config.output.is_none());
    }
}
