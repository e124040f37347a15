use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// API 키 환경변수
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: String,
    pub api_base: String,
    pub bind: String,
    pub max_image_size: u32,
    pub timeout_seconds: u64,
    pub temperature: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".into(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".into(),
            bind: "127.0.0.1:3000".into(),
            max_image_size: 1600,
            timeout_seconds: 120,
            temperature: 0.2,
        }
    }
}

impl Config {
    /// 설정 파일이 없으면 기본값
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Config("홈 디렉터리를 찾을 수 없습니다".into()))?;
        Ok(home.join(".config").join("checkmyroom").join("config.json"))
    }
}

/// 환경변수에서 API 키를 읽는다 (빈 값은 없는 것으로 본다)
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"bind": "0.0.0.0:8080"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.bind, "0.0.0.0:8080");
        assert_eq!(config.max_image_size, 1600);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            temperature: 0.0,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_broken_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load_from(&path), Err(AppError::Json(_))));
    }
}
