//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid exclusion pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid event date: {0}")]
    InvalidDate(#[from] chrono::ParseError),

    #[error("Unsupported manifest version: {0}")]
    ManifestVersion(u32),

    #[error("Invalid site configuration: {0}")]
    InvalidConfig(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// フォーム入力の検証エラー（ネットワーク呼び出し前に同期的に判定）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("{0} is required")]
    Required(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),

    #[error("At most {0} additional guests are allowed")]
    TooManyGuests(u8),
}

/// バックエンド呼び出しのエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{0}")]
    Service(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Not signed in")]
    NoSession,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_from_regex() {
        let regex_error = regex::Regex::new("(").unwrap_err();
        let error: Error = regex_error.into();
        assert!(matches!(error, Error::InvalidPattern(_)));
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::MissingFields.to_string(), "Please fill in all fields");
        assert_eq!(
            ValidationError::PasswordTooShort(6).to_string(),
            "Password must be at least 6 characters long"
        );
        assert_eq!(ValidationError::Required("Full name").to_string(), "Full name is required");
    }

    #[test]
    fn test_service_error_passes_message_through() {
        let error = ServiceError::Service("Invalid login credentials".to_string());
        assert_eq!(error.to_string(), "Invalid login credentials");
    }
}
