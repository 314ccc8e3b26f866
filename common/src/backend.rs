//! ホスティング型バックエンド（認証・テーブル挿入）の抽象
//!
//! ワイヤプロトコルはWeb側の実装が持つ。ここでは画面から見た能力
//! （セッション有無、挿入の成否）だけを定義する。

use crate::error::ServiceError;
use crate::forms::Credentials;
use serde::{Deserialize, Serialize};

/// ログインユーザー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// 認証セッション
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    pub user: User,
}

/// 認証サービス
#[allow(async_fn_in_trait)]
pub trait AuthService {
    async fn get_session(&self) -> Result<Option<Session>, ServiceError>;

    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<Session, ServiceError>;

    /// メール確認が必要な設定ではセッションは返らない
    async fn sign_up(&self, credentials: &Credentials) -> Result<Option<Session>, ServiceError>;

    async fn sign_out(&self) -> Result<(), ServiceError>;
}

/// 行の挿入
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    async fn insert(&self, table: &str, record: serde_json::Value) -> Result<(), ServiceError>;
}

/// リダイレクトURLのフラグメントに載ってくるトークン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFragment {
    pub access_token: String,
    pub refresh_token: String,
}

/// `#access_token=...&refresh_token=...` を解析する
///
/// エラー付きのフラグメントやトークンがない場合は None。
pub fn parse_session_fragment(hash: &str) -> Option<SessionFragment> {
    let hash = hash.trim_start_matches('#');
    let mut access_token = None;
    let mut refresh_token = String::new();

    for pair in hash.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        match key {
            "access_token" if !value.is_empty() => access_token = Some(value.to_string()),
            "refresh_token" => refresh_token = value.to_string(),
            "error" | "error_code" => return None,
            _ => {}
        }
    }

    access_token.map(|access_token| SessionFragment {
        access_token,
        refresh_token,
    })
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// エラーレスポンスをユーザー向けメッセージに変換
pub fn error_from_response(status: u16, body: &str) -> ServiceError {
    let message = serde_json::from_str::<ErrorBody>(body).ok().and_then(|b| {
        b.error_description
            .or(b.msg)
            .or(b.message)
            .or(b.error)
            .filter(|m| !m.trim().is_empty())
    });
    match message {
        Some(message) => ServiceError::Service(message),
        None => ServiceError::Service(format!("Request failed with status {}", status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session_fragment() {
        let fragment = parse_session_fragment(
            "#access_token=eyJhbGci.abc.def&expires_in=3600&refresh_token=r1&token_type=bearer&type=signup",
        )
        .unwrap();
        assert_eq!(fragment.access_token, "eyJhbGci.abc.def");
        assert_eq!(fragment.refresh_token, "r1");
    }

    #[test]
    fn test_parse_session_fragment_rejects_errors() {
        assert!(parse_session_fragment("").is_none());
        assert!(parse_session_fragment("#gallery").is_none());
        assert!(parse_session_fragment("#access_token=").is_none());
        assert!(parse_session_fragment(
            "#error=access_denied&error_code=403&error_description=Email+link+is+invalid"
        )
        .is_none());
    }

    #[test]
    fn test_error_from_response() {
        let err = error_from_response(
            400,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert_eq!(err, ServiceError::Service("Invalid login credentials".to_string()));

        let err = error_from_response(422, r#"{"code":422,"msg":"User already registered"}"#);
        assert_eq!(err.to_string(), "User already registered");

        let err = error_from_response(
            401,
            r#"{"message":"new row violates row-level security policy for table \"rsvps\""}"#,
        );
        assert!(err.to_string().contains("row-level security"));
    }

    #[test]
    fn test_error_from_unparseable_response() {
        let err = error_from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "Request failed with status 502");
    }

    #[test]
    fn test_session_deserialize() {
        let json = r#"{
            "access_token": "t",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "r",
            "user": {"id": "6b1f", "email": "alum@example.com", "role": "authenticated"}
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.user.email.as_deref(), Some("alum@example.com"));
    }
}
