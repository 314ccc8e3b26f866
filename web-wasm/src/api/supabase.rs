//! Supabase REST/Auth 連携
//!
//! 認証（パスワードログイン・新規登録・ログアウト・ユーザー取得）と
//! テーブルへの行挿入。セッションは保持せず、呼び出し側がトークンを渡す。

use super::http;
use reunion_common::forms::Credentials;
use reunion_common::{ServiceError, Session, User};
use serde::{Deserialize, Serialize};

/// ビルド時に埋め込む接続先
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    /// `REUNION_SUPABASE_URL` / `REUNION_SUPABASE_ANON_KEY`
    pub fn from_env() -> Self {
        Self {
            url: option_env!("REUNION_SUPABASE_URL")
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_string(),
            anon_key: option_env!("REUNION_SUPABASE_ANON_KEY")
                .unwrap_or_default()
                .to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

/// signup のレスポンス（メール確認が必要ならトークンなし）
#[derive(Deserialize)]
struct SignUpResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

#[derive(Debug, Clone)]
pub struct SupabaseClient {
    config: BackendConfig,
}

impl SupabaseClient {
    pub fn new(config: BackendConfig) -> Self {
        if !config.is_configured() {
            log::warn!("バックエンドが未設定です（REUNION_SUPABASE_URL / REUNION_SUPABASE_ANON_KEY）");
        }
        Self { config }
    }

    fn ensure_configured(&self) -> Result<(), ServiceError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(ServiceError::Service("The registration service is not configured".into()))
        }
    }

    fn bearer(&self, access_token: Option<&str>) -> String {
        format!("Bearer {}", access_token.unwrap_or(&self.config.anon_key))
    }

    async fn post_json(
        &self,
        path: &str,
        body: &str,
        access_token: Option<&str>,
        prefer: Option<&str>,
    ) -> Result<web_sys::Response, ServiceError> {
        self.ensure_configured()?;
        let url = format!("{}{}", self.config.url, path);
        let bearer = self.bearer(access_token);
        let mut headers = vec![
            ("apikey", self.config.anon_key.as_str()),
            ("Authorization", bearer.as_str()),
            ("Content-Type", "application/json"),
        ];
        if let Some(prefer) = prefer {
            headers.push(("Prefer", prefer));
        }
        http::send("POST", &url, &headers, Some(body)).await
    }

    pub async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<Session, ServiceError> {
        let body = serde_json::to_string(&PasswordGrant {
            email: credentials.email.trim(),
            password: &credentials.password,
        })
        .map_err(|e| ServiceError::Decode(e.to_string()))?;

        let resp = self
            .post_json("/auth/v1/token?grant_type=password", &body, None, None)
            .await?;
        http::read_json(&resp).await
    }

    pub async fn sign_up(&self, credentials: &Credentials) -> Result<Option<Session>, ServiceError> {
        let body = serde_json::to_string(&PasswordGrant {
            email: credentials.email.trim(),
            password: &credentials.password,
        })
        .map_err(|e| ServiceError::Decode(e.to_string()))?;

        let resp = self.post_json("/auth/v1/signup", &body, None, None).await?;
        let signup: SignUpResponse = http::read_json(&resp).await?;

        Ok(match (signup.access_token, signup.user) {
            (Some(access_token), Some(user)) => Some(Session {
                access_token,
                refresh_token: signup.refresh_token.unwrap_or_default(),
                user,
            }),
            _ => None,
        })
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), ServiceError> {
        self.post_json("/auth/v1/logout", "{}", Some(access_token), None)
            .await
            .map(|_| ())
    }

    /// トークンからユーザーを取得（リダイレクト後のセッション復元用）
    pub async fn get_user(&self, access_token: &str) -> Result<User, ServiceError> {
        self.ensure_configured()?;
        let url = format!("{}/auth/v1/user", self.config.url);
        let bearer = self.bearer(Some(access_token));
        let headers = [
            ("apikey", self.config.anon_key.as_str()),
            ("Authorization", bearer.as_str()),
        ];
        let resp = http::send("GET", &url, &headers, None).await?;
        http::read_json(&resp).await
    }

    /// `POST /rest/v1/{table}` で1行挿入
    pub async fn insert(
        &self,
        table: &str,
        record: &serde_json::Value,
        access_token: Option<&str>,
    ) -> Result<(), ServiceError> {
        let body = serde_json::to_string(&[record]).map_err(|e| ServiceError::Decode(e.to_string()))?;
        let path = format!("/rest/v1/{}", table);
        self.post_json(&path, &body, access_token, Some("return=minimal"))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_backend() {
        let config = BackendConfig::default();
        assert!(!config.is_configured());
        let client = SupabaseClient { config };
        assert!(client.ensure_configured().is_err());
    }

    #[test]
    fn test_bearer_falls_back_to_anon_key() {
        let client = SupabaseClient {
            config: BackendConfig {
                url: "https://example.supabase.co".into(),
                anon_key: "anon".into(),
            },
        };
        assert_eq!(client.bearer(None), "Bearer anon");
        assert_eq!(client.bearer(Some("user-token")), "Bearer user-token");
    }
}
