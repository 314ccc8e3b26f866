//! 認証コンテキスト
//!
//! App のマウント時に作成して `provide_context` で配る。セッションはシグナルで持ち、
//! App のオーナーが破棄されると一緒に破棄される。

use crate::api::supabase::SupabaseClient;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reunion_common::forms::Credentials;
use reunion_common::{parse_session_fragment, AuthService, RecordStore, ServiceError, Session, User};

#[derive(Clone)]
pub struct AuthContext {
    client: SupabaseClient,
    session: RwSignal<Option<Session>>,
    loading: RwSignal<bool>,
}

impl AuthContext {
    pub fn new(client: SupabaseClient) -> Self {
        Self {
            client,
            session: RwSignal::new(None),
            loading: RwSignal::new(true),
        }
    }

    /// 起動時のセッション確認
    pub fn init(&self) {
        let ctx = self.clone();
        spawn_local(async move {
            if let Err(e) = ctx.get_session().await {
                log::warn!("セッション確認に失敗: {}", e);
            }
            ctx.loading.set(false);
        });
    }

    /// 現在のユーザー（リアクティブ）
    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.as_ref().map(|s| s.user.clone()))
    }

    pub fn user_untracked(&self) -> Option<User> {
        self.session.with_untracked(|s| s.as_ref().map(|s| s.user.clone()))
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    fn access_token(&self) -> Option<String> {
        self.session
            .with_untracked(|s| s.as_ref().map(|s| s.access_token.clone()))
    }

    /// メール確認リンク等で戻ってきた場合のトークンを読む
    async fn restore_from_url(&self) -> Result<Option<Session>, ServiceError> {
        let Some(location) = web_sys::window().map(|w| w.location()) else {
            return Ok(None);
        };
        let hash = location.hash().unwrap_or_default();
        let Some(fragment) = parse_session_fragment(&hash) else {
            return Ok(None);
        };

        let user = self.client.get_user(&fragment.access_token).await?;
        clear_url_fragment();
        Ok(Some(Session {
            access_token: fragment.access_token,
            refresh_token: fragment.refresh_token,
            user,
        }))
    }
}

/// トークン入りのフラグメントを履歴から消す
fn clear_url_fragment() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let path = window.location().pathname().unwrap_or_else(|_| "/".into());
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
    }
}

impl AuthService for AuthContext {
    async fn get_session(&self) -> Result<Option<Session>, ServiceError> {
        if let Some(session) = self.session.get_untracked() {
            return Ok(Some(session));
        }
        let restored = self.restore_from_url().await?;
        if restored.is_some() {
            log::info!("リダイレクトからセッションを復元");
            self.session.set(restored.clone());
        }
        Ok(restored)
    }

    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<Session, ServiceError> {
        let session = self.client.sign_in_with_password(credentials).await?;
        self.session.set(Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<Option<Session>, ServiceError> {
        let session = self.client.sign_up(credentials).await?;
        if session.is_some() {
            self.session.set(session.clone());
        } else {
            log::info!("確認メールを送信しました");
        }
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), ServiceError> {
        let token = self.access_token().ok_or(ServiceError::NoSession)?;
        // サーバー側の失敗に関わらずローカルのセッションは破棄する
        self.session.set(None);
        self.client.sign_out(&token).await
    }
}

impl RecordStore for AuthContext {
    async fn insert(&self, table: &str, record: serde_json::Value) -> Result<(), ServiceError> {
        let token = self.access_token();
        self.client.insert(table, &record, token.as_deref()).await
    }
}
