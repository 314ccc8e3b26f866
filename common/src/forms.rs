//! フォームモデル（RSVP・ログイン）と送信処理
//!
//! 入力検証はネットワーク呼び出しの前に同期的に行う。
//! 送信失敗時は入力値を保持し、自動リトライはしない。

use crate::backend::{AuthService, RecordStore, Session, User};
use crate::error::{ServiceError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// RSVPを書き込むテーブル
pub const RSVP_TABLE: &str = "rsvps";
/// 同伴者数の上限
pub const MAX_GUESTS: u8 = 4;
/// パスワードの最小文字数
pub const MIN_PASSWORD_LEN: usize = 6;

pub const RSVP_SUCCESS_MESSAGE: &str = "Thank you for your RSVP! We look forward to seeing you.";
pub const RSVP_FAILURE_MESSAGE: &str = "There was an error submitting your RSVP. Please try again.";

/// 出欠
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    #[default]
    Yes,
    No,
    Maybe,
}

impl Attendance {
    pub const ALL: [Attendance; 3] = [Attendance::Yes, Attendance::No, Attendance::Maybe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attendance::Yes => "yes",
            Attendance::No => "no",
            Attendance::Maybe => "maybe",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Attendance::Yes => "Yes, I will attend",
            Attendance::No => "No, I cannot attend",
            Attendance::Maybe => "Maybe",
        }
    }
}

impl fmt::Display for Attendance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attendance {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Attendance::Yes),
            "no" => Ok(Attendance::No),
            "maybe" => Ok(Attendance::Maybe),
            _ => Err(ValidationError::Required("Attendance")),
        }
    }
}

/// RSVPフォームの入力値
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsvpForm {
    pub name: String,
    pub email: String,
    pub attendance: Attendance,
    pub guests: u8,
}

/// `rsvps` テーブルの行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpRecord {
    pub name: String,
    pub email: String,
    pub attendance: Attendance,
    pub guests: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl RsvpForm {
    /// ログイン中ならメールアドレスを事前入力した初期状態
    pub fn prefilled(user: Option<&User>) -> Self {
        Self {
            email: user.and_then(|u| u.email.clone()).unwrap_or_default(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("Full name"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::Required("Email"));
        }
        if !is_plausible_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.guests > MAX_GUESTS {
            return Err(ValidationError::TooManyGuests(MAX_GUESTS));
        }
        Ok(())
    }

    pub fn to_record(&self, user: Option<&User>) -> RsvpRecord {
        RsvpRecord {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            attendance: self.attendance,
            guests: self.guests,
            user_id: user.map(|u| u.id.clone()),
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// 送信結果メッセージ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Success(String),
    Error(String),
}

impl FormStatus {
    pub fn message(&self) -> Option<&str> {
        match self {
            FormStatus::Idle => None,
            FormStatus::Success(m) | FormStatus::Error(m) => Some(m),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FormStatus::Error(_))
    }
}

/// RSVPを送信する
///
/// 成功時はフォームを初期化（ログイン中のメールは残す）、失敗時は入力値を保持する。
pub async fn submit_rsvp<S: RecordStore>(
    store: &S,
    form: &mut RsvpForm,
    user: Option<&User>,
) -> FormStatus {
    if let Err(e) = form.validate() {
        return FormStatus::Error(e.to_string());
    }

    let record = match serde_json::to_value(form.to_record(user)) {
        Ok(record) => record,
        Err(e) => {
            log::error!("RSVPのシリアライズに失敗: {}", e);
            return FormStatus::Error(RSVP_FAILURE_MESSAGE.to_string());
        }
    };

    match store.insert(RSVP_TABLE, record).await {
        Ok(()) => {
            log::info!("RSVP送信完了");
            *form = RsvpForm::prefilled(user);
            FormStatus::Success(RSVP_SUCCESS_MESSAGE.to_string())
        }
        Err(e) => {
            log::error!("RSVP送信エラー: {}", e);
            FormStatus::Error(RSVP_FAILURE_MESSAGE.to_string())
        }
    }
}

/// ログイン情報
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        Ok(())
    }
}

/// ログイン / 新規登録の切り替え
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    SignUp,
}

impl AuthMode {
    pub fn toggle(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::Login,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::SignUp => "Create Account",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::SignUp => "Sign Up",
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        match self {
            AuthMode::Login => "Create Account",
            AuthMode::SignUp => "Back to Login",
        }
    }
}

/// フォーム送信の失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// ログインまたは新規登録
pub async fn authenticate<A: AuthService>(
    auth: &A,
    mode: AuthMode,
    credentials: &Credentials,
) -> Result<Option<Session>, FormError> {
    credentials.validate()?;
    let session = match mode {
        AuthMode::Login => Some(auth.sign_in_with_password(credentials).await?),
        AuthMode::SignUp => auth.sign_up(credentials).await?,
    };
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    /// 挿入呼び出しを記録するモック
    #[derive(Default)]
    struct MockStore {
        fail: bool,
        inserts: RefCell<Vec<(String, serde_json::Value)>>,
    }

    impl RecordStore for MockStore {
        async fn insert(&self, table: &str, record: serde_json::Value) -> Result<(), ServiceError> {
            self.inserts.borrow_mut().push((table.to_string(), record));
            if self.fail {
                Err(ServiceError::Network("Failed to fetch".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct MockAuth {
        calls: RefCell<Vec<&'static str>>,
    }

    impl AuthService for MockAuth {
        async fn get_session(&self) -> Result<Option<Session>, ServiceError> {
            Ok(None)
        }

        async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<Session, ServiceError> {
            self.calls.borrow_mut().push("sign_in");
            if credentials.password == "wrong-password" {
                return Err(ServiceError::Service("Invalid login credentials".to_string()));
            }
            Ok(Session {
                access_token: "token".to_string(),
                refresh_token: String::new(),
                user: user(),
            })
        }

        async fn sign_up(&self, _credentials: &Credentials) -> Result<Option<Session>, ServiceError> {
            self.calls.borrow_mut().push("sign_up");
            Ok(None)
        }

        async fn sign_out(&self) -> Result<(), ServiceError> {
            Ok(())
        }
    }

    fn user() -> User {
        User {
            id: "6b1f".to_string(),
            email: Some("alum@example.com".to_string()),
        }
    }

    fn filled_form() -> RsvpForm {
        RsvpForm {
            name: "Priya Das".to_string(),
            email: "priya@example.com".to_string(),
            attendance: Attendance::Maybe,
            guests: 2,
        }
    }

    #[test]
    fn test_empty_required_field_never_inserts() {
        let store = MockStore::default();
        for form in [
            RsvpForm { name: "  ".to_string(), ..filled_form() },
            RsvpForm { email: String::new(), ..filled_form() },
        ] {
            let mut form = form;
            let status = block_on(submit_rsvp(&store, &mut form, None));
            assert!(status.is_error());
        }
        assert!(store.inserts.borrow().is_empty());
    }

    #[test]
    fn test_invalid_email_and_guest_count() {
        let mut form = RsvpForm { email: "priya.example.com".to_string(), ..filled_form() };
        assert_eq!(form.validate(), Err(ValidationError::InvalidEmail));
        form.email = "priya@example.com".to_string();
        form.guests = 9;
        assert_eq!(form.validate(), Err(ValidationError::TooManyGuests(MAX_GUESTS)));
    }

    #[test]
    fn test_successful_insert_clears_form_keeping_session_email() {
        let store = MockStore::default();
        let user = user();
        let mut form = filled_form();

        let status = block_on(submit_rsvp(&store, &mut form, Some(&user)));

        assert_eq!(status, FormStatus::Success(RSVP_SUCCESS_MESSAGE.to_string()));
        assert_eq!(form, RsvpForm::prefilled(Some(&user)));
        assert_eq!(form.email, "alum@example.com");

        let inserts = store.inserts.borrow();
        assert_eq!(inserts.len(), 1);
        assert_eq!(inserts[0].0, "rsvps");
        assert_eq!(inserts[0].1["attendance"], "maybe");
        assert_eq!(inserts[0].1["guests"], 2);
        assert_eq!(inserts[0].1["user_id"], "6b1f");
    }

    #[test]
    fn test_anonymous_insert_omits_user_id() {
        let store = MockStore::default();
        let mut form = filled_form();
        block_on(submit_rsvp(&store, &mut form, None));
        assert!(store.inserts.borrow()[0].1.get("user_id").is_none());
        assert_eq!(form, RsvpForm::default());
    }

    #[test]
    fn test_failed_insert_keeps_values() {
        let store = MockStore {
            fail: true,
            ..Default::default()
        };
        let mut form = filled_form();

        let status = block_on(submit_rsvp(&store, &mut form, None));

        assert_eq!(status, FormStatus::Error(RSVP_FAILURE_MESSAGE.to_string()));
        assert_eq!(form, filled_form());
        assert_eq!(store.inserts.borrow().len(), 1);
    }

    #[test]
    fn test_credentials_validation() {
        let creds = Credentials { email: String::new(), password: "secret1".to_string() };
        assert_eq!(creds.validate(), Err(ValidationError::MissingFields));

        let creds = Credentials { email: "a@b.c".to_string(), password: "12345".to_string() };
        assert_eq!(creds.validate(), Err(ValidationError::PasswordTooShort(6)));

        let creds = Credentials { email: "a@b.c".to_string(), password: "123456".to_string() };
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn test_authenticate_validates_before_calling_service() {
        let auth = MockAuth::default();
        let creds = Credentials { email: "a@b.c".to_string(), password: "123".to_string() };
        let result = block_on(authenticate(&auth, AuthMode::Login, &creds));
        assert!(matches!(result, Err(FormError::Validation(_))));
        assert!(auth.calls.borrow().is_empty());
    }

    #[test]
    fn test_authenticate_modes() {
        let auth = MockAuth::default();
        let creds = Credentials { email: "alum@example.com".to_string(), password: "reunion2000".to_string() };

        let session = block_on(authenticate(&auth, AuthMode::Login, &creds)).unwrap();
        assert!(session.is_some());

        let session = block_on(authenticate(&auth, AuthMode::SignUp, &creds)).unwrap();
        assert!(session.is_none());
        assert_eq!(*auth.calls.borrow(), vec!["sign_in", "sign_up"]);

        let bad = Credentials { password: "wrong-password".to_string(), ..creds };
        let err = block_on(authenticate(&auth, AuthMode::Login, &bad)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[test]
    fn test_auth_mode_toggle() {
        assert_eq!(AuthMode::Login.toggle(), AuthMode::SignUp);
        assert_eq!(AuthMode::SignUp.toggle().title(), "Login");
        assert_eq!(AuthMode::SignUp.toggle_label(), "Back to Login");
    }

    #[test]
    fn test_attendance_parse() {
        assert_eq!("maybe".parse::<Attendance>().unwrap(), Attendance::Maybe);
        assert!("sometimes".parse::<Attendance>().is_err());
    }
}
