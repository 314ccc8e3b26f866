//! メインアプリケーションコンポーネント

use crate::api::supabase::{BackendConfig, SupabaseClient};
use crate::auth::AuthContext;
use crate::components::{
    accommodation::Accommodation,
    contact::Contact,
    gallery::Gallery,
    home::Home,
    login_modal::LoginModal,
    nav_bar::NavBar,
    payment::Payment,
    rsvp::Rsvp,
    when_where::WhenWhere,
};
use leptos::prelude::*;
use reunion_common::SiteConfig;

/// サイト設定。`REUNION_SITE_CONFIG`（JSON）がビルド時に与えられていれば検証して使う
fn site_config() -> SiteConfig {
    let Some(json) = option_env!("REUNION_SITE_CONFIG") else {
        return SiteConfig::default();
    };
    match SiteConfig::from_json(json) {
        Ok(config) => config,
        Err(e) => {
            log::error!("サイト設定が不正なため既定値を使います: {}", e);
            SiteConfig::default()
        }
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let auth = AuthContext::new(SupabaseClient::new(BackendConfig::from_env()));
    auth.init();
    provide_context(auth);
    provide_context(site_config());

    // ログインモーダルの表示状態
    let login_open = RwSignal::new(false);

    view! {
        <NavBar login_open=login_open />
        <LoginModal open=login_open />
        <main>
            <Home />
            <WhenWhere />
            <Gallery />
            <Rsvp />
            <Payment />
            <Accommodation />
            <Contact />
        </main>
    }
}
