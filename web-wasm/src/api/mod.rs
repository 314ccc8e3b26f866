//! 外部との通信

pub mod assets;
pub mod http;
pub mod supabase;
