//! 同窓会サイト用ツールライブラリ
//!
//! ギャラリー画像のスキャンとマニフェスト生成。表示ロジックは reunion-common にある。

pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod scanner;
