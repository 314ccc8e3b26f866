use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("アセットフォルダが指定されていません。`reunion-site config --set-assets-dir DIR` で設定してください")]
    MissingAssetsDir,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("マニフェストが不正: {0}")]
    InvalidManifest(#[from] reunion_common::Error),

    #[error("除外パターンが不正: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("中断しました")]
    Aborted,
}

pub type Result<T> = std::result::Result<T, SiteError>;
