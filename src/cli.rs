use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reunion-site")]
#[command(about = "同窓会サイトのギャラリーマニフェスト生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// アセットフォルダ（Then/ Now/）をスキャンして gallery.json を出力
    Scan {
        /// アセットフォルダのパス（省略時は設定ファイルの値）
        assets_dir: Option<PathBuf>,

        /// 出力JSONファイル（デフォルト: gallery.json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ラベルがこの正規表現に一致する画像を除外
        #[arg(short, long)]
        exclude: Option<String>,

        /// sourceに付けるURL接頭辞
        #[arg(long)]
        prefix: Option<String>,

        /// 既存ファイルを確認なしで上書き
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// gallery.json を検証してカテゴリ別の件数を表示
    Check {
        /// マニフェストJSONファイル
        #[arg(required = true)]
        manifest: PathBuf,

        /// ラベル除外パターン（Web側と同じ条件で確認）
        #[arg(short, long)]
        exclude: Option<String>,

        /// sourceの実ファイルを確認するWebルート
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// 設定管理
    Config {
        /// アセットフォルダを設定
        #[arg(long)]
        set_assets_dir: Option<PathBuf>,

        /// 除外パターンを設定
        #[arg(long)]
        set_exclude: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
