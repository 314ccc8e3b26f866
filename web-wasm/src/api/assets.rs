//! ギャラリーマニフェストの取得

use super::http;
use reunion_common::{Category, GalleryManifest, ImageItem, ImageLoader};

/// マニフェストを取得してカテゴリ別のアイテムに展開する
///
/// 取得・解析に失敗したらログを出して空を返す。ギャラリー全体は失敗させない。
pub async fn load_gallery(manifest_url: &str, exclude: Option<&str>) -> Vec<(Category, Vec<ImageItem>)> {
    let manifest = match http::get_text(manifest_url).await {
        Ok(text) => match GalleryManifest::from_json(&text) {
            Ok(manifest) => manifest,
            Err(e) => {
                log::error!("マニフェストの解析に失敗: {}", e);
                GalleryManifest::default()
            }
        },
        Err(e) => {
            log::error!("マニフェストの取得に失敗 ({}): {}", manifest_url, e);
            GalleryManifest::default()
        }
    };

    let loader = match exclude.map(|pattern| ImageLoader::new(&manifest).exclude(pattern)) {
        Some(Ok(loader)) => loader,
        Some(Err(e)) => {
            log::warn!("除外パターンを無視します: {}", e);
            ImageLoader::new(&manifest)
        }
        None => ImageLoader::new(&manifest),
    };

    Category::ALL
        .into_iter()
        .map(|category| {
            let items: Vec<_> = loader.load(category).collect();
            log::debug!("{}: {}枚", category, items.len());
            (category, items)
        })
        .collect()
}
