mod exif;

use crate::error::{Result, SiteError};
use reunion_common::Category;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub category: Category,
    pub path: PathBuf,
    pub file_name: String,
    pub date: Option<String>,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

/// アセットフォルダ直下の Then/ Now/ をスキャン
///
/// カテゴリのフォルダがなければ空として扱う。
pub fn scan_assets(assets_dir: &Path) -> Result<Vec<ImageInfo>> {
    if !assets_dir.is_dir() {
        return Err(SiteError::FolderNotFound(assets_dir.display().to_string()));
    }

    let mut images = Vec::new();
    for category in Category::ALL {
        let folder = assets_dir.join(category.dir_name());
        if !folder.is_dir() {
            tracing::warn!("{} フォルダがありません: {}", category, folder.display());
            continue;
        }
        images.extend(scan_folder(&folder, category)?);
    }
    Ok(images)
}

pub fn scan_folder(folder: &Path, category: Category) -> Result<Vec<ImageInfo>> {
    if !folder.exists() {
        return Err(SiteError::FolderNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let Some(ext) = path.extension() else {
            continue;
        };
        if !is_image_extension(&ext.to_string_lossy()) {
            tracing::debug!("画像以外をスキップ: {}", path.display());
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let date = exif::extract_date(path).ok();

        images.push(ImageInfo {
            category,
            path: path.to_path_buf(),
            file_name,
            date,
        });
    }

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension("jpg"));
        assert!(is_image_extension("JPG"));
        assert!(is_image_extension("jpeg"));
        assert!(is_image_extension("png"));
        assert!(!is_image_extension("txt"));
        assert!(!is_image_extension("gif"));
    }

    #[test]
    fn test_scan_folder_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("c.jpg")).unwrap();
        File::create(dir.path().join("a.JPG")).unwrap();
        File::create(dir.path().join("b.png")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();

        let result = scan_folder(dir.path(), Category::Then).unwrap();
        let names: Vec<_> = result.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.JPG", "b.png", "c.jpg"]);
        assert!(result.iter().all(|i| i.category == Category::Then));
    }

    #[test]
    fn test_scan_assets_missing_category_is_empty() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Now")).unwrap();
        File::create(dir.path().join("Now").join("meet.jpg")).unwrap();

        let result = scan_assets(dir.path()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, Category::Now);
    }

    #[test]
    fn test_scan_assets_not_found() {
        let result = scan_assets(Path::new("/nonexistent/assets/12345"));
        assert!(matches!(result, Err(SiteError::FolderNotFound(_))));
    }
}
