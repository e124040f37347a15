mod encode;

pub use encode::encode_image;

use crate::error::{AppError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| is_image_extension(&ext.to_string_lossy()))
        .unwrap_or(false)
}

/// 인자로 받은 경로들에서 사진 파일을 모은다
///
/// 파일은 그대로, 폴더는 바로 아래만 파일명 순으로 펼친다.
/// 인자 순서는 유지한다.
pub fn collect_images(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for path in paths {
        if path.is_dir() {
            images.extend(scan_folder(path)?);
        } else if path.is_file() {
            if !is_image_path(path) {
                return Err(AppError::Image(format!(
                    "지원하지 않는 형식입니다: {}",
                    path.display()
                )));
            }
            images.push(path.clone());
        } else {
            return Err(AppError::FileNotFound(path.display().to_string()));
        }
    }
    Ok(images)
}

pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(AppError::FileNotFound(folder.display().to_string()));
    }

    let mut images: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)  // 바로 아래만
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_image_path(p))
        .collect();

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(images)
}
