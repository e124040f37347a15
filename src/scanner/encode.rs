//! 사진 파일 → 요청용 이미지 페이로드

use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use checkmyroom_common::ImagePayload;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use crate::error::{AppError, Result};

/// 긴 변이 `max_edge` 를 넘으면 줄여서 JPEG 로 다시 인코딩한다.
/// 넘지 않으면 원본 바이트를 그대로 쓴다.
pub fn encode_image(path: &Path, max_edge: u32) -> Result<ImagePayload> {
    let bytes = std::fs::read(path)?;
    let format = image::guess_format(&bytes)
        .map_err(|e| AppError::Image(format!("{}: {}", path.display(), e)))?;
    let mime_type = mime_for(format).ok_or_else(|| {
        AppError::Image(format!("지원하지 않는 형식입니다: {}", path.display()))
    })?;

    let img = image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| AppError::Image(format!("{}: {}", path.display(), e)))?;

    if img.width().max(img.height()) <= max_edge {
        return Ok(ImagePayload {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(&bytes),
        });
    }

    let resized = img.resize(max_edge, max_edge, FilterType::Lanczos3);
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(resized.to_rgb8())
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
        .map_err(|e| AppError::Image(e.to_string()))?;

    tracing::debug!(
        path = %path.display(),
        from = %format!("{}x{}", img.width(), img.height()),
        to = %format!("{}x{}", resized.width(), resized.height()),
        "사진 축소"
    );

    Ok(ImagePayload {
        mime_type: "image/jpeg".to_string(),
        data: STANDARD.encode(&buf),
    })
}

fn mime_for(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Gif => Some("image/gif"),
        ImageFormat::WebP => Some("image/webp"),
        _ => None,
    }
}
