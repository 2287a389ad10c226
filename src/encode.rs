//! Bounded-size image encoding for uploaded pictures.
//!
//! A selected file is capped at 10 MiB, sniffed for an actual image
//! format, downscaled so its longest edge is at most 1200 px (never
//! upscaled), and re-encoded as a JPEG data URL ready for persistence.
//! Decoding helpers turn stored images back into raw pixels for display.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use thiserror::Error;

use crate::constants::limits;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("image is {size} bytes, over the 10 MB limit")]
    TooLarge { size: u64 },
    #[error("the selected file is not an image")]
    NotAnImage,
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

/// Raw pixels of a decoded image, ready for a texture upload.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8.
    pub rgba: Vec<u8>,
}

/// Target dimensions for a uniform downscale to `max_dim` on the longest
/// edge. Aspect ratio is preserved; images already within bounds come
/// back unchanged.
pub fn scaled_dimensions(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    let largest = width.max(height).max(1);
    let scale = (max_dim as f64 / largest as f64).min(1.0);
    (
        (width as f64 * scale).round() as u32,
        (height as f64 * scale).round() as u32,
    )
}

/// Cheap selection-time checks: extension plus on-disk size, reported in
/// bytes on success. Deep validation happens again in [`encode_file`].
pub fn validate_selection(path: &Path) -> Result<u64, EncodeError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp") => {}
        _ => return Err(EncodeError::NotAnImage),
    }
    let size = fs::metadata(path)?.len();
    if size > limits::MAX_UPLOAD_BYTES {
        return Err(EncodeError::TooLarge { size });
    }
    Ok(size)
}

/// Encode the image file at `path` as a bounded JPEG data URL.
pub fn encode_file(path: &Path) -> Result<String, EncodeError> {
    let size = fs::metadata(path)?.len();
    if size > limits::MAX_UPLOAD_BYTES {
        return Err(EncodeError::TooLarge { size });
    }
    encode_bytes(&fs::read(path)?)
}

/// Downscale and re-encode image bytes as a JPEG data URL.
///
/// The size and format gates run before any decode work so oversized or
/// non-image payloads are rejected cheaply.
pub fn encode_bytes(bytes: &[u8]) -> Result<String, EncodeError> {
    if bytes.len() as u64 > limits::MAX_UPLOAD_BYTES {
        return Err(EncodeError::TooLarge {
            size: bytes.len() as u64,
        });
    }
    image::guess_format(bytes).map_err(|_| EncodeError::NotAnImage)?;

    let decoded = image::load_from_memory(bytes)?;
    let (width, height) =
        scaled_dimensions(decoded.width(), decoded.height(), limits::MAX_IMAGE_DIMENSION);
    let resized = if (width, height) == (decoded.width(), decoded.height()) {
        decoded
    } else {
        decoded.resize_exact(width, height, FilterType::CatmullRom)
    };

    let rgb = resized.to_rgb8();
    let mut jpeg = Vec::new();
    let mut encoder =
        JpegEncoder::new_with_quality(&mut Cursor::new(&mut jpeg), limits::JPEG_QUALITY);
    encoder.encode_image(&rgb)?;

    Ok(format!("data:image/jpeg;base64,{}", BASE64.encode(&jpeg)))
}

/// Decode a `data:` URL back into raw pixels.
pub fn decode_data_url(url: &str) -> Result<DecodedImage, EncodeError> {
    let payload = url
        .split_once(',')
        .map(|(_, data)| data)
        .ok_or(EncodeError::NotAnImage)?;
    let bytes = BASE64.decode(payload).map_err(|_| EncodeError::NotAnImage)?;
    decode_bytes(&bytes)
}

/// Decode raw image bytes into RGBA pixels.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage, EncodeError> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(DecodedImage {
        width: decoded.width(),
        height: decoded.height(),
        rgba: decoded.to_rgba8().into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([120, 90, 40, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("in-memory png encode");
        bytes
    }

    #[test]
    fn scaled_dimensions_downscales_preserving_aspect() {
        assert_eq!(scaled_dimensions(3000, 2000, 1200), (1200, 800));
        assert_eq!(scaled_dimensions(2000, 3000, 1200), (800, 1200));
    }

    #[test]
    fn scaled_dimensions_never_upscales() {
        assert_eq!(scaled_dimensions(800, 600, 1200), (800, 600));
        assert_eq!(scaled_dimensions(1200, 1200, 1200), (1200, 1200));
        assert_eq!(scaled_dimensions(1, 1, 1200), (1, 1));
    }

    #[test]
    fn oversized_payload_is_rejected_before_decoding() {
        let bytes = vec![0u8; 11 * 1024 * 1024];
        match encode_bytes(&bytes) {
            Err(EncodeError::TooLarge { size }) => assert_eq!(size, bytes.len() as u64),
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }

    #[test]
    fn non_image_payload_is_rejected() {
        let bytes = b"definitely not an image payload".repeat(100);
        assert!(matches!(encode_bytes(&bytes), Err(EncodeError::NotAnImage)));
    }

    #[test]
    fn large_image_is_downscaled_to_the_dimension_cap() {
        let url = encode_bytes(&png_bytes(3000, 2000)).expect("encode");
        assert!(url.starts_with("data:image/jpeg;base64,"));
        let decoded = decode_data_url(&url).expect("decode");
        assert_eq!((decoded.width, decoded.height), (1200, 800));
    }

    #[test]
    fn small_image_keeps_its_dimensions() {
        let url = encode_bytes(&png_bytes(800, 600)).expect("encode");
        let decoded = decode_data_url(&url).expect("decode");
        assert_eq!((decoded.width, decoded.height), (800, 600));
    }

    #[test]
    fn malformed_data_url_is_rejected() {
        assert!(matches!(
            decode_data_url("data:image/jpeg;base64"),
            Err(EncodeError::NotAnImage)
        ));
        assert!(matches!(
            decode_data_url("data:image/jpeg;base64,!!!not-base64!!!"),
            Err(EncodeError::NotAnImage)
        ));
    }
}
