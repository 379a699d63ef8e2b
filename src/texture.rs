// texture.rs — background image decoding off the event loop thread

use image::io::Reader as ImageReader;
use image::{GenericImageView, RgbaImage};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type TextureResult = Result<RgbaImage, TextureError>;

pub fn load_rgba(path: &Path) -> TextureResult {
    let file = File::open(path).map_err(|source| TextureError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let img = ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)
        .and_then(|mut r| {
            r.no_limits();
            r.decode()
        })
        .map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    let (w, h) = img.dimensions();
    log::info!("background {} loaded, {w}x{h}", path.display());
    Ok(img.to_rgba8())
}

/// Decodes `path` on a worker thread and sends the outcome to `tx`.
pub fn start_load(path: PathBuf, tx: Sender<TextureResult>) {
    thread::spawn(move || {
        log::debug!("loading background {} in background", path.display());
        if tx.send(load_rgba(&path)).is_err() {
            log::warn!("event loop gone before background finished loading");
        }
    });
}

/// Shrinks `img` so neither side exceeds `max_dimension`.
pub fn fit_to_limit(img: RgbaImage, max_dimension: u32) -> RgbaImage {
    let (src_w, src_h) = img.dimensions();
    if src_w <= max_dimension && src_h <= max_dimension {
        return img;
    }

    let scale = (max_dimension as f32 / src_w.max(src_h) as f32).min(1.0);
    let new_w = ((src_w as f32 * scale) as u32).clamp(1, max_dimension);
    let new_h = ((src_h as f32 * scale) as u32).clamp(1, max_dimension);
    log::warn!("background {src_w}x{src_h} exceeds GPU limit {max_dimension}, scaled to {new_w}x{new_h}");
    image::DynamicImage::ImageRgba8(img)
        .resize_exact(new_w, new_h, image::imageops::FilterType::Lanczos3)
        .to_rgba8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::sync::mpsc::channel;
    use std::time::Duration;

    #[test]
    fn missing_file_is_an_open_error() {
        let err = load_rgba(Path::new("/no/such/background.png")).unwrap_err();
        assert!(matches!(err, TextureError::Open { .. }));
    }

    #[test]
    fn garbage_file_is_a_decode_error() {
        let path = std::env::temp_dir().join(format!("cube_room_garbage_{}.png", std::process::id()));
        std::fs::write(&path, b"definitely not an image").unwrap();
        let err = load_rgba(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(err, TextureError::Decode { .. }));
    }

    #[test]
    fn worker_reports_failure_over_channel() {
        let (tx, rx) = channel();
        start_load(PathBuf::from("/no/such/background.png"), tx);
        let result = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn fit_to_limit_keeps_small_images() {
        let img = RgbaImage::from_pixel(8, 4, Rgba([1, 2, 3, 255]));
        assert_eq!(fit_to_limit(img, 16).dimensions(), (8, 4));
    }

    #[test]
    fn fit_to_limit_shrinks_large_images() {
        let img = RgbaImage::from_pixel(64, 16, Rgba([1, 2, 3, 255]));
        assert_eq!(fit_to_limit(img, 32).dimensions(), (32, 8));
    }
}
