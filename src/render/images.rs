use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};

use super::RenderError;

/// A decoded molecule image, flattened onto white, as packed RGB.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

fn is_image(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref(),
        Some("png" | "jpg" | "jpeg")
    )
}

/// Image files of `dir`, sorted by file name.
pub fn image_files(dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|source| RenderError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_image(p))
        .collect();
    files.sort();
    Ok(files)
}

/// Load one thumbnail per position, scaled by `zoom[position]`.
///
/// Unreadable images leave a `None` slot and are logged.
pub fn load_thumbnails(dir: &Path, zoom: &[f64]) -> Result<Vec<Option<Thumbnail>>, RenderError> {
    let files = image_files(dir)?;
    log::debug!("Found {} molecule images in {}", files.len(), dir.display());

    Ok(files
        .iter()
        .enumerate()
        .map(|(position, path)| {
            let scale = zoom.get(position).copied().unwrap_or(1.0);
            match load_thumbnail(path, scale) {
                Ok(t) => Some(t),
                Err(e) => {
                    log::warn!("Skipping image {}: {e}", path.display());
                    None
                }
            }
        })
        .collect())
}

fn load_thumbnail(path: &Path, scale: f64) -> Result<Thumbnail, image::ImageError> {
    let img = image::open(path)?.to_rgba8();
    let width = ((img.width() as f64 * scale).round() as u32).max(1);
    let height = ((img.height() as f64 * scale).round() as u32).max(1);
    let img = imageops::resize(&img, width, height, FilterType::Gaussian);

    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    for px in img.pixels() {
        let alpha = px[3] as f32 / 255.0;
        for c in &px.0[..3] {
            rgb.push((*c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8);
        }
    }
    Ok(Thumbnail { width, height, rgb })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnails_follow_file_order_and_zoom() {
        let dir = tempfile::tempdir().unwrap();
        let mut red = image::RgbaImage::new(10, 4);
        for px in red.pixels_mut() {
            *px = image::Rgba([255, 0, 0, 255]);
        }
        red.save(dir.path().join("b.png")).unwrap();
        // fully transparent → white after flattening
        image::RgbaImage::new(4, 4).save(dir.path().join("a.png")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "skip").unwrap();

        let thumbs = load_thumbnails(dir.path(), &[1.0, 0.5]).unwrap();
        assert_eq!(thumbs.len(), 2);

        let a = thumbs[0].as_ref().unwrap();
        assert_eq!((a.width, a.height), (4, 4));
        assert!(a.rgb.iter().all(|&c| c == 255));

        let b = thumbs[1].as_ref().unwrap();
        assert_eq!((b.width, b.height), (5, 2));
        assert_eq!(b.rgb.len(), 5 * 2 * 3);
        assert!(b.rgb[0] > 250 && b.rgb[1] < 5 && b.rgb[2] < 5);
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(image_files(Path::new("/nonexistent/mols")).is_err());
    }
}
