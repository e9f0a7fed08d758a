use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use anyhow::{Context, Result};

use crate::render::{TextureId, TextureImage};

/// Decodes an image file into a mipmapped RGBA texture.
///
/// Rows are flipped so that texture coordinate `v = 0` addresses the bottom
/// of the picture.
pub fn decode_texture(path: &Path) -> Result<TextureImage> {
    let decoded = image::open(path)
        .with_context(|| format!("failed to decode image {}", path.display()))?;
    TextureImage::from_rgba(decoded.flipv().into_rgba8())
        .with_context(|| format!("failed to build mip chain for {}", path.display()))
}

/// Decodes `path` on a background thread and hands the result to `deliver`.
///
/// Decode failures are logged on the worker and `deliver` is not called, so
/// the texture keeps whatever contents it already has.
pub fn spawn_texture_load<F>(id: TextureId, path: PathBuf, deliver: F) -> Result<JoinHandle<()>>
where
    F: FnOnce(TextureId, TextureImage) + Send + 'static,
{
    std::thread::Builder::new()
        .name(format!("texture-load-{}", id.0))
        .spawn(move || match decode_texture(&path) {
            Ok(image) => {
                log::debug!(
                    "decoded {} ({}x{}, {} mips)",
                    path.display(),
                    image.width,
                    image.height,
                    image.mip_level_count()
                );
                deliver(id, image);
            }
            Err(e) => log::warn!("texture {id:?} unavailable: {e:#}"),
        })
        .context("failed to spawn texture loader thread")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pongbox-{}-{name}", std::process::id()))
    }

    /// 2x2 image: top row red, bottom row blue.
    fn write_two_rows(path: &Path) {
        let mut img = image::RgbaImage::new(2, 2);
        for x in 0..2 {
            img.put_pixel(x, 0, image::Rgba([255, 0, 0, 255]));
            img.put_pixel(x, 1, image::Rgba([0, 0, 255, 255]));
        }
        img.save(path).unwrap();
    }

    #[test]
    fn decode_flips_rows_and_builds_mips() {
        let path = temp_path("rows.png");
        write_two_rows(&path);

        let tex = decode_texture(&path).unwrap();
        assert_eq!((tex.width, tex.height), (2, 2));
        assert_eq!(tex.mip_level_count(), 2);
        // First row in memory is now the former bottom row.
        assert_eq!(&tex.levels[0][..4], &[0, 0, 255, 255]);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = decode_texture(Path::new("/nonexistent/pongbox/stone.jpeg")).unwrap_err();
        assert!(format!("{err:#}").contains("stone.jpeg"));
    }

    #[test]
    fn background_load_delivers_once() {
        let path = temp_path("bg.png");
        write_two_rows(&path);

        let (tx, rx) = mpsc::channel();
        let handle = spawn_texture_load(TextureId(7), path.clone(), move |id, image| {
            tx.send((id, image.width)).unwrap();
        })
        .unwrap();
        handle.join().unwrap();

        assert_eq!(rx.try_recv().unwrap(), (TextureId(7), 2));
        assert!(rx.try_recv().is_err());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn failed_load_skips_delivery() {
        let (tx, rx) = mpsc::channel::<TextureId>();
        let handle = spawn_texture_load(TextureId(1), temp_path("missing.png"), move |id, _| {
            let _ = tx.send(id);
        })
        .unwrap();
        handle.join().unwrap();
        assert!(rx.try_recv().is_err());
    }
}
