use anyhow::{Context, Result};
use image::{DynamicImage, RgbaImage};
use std::path::Path;

use super::Framebuffer;

/// Save a framebuffer as an image, format picked from the file extension
/// (`.ppm`, `.png`). Alpha is dropped; frames are always opaque.
pub fn save_frame(framebuffer: &Framebuffer, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let rgba = RgbaImage::from_raw(framebuffer.width(), framebuffer.height(), framebuffer.pixels().to_vec())
        .context("Framebuffer size does not match its pixel data")?;

    DynamicImage::ImageRgba8(rgba)
        .to_rgb8()
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!(
        "Wrote {}x{} frame to {}",
        framebuffer.width(),
        framebuffer.height(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("chase-camera-{}-{}", std::process::id(), name))
    }

    #[test]
    fn ppm_keeps_rgb_and_drops_alpha() {
        let mut framebuffer = Framebuffer::new(2, 1);
        framebuffer.set_pixel(0, 0, [10, 20, 30, 255]);
        framebuffer.set_pixel(1, 0, [40, 50, 60, 128]);

        let path = temp_path("snapshot.ppm");
        save_frame(&framebuffer, &path).unwrap();
        let saved = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).ok();

        assert_eq!(saved.dimensions(), (2, 1));
        assert_eq!(saved.get_pixel(0, 0).0, [10, 20, 30]);
        assert_eq!(saved.get_pixel(1, 0).0, [40, 50, 60]);
    }

    #[test]
    fn png_by_extension() {
        let mut framebuffer = Framebuffer::new(3, 2);
        framebuffer.set_pixel(2, 1, [255, 0, 0, 255]);

        let path = temp_path("snapshot.png");
        save_frame(&framebuffer, &path).unwrap();
        let saved = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).ok();

        assert_eq!(saved.dimensions(), (3, 2));
        assert_eq!(saved.get_pixel(2, 1).0, [255, 0, 0]);
    }

    #[test]
    fn reports_bad_path() {
        let framebuffer = Framebuffer::new(1, 1);
        let err = save_frame(&framebuffer, "/definitely/not/here/frame.ppm").unwrap_err();
        assert!(format!("{err:#}").contains("Failed to write"));
    }

    #[test]
    fn rejects_unknown_extension() {
        let framebuffer = Framebuffer::new(1, 1);
        assert!(save_frame(&framebuffer, temp_path("snapshot.nope")).is_err());
    }
}
