//! Recipe image loading
//!
//! Images are referenced by URL or local path. Remote images are downloaded
//! with reqwest, decoding and downsampling run on the blocking pool so the UI
//! loop never waits on either. Callers treat any error as "no image".

use crate::config::ImageConfig;
use anyhow::{bail, Context, Result};
use std::path::Path;
use std::time::Duration;

/// Decoded RGB bitmap, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Result<Self> {
        if width == 0 || height == 0 {
            bail!("Empty bitmap ({}x{})", width, height);
        }
        if pixels.len() != (width as usize) * (height as usize) {
            bail!(
                "Bitmap pixel count {} does not match {}x{}",
                pixels.len(),
                width,
                height
            );
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at (x, y), clamped to the bitmap bounds
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        self.pixels[y * self.width as usize + x]
    }

    /// Nearest-neighbour sample for a target grid of `cols` x `rows` points
    pub fn sample(&self, col: u32, row: u32, cols: u32, rows: u32) -> [u8; 3] {
        let x = (col as u64 * self.width as u64 / cols.max(1) as u64) as u32;
        let y = (row as u64 * self.height as u64 / rows.max(1) as u64) as u32;
        self.pixel(x, y)
    }
}

/// Downloads or reads images and decodes them into bitmaps
#[derive(Clone)]
pub struct ImageLoader {
    client: reqwest::Client,
    max_width: u32,
    max_height: u32,
}

impl ImageLoader {
    pub fn new(config: &ImageConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("recipeek/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            max_width: config.max_width.max(1),
            max_height: config.max_height.max(1),
        })
    }

    /// Load and decode the image behind `reference`
    pub async fn load(&self, reference: &str) -> Result<Bitmap> {
        let bytes = if is_remote(reference) {
            self.fetch(reference).await?
        } else {
            tokio::fs::read(Path::new(reference))
                .await
                .with_context(|| format!("Failed to read image file {}", reference))?
        };

        tracing::debug!("Loaded {} bytes for {}", bytes.len(), reference);

        let (max_width, max_height) = (self.max_width, self.max_height);
        tokio::task::spawn_blocking(move || decode(&bytes, max_width, max_height))
            .await
            .context("Image decode task failed")?
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to download {}", url))?
            .error_for_status()
            .with_context(|| format!("Image server rejected {}", url))?;

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read image body from {}", url))?;
        Ok(bytes.to_vec())
    }
}

fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Decode encoded image bytes, shrinking to fit within the given bounds
pub fn decode(bytes: &[u8], max_width: u32, max_height: u32) -> Result<Bitmap> {
    let image = image::load_from_memory(bytes).context("Failed to decode image")?;

    let image = if image.width() > max_width || image.height() > max_height {
        image.thumbnail(max_width, max_height)
    } else {
        image
    };

    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    Bitmap::new(width, height, rgb.pixels().map(|p| p.0).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)));
        let mut buf = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_downsamples_within_bounds() {
        let bytes = png_bytes(200, 100, [255, 0, 0]);
        let bitmap = decode(&bytes, 96, 64).unwrap();
        assert!(bitmap.width() <= 96);
        assert!(bitmap.height() <= 64);
        // Aspect ratio is kept (2:1)
        assert!(bitmap.width() >= bitmap.height() * 2 - 2);
        assert_eq!(bitmap.pixel(0, 0), [255, 0, 0]);
    }

    #[test]
    fn test_decode_keeps_small_images() {
        let bytes = png_bytes(10, 6, [0, 179, 136]);
        let bitmap = decode(&bytes, 96, 64).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (10, 6));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode(b"definitely not an image", 96, 64).is_err());
    }

    #[test]
    fn test_bitmap_sampling() {
        // 2x2: red green / blue white
        let bitmap = Bitmap::new(
            2,
            2,
            vec![[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]],
        )
        .unwrap();

        assert_eq!(bitmap.sample(0, 0, 4, 4), [255, 0, 0]);
        assert_eq!(bitmap.sample(3, 0, 4, 4), [0, 255, 0]);
        assert_eq!(bitmap.sample(0, 3, 4, 4), [0, 0, 255]);
        assert_eq!(bitmap.sample(3, 3, 4, 4), [255, 255, 255]);
        // Out of range coordinates clamp
        assert_eq!(bitmap.pixel(10, 10), [255, 255, 255]);
    }

    #[test]
    fn test_bitmap_rejects_bad_dimensions() {
        assert!(Bitmap::new(0, 1, vec![]).is_err());
        assert!(Bitmap::new(2, 2, vec![[0, 0, 0]]).is_err());
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://images.unsplash.com/photo"));
        assert!(is_remote("http://localhost/img.png"));
        assert!(!is_remote("/tmp/img.png"));
        assert!(!is_remote("ic_ingredient.png"));
    }

    #[tokio::test]
    async fn test_load_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pancakes.png");
        std::fs::write(&path, png_bytes(4, 4, [10, 20, 30])).unwrap();

        let loader = ImageLoader::new(&ImageConfig::default()).unwrap();
        let bitmap = loader.load(path.to_str().unwrap()).await.unwrap();
        assert_eq!(bitmap.pixel(1, 1), [10, 20, 30]);
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ImageLoader::new(&ImageConfig::default()).unwrap();
        let result = loader
            .load(dir.path().join("missing.png").to_str().unwrap())
            .await;
        assert!(result.is_err());
    }
}
