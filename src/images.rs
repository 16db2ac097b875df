/// Card image download and disk cache
///
/// Launch photos on Flickr are several megabytes each. They are downsized
/// once to card width and kept under the cache directory, so scrolling
/// back through the list never refetches them.
use iced::widget::image::Handle;
use image::{imageops::FilterType, DynamicImage, ImageFormat};
use std::collections::HashMap;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::api::{FetchError, SpaceXClient};

/// Cached images are never wider than this
const CARD_IMAGE_WIDTH: u32 = 720;
/// Hex digits of the URL hash kept in cache file names
const URL_HASH_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("could not decode image: {0}")]
    Decode(String),
    #[error("could not write image cache: {0}")]
    Io(String),
}

/// Where a remote image stands for the current session
#[derive(Debug, Clone)]
pub enum ImageSlot {
    Loading,
    Ready(Handle),
    Failed,
}

/// Image handles for every URL the cards have asked for
#[derive(Debug, Default)]
pub struct CardImages {
    slots: HashMap<String, ImageSlot>,
}

impl CardImages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ready handle for `url`, if any
    pub fn handle(&self, url: &str) -> Option<&Handle> {
        match self.slots.get(url) {
            Some(ImageSlot::Ready(handle)) => Some(handle),
            _ => None,
        }
    }

    /// Mark unseen URLs as loading and return them for download.
    /// URLs already loading, loaded or failed are skipped.
    pub fn claim<I>(&mut self, urls: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut claimed = Vec::new();
        for url in urls {
            if self.slots.contains_key(&url) {
                continue;
            }
            self.slots.insert(url.clone(), ImageSlot::Loading);
            claimed.push(url);
        }
        claimed
    }

    pub fn finish(&mut self, url: String, result: Result<PathBuf, ImageError>) {
        let slot = match result {
            Ok(path) => ImageSlot::Ready(Handle::from_path(path)),
            Err(err) => {
                tracing::warn!(%url, error = %err, "card image unavailable");
                ImageSlot::Failed
            }
        };
        self.slots.insert(url, slot);
    }

    pub fn is_loading(&self, url: &str) -> bool {
        matches!(self.slots.get(url), Some(ImageSlot::Loading))
    }
}

/// Get the image cache directory
/// Returns ~/.cache/launch-deck/images on Linux
pub fn default_cache_dir() -> PathBuf {
    let mut path = dirs::cache_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir);
    path.push("launch-deck");
    path.push("images");
    path
}

/// Stable file name for a remote image.
///
/// Host and path are flattened into a readable stem, followed by a short
/// content hash of the whole URL (query included) so that URLs which
/// flatten to the same stem still get their own file. PNGs stay PNG
/// (mission patches carry transparency), everything else is stored as JPEG.
pub fn cache_file_name(url: &str) -> String {
    let (host, path) = match url::Url::parse(url) {
        Ok(parsed) => (
            parsed.host_str().unwrap_or_default().to_string(),
            parsed.path().to_string(),
        ),
        Err(_) => (String::new(), url.to_string()),
    };

    let stem: String = format!("{host}{path}")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let digest = blake3::hash(url.as_bytes()).to_hex();

    let extension = match cache_format(url) {
        ImageFormat::Png => "png",
        _ => "jpg",
    };
    format!("{stem}_{}.{extension}", &digest[..URL_HASH_LEN])
}

fn cache_format(url: &str) -> ImageFormat {
    if url.to_ascii_lowercase().ends_with(".png") {
        ImageFormat::Png
    } else {
        ImageFormat::Jpeg
    }
}

/// Return the cached copy of `url`, downloading and downsizing it first if needed
pub async fn load_card_image(
    client: SpaceXClient,
    url: String,
    cache_dir: PathBuf,
) -> Result<PathBuf, ImageError> {
    let target = cache_dir.join(cache_file_name(&url));
    if tokio::fs::try_exists(&target).await.unwrap_or(false) {
        let cached = target.clone();
        let usable = tokio::task::spawn_blocking(move || usable_cache_entry(&cached))
            .await
            .unwrap_or(false);
        if usable {
            return Ok(target);
        }
    }

    let bytes = client.fetch_image(&url).await?;
    tracing::debug!(%url, bytes = bytes.len(), "image downloaded");

    let format = cache_format(&url);
    tokio::task::spawn_blocking(move || store_downsized(&bytes, format, &target))
        .await
        .map_err(|e| ImageError::Io(format!("task join error: {e}")))?
}

/// Whether a cached file still decodes. Broken entries are deleted so the
/// caller downloads a fresh copy.
fn usable_cache_entry(path: &Path) -> bool {
    match image::open(path) {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "evicting unreadable cached image"
            );
            if let Err(err) = std::fs::remove_file(path) {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "could not remove cached image"
                );
            }
            false
        }
    }
}

/// Decode, shrink to card width and write to `target`.
///
/// The encoded image goes to a temporary file next to `target` first and is
/// renamed into place once complete, so `target` never holds a partial write.
fn store_downsized(
    bytes: &[u8],
    format: ImageFormat,
    target: &Path,
) -> Result<PathBuf, ImageError> {
    let img = image::load_from_memory(bytes).map_err(|e| ImageError::Decode(e.to_string()))?;
    let img = downsize(img);

    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| ImageError::Io(e.to_string()))?;

    // JPEG has no alpha channel
    let img = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => img,
    };

    let mut staged = NamedTempFile::new_in(parent).map_err(|e| ImageError::Io(e.to_string()))?;
    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        img.write_to(&mut writer, format)
            .map_err(|e| ImageError::Io(e.to_string()))?;
        writer.flush().map_err(|e| ImageError::Io(e.to_string()))?;
    }
    staged
        .persist(target)
        .map_err(|e| ImageError::Io(e.error.to_string()))?;

    Ok(target.to_path_buf())
}

fn downsize(img: DynamicImage) -> DynamicImage {
    if img.width() <= CARD_IMAGE_WIDTH {
        return img;
    }
    img.resize(CARD_IMAGE_WIDTH, u32::MAX, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 128]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_claim_skips_known_urls() {
        let mut images = CardImages::new();
        let first = images.claim(vec!["a".to_string(), "b".to_string(), "a".to_string()]);
        assert_eq!(first, vec!["a".to_string(), "b".to_string()]);
        assert!(images.is_loading("a"));

        images.finish("a".to_string(), Err(ImageError::Decode("bad".to_string())));
        assert!(images.claim(vec!["a".to_string()]).is_empty());
        assert!(images.handle("a").is_none());

        images.finish("b".to_string(), Ok(PathBuf::from("/tmp/b.jpg")));
        assert!(images.handle("b").is_some());
    }

    #[test]
    fn test_cache_file_name() {
        let hero = cache_file_name("https://live.staticflickr.com/65535/4902_9cd0_z.jpg");
        assert!(hero.starts_with("live_staticflickr_com_65535_4902_9cd0_z_jpg_"));
        assert!(hero.ends_with(".jpg"));
        assert_eq!(
            hero.len(),
            "live_staticflickr_com_65535_4902_9cd0_z_jpg_".len() + URL_HASH_LEN + ".jpg".len()
        );

        let patch = cache_file_name("https://images2.imgbox.com/ab/cd/patch_o.PNG");
        assert!(patch.starts_with("images2_imgbox_com_ab_cd_patch_o_PNG_"));
        assert!(patch.ends_with(".png"));
    }

    #[test]
    fn test_cache_file_name_is_stable() {
        let url = "https://images2.imgbox.com/ab/cd/patch_o.png";
        assert_eq!(cache_file_name(url), cache_file_name(url));
    }

    #[test]
    fn test_cache_file_names_do_not_collide() {
        assert_ne!(
            cache_file_name("https://example.com/a_b/c.jpg"),
            cache_file_name("https://example.com/a/b_c.jpg")
        );
        assert_ne!(
            cache_file_name("https://example.com/photo.jpg?size=small"),
            cache_file_name("https://example.com/photo.jpg?size=large")
        );
    }

    #[test]
    fn test_downsize_keeps_aspect_ratio() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(1440, 960));
        let small = downsize(img);

        assert_eq!(small.width(), CARD_IMAGE_WIDTH);
        assert_eq!(small.height(), 480);
    }

    #[test]
    fn test_small_images_untouched() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(75, 75));
        assert_eq!(downsize(img).width(), 75);
    }

    #[test]
    fn test_store_downsized_as_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("hero.jpg");

        let stored = store_downsized(&png_bytes(1000, 500), ImageFormat::Jpeg, &target).unwrap();
        let reloaded = image::open(&stored).unwrap();

        assert_eq!(reloaded.width(), CARD_IMAGE_WIDTH);
    }

    #[test]
    fn test_store_leaves_only_the_finished_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("patch.png");

        store_downsized(&png_bytes(40, 40), ImageFormat::Png, &target).unwrap();

        let entries: Vec<PathBuf> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(entries, vec![target]);
    }

    #[test]
    fn test_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("garbage.jpg");

        assert!(matches!(
            store_downsized(b"not an image", ImageFormat::Jpeg, &target),
            Err(ImageError::Decode(_))
        ));
        assert!(!target.exists());
    }

    #[test]
    fn test_truncated_cache_entry_is_evicted() {
        let dir = tempfile::tempdir().unwrap();
        let url = "https://live.staticflickr.com/65535/abc_z.jpg";
        let target = dir.path().join(cache_file_name(url));
        std::fs::write(&target, [0xFF, 0xD8, 0xFF]).unwrap();

        assert!(!usable_cache_entry(&target));
        assert!(!target.exists());
    }

    #[test]
    fn test_complete_cache_entry_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("patch.png");
        store_downsized(&png_bytes(40, 40), ImageFormat::Png, &target).unwrap();

        assert!(usable_cache_entry(&target));
        assert!(target.exists());
    }
}
