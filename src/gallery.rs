//! Famous bridge gallery.
//! Fixed mapping from a bridge choice to its photo and caption.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// The three bridges offered by the image selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FamousBridge {
    #[default]
    TalmadgeMemorial,
    SidneyLanier,
    ArchibaldButtMemorial,
}

impl FamousBridge {
    pub const ALL: [FamousBridge; 3] = [
        FamousBridge::TalmadgeMemorial,
        FamousBridge::SidneyLanier,
        FamousBridge::ArchibaldButtMemorial,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FamousBridge::TalmadgeMemorial => "Talmadge Memorial Bridge",
            FamousBridge::SidneyLanier => "Sidney Lanier Bridge",
            FamousBridge::ArchibaldButtMemorial => "Archibald Butt Memorial Bridge",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            FamousBridge::TalmadgeMemorial => "TalmadgeMemorialBridge.jpg",
            FamousBridge::SidneyLanier => "SidneyLanierBridge.jpg",
            FamousBridge::ArchibaldButtMemorial => "ArchibaldButtMemorialBridge.jpg",
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            FamousBridge::TalmadgeMemorial => {
                "Source: https://en.wikipedia.org/wiki/Talmadge_Memorial_Bridge"
            }
            FamousBridge::SidneyLanier => {
                "Source: https://en.wikipedia.org/wiki/Sidney_Lanier_Bridge"
            }
            FamousBridge::ArchibaldButtMemorial => {
                "Source: https://www.tripadvisor.com/LocationPhotoDirectLink-g29212-d290511-i252815017-Augusta_Canal_Discovery_Center-Augusta_Georgia.html"
            }
        }
    }

    pub fn image_path(self, image_dir: &Path) -> PathBuf {
        image_dir.join(self.file_name())
    }

    /// Decode the photo into an egui image.
    pub fn load_image(self, image_dir: &Path) -> Result<egui::ColorImage, GalleryError> {
        let path = self.image_path(image_dir);
        // Sniff the content rather than trusting the extension.
        let rgba = image::ImageReader::open(&path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(image::ImageError::IoError)
            .and_then(|reader| reader.decode())
            .map_err(|source| GalleryError::Image {
                path: path.clone(),
                source,
            })?
            .to_rgba8();

        log::debug!(
            "Decoded {} ({}x{})",
            path.display(),
            rgba.width(),
            rgba.height()
        );

        let size = [rgba.width() as usize, rgba.height() as usize];
        Ok(egui::ColorImage::from_rgba_unmultiplied(
            size,
            rgba.as_raw(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_each_bridge_has_unique_path_and_caption() {
        let dir = Path::new("assets");
        let paths: HashSet<PathBuf> = FamousBridge::ALL.iter().map(|b| b.image_path(dir)).collect();
        let captions: HashSet<&str> = FamousBridge::ALL.iter().map(|b| b.caption()).collect();

        assert_eq!(paths.len(), 3);
        assert_eq!(captions.len(), 3);
        assert_eq!(
            FamousBridge::SidneyLanier.image_path(dir),
            PathBuf::from("assets/SidneyLanierBridge.jpg")
        );
    }

    #[test]
    fn test_labels_are_distinct() {
        let labels: HashSet<&str> = FamousBridge::ALL.iter().map(|b| b.label()).collect();
        assert_eq!(labels.len(), FamousBridge::ALL.len());
        assert_eq!(FamousBridge::default().label(), "Talmadge Memorial Bridge");
    }

    #[test]
    fn test_load_image_decodes_png() {
        let dir = tempfile::tempdir().unwrap();
        let photo = image::RgbImage::from_pixel(4, 3, image::Rgb([10, 20, 30]));
        photo
            .save_with_format(
                FamousBridge::TalmadgeMemorial.image_path(dir.path()),
                image::ImageFormat::Png,
            )
            .unwrap();

        let loaded = FamousBridge::TalmadgeMemorial.load_image(dir.path()).unwrap();
        assert_eq!(loaded.size, [4, 3]);
    }

    #[test]
    fn test_load_image_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FamousBridge::SidneyLanier.load_image(dir.path()).unwrap_err();
        assert!(matches!(err, GalleryError::Image { .. }));
    }
}
