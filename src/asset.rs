use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::animation::Animation;
use crate::error::AssetError;
use crate::placement::ContentSize;

/// Image/sound pair for one scare, with the image already decoded.
pub struct ScareAsset {
    image_path: PathBuf,
    sound_path: Option<PathBuf>,
    animation: Animation,
}

impl ScareAsset {
    /// Decodes the image up front so a broken asset fails before any window opens.
    /// A missing sound only downgrades the scare to silent.
    pub fn load(image_path: &Path, sound_path: Option<&Path>) -> Result<Self, AssetError> {
        let animation = Animation::load(image_path).inspect_err(|err| {
            warn!(error = %err, resolved = %absolute(image_path).display(), "scare image unusable");
        })?;

        let sound_path = match sound_path {
            Some(path) if path.exists() => Some(path.to_path_buf()),
            Some(path) => {
                warn!(path = %path.display(), resolved = %absolute(path).display(), "sound file not found, running silent");
                None
            }
            None => None,
        };

        let (width, height) = animation.dimensions();
        info!(
            path = %image_path.display(),
            frames = animation.frame_count(),
            width,
            height,
            "scare image loaded"
        );

        Ok(Self { image_path: image_path.to_path_buf(), sound_path, animation })
    }

    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    pub fn sound_path(&self) -> Option<&Path> {
        self.sound_path.as_deref()
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn content_size(&self) -> ContentSize {
        let (width, height) = self.animation.dimensions();
        ContentSize::new(width as i32, height as i32)
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
