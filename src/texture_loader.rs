use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;
use raylib::prelude::*;

use crate::animation::Animation;
use crate::error::AssetError;

// --- Upload every decoded frame as its own texture ---
pub fn load_frame_textures(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    path: &Path,
    animation: &Animation,
) -> Result<Vec<Texture2D>, AssetError> {
    let texture_err = |frame: usize, reason: String| AssetError::Texture { path: path.to_path_buf(), frame, reason };

    let mut textures = Vec::with_capacity(animation.frame_count());
    for (index, frame) in animation.frames().iter().enumerate() {
        // raylib only takes encoded bytes or files, so round-trip through PNG in memory
        let mut bytes = Vec::new();
        frame.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| texture_err(index, e.to_string()))?;

        let image = Image::load_image_from_mem(".png", &bytes)
            .map_err(|e| texture_err(index, e.to_string()))?;

        let texture = rl.load_texture_from_image(thread, &image)
            .map_err(|e| texture_err(index, e.to_string()))?;

        // Unload the Image data from CPU memory
        drop(image);
        textures.push(texture);
    }
    Ok(textures)
}
