use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageFormat, ImageReader, RgbaImage};

use crate::constants::{DEFAULT_FRAME_DELAY_MS, MIN_FRAME_DELAY_MS};
use crate::error::AssetError;

pub struct AnimationFrame {
    pub image: RgbaImage,
    pub delay_ms: u32,
}

/// Decoded frames of the scare image. Still images become a single frame.
pub struct Animation {
    frames: Vec<AnimationFrame>,
}

impl Animation {
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        if !path.exists() {
            return Err(AssetError::ImageNotFound(path.to_path_buf()));
        }

        let read_err = |source| AssetError::ImageRead { path: path.to_path_buf(), source };
        let decode_err = |source| AssetError::ImageDecode { path: path.to_path_buf(), source };

        let reader = ImageReader::open(path)
            .map_err(read_err)?
            .with_guessed_format()
            .map_err(read_err)?;

        let frames = if reader.format() == Some(ImageFormat::Gif) {
            let file = File::open(path).map_err(read_err)?;
            let decoder = GifDecoder::new(BufReader::new(file)).map_err(decode_err)?;
            let frames = decoder.into_frames().collect_frames().map_err(decode_err)?;
            frames
                .into_iter()
                .map(|frame| {
                    let (numer, denom) = frame.delay().numer_denom_ms();
                    let delay_ms = if denom == 0 { 0 } else { numer / denom };
                    AnimationFrame { image: frame.into_buffer(), delay_ms: normalize_delay(delay_ms) }
                })
                .collect()
        } else {
            let image = reader.decode().map_err(decode_err)?;
            vec![AnimationFrame { image: image.to_rgba8(), delay_ms: DEFAULT_FRAME_DELAY_MS }]
        };

        Self::from_frames(path, frames)
    }

    pub fn from_frames(path: &Path, frames: Vec<AnimationFrame>) -> Result<Self, AssetError> {
        if frames.is_empty() {
            return Err(AssetError::EmptyAnimation(path.to_path_buf()));
        }
        Ok(Self { frames })
    }

    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Size of the first frame; GIF frames share the logical screen size.
    pub fn dimensions(&self) -> (u32, u32) {
        self.frames[0].image.dimensions()
    }

    pub fn delays_ms(&self) -> Vec<u32> {
        self.frames.iter().map(|frame| frame.delay_ms).collect()
    }
}

// Browsers treat near-zero GIF delays as 100ms; so do we
fn normalize_delay(delay_ms: u32) -> u32 {
    if delay_ms <= MIN_FRAME_DELAY_MS { DEFAULT_FRAME_DELAY_MS } else { delay_ms }
}

/// Time-driven cursor over the frames of an [`Animation`].
#[derive(Debug, Clone)]
pub struct Playback {
    delays: Vec<f32>,
    current: usize,
    elapsed: f32,
    running: bool,
}

impl Playback {
    pub fn new(delays_ms: &[u32]) -> Self {
        Self {
            delays: delays_ms.iter().map(|&ms| ms as f32 / 1000.0).collect(),
            current: 0,
            elapsed: 0.0,
            running: false,
        }
    }

    /// Rewinds to frame 0 and starts playing. Returns the frame now shown.
    pub fn start(&mut self) -> usize {
        self.current = 0;
        self.elapsed = 0.0;
        self.running = true;
        self.current
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Advances by `dt` seconds and returns every frame index entered, in order.
    pub fn advance(&mut self, dt: f32) -> Vec<usize> {
        let mut entered = Vec::new();
        if !self.running || self.delays.len() < 2 {
            return entered;
        }

        self.elapsed += dt;
        // A long stall (hidden window, debugger) must not replay dozens of loops
        let max_steps = self.delays.len() * 2;
        while self.elapsed >= self.delays[self.current] {
            self.elapsed -= self.delays[self.current];
            self.current = (self.current + 1) % self.delays.len();
            entered.push(self.current);
            if entered.len() >= max_steps {
                self.elapsed = 0.0;
                break;
            }
        }
        entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn playback_wraps_around() {
        let mut playback = Playback::new(&[100, 100, 100]);
        assert_eq!(playback.start(), 0);
        assert_eq!(playback.advance(0.05), Vec::<usize>::new());
        assert_eq!(playback.advance(0.06), vec![1]);
        assert_eq!(playback.advance(0.2), vec![2, 0]);
    }

    #[test]
    fn stopped_playback_does_not_move() {
        let mut playback = Playback::new(&[100, 100]);
        assert!(playback.advance(1.0).is_empty());
        playback.start();
        playback.stop();
        assert!(playback.advance(1.0).is_empty());
        assert_eq!(playback.current(), 0);
    }

    #[test]
    fn single_frame_never_changes() {
        let mut playback = Playback::new(&[100]);
        playback.start();
        assert!(playback.advance(10.0).is_empty());
    }

    #[test]
    fn long_stall_is_bounded() {
        let mut playback = Playback::new(&[100, 100]);
        playback.start();
        assert_eq!(playback.advance(60.0).len(), 4);
        assert!(playback.advance(0.05).is_empty());
    }

    #[test]
    fn near_zero_delays_are_normalized() {
        assert_eq!(normalize_delay(0), DEFAULT_FRAME_DELAY_MS);
        assert_eq!(normalize_delay(10), DEFAULT_FRAME_DELAY_MS);
        assert_eq!(normalize_delay(40), 40);
    }

    #[test]
    fn missing_image_is_reported() {
        let err = Animation::load(Path::new("does/not/exist.gif")).err();
        assert!(matches!(err, Some(AssetError::ImageNotFound(_))));
    }

    #[test]
    fn garbage_image_fails_to_decode() {
        let mut file = tempfile::Builder::new().suffix(".gif").tempfile().unwrap();
        file.write_all(b"GIF89a this is not really a gif").unwrap();
        let err = Animation::load(file.path()).err();
        assert!(matches!(err, Some(AssetError::ImageDecode { .. })));
    }

    #[test]
    fn still_png_becomes_one_frame() {
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        RgbaImage::new(8, 4).save_with_format(file.path(), ImageFormat::Png).unwrap();
        let animation = Animation::load(file.path()).unwrap();
        assert_eq!(animation.frame_count(), 1);
        assert_eq!(animation.dimensions(), (8, 4));
    }
}
