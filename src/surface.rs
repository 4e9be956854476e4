use raylib::prelude::*;
use tracing::{debug, info};

use crate::animation::Playback;
use crate::asset::ScareAsset;
use crate::error::AssetError;
use crate::placement::{ContentSize, Placement};
use crate::stage::{DismissReason, SurfaceEvent};
use crate::texture_loader::load_frame_textures;

#[derive(Debug, Clone, Copy)]
pub struct SurfaceOptions {
    /// Let clicks fall through to whatever is underneath.
    pub click_through: bool,
}

/// The frameless, always-on-top window content that plays the scare animation.
pub struct Surface {
    frames: Vec<Texture2D>,
    playback: Playback,
    content_size: ContentSize,
    placement: Option<Placement>,
    visible: bool,
    options: SurfaceOptions,
    pending: Vec<SurfaceEvent>,
}

impl Surface {
    pub fn create(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        asset: &ScareAsset,
        options: SurfaceOptions,
    ) -> Result<Self, AssetError> {
        let animation = asset.animation();
        let frames = load_frame_textures(rl, thread, asset.image_path(), animation)?;
        debug!(frames = frames.len(), "surface textures ready");

        Ok(Self {
            frames,
            playback: Playback::new(&animation.delays_ms()),
            content_size: asset.content_size(),
            placement: None,
            visible: false,
            options,
            pending: Vec::new(),
        })
    }

    pub fn content_size(&self) -> ContentSize {
        self.content_size
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn current_frame(&self) -> usize {
        self.playback.current()
    }

    pub fn show(&mut self, rl: &mut RaylibHandle, placement: &Placement) {
        rl.set_window_size(placement.width, placement.height);
        rl.set_window_position(placement.x, placement.y);

        let mut flags = WindowState::default()
            .set_window_undecorated(true)
            .set_window_topmost(true);
        if self.options.click_through {
            flags = flags.set_window_mouse_passthrough(true);
        }
        rl.clear_window_state(WindowState::default().set_window_hidden(true));
        rl.set_window_state(flags);

        // Window managers like to map new windows behind the active one
        rl.set_window_focused();
        rl.set_window_position(placement.x, placement.y);

        self.placement = Some(*placement);
        self.visible = true;
        let frame = self.playback.start();
        self.pending.push(SurfaceEvent::FrameChanged(frame));
        info!(
            x = placement.x,
            y = placement.y,
            width = placement.width,
            height = placement.height,
            click_through = self.options.click_through,
            "window raised"
        );
    }

    pub fn hide(&mut self, rl: &mut RaylibHandle) {
        self.playback.stop();
        self.pending.clear();
        self.visible = false;
        rl.set_window_state(WindowState::default().set_window_hidden(true));
        debug!("window hidden");
    }

    /// Advances the animation and collects frame changes and dismissal input.
    pub fn update(&mut self, rl: &RaylibHandle, dt: f32) -> Vec<SurfaceEvent> {
        let mut events = std::mem::take(&mut self.pending);
        if !self.visible {
            return events;
        }

        events.extend(self.playback.advance(dt).into_iter().map(SurfaceEvent::FrameChanged));

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            events.push(SurfaceEvent::Dismissed(DismissReason::Click));
        } else if rl.is_key_pressed(KeyboardKey::KEY_ESCAPE) {
            events.push(SurfaceEvent::Dismissed(DismissReason::Escape));
        }
        events
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        let Some(placement) = self.placement.filter(|_| self.visible) else {
            return;
        };
        let texture = &self.frames[self.playback.current()];

        d.draw_texture_pro(
            texture,
            Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32), // Source rect uses original texture size
            Rectangle::new(0.0, 0.0, placement.width as f32, placement.height as f32),  // Window is exactly the placement size
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }
}
