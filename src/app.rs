use anyhow::{Context, anyhow};
use raylib::core::window::{get_monitor_height, get_monitor_position, get_monitor_width};
use raylib::ffi::ConfigFlags;
use raylib::prelude::*;
use tracing::info;

use crate::asset::ScareAsset;
use crate::audio::RodioSound;
use crate::config::{RunMode, ScareConfig};
use crate::constants::*;
use crate::controller::{ScareController, roll};
use crate::error::AssetError;
use crate::placement::{ContentSize, Placement, ScreenRect};
use crate::stage::{Stage, SurfaceEvent};
use crate::surface::{Surface, SurfaceOptions};

const PRIMARY_MONITOR: i32 = 0;

/// Owns the raylib window and the single surface living in it. There is one
/// per process, created at startup and dropped on exit.
pub struct AppContext {
    rl: RaylibHandle,
    thread: RaylibThread,
    surface: Option<Surface>,
}

impl AppContext {
    /// Opens a hidden, transparent, undecorated window ready to host a surface.
    pub fn init(title: &str) -> Self {
        // The builder has no hidden flag. raylib ORs config flags, so this one
        // survives the builder's own call and the window is never mapped visible.
        // SAFETY: only sets bits in raylib's pending flags, before InitWindow.
        unsafe { raylib::ffi::SetConfigFlags(startup_flags()) };
        let (mut rl, thread) = raylib::init()
            .size(FALLBACK_CONTENT_SIZE, FALLBACK_CONTENT_SIZE)
            .title(title)
            .undecorated()
            .transparent()
            .build();
        rl.set_target_fps(FPS);
        rl.set_trace_log(TraceLogLevel::LOG_ERROR);
        // Escape dismisses the surface, it must not close the loop
        rl.set_exit_key(None);

        Self { rl, thread, surface: None }
    }

    pub fn attach_surface(&mut self, asset: &ScareAsset, options: SurfaceOptions) -> Result<(), AssetError> {
        let surface = Surface::create(&mut self.rl, &self.thread, asset, options)?;
        self.surface = Some(surface);
        Ok(())
    }

    pub fn should_close(&self) -> bool {
        self.rl.window_should_close()
    }

    pub fn frame_time(&self) -> f32 {
        self.rl.get_frame_time()
    }

    pub fn poll_surface(&mut self, dt: f32) -> Vec<SurfaceEvent> {
        match self.surface.as_mut() {
            Some(surface) => surface.update(&self.rl, dt),
            None => Vec::new(),
        }
    }

    pub fn draw(&mut self) {
        let mut d = self.rl.begin_drawing(&self.thread);
        d.clear_background(Color::BLANK);
        if let Some(surface) = self.surface.as_ref() {
            surface.draw(&mut d);
        }
    }
}

/// Config flags applied before the window exists.
fn startup_flags() -> u32 {
    ConfigFlags::FLAG_WINDOW_HIDDEN as u32
}

impl Stage for AppContext {
    fn screen_rect(&self) -> ScreenRect {
        // Whole monitor, task bars included
        let origin = get_monitor_position(PRIMARY_MONITOR);
        ScreenRect::new(
            origin.x as i32,
            origin.y as i32,
            get_monitor_width(PRIMARY_MONITOR),
            get_monitor_height(PRIMARY_MONITOR),
        )
    }

    fn content_size(&self) -> ContentSize {
        self.surface
            .as_ref()
            .map(Surface::content_size)
            .unwrap_or(ContentSize::new(FALLBACK_CONTENT_SIZE, FALLBACK_CONTENT_SIZE))
    }

    fn show(&mut self, placement: &Placement) -> anyhow::Result<()> {
        let surface = self.surface.as_mut().ok_or_else(|| anyhow!("no surface attached"))?;
        surface.show(&mut self.rl, placement);
        Ok(())
    }

    fn hide(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.hide(&mut self.rl);
        }
    }
}

/// Runs the scare until the window closes or, in single-shot mode, until it
/// is dismissed. Returns early without opening a window if the single roll misses.
pub fn run_scare(config: ScareConfig) -> anyhow::Result<()> {
    let mut rng = rand::rng();

    let first_roll = match config.mode {
        RunMode::SingleShot => {
            let first_roll = roll(&mut rng);
            info!(roll = first_roll, probability = config.probability.value(), "single-shot roll");
            if !config.probability.hits(first_roll) {
                info!("scare not triggered");
                return Ok(());
            }
            Some(first_roll)
        }
        RunMode::Continuous => None,
    };

    let asset = ScareAsset::load(&config.image_path, config.sound_path.as_deref())
        .context("failed to load scare asset")?;
    let sound = RodioSound::open_optional(asset.sound_path(), config.volume, false);

    let mut ctx = AppContext::init("jumpscare");
    ctx.attach_surface(&asset, SurfaceOptions { click_through: config.click_through })
        .context("failed to prepare scare surface")?;

    let mut controller = ScareController::new(config, sound);
    if let Some(first_roll) = first_roll {
        controller.check(first_roll, &mut ctx).context("failed to show scare")?;
    } else {
        info!("continuous mode running, close the process to stop");
    }

    // --- Main Loop ---
    while !ctx.should_close() && !controller.is_finished() {
        let dt = ctx.frame_time();

        for event in ctx.poll_surface(dt) {
            match event {
                SurfaceEvent::FrameChanged(frame) => controller.on_frame_changed(frame),
                SurfaceEvent::Dismissed(reason) => controller.dismiss(reason, &mut ctx),
            }
        }
        controller.tick(dt, &mut ctx, &mut rng);

        ctx.draw();
    }

    info!(shows = controller.show_count(), "scare loop finished");
    Ok(())
}
