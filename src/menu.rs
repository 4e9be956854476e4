use std::env;
use std::path::Path;
use std::process::{Child, Command};

use anyhow::Context;
use raylib::core::text::measure_text;
use raylib::prelude::*;
use tracing::{debug, info, warn};

use crate::animation::{Animation, Playback};
use crate::audio::{RodioSound, SoundCue, SoundStatus};
use crate::cli::scare_args_for;
use crate::constants::*;
use crate::presets::{MENU_BACKGROUND, MENU_MUSIC, PRESETS, Preset, SELECT_SOUND};
use crate::texture_loader::load_frame_textures;

const BUTTON_WIDTH: f32 = 260.0;
const BUTTON_HEIGHT: f32 = 48.0;
const BUTTON_GAP: f32 = 14.0;
const BUTTON_TOP: f32 = 130.0;

const NUMBER_KEYS: [KeyboardKey; 4] = [
    KeyboardKey::KEY_ONE,
    KeyboardKey::KEY_TWO,
    KeyboardKey::KEY_THREE,
    KeyboardKey::KEY_FOUR,
];

struct Background {
    frames: Vec<Texture2D>,
    playback: Playback,
}

/// One button per preset, stacked in the middle of the menu window.
pub fn button_rects(count: usize) -> Vec<Rectangle> {
    let x = (MENU_WIDTH as f32 - BUTTON_WIDTH) * 0.5;
    (0..count)
        .map(|i| Rectangle::new(x, BUTTON_TOP + i as f32 * (BUTTON_HEIGHT + BUTTON_GAP), BUTTON_WIDTH, BUTTON_HEIGHT))
        .collect()
}

/// Shows the preset menu. Picking a preset relaunches this executable in scare
/// mode and closes the menu.
pub fn run_menu() -> anyhow::Result<()> {
    let (mut rl, thread) = raylib::init()
        .size(MENU_WIDTH, MENU_HEIGHT)
        .title("Jumpscare Simulator")
        .vsync()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut background = load_background(&mut rl, &thread);
    let mut music = RodioSound::open_optional(Some(Path::new(MENU_MUSIC)), MENU_MUSIC_VOLUME, true);
    let mut select = RodioSound::open_optional(Some(Path::new(SELECT_SOUND)), SELECT_SOUND_VOLUME, false);
    let mut music_started = music.is_none();

    let buttons = button_rects(PRESETS.len());
    let mut hovered: Option<usize> = None;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        // Music loads in the background; start it as soon as it is ready
        if !music_started {
            if let Some(track) = music.as_mut() {
                match track.status() {
                    SoundStatus::Loaded => {
                        track.play();
                        music_started = true;
                    }
                    SoundStatus::Failed => music_started = true,
                    SoundStatus::Loading => {}
                }
            }
        }

        let mouse = rl.get_mouse_position();
        let now_hovered = buttons.iter().position(|button| button.check_collision_point_rec(mouse));
        if now_hovered.is_some() && now_hovered != hovered {
            if let Some(sound) = select.as_mut() {
                if sound.is_loaded() {
                    sound.play();
                }
            }
        }
        hovered = now_hovered;

        let clicked = hovered.filter(|_| rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT));
        let typed = NUMBER_KEYS
            .iter()
            .take(PRESETS.len())
            .position(|&key| rl.is_key_pressed(key));

        if let Some(index) = clicked.or(typed) {
            let preset = &PRESETS[index];
            if let Some(track) = music.as_mut() {
                track.stop();
            }
            let child = launch_scare(preset)?;
            info!(preset = preset.name, pid = child.id(), "scare launched, closing menu");
            return Ok(());
        }

        if let Some(background) = background.as_mut() {
            background.playback.advance(dt);
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);

        if let Some(background) = background.as_ref() {
            let texture = &background.frames[background.playback.current()];
            d.draw_texture_pro(
                texture,
                Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
                Rectangle::new(0.0, 0.0, MENU_WIDTH as f32, MENU_HEIGHT as f32),
                Vector2::new(0.0, 0.0),
                0.0,
                Color::new(255, 255, 255, 140),
            );
        }

        let title = "JUMPSCARE SIMULATOR";
        let title_width = measure_text(title, 36);
        d.draw_text(title, (MENU_WIDTH - title_width) / 2, 50, 36, Color::RED);

        for (i, (button, preset)) in buttons.iter().zip(PRESETS.iter()).enumerate() {
            let fill = if hovered == Some(i) { Color::new(150, 20, 20, 230) } else { Color::new(30, 30, 30, 220) };
            d.draw_rectangle_rec(*button, fill);
            d.draw_rectangle_lines_ex(*button, 2.0, Color::RED);

            let label = format!("{}. {}", i + 1, preset.name);
            let label_width = measure_text(&label, 24);
            d.draw_text(
                &label,
                (button.x + (button.width - label_width as f32) * 0.5) as i32,
                (button.y + (button.height - 24.0) * 0.5) as i32,
                24,
                Color::WHITE,
            );
        }
    }

    debug!("menu closed without a choice");
    Ok(())
}

fn load_background(rl: &mut RaylibHandle, thread: &RaylibThread) -> Option<Background> {
    let path = Path::new(MENU_BACKGROUND);
    let loaded = Animation::load(path).and_then(|animation| {
        let frames = load_frame_textures(rl, thread, path, &animation)?;
        Ok((frames, animation.delays_ms()))
    });
    match loaded {
        Ok((frames, delays)) => {
            let mut playback = Playback::new(&delays);
            playback.start();
            Some(Background { frames, playback })
        }
        Err(err) => {
            warn!(error = %err, "menu background unavailable");
            None
        }
    }
}

/// Starts `<this exe> scare ...` for `preset` as a separate process.
pub fn launch_scare(preset: &Preset) -> anyhow::Result<Child> {
    let exe = env::current_exe().context("failed to locate the running executable")?;
    Command::new(&exe)
        .args(scare_args_for(preset))
        .spawn()
        .with_context(|| format!("failed to start {} in scare mode", exe.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_fit_the_menu_without_overlapping() {
        let buttons = button_rects(PRESETS.len());
        assert_eq!(buttons.len(), PRESETS.len());
        for button in &buttons {
            assert!(button.x >= 0.0 && button.x + button.width <= MENU_WIDTH as f32);
            assert!(button.y + button.height <= MENU_HEIGHT as f32);
        }
        for pair in buttons.windows(2) {
            assert!(pair[0].y + pair[0].height < pair[1].y);
        }
    }
}
