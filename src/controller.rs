use anyhow::Context;
use rand::Rng;
use tracing::{debug, error, info};

use crate::audio::{SoundCue, SoundStatus};
use crate::config::{RunMode, ScareConfig};
use crate::constants::*;
use crate::loop_detector::LoopDetector;
use crate::placement::compute_placement;
use crate::stage::{DismissReason, Stage};
use crate::state::ControllerState;

/// Draws a uniform roll in `[0, 1)`.
pub fn roll<R: Rng>(rng: &mut R) -> f64 {
    rng.random::<f64>()
}

/// Decides when the scare appears and keeps its sound in step with the animation.
///
/// All timers are delta-time accumulators advanced by [`ScareController::tick`],
/// so nothing here ever blocks the frame loop.
pub struct ScareController<C: SoundCue> {
    config: ScareConfig,
    sound: Option<C>,
    state: ControllerState,

    check_timer: f32,
    dwell_timer: f32,
    // Countdown to the next playback attempt after a show
    sound_timer: Option<f32>,

    loops: LoopDetector,
    finished: bool,
    shows: u32,
}

impl<C: SoundCue> ScareController<C> {
    pub fn new(config: ScareConfig, sound: Option<C>) -> Self {
        info!(
            probability = config.probability.value(),
            interval_ms = (config.interval * 1000.0) as u32,
            mode = ?config.mode,
            silent = sound.is_none(),
            "controller started"
        );
        Self {
            config,
            sound,
            state: ControllerState::Idle,
            check_timer: 0.0,
            dwell_timer: 0.0,
            sound_timer: None,
            loops: LoopDetector::new(),
            finished: false,
            shows: 0,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn config(&self) -> &ScareConfig {
        &self.config
    }

    pub fn sound(&self) -> Option<&C> {
        self.sound.as_ref()
    }

    /// Set once a single-shot scare has been dismissed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn show_count(&self) -> u32 {
        self.shows
    }

    /// Advances all timers by `dt` seconds. Failures are logged, never returned,
    /// so the periodic check keeps running.
    pub fn tick<S: Stage, R: Rng>(&mut self, dt: f32, stage: &mut S, rng: &mut R) {
        if let Err(err) = self.try_tick(dt, stage, rng) {
            error!(error = ?err, "scare tick failed");
        }
    }

    fn try_tick<S: Stage, R: Rng>(&mut self, dt: f32, stage: &mut S, rng: &mut R) -> anyhow::Result<()> {
        self.update_sound(dt);

        match self.state {
            ControllerState::Idle => {
                // Single-shot rolls exactly once, up front
                if self.config.mode == RunMode::SingleShot {
                    return Ok(());
                }
                self.check_timer += dt;
                if self.check_timer >= self.config.interval {
                    // Missed checks during a stall are dropped, not queued
                    self.check_timer = (self.check_timer - self.config.interval) % self.config.interval;
                    self.check(roll(rng), stage)?;
                }
            }
            ControllerState::Showing => {
                if self.config.mode == RunMode::Continuous {
                    self.dwell_timer += dt;
                    if self.dwell_timer >= self.config.dwell {
                        debug!(dwell = self.config.dwell, "dwell elapsed");
                        self.conceal(stage);
                    }
                }
            }
        }
        Ok(())
    }

    /// Applies one roll. Returns whether the surface was shown.
    pub fn check<S: Stage>(&mut self, roll: f64, stage: &mut S) -> anyhow::Result<bool> {
        if self.state == ControllerState::Showing {
            debug!(roll, "already showing, check ignored");
            return Ok(false);
        }
        if !self.config.probability.hits(roll) {
            debug!(roll, probability = self.config.probability.value(), "no scare this time");
            return Ok(false);
        }
        info!(roll, probability = self.config.probability.value(), "scare triggered");
        self.present(stage)?;
        Ok(true)
    }

    fn present<S: Stage>(&mut self, stage: &mut S) -> anyhow::Result<()> {
        let placement = compute_placement(&self.config.placement, stage.screen_rect(), stage.content_size());
        stage.show(&placement).context("failed to show scare surface")?;

        self.state = ControllerState::Showing;
        self.dwell_timer = 0.0;
        self.loops.reset();
        self.shows += 1;
        if self.sound.is_some() {
            self.sound_timer = Some(INITIAL_SOUND_DELAY);
        }

        info!(
            x = placement.x,
            y = placement.y,
            width = placement.width,
            height = placement.height,
            overflow_top = self.config.placement.overflow_top,
            "surface shown"
        );
        Ok(())
    }

    /// Replays the sound whenever the animation starts over.
    pub fn on_frame_changed(&mut self, frame: usize) {
        if self.state != ControllerState::Showing {
            return;
        }
        let previous = self.loops.last_frame();
        if !self.loops.observe(frame) {
            return;
        }
        debug!(frame, ?previous, "animation looped");

        let Some(sound) = self.sound.as_mut() else {
            return;
        };
        if sound.is_loaded() {
            if sound.is_playing() {
                sound.stop();
            }
            sound.play();
            // The loop replay covers the pending initial playback
            self.sound_timer = None;
        } else {
            debug!("sound not loaded yet, loop replay skipped");
        }
    }

    /// Hides the surface right away in response to user input.
    pub fn dismiss<S: Stage>(&mut self, reason: DismissReason, stage: &mut S) {
        if self.state != ControllerState::Showing {
            return;
        }
        info!(?reason, "surface dismissed");
        self.conceal(stage);
        if self.config.mode == RunMode::SingleShot {
            self.finished = true;
        }
    }

    fn conceal<S: Stage>(&mut self, stage: &mut S) {
        if let Some(sound) = self.sound.as_mut() {
            sound.stop();
        }
        stage.hide();

        self.state = ControllerState::Idle;
        self.dwell_timer = 0.0;
        self.sound_timer = None;
        self.check_timer = 0.0;
        self.loops.reset();
        debug!("surface hidden, checks re-armed");
    }

    fn update_sound(&mut self, dt: f32) {
        let Some(remaining) = self.sound_timer else {
            return;
        };
        let remaining = remaining - dt;
        if remaining > 0.0 {
            self.sound_timer = Some(remaining);
            return;
        }

        let Some(sound) = self.sound.as_mut() else {
            self.sound_timer = None;
            return;
        };
        match sound.status() {
            SoundStatus::Loaded => {
                info!("playing scare sound");
                sound.play();
                self.sound_timer = None;
            }
            SoundStatus::Loading => {
                debug!("sound still loading, retrying");
                self.sound_timer = Some(SOUND_RETRY_DELAY);
            }
            SoundStatus::Failed => {
                self.sound_timer = None;
            }
        }
    }
}
