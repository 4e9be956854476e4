//! Property tests for the scare trigger and its sound sync.
//!
//! 1. The surface is shown iff `roll < probability`.
//! 2. Probability 0 never shows, probability 1 always shows.
//! 3. Sound replays match the loop boundaries of any frame sequence.

use jumpscare::audio::{SoundCue, SoundStatus};
use jumpscare::config::ScareConfig;
use jumpscare::controller::ScareController;
use jumpscare::loop_detector::LoopDetector;
use jumpscare::placement::{ContentSize, Placement, ScreenRect};
use jumpscare::stage::Stage;
use jumpscare::state::ControllerState;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct CountingStage {
    shows: usize,
}

impl Stage for CountingStage {
    fn screen_rect(&self) -> ScreenRect {
        ScreenRect::new(0, 0, 1920, 1080)
    }

    fn content_size(&self) -> ContentSize {
        ContentSize::new(400, 400)
    }

    fn show(&mut self, _placement: &Placement) -> anyhow::Result<()> {
        self.shows += 1;
        Ok(())
    }

    fn hide(&mut self) {}
}

#[derive(Default)]
struct CountingSound {
    plays: usize,
}

impl SoundCue for CountingSound {
    fn status(&mut self) -> SoundStatus {
        SoundStatus::Loaded
    }

    fn is_playing(&self) -> bool {
        false
    }

    fn play(&mut self) {
        self.plays += 1;
    }

    fn stop(&mut self) {}
}

fn controller(probability: f64) -> ScareController<CountingSound> {
    let config = ScareConfig::new("scare.gif", None, probability, 1.0).expect("valid config");
    ScareController::new(config, Some(CountingSound::default()))
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn shown_iff_roll_below_probability(probability in 0.0f64..=1.0, roll in 0.0f64..1.0) {
        let mut stage = CountingStage::default();
        let mut controller = controller(probability);

        let shown = controller.check(roll, &mut stage).expect("check never fails on a healthy stage");
        prop_assert_eq!(shown, roll < probability);
        prop_assert_eq!(stage.shows, usize::from(shown));
        prop_assert_eq!(controller.state() == ControllerState::Showing, shown);
    }

    #[test]
    fn extreme_probabilities(roll in 0.0f64..1.0) {
        let mut stage = CountingStage::default();
        prop_assert!(!controller(0.0).check(roll, &mut stage).unwrap());
        prop_assert!(controller(1.0).check(roll, &mut stage).unwrap());
    }

    #[test]
    fn sound_replays_on_every_loop_boundary(frames in prop::collection::vec(0usize..12, 0..64)) {
        let mut stage = CountingStage::default();
        let mut controller = controller(1.0);
        controller.check(0.0, &mut stage).unwrap();

        let mut detector = LoopDetector::new();
        let expected = frames.iter().filter(|&&frame| detector.observe(frame)).count();

        for &frame in &frames {
            controller.on_frame_changed(frame);
        }
        prop_assert_eq!(controller.sound().map(|sound| sound.plays), Some(expected));
    }
}
