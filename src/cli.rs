use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{RunMode, ScareConfig};
use crate::constants::*;
use crate::error::ConfigError;
use crate::placement::{Anchor, PlacementOptions};
use crate::presets::{self, Preset};

#[derive(Debug, Parser)]
#[command(name = "jumpscare", version, about = "Pops an animated scare on screen, with sound")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Run a scare right away, rolling every second with certainty.
    /// Missing paths fall back to the first preset.
    #[arg(long, num_args = 0..=2, value_names = ["IMAGE", "SOUND"])]
    pub jumpscare: Option<Vec<PathBuf>>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pick a preset from a menu (the default).
    Menu,
    /// Run a scare with explicit settings.
    Scare(ScareArgs),
}

#[derive(Debug, Args)]
pub struct ScareArgs {
    /// Animated image to show (GIF, or any still image)
    #[arg(long, required_unless_present = "preset", conflicts_with = "preset")]
    pub image: Option<PathBuf>,

    /// Use a built-in image/sound pair by name
    #[arg(long)]
    pub preset: Option<String>,

    /// Sound played on every animation loop; "none" for silence
    #[arg(long)]
    pub sound: Option<PathBuf>,

    /// Chance per check that the scare fires, 0.0 to 1.0
    #[arg(long, default_value_t = DEFAULT_PROBABILITY)]
    pub probability: f64,

    /// Seconds between checks (at least 0.1)
    #[arg(long, default_value_t = DEFAULT_INTERVAL)]
    pub interval: f32,

    /// Seconds the scare stays up in continuous mode
    #[arg(long, default_value_t = DWELL_DURATION)]
    pub dwell: f32,

    /// Roll once, show until dismissed, then exit
    #[arg(long)]
    pub once: bool,

    /// center, top-left, top-right, bottom-left, bottom-right, top, bottom, left or right
    #[arg(long, default_value = "center")]
    pub anchor: String,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i32).range(0..=i64::from(MAX_MARGIN)))]
    pub margin: i32,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true, value_parser = pixel_shift())]
    pub offset_x: i32,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true, value_parser = pixel_shift())]
    pub offset_y: i32,

    /// Pixels of the image pushed above the top of the screen
    #[arg(long, default_value_t = DEFAULT_OVERFLOW_TOP, allow_negative_numbers = true, value_parser = pixel_shift())]
    pub overflow_top: i32,

    /// Allow scaling the image above its native size
    #[arg(long)]
    pub upscale: bool,

    /// Catch clicks and Escape to dismiss instead of letting input through
    #[arg(long)]
    pub interactive: bool,

    #[arg(long, default_value_t = 1.0)]
    pub volume: f32,
}

fn pixel_shift() -> clap::builder::RangedI64ValueParser<i32> {
    clap::value_parser!(i32).range(-i64::from(MAX_PIXEL_SHIFT)..=i64::from(MAX_PIXEL_SHIFT))
}

/// What the process should do, resolved from the command line.
#[derive(Debug)]
pub enum Mode {
    Menu,
    Scare(ScareConfig),
}

impl Cli {
    pub fn into_mode(self) -> Result<Mode, ConfigError> {
        if let Some(paths) = self.jumpscare {
            let mut paths = paths.into_iter();
            let preset = presets::default_preset();
            let image = paths.next().unwrap_or_else(|| PathBuf::from(preset.image));
            let sound = paths.next().unwrap_or_else(|| PathBuf::from(preset.sound));
            let placement = PlacementOptions { overflow_top: DEFAULT_OVERFLOW_TOP, ..PlacementOptions::default() };
            let config = ScareConfig::new(image, Some(sound), 1.0, 1.0)?.with_placement(placement);
            return Ok(Mode::Scare(config));
        }

        match self.command {
            None | Some(Command::Menu) => Ok(Mode::Menu),
            Some(Command::Scare(args)) => args.into_config().map(Mode::Scare),
        }
    }
}

impl ScareArgs {
    pub fn into_config(self) -> Result<ScareConfig, ConfigError> {
        let (image, preset_sound) = match (&self.image, &self.preset) {
            (Some(image), _) => (image.clone(), None),
            (None, Some(name)) => {
                let preset = presets::find(name).ok_or_else(|| ConfigError::UnknownPreset(name.clone()))?;
                (PathBuf::from(preset.image), Some(PathBuf::from(preset.sound)))
            }
            // clap enforces one of the two
            (None, None) => return Err(ConfigError::UnknownPreset(String::new())),
        };

        let placement = PlacementOptions {
            anchor: Anchor::parse_lenient(&self.anchor),
            allow_upscale: self.upscale,
            margin: self.margin,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            overflow_top: self.overflow_top,
        };
        let mode = if self.once { RunMode::SingleShot } else { RunMode::Continuous };

        let mut config = ScareConfig::new(image, self.sound.or(preset_sound), self.probability, self.interval)?
            .with_dwell(self.dwell)?
            .with_mode(mode)
            .with_placement(placement);
        config.click_through = !self.interactive;
        config.volume = self.volume;
        Ok(config)
    }
}

/// Arguments that relaunch this executable straight into a preset's scare.
pub fn scare_args_for(preset: &Preset) -> Vec<OsString> {
    let overflow_top = DEFAULT_OVERFLOW_TOP.to_string();
    [
        "scare", "--image", preset.image, "--sound", preset.sound,
        "--probability", "1", "--interval", "1", "--overflow-top", &overflow_top,
    ]
    .into_iter()
    .map(OsString::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(args: &[&str]) -> Result<Mode, ConfigError> {
        let argv = std::iter::once("jumpscare").chain(args.iter().copied());
        Cli::try_parse_from(argv).expect("arguments should parse").into_mode()
    }

    fn scare(args: &[&str]) -> ScareConfig {
        match parse(args) {
            Ok(Mode::Scare(config)) => config,
            other => panic!("expected scare mode, got {other:?}"),
        }
    }

    #[test]
    fn no_arguments_opens_the_menu() {
        assert!(matches!(parse(&[]), Ok(Mode::Menu)));
        assert!(matches!(parse(&["menu"]), Ok(Mode::Menu)));
    }

    #[test]
    fn legacy_flag_runs_continuously_with_certainty() {
        let config = scare(&["--jumpscare", "a.gif", "b.wav"]);
        assert_eq!(config.image_path, Path::new("a.gif"));
        assert_eq!(config.sound_path.as_deref(), Some(Path::new("b.wav")));
        assert_eq!(config.probability.value(), 1.0);
        assert_eq!(config.interval, 1.0);
        assert_eq!(config.mode, RunMode::Continuous);
        assert_eq!(config.placement.anchor, Anchor::Center);
        assert_eq!(config.placement.overflow_top, DEFAULT_OVERFLOW_TOP);
    }

    #[test]
    fn legacy_flag_defaults_to_first_preset() {
        let config = scare(&["--jumpscare"]);
        let preset = presets::default_preset();
        assert_eq!(config.image_path, Path::new(preset.image));
        assert_eq!(config.sound_path.as_deref(), Some(Path::new(preset.sound)));
    }

    #[test]
    fn scare_arguments_fill_the_config() {
        let config = scare(&[
            "scare", "--image", "x.gif", "--sound", "none", "--probability", "0.25", "--interval", "2.5",
            "--once", "--anchor", "Bottom-Right", "--margin", "8", "--offset-x", "-20", "--overflow-top", "300",
            "--interactive",
        ]);
        assert_eq!(config.sound_path, None);
        assert_eq!(config.probability.value(), 0.25);
        assert_eq!(config.interval, 2.5);
        assert_eq!(config.mode, RunMode::SingleShot);
        assert_eq!(config.placement.anchor, Anchor::BottomRight);
        assert_eq!(config.placement.margin, 8);
        assert_eq!(config.placement.offset_x, -20);
        assert_eq!(config.placement.overflow_top, 300);
        assert!(!config.click_through);
    }

    #[test]
    fn preset_supplies_image_and_sound() {
        let config = scare(&["scare", "--preset", "vinnie"]);
        assert_eq!(config.image_path, Path::new("assets/video_jumpscare/Vinnie.gif"));
        assert_eq!(config.sound_path.as_deref(), Some(Path::new("assets/audios/Vinnie.wav")));
        assert!(config.click_through);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        assert_eq!(
            parse(&["scare", "--preset", "foxy"]).err(),
            Some(ConfigError::UnknownPreset("foxy".into()))
        );
    }

    #[test]
    fn out_of_range_probability_is_an_error() {
        assert_eq!(
            parse(&["scare", "--image", "x.gif", "--probability", "1.5"]).err(),
            Some(ConfigError::ProbabilityOutOfRange(1.5))
        );
    }

    #[test]
    fn image_is_required_without_preset() {
        assert!(Cli::try_parse_from(["jumpscare", "scare"]).is_err());
    }

    #[test]
    fn relaunch_arguments_round_trip() {
        let preset = presets::find("rat").unwrap();
        let argv = std::iter::once(OsString::from("jumpscare")).chain(scare_args_for(preset));
        let config = match Cli::try_parse_from(argv).unwrap().into_mode().unwrap() {
            Mode::Scare(config) => config,
            Mode::Menu => panic!("relaunch must not reopen the menu"),
        };
        assert_eq!(config.image_path, Path::new(preset.image));
        assert_eq!(config.probability.value(), 1.0);
        assert_eq!(config.mode, RunMode::Continuous);
        assert_eq!(config.placement.overflow_top, 300);
    }

    #[test]
    fn scare_descends_from_above_by_default() {
        let config = scare(&["scare", "--image", "x.gif"]);
        assert_eq!(config.placement.overflow_top, DEFAULT_OVERFLOW_TOP);
        let config = scare(&["scare", "--image", "x.gif", "--overflow-top", "0"]);
        assert_eq!(config.placement.overflow_top, 0);
    }

    #[test]
    fn out_of_range_pixel_values_are_rejected() {
        assert!(Cli::try_parse_from(["jumpscare", "scare", "--image", "x.gif", "--margin", "1500000000"]).is_err());
        assert!(Cli::try_parse_from(["jumpscare", "scare", "--image", "x.gif", "--margin", "-1"]).is_err());
        assert!(Cli::try_parse_from(["jumpscare", "scare", "--image", "x.gif", "--offset-x", "2147483647"]).is_err());
        assert!(Cli::try_parse_from(["jumpscare", "scare", "--image", "x.gif", "--offset-y", "-100001"]).is_err());

        let config = scare(&["scare", "--image", "x.gif", "--margin", "10000", "--offset-x", "-100000"]);
        assert_eq!(config.placement.margin, 10_000);
        assert_eq!(config.placement.offset_x, -100_000);
    }
}
