//! Animated jumpscare overlay: a frameless, always-on-top window that pops up
//! on a probability roll and plays a sound every time its animation loops.

pub mod animation;
pub mod app;
pub mod asset;
pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod loop_detector;
pub mod menu;
pub mod placement;
pub mod presets;
pub mod stage;
pub mod state;
pub mod surface;
pub mod texture_loader;
