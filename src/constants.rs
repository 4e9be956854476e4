pub const FPS: u32 = 60;                           // Frames per second of the event loop

pub const DEFAULT_PROBABILITY: f64 = 0.01;         // Chance per check that the scare fires
pub const DEFAULT_INTERVAL: f32 = 1.0;             // Seconds between probability checks
pub const MIN_INTERVAL: f32 = 0.1;                 // Shortest accepted check interval (seconds)
pub const DWELL_DURATION: f32 = 3.0;               // Seconds the surface stays up before auto-hiding
pub const DEFAULT_OVERFLOW_TOP: i32 = 300;         // Pixels pushed above the screen, so the scare drops in from the top
pub const MAX_MARGIN: i32 = 10_000;                // Largest accepted --margin
pub const MAX_PIXEL_SHIFT: i32 = 100_000;          // Largest accepted |offset| or |overflow|

pub const INITIAL_SOUND_DELAY: f32 = 0.05;         // Delay between show and the first sound attempt
pub const SOUND_RETRY_DELAY: f32 = 0.1;            // Delay between "is the sound loaded yet" polls

pub const FALLBACK_CONTENT_SIZE: i32 = 400;        // Used when the image reports no usable size
pub const MIN_FRAME_DELAY_MS: u32 = 10;            // Frame delays at or below this are bogus
pub const DEFAULT_FRAME_DELAY_MS: u32 = 100;       // What bogus frame delays are replaced with

pub const MENU_WIDTH: i32 = 784;                   // Fixed menu window width
pub const MENU_HEIGHT: i32 = 431;                  // Fixed menu window height
pub const MENU_MUSIC_VOLUME: f32 = 0.5;
pub const SELECT_SOUND_VOLUME: f32 = 0.5;
