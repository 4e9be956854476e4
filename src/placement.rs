use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::constants::FALLBACK_CONTENT_SIZE;

/// Geometry of the screen the surface is placed on, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentSize {
    pub width: i32,
    pub height: i32,
}

impl ContentSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Final window rectangle. `y` may be negative when overflow pushes it off-screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Placement {
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::Center,
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
        Anchor::Top,
        Anchor::Bottom,
        Anchor::Left,
        Anchor::Right,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Anchor::Center      => "center",
            Anchor::TopLeft     => "top-left",
            Anchor::TopRight    => "top-right",
            Anchor::BottomLeft  => "bottom-left",
            Anchor::BottomRight => "bottom-right",
            Anchor::Top         => "top",
            Anchor::Bottom      => "bottom",
            Anchor::Left        => "left",
            Anchor::Right       => "right",
        }
    }

    /// Parses an anchor name, falling back to [`Anchor::Center`] with a warning.
    pub fn parse_lenient(name: &str) -> Anchor {
        name.parse().unwrap_or_else(|_| {
            warn!(anchor = %name, "unknown anchor, using center");
            Anchor::Center
        })
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown anchor \"{0}\"")]
pub struct UnknownAnchor(pub String);

impl FromStr for Anchor {
    type Err = UnknownAnchor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Anchor::ALL
            .into_iter()
            .find(|anchor| anchor.name() == lowered)
            .ok_or_else(|| UnknownAnchor(s.to_string()))
    }
}

/// Everything about a placement that comes from configuration rather than
/// from the screen or the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementOptions {
    pub anchor: Anchor,
    pub allow_upscale: bool,
    pub margin: i32,
    pub offset_x: i32,
    pub offset_y: i32,
    /// Pixels of the image pushed above the top edge of the screen.
    pub overflow_top: i32,
}

/// Fits `content` into `screen` (minus margins) keeping its aspect ratio, then
/// positions it against the anchor.
pub fn compute_placement(options: &PlacementOptions, screen: ScreenRect, content: ContentSize) -> Placement {
    // Values arrive straight from the command line, so every step saturates
    let margin = options.margin;
    let max_w = screen.width.saturating_sub(margin.saturating_mul(2)).max(1) as f64;
    let max_h = screen.height.saturating_sub(margin.saturating_mul(2)).max(1) as f64;

    let content = if content.width <= 0 || content.height <= 0 {
        warn!(width = content.width, height = content.height, "invalid content size, using fallback");
        ContentSize::new(FALLBACK_CONTENT_SIZE, FALLBACK_CONTENT_SIZE)
    } else {
        content
    };
    let (w, h) = (content.width as f64, content.height as f64);

    let mut scale = (max_w / w).min(max_h / h);
    if !options.allow_upscale && scale > 1.0 {
        scale = 1.0;
    }

    let new_w = ((w * scale) as i32).max(1);
    let new_h = ((h * scale) as i32).max(1);

    // Centred axes use floor division so odd leftovers round towards the origin
    let center_x = screen.x.saturating_add(screen.width.saturating_sub(new_w).div_euclid(2));
    let center_y = screen.y.saturating_add(screen.height.saturating_sub(new_h).div_euclid(2));
    let left_x = screen.x.saturating_add(margin);
    let right_x = screen.x.saturating_add(screen.width).saturating_sub(new_w).saturating_sub(margin);
    let top_y = screen.y.saturating_add(margin);
    let bottom_y = screen.y.saturating_add(screen.height).saturating_sub(new_h).saturating_sub(margin);

    let (x, y) = match options.anchor {
        Anchor::Center      => (center_x, center_y),
        Anchor::TopLeft     => (left_x,   top_y),
        Anchor::TopRight    => (right_x,  top_y),
        Anchor::BottomLeft  => (left_x,   bottom_y),
        Anchor::BottomRight => (right_x,  bottom_y),
        Anchor::Top         => (center_x, top_y),
        Anchor::Bottom      => (center_x, bottom_y),
        Anchor::Left        => (left_x,   center_y),
        Anchor::Right       => (right_x,  center_y),
    };

    Placement {
        x: x.saturating_add(options.offset_x),
        y: y.saturating_add(options.offset_y).saturating_sub(options.overflow_top),
        width: new_w,
        height: new_h,
    }
}
