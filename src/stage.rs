use crate::placement::{ContentSize, Placement, ScreenRect};

/// What the controller needs from whatever puts pixels on screen.
pub trait Stage {
    fn screen_rect(&self) -> ScreenRect;
    fn content_size(&self) -> ContentSize;
    fn show(&mut self, placement: &Placement) -> anyhow::Result<()>;
    fn hide(&mut self);
}

/// Why the surface went away before its dwell period ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Click,
    Escape,
}

/// Notifications raised by the surface during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    FrameChanged(usize),
    Dismissed(DismissReason),
}
