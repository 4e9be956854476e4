#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub enum ControllerState {
    #[default]
    Idle,    // Waiting for the next probability check
    Showing, // Surface is up, checks are ignored
}
