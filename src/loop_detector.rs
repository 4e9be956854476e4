/// Spots the moment an animation starts over.
///
/// Frame reports can skip indices, so a loop is any jump back to a lower index
/// or any report of frame 0, not only an exact `last -> 0` transition.
#[derive(Debug, Default, Clone)]
pub struct LoopDetector {
    last_frame: Option<usize>,
}

impl LoopDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `frame` and returns `true` if it marks a loop boundary.
    pub fn observe(&mut self, frame: usize) -> bool {
        let looped = frame == 0 || self.last_frame.is_some_and(|last| frame < last);
        self.last_frame = Some(frame);
        looped
    }

    pub fn last_frame(&self) -> Option<usize> {
        self.last_frame
    }

    pub fn reset(&mut self) {
        self.last_frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_loops(frames: &[usize]) -> usize {
        let mut detector = LoopDetector::new();
        frames.iter().filter(|&&frame| detector.observe(frame)).count()
    }

    #[test]
    fn counts_each_return_to_zero() {
        assert_eq!(count_loops(&[0, 1, 2, 3, 0, 1, 2]), 2);
    }

    #[test]
    fn backwards_jump_counts_without_reaching_zero() {
        assert_eq!(count_loops(&[0, 1, 2, 1]), 2);
    }

    #[test]
    fn dropped_zero_frame_still_loops() {
        // 0 got dropped on the second pass
        assert_eq!(count_loops(&[0, 1, 2, 3, 1, 2, 3]), 2);
    }

    #[test]
    fn first_non_zero_frame_is_not_a_loop() {
        assert_eq!(count_loops(&[2, 3, 4]), 0);
    }

    #[test]
    fn reset_forgets_previous_frame() {
        let mut detector = LoopDetector::new();
        detector.observe(5);
        detector.reset();
        assert_eq!(detector.last_frame(), None);
        assert!(!detector.observe(3));
    }
}
