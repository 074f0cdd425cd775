//! Stepping through a finished hand's frames.

use crate::bootstrap::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayStep {
    Previous,
    Next,
}

/// What the replay bar shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStatus {
    /// 1-based.
    pub position: usize,
    pub total: usize,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

#[derive(Debug, Clone)]
pub struct ReplayCursor<T> {
    frames: Vec<T>,
    index: usize,
}

impl<T> ReplayCursor<T> {
    pub fn new(frames: Vec<T>) -> Result<Self, ConfigError> {
        if frames.is_empty() {
            return Err(ConfigError::EmptyReplay);
        }
        Ok(Self { frames, index: 0 })
    }

    pub fn current(&self) -> &T {
        &self.frames[self.index]
    }

    pub fn previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1).min(self.frames.len() - 1);
    }

    pub fn step(&mut self, step: ReplayStep) {
        match step {
            ReplayStep::Previous => self.previous(),
            ReplayStep::Next => self.next(),
        }
    }

    pub fn status(&self) -> ReplayStatus {
        ReplayStatus {
            position: self.index + 1,
            total: self.frames.len(),
            previous_disabled: self.index == 0,
            next_disabled: self.index == self.frames.len() - 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_histories_are_rejected() {
        assert!(matches!(
            ReplayCursor::<u8>::new(Vec::new()),
            Err(ConfigError::EmptyReplay)
        ));
    }

    #[test]
    fn steps_are_clamped() {
        let mut cursor = ReplayCursor::new(vec!['a', 'b', 'c']).unwrap();
        cursor.previous();
        assert_eq!(*cursor.current(), 'a');
        assert_eq!(
            cursor.status(),
            ReplayStatus {
                position: 1,
                total: 3,
                previous_disabled: true,
                next_disabled: false,
            }
        );

        for _ in 0..5 {
            cursor.step(ReplayStep::Next);
        }
        assert_eq!(*cursor.current(), 'c');
        let status = cursor.status();
        assert_eq!(status.position, 3);
        assert!(status.next_disabled && !status.previous_disabled);

        cursor.step(ReplayStep::Previous);
        assert_eq!(*cursor.current(), 'b');
    }

    #[test]
    fn single_frame_disables_both_directions() {
        let status = ReplayCursor::new(vec![()]).unwrap().status();
        assert!(status.previous_disabled && status.next_disabled);
    }
}
