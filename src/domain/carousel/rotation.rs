//! Wrapping index over a fixed-size list.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RotationError {
    #[error("carousel has no items")]
    EmptyCollection,
    #[error("index {index} is out of range for {count} items")]
    IndexOutOfRange { index: i64, count: usize },
}

/// Snapshot of the rotation. `current_index < item_count` whenever
/// `item_count > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RotationState {
    pub current_index: usize,
    pub item_count: usize,
    pub auto_advance: bool,
}

/// Advances, retreats and jumps over `item_count` slots.
///
/// Whether auto-advance is on is a plain flag; the timer that acts on it
/// lives in [`crate::application::carousel::AutoAdvance`].
#[derive(Debug, Clone)]
pub struct RotationController {
    state: RotationState,
}

impl RotationController {
    /// Starts at index 0 with auto-advance enabled.
    pub fn new(item_count: usize) -> Self {
        Self {
            state: RotationState {
                current_index: 0,
                item_count,
                auto_advance: true,
            },
        }
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn current_index(&self) -> Option<usize> {
        (self.state.item_count > 0).then_some(self.state.current_index)
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.state.auto_advance
    }

    pub fn advance(&mut self) -> Result<usize, RotationError> {
        let count = self.non_empty_count()?;
        self.state.current_index = (self.state.current_index + 1) % count;
        Ok(self.state.current_index)
    }

    pub fn retreat(&mut self) -> Result<usize, RotationError> {
        let count = self.non_empty_count()?;
        self.state.current_index = (self.state.current_index + count - 1) % count;
        Ok(self.state.current_index)
    }

    pub fn jump_to(&mut self, index: i64) -> Result<usize, RotationError> {
        let count = self.state.item_count;
        match usize::try_from(index) {
            Ok(i) if i < count => {
                self.state.current_index = i;
                Ok(i)
            }
            _ => Err(RotationError::IndexOutOfRange { index, count }),
        }
    }

    pub fn set_auto_advance(&mut self, enabled: bool) {
        self.state.auto_advance = enabled;
    }

    /// Called by the timer when an interval elapses; same as [`advance`](Self::advance).
    pub fn on_tick(&mut self) -> Result<usize, RotationError> {
        self.advance()
    }

    fn non_empty_count(&self) -> Result<usize, RotationError> {
        match self.state.item_count {
            0 => Err(RotationError::EmptyCollection),
            n => Ok(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_sequence_wraps() {
        let mut rc = RotationController::new(3);
        let seen: Vec<usize> = (0..3).map(|_| rc.advance().unwrap()).collect();
        assert_eq!(seen, vec![1, 2, 0]);
    }

    #[test]
    fn full_cycle_returns_to_start() {
        for count in 1..8 {
            for start in 0..count {
                let mut rc = RotationController::new(count);
                rc.jump_to(start as i64).unwrap();
                for _ in 0..count {
                    rc.advance().unwrap();
                }
                assert_eq!(rc.current_index(), Some(start), "count={count} start={start}");
            }
        }
    }

    #[test]
    fn retreat_then_advance_is_identity() {
        let mut rc = RotationController::new(4);
        rc.jump_to(2).unwrap();
        rc.retreat().unwrap();
        rc.advance().unwrap();
        assert_eq!(rc.current_index(), Some(2));

        rc.advance().unwrap();
        rc.retreat().unwrap();
        assert_eq!(rc.current_index(), Some(2));
    }

    #[test]
    fn retreat_from_zero_wraps_to_last() {
        let mut rc = RotationController::new(5);
        assert_eq!(rc.retreat(), Ok(4));
    }

    #[test]
    fn single_item_stays_at_zero() {
        let mut rc = RotationController::new(1);
        assert_eq!(rc.advance(), Ok(0));
        assert_eq!(rc.retreat(), Ok(0));
        assert_eq!(rc.on_tick(), Ok(0));
    }

    #[test]
    fn empty_collection_is_inert() {
        let mut rc = RotationController::new(0);
        assert_eq!(rc.advance(), Err(RotationError::EmptyCollection));
        assert_eq!(rc.retreat(), Err(RotationError::EmptyCollection));
        assert_eq!(rc.on_tick(), Err(RotationError::EmptyCollection));
        assert_eq!(rc.current_index(), None);
    }

    #[test]
    fn jump_bounds() {
        let mut rc = RotationController::new(3);
        assert_eq!(
            rc.jump_to(3),
            Err(RotationError::IndexOutOfRange { index: 3, count: 3 })
        );
        assert_eq!(
            rc.jump_to(-1),
            Err(RotationError::IndexOutOfRange { index: -1, count: 3 })
        );
        assert_eq!(rc.jump_to(0), Ok(0));
        assert_eq!(rc.jump_to(2), Ok(2));
        assert_eq!(rc.state().current_index, 2);
    }

    #[test]
    fn auto_advance_flag_toggles() {
        let mut rc = RotationController::new(2);
        assert!(rc.is_auto_advancing());
        rc.set_auto_advance(false);
        assert!(!rc.state().auto_advance);
        rc.set_auto_advance(true);
        assert!(rc.is_auto_advancing());
    }
}
