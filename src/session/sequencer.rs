use crate::model::Step;
use crate::session::SessionError;

/// Owns the current position within an ordered, immutable step list.
/// Navigation is bounds-checked; `next`/`prev` clamp at the ends instead of
/// failing, only explicit jumps can be rejected.
#[derive(Debug)]
pub struct StepSequencer {
    steps: Vec<Step>,
    current: usize,
}

impl StepSequencer {
    pub fn new(steps: Vec<Step>) -> Result<Self, SessionError> {
        if steps.is_empty() {
            return Err(SessionError::EmptySession);
        }
        Ok(Self { steps, current: 0 })
    }

    /// Advance one step. No-op at the last step.
    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.steps.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Go back one step. No-op at the first step.
    pub fn prev(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to an arbitrary index. Out-of-range leaves the position unchanged.
    pub fn jump_to(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.steps.len() {
            return Err(SessionError::OutOfRangeIndex {
                index,
                len: self.steps.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &Step {
        // Invariant: 0 <= current < steps.len(), established at construction.
        &self.steps[self.current]
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current == self.steps.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(id: &str) -> Step {
        Step {
            id: id.into(),
            title: None,
            description: format!("do {id}"),
            order: 0,
            timer_seconds: None,
        }
    }

    fn sequencer(n: usize) -> StepSequencer {
        let steps = (0..n).map(|i| step(&format!("s{i}"))).collect();
        StepSequencer::new(steps).unwrap()
    }

    #[test]
    fn empty_step_list_is_rejected() {
        assert!(matches!(
            StepSequencer::new(Vec::new()),
            Err(SessionError::EmptySession)
        ));
    }

    #[test]
    fn next_clamps_at_last_step() {
        let mut seq = sequencer(3);
        assert!(seq.next());
        assert!(seq.next());
        assert!(seq.is_last());
        assert!(!seq.next());
        assert_eq!(seq.current_index(), 2);
    }

    #[test]
    fn prev_clamps_at_first_step() {
        let mut seq = sequencer(3);
        assert!(seq.is_first());
        assert!(!seq.prev());
        assert_eq!(seq.current_index(), 0);
    }

    #[test]
    fn jump_to_valid_index_moves() {
        let mut seq = sequencer(5);
        seq.jump_to(3).unwrap();
        assert_eq!(seq.current_index(), 3);
        assert_eq!(seq.current_step().id, "s3");
        assert!(!seq.is_first());
        assert!(!seq.is_last());
    }

    #[test]
    fn jump_to_out_of_range_leaves_state_unchanged() {
        let mut seq = sequencer(2);
        seq.jump_to(1).unwrap();
        let err = seq.jump_to(2).unwrap_err();
        assert!(matches!(err, SessionError::OutOfRangeIndex { index: 2, len: 2 }));
        assert_eq!(seq.current_index(), 1);
    }

    #[test]
    fn single_step_is_both_first_and_last() {
        let seq = sequencer(1);
        assert!(seq.is_first());
        assert!(seq.is_last());
    }
}
