//! State machine for GlassPeek

/// Application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Ready to capture a region
    Idle,
    /// Selection overlay is up
    Selecting,
}

impl AppState {
    /// Check if a capture may start
    pub fn can_capture(&self) -> bool {
        matches!(self, AppState::Idle)
    }
}

/// State machine transitions
#[derive(Debug)]
pub struct StateMachine {
    state: AppState,
    peeks_opened: usize,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: AppState::Idle,
            peeks_opened: 0,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    /// Peek windows opened since start
    pub fn peeks_opened(&self) -> usize {
        self.peeks_opened
    }

    /// Transition to selecting state
    pub fn start_selecting(&mut self) -> bool {
        if self.state.can_capture() {
            self.state = AppState::Selecting;
            true
        } else {
            false
        }
    }

    /// Selection produced a peek window
    pub fn finish_selecting(&mut self) -> bool {
        if matches!(self.state, AppState::Selecting) {
            self.state = AppState::Idle;
            self.peeks_opened += 1;
            true
        } else {
            false
        }
    }

    /// Cancel selection and return to idle
    pub fn cancel_selecting(&mut self) -> bool {
        if matches!(self.state, AppState::Selecting) {
            self.state = AppState::Idle;
            true
        } else {
            false
        }
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_trigger_during_selection_is_refused() {
        let mut machine = StateMachine::new();
        assert!(machine.start_selecting());
        assert!(!machine.start_selecting());
        assert_eq!(machine.state(), AppState::Selecting);
    }

    #[test]
    fn finishing_counts_peeks() {
        let mut machine = StateMachine::new();
        assert!(!machine.finish_selecting());

        machine.start_selecting();
        assert!(machine.finish_selecting());
        assert_eq!(machine.state(), AppState::Idle);
        assert_eq!(machine.peeks_opened(), 1);
    }

    #[test]
    fn cancel_returns_to_idle_without_counting() {
        let mut machine = StateMachine::default();
        machine.start_selecting();
        assert!(machine.cancel_selecting());
        assert!(!machine.cancel_selecting());
        assert_eq!(machine.peeks_opened(), 0);
        assert!(machine.state().can_capture());
    }
}
