//! Tests for heading scope tracking

mod state_tests;

use super::{HeadingState, TeilhaushaltRegistry};

/// Feed headings into a fresh state machine
pub fn state_after(headings: &[&str]) -> HeadingState {
    let mut state = HeadingState::new(TeilhaushaltRegistry::new());
    for heading in headings {
        state.register_heading(heading);
    }
    state
}
