//! # Lifecycle Policy
//!
//! The status state machine. The graph is almost complete: every
//! `(current, next)` pair is legal, including self-transitions, except
//! reopening a resolved bug directly. A rejected transition is a client
//! error, never a silent no-op.

use crate::models::Status;

/// Returns whether a bug may move from `current` to `next`.
pub fn is_allowed_transition(current: Status, next: Status) -> bool {
    !(current == Status::Resolved && next == Status::Open)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Status::{InProgress, Open, Resolved};

    #[test]
    fn resolved_to_open_is_the_only_forbidden_edge() {
        let all = [Open, InProgress, Resolved];
        for current in all {
            for next in all {
                let expected = !(current == Resolved && next == Open);
                assert_eq!(
                    is_allowed_transition(current, next),
                    expected,
                    "transition {:?} -> {:?}",
                    current,
                    next
                );
            }
        }
    }

    #[test]
    fn self_transitions_are_permitted() {
        for s in [Open, InProgress, Resolved] {
            assert!(is_allowed_transition(s, s));
        }
    }
}
