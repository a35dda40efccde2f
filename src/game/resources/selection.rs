//! Tap-to-select state machine
//!
//! `Idle -> OriginSelected -> (attempt | Idle)`. The first click must land on an
//! occupied square; whose piece it is gets decided by the legality oracle.

use crate::game::types::{MoveAttempt, MoveMethod, Square};

/// What a click did to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Origin chosen, legal destinations should be highlighted
    Selected(Square),
    /// Second click on the origin square
    Deselected,
    /// Two different squares clicked
    Attempt(MoveAttempt),
    /// First click on an empty square
    Ignored,
}

/// Click family of the input reconciler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickSelection {
    #[default]
    Idle,
    OriginSelected {
        origin: Square,
    },
}

impl ClickSelection {
    /// Feed one click. `occupied` tells whether a piece stands on `square`.
    pub fn click(&mut self, square: Square, occupied: bool) -> ClickOutcome {
        match *self {
            ClickSelection::Idle if occupied => {
                *self = ClickSelection::OriginSelected { origin: square };
                ClickOutcome::Selected(square)
            }
            ClickSelection::Idle => ClickOutcome::Ignored,
            ClickSelection::OriginSelected { origin } => {
                *self = ClickSelection::Idle;
                if origin == square {
                    ClickOutcome::Deselected
                } else {
                    ClickOutcome::Attempt(MoveAttempt::new(origin, square, MoveMethod::Click))
                }
            }
        }
    }

    pub fn reset(&mut self) {
        *self = ClickSelection::Idle;
    }

    pub fn origin(&self) -> Option<Square> {
        match self {
            ClickSelection::Idle => None,
            ClickSelection::OriginSelected { origin } => Some(*origin),
        }
    }

    pub fn is_selected(&self) -> bool {
        self.origin().is_some()
    }
}
