//! Drag-and-drop state machine
//!
//! `Idle -> Dragging -> (attempt | Idle)`. Dropping back on the origin or outside
//! the board returns to `Idle` without an attempt.

use crate::game::types::{MoveAttempt, MoveMethod, Square};

/// What a drag gesture did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Piece picked up, legal destinations should be highlighted
    Started(Square),
    /// Dropped on the origin or cancelled
    Cancelled,
    /// Dropped on another square
    Attempt(MoveAttempt),
    /// Drag started on an empty square, or drop without a drag
    Ignored,
}

/// Drag family of the input reconciler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        origin: Square,
    },
}

impl DragState {
    pub fn start(&mut self, square: Square, occupied: bool) -> DragOutcome {
        if !occupied {
            return DragOutcome::Ignored;
        }
        *self = DragState::Dragging { origin: square };
        DragOutcome::Started(square)
    }

    pub fn drop_on(&mut self, square: Square) -> DragOutcome {
        let DragState::Dragging { origin } = *self else {
            return DragOutcome::Ignored;
        };
        *self = DragState::Idle;
        if origin == square {
            DragOutcome::Cancelled
        } else {
            DragOutcome::Attempt(MoveAttempt::new(origin, square, MoveMethod::Drag))
        }
    }

    /// Drop outside the board
    pub fn cancel(&mut self) -> DragOutcome {
        match std::mem::take(self) {
            DragState::Dragging { .. } => DragOutcome::Cancelled,
            DragState::Idle => DragOutcome::Ignored,
        }
    }

    pub fn origin(&self) -> Option<Square> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { origin } => Some(*origin),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.origin().is_some()
    }
}
