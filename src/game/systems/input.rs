//! Input reconciliation
//!
//! Click and drag gestures run through their own state machines and end up as
//! [`MoveAttempt`]s in one shared sink. The engine drains the sink and keeps
//! only the newest attempt.

use crate::game::resources::{ClickOutcome, ClickSelection, DragOutcome, DragState};
use crate::game::types::{MoveAttempt, Square};
use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, warn};

/// What the engine should do after a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEffect {
    /// An origin was picked; show its legal destinations
    Highlight(Square),
    /// Selection dropped without a move
    ClearHighlights,
    /// A move attempt is waiting in the sink
    AttemptQueued(MoveAttempt),
    Nothing,
}

#[derive(Debug)]
pub struct InputReconciler {
    click: ClickSelection,
    drag: DragState,
    sink: Sender<MoveAttempt>,
    attempts: Receiver<MoveAttempt>,
}

impl Default for InputReconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputReconciler {
    pub fn new() -> Self {
        let (sink, attempts) = crossbeam_channel::unbounded();
        Self {
            click: ClickSelection::default(),
            drag: DragState::default(),
            sink,
            attempts,
        }
    }

    /// Selecting an origin by click abandons a piece still being dragged
    pub fn click(&mut self, square: Square, occupied: bool) -> InputEffect {
        match self.click.click(square, occupied) {
            ClickOutcome::Selected(origin) => {
                if self.drag.is_dragging() {
                    debug!("[INPUT] Click selection resets drag");
                    self.drag = DragState::Idle;
                }
                InputEffect::Highlight(origin)
            }
            ClickOutcome::Deselected => InputEffect::ClearHighlights,
            ClickOutcome::Attempt(attempt) => self.queue(attempt),
            ClickOutcome::Ignored => InputEffect::Nothing,
        }
    }

    /// Picking a piece up abandons any half-finished click selection
    pub fn drag_start(&mut self, square: Square, occupied: bool) -> InputEffect {
        if self.click.is_selected() {
            debug!("[INPUT] Drag start resets click selection");
            self.click.reset();
        }
        match self.drag.start(square, occupied) {
            DragOutcome::Started(origin) => InputEffect::Highlight(origin),
            _ => InputEffect::Nothing,
        }
    }

    pub fn drop_on(&mut self, square: Square) -> InputEffect {
        match self.drag.drop_on(square) {
            DragOutcome::Attempt(attempt) => self.queue(attempt),
            DragOutcome::Cancelled => InputEffect::ClearHighlights,
            DragOutcome::Started(_) | DragOutcome::Ignored => InputEffect::Nothing,
        }
    }

    pub fn drag_cancel(&mut self) -> InputEffect {
        match self.drag.cancel() {
            DragOutcome::Cancelled => InputEffect::ClearHighlights,
            _ => InputEffect::Nothing,
        }
    }

    /// Drop both selections and any queued attempts
    pub fn reset(&mut self) {
        self.click.reset();
        self.drag = DragState::Idle;
        let discarded = self.attempts.try_iter().count();
        if discarded > 0 {
            debug!("[INPUT] Discarded {} queued attempt(s)", discarded);
        }
    }

    /// Newest queued attempt; older ones are superseded
    pub fn take_latest(&self) -> Option<MoveAttempt> {
        let mut latest = None;
        let mut superseded = 0usize;
        for attempt in self.attempts.try_iter() {
            if latest.replace(attempt).is_some() {
                superseded += 1;
            }
        }
        if superseded > 0 {
            debug!("[INPUT] {} older attempt(s) superseded", superseded);
        }
        latest
    }

    /// Extra producer handle for the shared sink
    pub fn sink(&self) -> Sender<MoveAttempt> {
        self.sink.clone()
    }

    pub fn selected_origin(&self) -> Option<Square> {
        self.click.origin().or_else(|| self.drag.origin())
    }

    fn queue(&self, attempt: MoveAttempt) -> InputEffect {
        if self.sink.send(attempt).is_err() {
            warn!("[INPUT] Attempt sink closed, dropping {}", attempt);
            return InputEffect::Nothing;
        }
        debug!("[INPUT] Queued {}", attempt);
        InputEffect::AttemptQueued(attempt)
    }
}
