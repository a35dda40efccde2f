//! Authoritative move history
//!
//! One entry per `move_made` merged from the server, holding the position as
//! it stood after the merge. Speculative moves are never recorded.

use crate::game::events::MoveCue;
use crate::game::resources::position::Position;
use crate::game::types::LastMove;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub position: Position,
    pub last_move: LastMove,
    pub cue: MoveCue,
}

#[derive(Debug, Clone, Default)]
pub struct MoveHistory {
    entries: Vec<HistoryEntry>,
}

impl MoveHistory {
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Entry by ply, 0 being the first recorded move
    pub fn get(&self, ply: usize) -> Option<&HistoryEntry> {
        self.entries.get(ply)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
