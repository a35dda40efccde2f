//! Legal-destination highlighting
//!
//! Both input families ask for highlights when they pick an origin. A request
//! for the origin that is already highlighted (or already being fetched) is
//! dropped so the oracle is asked once per selection.

use crate::game::types::Square;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalHighlights {
    origin: Option<Square>,
    destinations: BTreeSet<Square>,
}

impl LegalHighlights {
    /// Register interest in `origin`. Returns `false` for a duplicate request.
    pub fn request(&mut self, origin: Square) -> bool {
        if self.origin == Some(origin) {
            return false;
        }
        self.origin = Some(origin);
        self.destinations.clear();
        true
    }

    /// Store the oracle's answer. Answers for an origin that is no longer
    /// selected are discarded.
    pub fn fill(&mut self, origin: Square, destinations: impl IntoIterator<Item = Square>) -> bool {
        if self.origin != Some(origin) {
            return false;
        }
        self.destinations = destinations.into_iter().collect();
        true
    }

    /// Idempotent. Returns whether anything was highlighted before.
    pub fn clear(&mut self) -> bool {
        let had_any = self.origin.is_some();
        self.origin = None;
        self.destinations.clear();
        had_any
    }

    pub fn origin(&self) -> Option<Square> {
        self.origin
    }

    pub fn contains(&self, square: Square) -> bool {
        self.destinations.contains(&square)
    }

    pub fn destinations(&self) -> impl Iterator<Item = Square> + '_ {
        self.destinations.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.origin.is_none()
    }
}
