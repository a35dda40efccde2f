//! State owned by the board engine
//!
//! Each submodule holds one piece of engine state and the small state machines
//! around it. Nothing here talks to the network or the oracle.

pub mod drag;
pub mod highlights;
pub mod history;
pub mod position;
pub mod promotion;
pub mod selection;
pub mod timer;

pub use drag::{DragOutcome, DragState};
pub use highlights::LegalHighlights;
pub use history::{HistoryEntry, MoveHistory};
pub use position::Position;
pub use promotion::{is_promotion_move, PendingPromotion, PopupAnchor, PromotionChoices};
pub use selection::{ClickOutcome, ClickSelection};
pub use timer::{format_clock, ClockState};
