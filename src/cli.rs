//! Terminal commands
//!
//! One command per line. Squares are algebraic (`e4`) or indices (`28`).

use crate::game::events::BoardEvent;
use crate::game::systems::AppliedMove;
use crate::game::types::{PieceType, Square};
use std::str::FromStr;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  click <sq>          select a piece or its destination
  move <from> <to>    two clicks in one line
  drag <sq>           pick a piece up
  drop <sq>           put it down
  cancel              drop the dragged piece outside the board
  promote <q|r|b|n>   finish a pending promotion
  abort               cancel a pending promotion
  flip                turn the board
  set <auto-queen|legal-moves|flip-on-move> <on|off>
  history             list server-confirmed moves
  show                redraw the board
  help                this text
  quit";

/// Settings a player can change from the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingName {
    AutoQueen,
    ShowLegalMoves,
    FlipOnMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Click(Square),
    Move(Square, Square),
    Drag(Square),
    Drop(Square),
    CancelDrag,
    Promote(PieceType),
    AbortPromotion,
    Flip,
    Set(SettingName, bool),
    History,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    Arguments {
        command: &'static str,
        expected: &'static str,
    },
    #[error("'{0}' is not a square")]
    Square(String),
    #[error("'{0}' is not a piece")]
    Piece(String),
}

fn square(arg: Option<&str>, command: &'static str) -> Result<Square, CommandError> {
    let arg = arg.ok_or(CommandError::Arguments {
        command,
        expected: "a square",
    })?;
    arg.parse()
        .map_err(|_| CommandError::Square(arg.to_string()))
}

fn switch(arg: Option<&str>) -> Result<bool, CommandError> {
    match arg.map(str::to_ascii_lowercase).as_deref() {
        Some("on" | "true" | "yes" | "1") => Ok(true),
        Some("off" | "false" | "no" | "0") => Ok(false),
        _ => Err(CommandError::Arguments {
            command: "set",
            expected: "on or off",
        }),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };
        let arg = words.next();

        let command = match name.to_ascii_lowercase().as_str() {
            "click" | "c" => Command::Click(square(arg, "click")?),
            "move" | "m" => Command::Move(square(arg, "move")?, square(words.next(), "move")?),
            "drag" | "d" => Command::Drag(square(arg, "drag")?),
            "drop" => Command::Drop(square(arg, "drop")?),
            "cancel" => Command::CancelDrag,
            "promote" | "p" => {
                let arg = arg.ok_or(CommandError::Arguments {
                    command: "promote",
                    expected: "a piece",
                })?;
                Command::Promote(
                    arg.parse()
                        .map_err(|_| CommandError::Piece(arg.to_string()))?,
                )
            }
            "abort" => Command::AbortPromotion,
            "flip" => Command::Flip,
            "set" => {
                let setting = match arg.map(str::to_ascii_lowercase).as_deref() {
                    Some("auto-queen" | "auto_queen") => SettingName::AutoQueen,
                    Some("legal-moves" | "show_legal_moves") => SettingName::ShowLegalMoves,
                    Some("flip-on-move" | "flip_on_move") => SettingName::FlipOnMove,
                    _ => {
                        return Err(CommandError::Arguments {
                            command: "set",
                            expected: "auto-queen, legal-moves or flip-on-move",
                        })
                    }
                };
                Command::Set(setting, switch(words.next())?)
            }
            "history" => Command::History,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// One-line description of an event, for events worth telling the player
pub fn describe(event: &BoardEvent) -> Option<String> {
    let text = match event {
        BoardEvent::HighlightsChanged { .. } | BoardEvent::PositionLoaded => return None,
        BoardEvent::MoveApplied { attempt, applied } => match applied {
            AppliedMove::Castled { side, .. } => format!("castled {side:?} ({attempt})"),
            AppliedMove::Moved { captured: Some(piece) } => {
                format!("{attempt} takes {}", piece.piece_type)
            }
            AppliedMove::Moved { captured: None } => format!("{attempt}"),
            AppliedMove::PromotionPending { .. } => format!("{attempt} promotes"),
        },
        BoardEvent::MoveRejected { attempt } => format!("illegal move {attempt}"),
        BoardEvent::PromotionOpened { destination, choices, .. } => {
            let names: Vec<&str> = choices.order.iter().map(|piece| piece.as_str()).collect();
            format!("promotion on {destination}: promote {}", names.join("|"))
        }
        BoardEvent::PromotionResolved {
            destination,
            piece_type,
        } => format!("promoted to {piece_type} on {destination}"),
        BoardEvent::PromotionCancelled { origin, .. } => {
            format!("promotion cancelled, pawn back on {origin}")
        }
        BoardEvent::MoveSent(_) => "move sent".to_string(),
        BoardEvent::MoveDropped(_) => "not connected, move kept locally".to_string(),
        BoardEvent::AuthoritativeMove { last_move, cue } => {
            format!("server: {}{} ({cue})", last_move.from, last_move.to)
        }
        BoardEvent::ClockUpdated(_) => return None,
        BoardEvent::OrientationFlipped(orientation) => {
            format!("board turned, {orientation:?} at the bottom")
        }
        BoardEvent::GameEnded(outcome) => format!("game over: {outcome}"),
    };
    Some(text)
}
