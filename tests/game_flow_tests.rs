//! Game Flow Integration Tests
//!
//! Drives the board engine end to end with an in-memory legality oracle and a
//! transport that records what would have gone over the wire:
//! - Click and drag input
//! - Speculative moves, castling and promotion
//! - Authoritative merges and clock ticks

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::protocol::{ClockTick, InboundMessage, MoveData, MoveMade, OutboundMove, PositionPatch};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use xfchess_client::core::GameplaySettings;
use xfchess_client::game::resources::Position;
use xfchess_client::game::types::{
    CastlingRights, CastlingSide, Orientation, PieceColor, PieceRecord, PieceType, Square,
};
use xfchess_client::game::{BoardEngine, BoardEvent, GameError, GameOutcome, MoveCue};
use xfchess_client::networking::{
    ChannelState, LegalityOracle, MoveInfo, MoveTransport, OracleError, OracleResult, SyncError,
    SyncResult,
};

// ============================================================================
// Test doubles
// ============================================================================

/// Oracle answering from tables
#[derive(Default)]
struct ScriptedOracle {
    /// `None` accepts every move
    legal: Option<HashSet<(Square, Square)>>,
    destinations: HashMap<Square, Vec<Square>>,
    unavailable: bool,
    checkmated: Option<PieceColor>,
    stalemated: Option<PieceColor>,
    validate_calls: AtomicUsize,
    legal_moves_calls: AtomicUsize,
    game_result_calls: AtomicUsize,
}

impl ScriptedOracle {
    fn accept_all() -> Self {
        Self::default()
    }

    fn only(moves: &[(&str, &str)]) -> Self {
        Self {
            legal: Some(moves.iter().map(|(from, to)| (sq(from), sq(to))).collect()),
            ..Self::default()
        }
    }

    fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn with_destinations(mut self, origin: &str, destinations: &[&str]) -> Self {
        self.destinations
            .insert(sq(origin), destinations.iter().map(|s| sq(s)).collect());
        self
    }

    fn mating(mut self, king_color: PieceColor) -> Self {
        self.checkmated = Some(king_color);
        self
    }

    fn stalemating(mut self, king_color: PieceColor) -> Self {
        self.stalemated = Some(king_color);
        self
    }

    fn failure(endpoint: &str) -> OracleError {
        OracleError::Status {
            status: 503,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl LegalityOracle for ScriptedOracle {
    async fn is_move_legal(&self, _position: &Position, move_info: &MoveInfo) -> OracleResult<bool> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(Self::failure("validate-move"));
        }
        let Some(destination) = move_info.destination_square else {
            return Ok(false);
        };
        Ok(match &self.legal {
            None => true,
            Some(legal) => legal.contains(&(move_info.starting_square, destination)),
        })
    }

    async fn legal_moves(
        &self,
        _position: &Position,
        move_info: &MoveInfo,
    ) -> OracleResult<Vec<Square>> {
        self.legal_moves_calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(Self::failure("get-legal-moves"));
        }
        Ok(self
            .destinations
            .get(&move_info.starting_square)
            .cloned()
            .unwrap_or_default())
    }

    async fn is_checkmated(&self, _position: &Position, king_color: PieceColor) -> OracleResult<bool> {
        self.game_result_calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(Self::failure("get-is-checkmated"));
        }
        Ok(self.checkmated == Some(king_color))
    }

    async fn is_stalemated(&self, _position: &Position, king_color: PieceColor) -> OracleResult<bool> {
        self.game_result_calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(Self::failure("get-is-stalemated"));
        }
        Ok(self.stalemated == Some(king_color))
    }
}

/// Transport keeping every sent message
struct RecordingTransport {
    state: Mutex<ChannelState>,
    sent: Mutex<Vec<OutboundMove>>,
}

impl RecordingTransport {
    fn open() -> Self {
        Self::with_state(ChannelState::Open)
    }

    fn with_state(state: ChannelState) -> Self {
        Self {
            state: Mutex::new(state),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<OutboundMove> {
        self.sent.lock().clone()
    }
}

impl MoveTransport for RecordingTransport {
    fn state(&self) -> ChannelState {
        *self.state.lock()
    }

    fn send(&self, message: &OutboundMove) -> SyncResult<()> {
        let state = self.state();
        if state != ChannelState::Open {
            return Err(SyncError::NotOpen { state });
        }
        self.sent.lock().push(*message);
        Ok(())
    }
}

type TestEngine = BoardEngine<ScriptedOracle, RecordingTransport>;

fn sq(name: &str) -> Square {
    name.parse().expect("Valid square")
}

fn engine_with(oracle: ScriptedOracle, position: Position, settings: GameplaySettings) -> TestEngine {
    BoardEngine::new(
        oracle,
        RecordingTransport::open(),
        position,
        settings,
        Orientation::White,
    )
}

fn engine(position: Position) -> TestEngine {
    engine_with(ScriptedOracle::accept_all(), position, GameplaySettings::default())
}

/// Standard position with f1 and g1 emptied
fn ready_to_castle() -> Position {
    let mut position = Position::standard();
    position.take(sq("f1"));
    position.take(sq("g1"));
    position
}

/// White pawn on a7, black rook on b8, kings out of the way
fn promotion_position() -> Position {
    let mut position = Position::empty();
    position.castling_rights = CastlingRights::none();
    position.put(sq("a7"), PieceRecord::new(PieceType::Pawn, PieceColor::White));
    position.put(sq("b8"), PieceRecord::new(PieceType::Rook, PieceColor::Black));
    position.put(sq("e1"), PieceRecord::new(PieceType::King, PieceColor::White));
    position.put(sq("h8"), PieceRecord::new(PieceType::King, PieceColor::Black));
    position
}

async fn click_move(engine: &mut TestEngine, from: &str, to: &str) -> Result<(), GameError> {
    engine.on_square_click(sq(from)).await?;
    engine.on_square_click(sq(to)).await
}

async fn drag_move(engine: &mut TestEngine, from: &str, to: &str) -> Result<(), GameError> {
    engine.on_drag_start(sq(from)).await?;
    engine.on_drop(sq(to)).await
}

// ============================================================================
// Input Reconciliation
// ============================================================================

#[tokio::test]
async fn test_click_and_drag_are_equivalent() {
    //! The same squares through either gesture family give the same position
    //! and the same outbound message

    let mut clicked = engine(Position::standard());
    let mut dragged = engine(Position::standard());

    click_move(&mut clicked, "g1", "f3").await.expect("Click move should apply");
    drag_move(&mut dragged, "g1", "f3").await.expect("Drag move should apply");

    assert_eq!(clicked.position(), dragged.position());
    assert_eq!(clicked.transport().sent(), dragged.transport().sent());
    assert_eq!(clicked.transport().sent().len(), 1);
    assert_eq!(clicked.last_move(), dragged.last_move());
}

#[tokio::test]
async fn test_first_click_on_empty_square_does_nothing() {
    let mut engine = engine(Position::standard());
    engine.on_square_click(sq("e4")).await.expect("Should be ignored");

    assert_eq!(engine.selected_origin(), None);
    assert_eq!(engine.oracle().legal_moves_calls.load(Ordering::SeqCst), 0);
    assert!(engine.drain_events().is_empty());
}

#[tokio::test]
async fn test_same_square_twice_cancels_without_oracle() {
    let mut engine = engine(Position::standard());
    click_move(&mut engine, "e2", "e2").await.expect("Should cancel");

    assert_eq!(engine.position(), &Position::standard());
    assert_eq!(engine.oracle().validate_calls.load(Ordering::SeqCst), 0);
    assert!(engine.transport().sent().is_empty());
}

#[tokio::test]
async fn test_highlight_requests_are_deduplicated() {
    //! Clicking a piece and then picking the same piece up asks the oracle once

    let oracle = ScriptedOracle::accept_all().with_destinations("e2", &["e3", "e4"]);
    let mut engine = engine_with(oracle, Position::standard(), GameplaySettings::default());

    engine.on_square_click(sq("e2")).await.expect("Should select");
    engine.on_drag_start(sq("e2")).await.expect("Should start drag");

    assert_eq!(engine.oracle().legal_moves_calls.load(Ordering::SeqCst), 1);
    assert!(engine.highlights().contains(sq("e4")));

    let events = engine.drain_events();
    assert_eq!(
        events,
        vec![BoardEvent::HighlightsChanged {
            origin: Some(sq("e2")),
            destinations: vec![sq("e3"), sq("e4")],
        }]
    );
}

#[tokio::test]
async fn test_highlights_cleared_when_move_resolves() {
    let oracle = ScriptedOracle::accept_all().with_destinations("e2", &["e3", "e4"]);
    let mut engine = engine_with(oracle, Position::standard(), GameplaySettings::default());

    click_move(&mut engine, "e2", "e4").await.expect("Should apply");
    assert!(engine.highlights().is_empty());
    assert!(engine.drain_events().contains(&BoardEvent::HighlightsChanged {
        origin: None,
        destinations: Vec::new(),
    }));
}

#[tokio::test]
async fn test_highlights_disabled_by_setting() {
    let settings = GameplaySettings {
        show_legal_moves: false,
        ..GameplaySettings::default()
    };
    let oracle = ScriptedOracle::accept_all().with_destinations("e2", &["e3", "e4"]);
    let mut engine = engine_with(oracle, Position::standard(), settings);

    engine.on_square_click(sq("e2")).await.expect("Should select");
    assert_eq!(engine.oracle().legal_moves_calls.load(Ordering::SeqCst), 0);
    assert!(engine.highlights().is_empty());
}

#[tokio::test]
async fn test_drag_cancel_returns_to_idle() {
    let mut engine = engine(Position::standard());
    engine.on_drag_start(sq("b1")).await.expect("Should start drag");
    engine.on_drag_cancel();

    assert_eq!(engine.selected_origin(), None);
    engine.on_drop(sq("c3")).await.expect("Drop without drag is ignored");
    assert_eq!(engine.position(), &Position::standard());
}

#[tokio::test]
async fn test_move_command_ignores_stale_selection() {
    //! A leftover click on e2 must not turn "g1 to f3" into e2 to g1

    let mut engine = engine(Position::standard());
    engine.on_square_click(sq("e2")).await.expect("Should select");

    engine.play_move(sq("g1"), sq("f3")).await.expect("Move should apply");

    let sent = engine.transport().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].starting_square, sq("g1"));
    assert_eq!(sent[0].destination_square, sq("f3"));
    assert!(engine.position().is_occupied(sq("e2")));
}

#[tokio::test]
async fn test_move_command_from_empty_square_fails() {
    let mut engine = engine(Position::standard());

    let result = engine.play_move(sq("e4"), sq("e2")).await;
    assert!(matches!(result, Err(GameError::EmptyOrigin { .. })));
    // The destination must not end up selected instead
    assert_eq!(engine.selected_origin(), None);
    assert_eq!(engine.position(), &Position::standard());
    assert!(engine.transport().sent().is_empty());
}

#[tokio::test]
async fn test_click_abandons_drag() {
    //! Clicking another piece while one is being dragged drops the drag

    let mut engine = engine(Position::standard());
    engine.on_drag_start(sq("b1")).await.expect("Should start drag");
    engine.on_square_click(sq("g1")).await.expect("Should select");
    assert_eq!(engine.selected_origin(), Some(sq("g1")));

    engine.on_drop(sq("c3")).await.expect("Stale drop is ignored");
    assert_eq!(engine.position(), &Position::standard());

    engine.on_square_click(sq("f3")).await.expect("Move should apply");
    let sent = engine.transport().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].starting_square, sq("g1"));
}

// ============================================================================
// Speculative Moves
// ============================================================================

#[tokio::test]
async fn test_rejected_move_changes_nothing() {
    let oracle = ScriptedOracle::only(&[("e2", "e4")]);
    let mut engine = engine_with(oracle, Position::standard(), GameplaySettings::default());

    let result = click_move(&mut engine, "e2", "e5").await;
    assert!(matches!(result, Err(GameError::MoveRejected { .. })));
    assert_eq!(engine.position(), &Position::standard());
    assert!(engine.transport().sent().is_empty());
    assert_eq!(engine.last_move(), None);
}

#[tokio::test]
async fn test_oracle_failure_counts_as_rejection() {
    let mut engine =
        engine_with(ScriptedOracle::unavailable(), Position::standard(), GameplaySettings::default());

    let result = drag_move(&mut engine, "e2", "e4").await;
    assert!(matches!(result, Err(GameError::MoveRejected { .. })));
    assert_eq!(engine.position(), &Position::standard());
    assert!(engine.transport().sent().is_empty());
}

#[tokio::test]
async fn test_white_castles_kingside() {
    //! e1 -> g1 relocates the rook from h1 to f1 and drops both white rights

    let mut engine = engine(ready_to_castle());
    click_move(&mut engine, "e1", "g1").await.expect("Castle should apply");

    let position = engine.position();
    assert_eq!(position.piece_at(sq("g1")).unwrap().piece_type, PieceType::King);
    assert_eq!(position.piece_at(sq("f1")).unwrap().piece_type, PieceType::Rook);
    assert!(!position.is_occupied(sq("e1")));
    assert!(!position.is_occupied(sq("h1")));

    let rights = position.castling_rights;
    assert!(!rights.can_castle(PieceColor::White, CastlingSide::Kingside));
    assert!(!rights.can_castle(PieceColor::White, CastlingSide::Queenside));
    assert!(rights.can_castle(PieceColor::Black, CastlingSide::Kingside));

    let sent = engine.transport().sent();
    assert_eq!(sent.len(), 1, "Castling sends exactly one move");
    assert_eq!(sent[0].piece_type, PieceType::King);
    assert_eq!(sent[0].starting_square, sq("e1"));
    assert_eq!(sent[0].destination_square, sq("g1"));
}

#[tokio::test]
async fn test_castling_rights_never_rise_locally() {
    let mut engine = engine(ready_to_castle());
    let mut previous = engine.position().castling_rights;

    for (from, to) in [("h1", "g1"), ("g1", "h1"), ("e1", "f1"), ("f1", "e1")] {
        click_move(&mut engine, from, to).await.expect("Move should apply");
        let current = engine.position().castling_rights;
        assert!(current.is_subset_of(&previous), "Rights rose after {from}{to}");
        previous = current;
    }
    assert!(!previous.can_castle(PieceColor::White, CastlingSide::Kingside));
    assert!(!previous.can_castle(PieceColor::White, CastlingSide::Queenside));
}

#[tokio::test]
async fn test_closed_channel_drops_move_but_keeps_speculation() {
    let mut engine = BoardEngine::new(
        ScriptedOracle::accept_all(),
        RecordingTransport::with_state(ChannelState::Closed),
        Position::standard(),
        GameplaySettings::default(),
        Orientation::White,
    );

    click_move(&mut engine, "e2", "e4").await.expect("Move should apply");
    assert!(engine.position().is_occupied(sq("e4")));
    assert!(engine.transport().sent().is_empty());
    assert!(engine
        .drain_events()
        .iter()
        .any(|event| matches!(event, BoardEvent::MoveDropped(_))));
}

#[tokio::test]
async fn test_flip_on_move() {
    let settings = GameplaySettings {
        flip_on_move: true,
        ..GameplaySettings::default()
    };
    let mut engine = engine_with(ScriptedOracle::accept_all(), Position::standard(), settings);

    click_move(&mut engine, "e2", "e4").await.expect("Move should apply");
    assert_eq!(engine.orientation(), Orientation::Black);

    // A rejected move does not turn the board
    let mut rejecting = engine_with(ScriptedOracle::only(&[]), Position::standard(), settings);
    let _ = click_move(&mut rejecting, "e2", "e4").await;
    assert_eq!(rejecting.orientation(), Orientation::White);
}

// ============================================================================
// Promotion
// ============================================================================

#[tokio::test]
async fn test_promotion_cancel_restores_position() {
    //! a7 x b8, then cancel: pawn back on a7, rook back on b8, nothing sent

    let before = promotion_position();
    let mut engine = engine(before.clone());

    click_move(&mut engine, "a7", "b8").await.expect("Move should apply");
    let pending = engine.pending_promotion().expect("Promotion should be pending");
    assert_eq!(pending.destination, sq("b8"));
    assert_eq!(pending.captured_piece.unwrap().piece_type, PieceType::Rook);
    assert!(!engine.position().is_occupied(sq("a7")));
    assert!(engine.transport().sent().is_empty());

    engine.cancel_promotion().expect("Cancel should succeed");
    assert_eq!(engine.position(), &before);
    assert!(engine.pending_promotion().is_none());
    assert!(engine.transport().sent().is_empty());
}

#[tokio::test]
async fn test_promotion_confirm_sends_choice() {
    let mut engine = engine(promotion_position());
    drag_move(&mut engine, "a7", "a8").await.expect("Move should apply");

    let events = engine.drain_events();
    assert!(events
        .iter()
        .any(|event| matches!(event, BoardEvent::PromotionOpened { .. })));

    engine
        .confirm_promotion(PieceType::Knight)
        .expect("Confirm should succeed");
    let knight = engine.position().piece_at(sq("a8")).unwrap();
    assert_eq!(knight.piece_type, PieceType::Knight);
    assert_eq!(knight.piece_color, PieceColor::White);

    let sent = engine.transport().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].piece_type, PieceType::Pawn);
    assert_eq!(sent[0].additional_info.promoted_piece, Some(PieceType::Knight));
    assert_eq!(engine.last_move().unwrap().to, sq("a8"));
}

#[tokio::test]
async fn test_auto_queen_sends_once_without_popup() {
    let settings = GameplaySettings {
        auto_queen: true,
        ..GameplaySettings::default()
    };
    let mut engine = engine_with(ScriptedOracle::accept_all(), promotion_position(), settings);

    click_move(&mut engine, "a7", "b8").await.expect("Move should apply");

    assert!(engine.pending_promotion().is_none());
    assert_eq!(
        engine.position().piece_at(sq("b8")).unwrap().piece_type,
        PieceType::Queen
    );

    let sent = engine.transport().sent();
    assert_eq!(sent.len(), 1, "Exactly one outbound message");
    let json: serde_json::Value =
        serde_json::from_str(&sent[0].to_json().expect("Should serialize")).expect("Valid JSON");
    assert_eq!(json["additional_info"]["promoted_piece"], "queen");

    assert!(!engine
        .drain_events()
        .iter()
        .any(|event| matches!(event, BoardEvent::PromotionOpened { .. })));
}

#[tokio::test]
async fn test_gestures_ignored_while_promotion_pending() {
    let mut engine = engine(promotion_position());
    click_move(&mut engine, "a7", "a8").await.expect("Move should apply");
    let limbo = engine.position().clone();

    click_move(&mut engine, "e1", "e2").await.expect("Ignored gestures are not errors");
    drag_move(&mut engine, "h8", "h7").await.expect("Ignored gestures are not errors");

    assert_eq!(engine.position(), &limbo);
    assert!(engine.pending_promotion().is_some());
}

#[tokio::test]
async fn test_promotion_without_pending_fails_fast() {
    let mut engine = engine(Position::standard());
    assert!(matches!(
        engine.confirm_promotion(PieceType::Queen),
        Err(GameError::NoPendingPromotion)
    ));
    assert!(matches!(
        engine.cancel_promotion(),
        Err(GameError::NoPendingPromotion)
    ));
    assert_eq!(engine.position(), &Position::standard());
}

#[tokio::test]
async fn test_invalid_promotion_choice_keeps_pending() {
    let mut engine = engine(promotion_position());
    click_move(&mut engine, "a7", "a8").await.expect("Move should apply");

    assert!(matches!(
        engine.confirm_promotion(PieceType::King),
        Err(GameError::InvalidPromotionChoice { .. })
    ));
    assert!(engine.pending_promotion().is_some());
    assert!(engine.transport().sent().is_empty());

    engine.confirm_promotion(PieceType::Rook).expect("Second choice is valid");
    assert!(engine.pending_promotion().is_none());
}

// ============================================================================
// Authoritative Sync
// ============================================================================

fn server_move(from: &str, to: &str, patch: PositionPatch) -> InboundMessage {
    InboundMessage::MoveMade(MoveMade {
        new_parsed_fen: patch,
        move_data: MoveData {
            starting_square: sq(from),
            destination_square: sq(to),
        },
        move_type: Some("capture".to_string()),
    })
}

#[tokio::test]
async fn test_server_move_overrides_speculation() {
    let mut engine = engine(Position::standard());
    click_move(&mut engine, "e2", "e4").await.expect("Move should apply");

    // Server settles on a different placement and restores castling rights
    let authoritative = Position::standard();
    engine.apply_inbound(server_move(
        "d2",
        "d4",
        PositionPatch {
            board_placement: Some(authoritative.placement.clone()),
            castling_rights: Some(CastlingRights::all()),
            ..PositionPatch::default()
        },
    ));

    assert_eq!(engine.position().placement, authoritative.placement);
    assert_eq!(engine.last_move().unwrap().from, sq("d2"));
    assert_eq!(engine.history().len(), 1);
    assert_eq!(engine.history().last().unwrap().cue, MoveCue::Capture);
}

#[tokio::test]
async fn test_merging_twice_is_a_no_op() {
    let mut engine = engine(Position::standard());
    let mut placement = Position::standard().placement;
    let pawn = placement.remove(&sq("e7")).expect("Pawn on e7");
    placement.insert(sq("e5"), pawn);
    let message = server_move(
        "e7",
        "e5",
        PositionPatch {
            board_placement: Some(placement),
            side_to_move: Some(PieceColor::White),
            ..PositionPatch::default()
        },
    );

    engine.apply_inbound(message.clone());
    let once = engine.position().clone();
    engine.apply_inbound(message);
    assert_eq!(engine.position(), &once);
}

#[tokio::test]
async fn test_server_move_keeps_pending_promotion() {
    //! A server move merged mid-promotion leaves the popup resolvable

    let before = promotion_position();
    let mut engine = engine(before.clone());
    click_move(&mut engine, "a7", "b8").await.expect("Move should apply");

    engine.apply_inbound(server_move(
        "h8",
        "g8",
        PositionPatch {
            side_to_move: Some(PieceColor::White),
            ..PositionPatch::default()
        },
    ));

    let pending = engine.pending_promotion().expect("Promotion should still be pending");
    assert_eq!(pending.destination, sq("b8"));

    engine.cancel_promotion().expect("Cancel should succeed");
    let pawn = engine.position().piece_at(sq("a7")).expect("Pawn back on a7");
    assert_eq!(pawn.piece_type, PieceType::Pawn);
    let rook = engine.position().piece_at(sq("b8")).expect("Rook back on b8");
    assert_eq!(rook.piece_type, PieceType::Rook);
    assert_eq!(rook.piece_color, PieceColor::Black);
    assert_eq!(engine.position().side_to_move, Some(PieceColor::White));
    assert!(engine.transport().sent().is_empty());
}

#[tokio::test]
async fn test_promotion_confirmed_after_server_move() {
    let mut engine = engine(promotion_position());
    click_move(&mut engine, "a7", "b8").await.expect("Move should apply");
    engine.apply_inbound(server_move("h8", "g8", PositionPatch::default()));

    engine
        .confirm_promotion(PieceType::Queen)
        .expect("Confirm should succeed");
    let queen = engine.position().piece_at(sq("b8")).expect("Queen on b8");
    assert_eq!(queen.piece_type, PieceType::Queen);
    assert_eq!(engine.transport().sent().len(), 1);
}

#[tokio::test]
async fn test_clock_ticks_never_touch_position() {
    let mut engine = engine(Position::standard());
    click_move(&mut engine, "e2", "e4").await.expect("Move should apply");
    let before = engine.position().clone();

    engine.apply_inbound(InboundMessage::TimerDecremented(ClockTick {
        white_player_clock: 295.4,
        black_player_clock: 300.0,
    }));

    assert_eq!(engine.position(), &before);
    let clocks = engine.clocks().expect("Clocks should be set");
    assert_eq!(clocks.white_seconds, 295.4);
    assert_eq!(clocks.black_seconds, 300.0);
}

#[tokio::test]
async fn test_unknown_message_is_ignored() {
    let mut engine = engine(Position::standard());
    engine.drain_events();
    engine.apply_inbound(InboundMessage::Unknown);
    assert!(engine.drain_events().is_empty());
    assert_eq!(engine.position(), &Position::standard());
}

#[tokio::test]
async fn test_load_position_resets_state() {
    let mut engine = engine(promotion_position());
    click_move(&mut engine, "a7", "a8").await.expect("Move should apply");

    engine.load_position(Position::standard());
    assert!(engine.pending_promotion().is_none());
    assert_eq!(engine.last_move(), None);
    assert!(engine.history().is_empty());
    assert_eq!(engine.position(), &Position::standard());
}

// ============================================================================
// Game End
// ============================================================================

#[tokio::test]
async fn test_local_move_asks_about_the_opponent() {
    //! After White moves, the oracle is asked whether Black is mated

    let oracle = ScriptedOracle::accept_all().mating(PieceColor::Black);
    let mut engine = engine_with(oracle, Position::standard(), GameplaySettings::default());
    click_move(&mut engine, "d1", "h5").await.expect("Move should apply");
    engine.drain_events();

    let outcome = engine.check_game_end().await;
    let expected = GameOutcome::Checkmate {
        winner: PieceColor::White,
    };
    assert_eq!(outcome, Some(expected));
    assert_eq!(engine.outcome(), Some(expected));
    assert_eq!(engine.drain_events(), vec![BoardEvent::GameEnded(expected)]);

    // Nothing new happened, so nothing more is asked
    let calls = engine.oracle().game_result_calls.load(Ordering::SeqCst);
    assert_eq!(engine.check_game_end().await, None);
    assert_eq!(engine.oracle().game_result_calls.load(Ordering::SeqCst), calls);
}

#[tokio::test]
async fn test_server_move_asks_about_side_to_move() {
    let oracle = ScriptedOracle::accept_all().stalemating(PieceColor::Black);
    let mut engine = engine_with(oracle, Position::standard(), GameplaySettings::default());

    engine.apply_inbound(server_move(
        "e2",
        "e4",
        PositionPatch {
            side_to_move: Some(PieceColor::Black),
            ..PositionPatch::default()
        },
    ));

    assert_eq!(engine.check_game_end().await, Some(GameOutcome::Stalemate));
    assert_eq!(engine.oracle().game_result_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_no_move_means_no_game_end_question() {
    let mut engine = engine(Position::standard());
    assert_eq!(engine.check_game_end().await, None);
    assert_eq!(engine.oracle().game_result_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unreachable_oracle_lets_game_go_on() {
    let mut engine = engine_with(
        ScriptedOracle::unavailable(),
        Position::standard(),
        GameplaySettings::default(),
    );
    engine.apply_inbound(server_move("e7", "e5", PositionPatch::default()));
    engine.drain_events();

    assert_eq!(engine.check_game_end().await, None);
    assert_eq!(engine.outcome(), None);
    assert!(engine.drain_events().is_empty());
    assert_eq!(engine.oracle().game_result_calls.load(Ordering::SeqCst), 1);
}
