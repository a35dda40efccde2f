//! Board engine
//!
//! Owns the position and everything around it (clocks, pending promotion,
//! highlights, last move, history) and is the only writer of any of it. The
//! host feeds it gestures and server messages, one operation at a time, and
//! drains [`BoardEvent`]s afterwards to redraw.
//!
//! Local moves are speculative: once the oracle says yes they are applied and
//! sent. Whatever the server says later overwrites them.

use crate::core::GameplaySettings;
use crate::game::error::{GameError, GameResult};
use crate::game::events::{BoardEvent, GameOutcome};
use crate::game::resources::{
    ClockState, HistoryEntry, LegalHighlights, MoveHistory, PendingPromotion, Position,
    PromotionChoices,
};
use crate::game::systems::{
    apply_speculative, cancel_promotion, confirm_promotion, merge_move_made, AppliedMove,
    InputEffect, InputReconciler,
};
use crate::game::types::{LastMove, MoveAttempt, Orientation, PieceColor, PieceType, Square};
use crate::networking::{LegalityOracle, MoveInfo, MoveTransport};
use shared::protocol::{InboundMessage, OutboundMove};
use tracing::{debug, error, info, warn};

pub struct BoardEngine<O: LegalityOracle, T: MoveTransport> {
    oracle: O,
    transport: T,
    settings: GameplaySettings,
    position: Position,
    clocks: Option<ClockState>,
    input: InputReconciler,
    highlights: LegalHighlights,
    pending_promotion: Option<PendingPromotion>,
    last_move: Option<LastMove>,
    history: MoveHistory,
    orientation: Orientation,
    /// Side whose mate/stalemate status must be asked after the latest move
    verdict_due: Option<PieceColor>,
    outcome: Option<GameOutcome>,
    events: Vec<BoardEvent>,
}

impl<O: LegalityOracle, T: MoveTransport> BoardEngine<O, T> {
    pub fn new(
        oracle: O,
        transport: T,
        position: Position,
        settings: GameplaySettings,
        orientation: Orientation,
    ) -> Self {
        Self {
            oracle,
            transport,
            settings,
            position,
            clocks: None,
            input: InputReconciler::new(),
            highlights: LegalHighlights::default(),
            pending_promotion: None,
            last_move: None,
            history: MoveHistory::default(),
            orientation,
            verdict_due: None,
            outcome: None,
            events: Vec::new(),
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn clocks(&self) -> Option<&ClockState> {
        self.clocks.as_ref()
    }

    pub fn highlights(&self) -> &LegalHighlights {
        &self.highlights
    }

    pub fn pending_promotion(&self) -> Option<&PendingPromotion> {
        self.pending_promotion.as_ref()
    }

    /// Popup layout for the pending promotion, if any
    pub fn promotion_choices(&self) -> Option<PromotionChoices> {
        self.pending_promotion
            .as_ref()
            .map(|pending| pending.choices(self.orientation))
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Result of the game once the oracle reported mate or stalemate
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn settings(&self) -> &GameplaySettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: GameplaySettings) {
        self.settings = settings;
        if !settings.show_legal_moves {
            self.clear_highlights();
        }
    }

    /// Currently selected origin of either input family
    pub fn selected_origin(&self) -> Option<Square> {
        self.input.selected_origin()
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Events produced since the last call
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    pub async fn on_square_click(&mut self, square: Square) -> GameResult<()> {
        if self.gestures_blocked("click") {
            return Ok(());
        }
        let occupied = self.position.is_occupied(square);
        let effect = self.input.click(square, occupied);
        self.handle_input(effect).await
    }

    pub async fn on_drag_start(&mut self, square: Square) -> GameResult<()> {
        if self.gestures_blocked("drag") {
            return Ok(());
        }
        let occupied = self.position.is_occupied(square);
        let effect = self.input.drag_start(square, occupied);
        self.handle_input(effect).await
    }

    pub async fn on_drop(&mut self, square: Square) -> GameResult<()> {
        if self.gestures_blocked("drop") {
            return Ok(());
        }
        let effect = self.input.drop_on(square);
        self.handle_input(effect).await
    }

    /// Origin and destination clicks in one call
    ///
    /// Any half-finished selection is dropped first so it cannot swallow the
    /// origin click.
    pub async fn play_move(&mut self, from: Square, to: Square) -> GameResult<()> {
        if self.gestures_blocked("move") {
            return Ok(());
        }
        if !self.position.is_occupied(from) {
            info!("[INPUT] No piece on {} to move", from);
            return Err(GameError::EmptyOrigin { square: from });
        }
        if let Some(stale) = self.input.selected_origin() {
            debug!("[INPUT] Dropping selection on {} before {}{}", stale, from, to);
        }
        self.input.reset();
        self.clear_highlights();

        self.on_square_click(from).await?;
        self.on_square_click(to).await
    }

    /// Piece dropped outside the board
    pub fn on_drag_cancel(&mut self) {
        if let InputEffect::ClearHighlights = self.input.drag_cancel() {
            self.clear_highlights();
        }
    }

    /// Resolve the newest queued attempt; older ones are discarded
    ///
    /// `&mut self` keeps a second resolution from starting while the oracle is
    /// still being asked about the first.
    pub async fn resolve_attempts(&mut self) -> GameResult<()> {
        if let Some(pending) = &self.pending_promotion {
            let destination = pending.destination;
            if let Some(attempt) = self.input.take_latest() {
                warn!(
                    "[MOVE] Ignoring {} while promotion on {} is pending",
                    attempt, destination
                );
            }
            return Err(GameError::PromotionAlreadyPending { destination });
        }

        let Some(attempt) = self.input.take_latest() else {
            return Ok(());
        };
        self.clear_highlights();
        self.execute_attempt(attempt).await
    }

    /// Finish the pending promotion with `piece_type` and send it
    pub fn confirm_promotion(&mut self, piece_type: PieceType) -> GameResult<()> {
        let Some(pending) = self.pending_promotion.clone() else {
            error!("[PROMOTION] Confirm called with no promotion pending");
            return Err(GameError::NoPendingPromotion);
        };
        if let Err(e) = self.finish_promotion(&pending, piece_type) {
            error!("[PROMOTION] {}", e);
            return Err(e);
        }
        self.pending_promotion = None;
        Ok(())
    }

    /// Undo the pending promotion; nothing is sent
    pub fn cancel_promotion(&mut self) -> GameResult<()> {
        let Some(pending) = self.pending_promotion.take() else {
            error!("[PROMOTION] Cancel called with no promotion pending");
            return Err(GameError::NoPendingPromotion);
        };
        cancel_promotion(&mut self.position, &pending);
        self.events.push(BoardEvent::PromotionCancelled {
            origin: pending.origin,
            destination: pending.destination,
        });
        Ok(())
    }

    /// Merge one decoded server message
    pub fn apply_inbound(&mut self, message: InboundMessage) {
        match message {
            InboundMessage::MoveMade(made) => {
                // An open promotion survives the merge; confirm or cancel still resolve it
                if let Some(pending) = &self.pending_promotion {
                    debug!(
                        "[NETWORK_MOVE] Server move merged while promotion on {} is pending",
                        pending.destination
                    );
                }

                let (last_move, cue) = merge_move_made(&mut self.position, &made);
                self.last_move = Some(last_move);
                self.verdict_due = self.position.side_to_move.or_else(|| {
                    self.position
                        .piece_at(last_move.to)
                        .map(|piece| piece.piece_color.opposite())
                });
                self.history.record(HistoryEntry {
                    position: self.position.clone(),
                    last_move,
                    cue,
                });
                self.events.push(BoardEvent::AuthoritativeMove { last_move, cue });
            }
            InboundMessage::TimerDecremented(tick) => {
                let clocks = self.clocks.get_or_insert_with(ClockState::default);
                clocks.merge(&tick);
                self.events.push(BoardEvent::ClockUpdated(*clocks));
            }
            InboundMessage::Unknown => {
                debug!("[NETWORK] Unknown message ignored");
            }
        }
    }

    /// Ask the oracle whether the player to move after the latest move is
    /// mated or stalemated
    ///
    /// Only asks once per move. Oracle failures mean the game goes on.
    pub async fn check_game_end(&mut self) -> Option<GameOutcome> {
        let king_color = self.verdict_due.take()?;
        if self.outcome.is_some() {
            return None;
        }

        let outcome = match self.oracle.is_checkmated(&self.position, king_color).await {
            Ok(true) => Some(GameOutcome::Checkmate {
                winner: king_color.opposite(),
            }),
            Ok(false) => match self.oracle.is_stalemated(&self.position, king_color).await {
                Ok(true) => Some(GameOutcome::Stalemate),
                Ok(false) => None,
                Err(e) => {
                    warn!("[ORACLE] Could not check stalemate for {}: {}", king_color, e);
                    None
                }
            },
            Err(e) => {
                warn!("[ORACLE] Could not check checkmate for {}: {}", king_color, e);
                None
            }
        };

        if let Some(outcome) = outcome {
            info!("[BOARD] Game over: {}", outcome);
            self.outcome = Some(outcome);
            self.events.push(BoardEvent::GameEnded(outcome));
        }
        outcome
    }

    pub fn flip(&mut self) {
        self.orientation = self.orientation.flipped();
        info!("[BOARD] Orientation is now {:?}", self.orientation);
        self.events.push(BoardEvent::OrientationFlipped(self.orientation));
    }

    /// Replace the whole position and drop all state tied to the old one
    pub fn load_position(&mut self, position: Position) {
        self.position = position;
        self.pending_promotion = None;
        self.input.reset();
        self.clear_highlights();
        self.last_move = None;
        self.verdict_due = None;
        self.outcome = None;
        self.history.clear();
        info!("[BOARD] Position loaded");
        self.events.push(BoardEvent::PositionLoaded);
    }

    fn gestures_blocked(&self, gesture: &str) -> bool {
        match &self.pending_promotion {
            Some(pending) => {
                debug!(
                    "[INPUT] Ignoring {} while promotion on {} is pending",
                    gesture, pending.destination
                );
                true
            }
            None => false,
        }
    }

    async fn handle_input(&mut self, effect: InputEffect) -> GameResult<()> {
        match effect {
            InputEffect::Highlight(origin) => {
                self.request_highlights(origin).await;
                Ok(())
            }
            InputEffect::ClearHighlights => {
                self.clear_highlights();
                Ok(())
            }
            InputEffect::AttemptQueued(_) => self.resolve_attempts().await,
            InputEffect::Nothing => Ok(()),
        }
    }

    async fn request_highlights(&mut self, origin: Square) {
        if !self.settings.show_legal_moves {
            return;
        }
        let Some(piece) = self.position.piece_at(origin).copied() else {
            return;
        };
        if !self.highlights.request(origin) {
            debug!("[INPUT] Highlights for {} already requested", origin);
            return;
        }

        let info = MoveInfo::new(piece.piece_color, piece.piece_type, origin);
        match self.oracle.legal_moves(&self.position, &info).await {
            Ok(destinations) => {
                if self.highlights.fill(origin, destinations) {
                    self.events.push(BoardEvent::HighlightsChanged {
                        origin: Some(origin),
                        destinations: self.highlights.destinations().collect(),
                    });
                }
            }
            Err(e) => warn!("[INPUT] Could not fetch legal moves for {}: {}", origin, e),
        }
    }

    fn clear_highlights(&mut self) {
        if self.highlights.clear() {
            self.events.push(BoardEvent::HighlightsChanged {
                origin: None,
                destinations: Vec::new(),
            });
        }
    }

    async fn execute_attempt(&mut self, attempt: MoveAttempt) -> GameResult<()> {
        let Some(piece) = self.position.piece_at(attempt.origin).copied() else {
            error!("[MOVE] {} starts on an empty square", attempt);
            return Err(GameError::EmptyOrigin {
                square: attempt.origin,
            });
        };

        let info = MoveInfo::new(piece.piece_color, piece.piece_type, attempt.origin)
            .to(attempt.destination);
        let legal = match self.oracle.is_move_legal(&self.position, &info).await {
            Ok(legal) => legal,
            Err(e) => {
                warn!("[MOVE] Oracle unavailable for {}: {}", attempt, e);
                false
            }
        };
        if !legal {
            info!("[MOVE] {} rejected", attempt);
            self.events.push(BoardEvent::MoveRejected { attempt });
            return Err(GameError::MoveRejected {
                origin: attempt.origin,
                destination: attempt.destination,
            });
        }

        let speculative = apply_speculative(&mut self.position, &attempt)?;
        self.events.push(BoardEvent::MoveApplied {
            attempt,
            applied: speculative.applied,
        });

        if let AppliedMove::PromotionPending { captured } = speculative.applied {
            let pending = PendingPromotion {
                origin: attempt.origin,
                destination: attempt.destination,
                color: speculative.mover.piece_color,
                captured_piece: captured,
                method: attempt.method,
            };
            if self.settings.auto_queen {
                return self.finish_promotion(&pending, PieceType::Queen);
            }
            info!("[PROMOTION] Waiting for a piece on {}", pending.destination);
            self.events.push(BoardEvent::PromotionOpened {
                destination: pending.destination,
                color: pending.color,
                choices: pending.choices(self.orientation),
            });
            self.pending_promotion = Some(pending);
            return Ok(());
        }

        if let Some(outbound) = speculative.outbound(&attempt) {
            self.transmit(outbound);
        }
        self.complete_local_move(
            speculative.mover.piece_color,
            attempt.origin,
            attempt.destination,
        );
        Ok(())
    }

    fn finish_promotion(
        &mut self,
        pending: &PendingPromotion,
        piece_type: PieceType,
    ) -> GameResult<()> {
        let outbound = confirm_promotion(&mut self.position, pending, piece_type)?;
        self.events.push(BoardEvent::PromotionResolved {
            destination: pending.destination,
            piece_type,
        });
        self.transmit(outbound);
        self.complete_local_move(pending.color, pending.origin, pending.destination);
        Ok(())
    }

    fn complete_local_move(&mut self, mover: PieceColor, from: Square, to: Square) {
        self.last_move = Some(LastMove { from, to });
        self.verdict_due = Some(mover.opposite());
        if self.settings.flip_on_move {
            self.flip();
        }
    }

    fn transmit(&mut self, outbound: OutboundMove) {
        if !self.transport.is_open() {
            debug!(
                "[NETWORK] Channel {:?}, dropping move {} -> {}",
                self.transport.state(),
                outbound.starting_square,
                outbound.destination_square
            );
            self.events.push(BoardEvent::MoveDropped(outbound));
            return;
        }
        match self.transport.send(&outbound) {
            Ok(()) => {
                info!(
                    "[NETWORK] Sent {} {} -> {}",
                    outbound.piece_type, outbound.starting_square, outbound.destination_square
                );
                self.events.push(BoardEvent::MoveSent(outbound));
            }
            Err(e) => {
                warn!("[NETWORK] Failed to send move: {}", e);
                self.events.push(BoardEvent::MoveDropped(outbound));
            }
        }
    }
}
