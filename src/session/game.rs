//! The game session: event dispatch and orchestration.
//!
//! `GameSession` owns every piece of game state (board, services, timers,
//! the bus) and is the single dispatcher: publishing an event walks the
//! bus's ordered subscriber snapshot and routes to the owning service's
//! handler. Each handler's follow-up events are fully dispatched before the
//! next subscriber sees the triggering event, so a cascade like
//! flip-completed / pair-ready / pair-resolved / score-changed settles
//! depth-first and deterministically.
//!
//! Board rebuilds (restart, layout change, restore) advance the session
//! generation: per-board subscriptions and pending timer entries from the
//! old board are invalidated wholesale rather than torn down one by one.
//! The session's own subscriptions are `PERSISTENT` and survive rebuilds.
//!
//! Time never comes from a clock here; the external driver calls
//! `tick(now)` and everything delayed is polled off that.

use tracing::{debug, info, warn};

use crate::core::{
    BoardGenerator, BoardState, CardId, CardState, EngineError, EngineRng, GameRules, Layout,
    PairId,
};
use crate::events::{EventBus, EventKind, GameEvent, SubscriberId, PERSISTENT};
use crate::runtime::{DelayedAction, DelayedRunner, FlipBackTimer};
use crate::save::{SaveService, SaveSnapshot, SaveStore};
use crate::services::{
    AttemptsService, EndgameService, FlipService, MatchQueue, MatchService, PreviewService,
    ScoreService, WinConditionService,
};

/// A running game over one save store.
///
/// Drive it with the input methods (`request_flip`, `flip_completed`,
/// `request_restart`, `request_layout`) and `tick`, then drain `take_events`
/// to render.
pub struct GameSession<S: SaveStore> {
    rules: GameRules,
    layout: Layout,

    bus: EventBus,
    board: BoardState,
    rng: EngineRng,

    queue: MatchQueue,
    matcher: MatchService,
    score: ScoreService,
    attempts: AttemptsService,
    win: WinConditionService,
    endgame: EndgameService,
    preview: PreviewService,

    flip_back: FlipBackTimer,
    delayed: DelayedRunner,
    save: SaveService<S>,

    generation: u64,
    ended: bool,
    preview_active: bool,
    now: f64,

    outbox: Vec<GameEvent>,
}

impl<S: SaveStore> GameSession<S> {
    /// Create a session: validate the configuration, build the first board
    /// from `seed`, and either resume from a compatible stored snapshot
    /// (when `load_on_start` is set) or begin fresh with the preview.
    pub fn new(rules: GameRules, layout: Layout, seed: u64, store: S) -> Result<Self, EngineError> {
        rules.validate()?;
        layout.validate()?;

        let mut session = Self {
            board: BoardGenerator::create(layout, seed)?,
            rng: EngineRng::new(seed),
            queue: MatchQueue::new(layout.total_cards()),
            matcher: MatchService::new(rules.mismatch_delay_seconds),
            score: ScoreService::new(rules.match_base, rules.mismatch_penalty, rules.win_bonus),
            attempts: AttemptsService::new(rules.max_tries),
            win: WinConditionService::new(),
            endgame: EndgameService::new(
                rules.win_restart_delay_seconds,
                rules.defeat_restart_delay_seconds,
            ),
            preview: PreviewService::new(rules.preview_seconds),
            flip_back: FlipBackTimer::new(),
            delayed: DelayedRunner::new(),
            save: SaveService::new(store),
            bus: EventBus::new(),
            generation: 1,
            ended: false,
            preview_active: false,
            now: 0.0,
            outbox: Vec::new(),
            rules,
            layout,
        };

        session.subscribe_session();
        session.subscribe_services();

        if session.rules.load_on_start {
            if let Some(snapshot) = session.save.load() {
                match session.restore(snapshot) {
                    Ok(()) => return Ok(session),
                    Err(e) => warn!(error = %e, "stored snapshot unusable, starting fresh"),
                }
            }
        }

        let mut out = Vec::new();
        session.begin_board(&mut out);
        for event in out {
            session.publish(event);
        }
        Ok(session)
    }

    // ---- input ----

    /// Player asked to flip a card.
    pub fn request_flip(&mut self, card: CardId) {
        self.publish(GameEvent::CardFlipRequested { card });
    }

    /// The presentation finished animating a flip.
    pub fn flip_completed(&mut self, card: CardId, face_up: bool) {
        self.publish(GameEvent::CardFlipCompleted { card, face_up });
    }

    /// Player asked for a restart.
    pub fn request_restart(&mut self) {
        self.publish(GameEvent::RestartRequested);
    }

    /// Player asked for a different board layout.
    pub fn request_layout(&mut self, layout: Layout) {
        self.publish(GameEvent::LayoutChangeRequested { layout });
    }

    /// Advance the session clock and fire everything that came due.
    pub fn tick(&mut self, now: f64) {
        let dt = (now - self.now).max(0.0);
        self.now = now;

        for (a, b) in self.flip_back.tick(dt, self.generation) {
            self.publish(GameEvent::FlipBackPairDue { a, b });
        }

        for action in self.delayed.tick(now, self.generation) {
            self.run_delayed(action);
        }
    }

    /// Drain the events accumulated since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    // ---- observation ----

    /// The active board.
    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score.score()
    }

    /// Current consecutive-match streak.
    #[must_use]
    pub fn combo(&self) -> u32 {
        self.score.combo()
    }

    /// Tries left before a loss.
    #[must_use]
    pub fn tries_remaining(&self) -> u32 {
        self.attempts.remaining()
    }

    /// Check whether the game has ended (win or loss).
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Check whether the opening preview is in progress.
    #[must_use]
    pub fn is_preview_active(&self) -> bool {
        self.preview_active
    }

    /// The current session generation; advances on every board rebuild.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The active layout.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The session rules.
    #[must_use]
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// The underlying save store.
    #[must_use]
    pub fn save_store(&self) -> &S {
        self.save.store()
    }

    // ---- dispatch ----

    fn publish(&mut self, event: GameEvent) {
        let kind = event.kind();
        self.outbox.push(event.clone());

        for sub in self.bus.snapshot(kind) {
            // A handler earlier in this publish may have unsubscribed this
            // one or rebuilt the board; re-check before dispatching.
            if !self.bus.is_subscribed(kind, sub) {
                continue;
            }
            if sub.generation != PERSISTENT && sub.generation != self.generation {
                continue;
            }

            let mut out = Vec::new();
            self.dispatch(sub.id, &event, &mut out);
            for follow_up in out {
                self.publish(follow_up);
            }
        }
    }

    fn dispatch(&mut self, id: SubscriberId, event: &GameEvent, out: &mut Vec<GameEvent>) {
        match id {
            SubscriberId::Session => self.on_session_event(event, out),
            SubscriberId::Matcher => match *event {
                GameEvent::PairReady { a, b } => self.matcher.on_pair_ready(
                    a,
                    b,
                    &mut self.board,
                    &mut self.flip_back,
                    self.generation,
                    out,
                ),
                GameEvent::FlipBackPairDue { a, b } => {
                    self.matcher.on_flip_back_due(a, b, &mut self.board, out);
                }
                GameEvent::CardFlipCompleted { card, face_up } => {
                    self.matcher.on_flip_completed(card, face_up, &mut self.board, out);
                }
                _ => {}
            },
            SubscriberId::Score => {
                if let GameEvent::PairResolved { is_match, .. } = *event {
                    self.score.on_pair_resolved(is_match, &self.board, out);
                }
            }
            SubscriberId::Attempts => {
                if let GameEvent::PairResolved { is_match, .. } = *event {
                    self.attempts.on_pair_resolved(is_match, out);
                }
            }
            SubscriberId::Win => match *event {
                GameEvent::PairResolved { is_match, .. } => {
                    self.win.on_pair_resolved(is_match, &self.board, out);
                }
                GameEvent::GameEnded { .. } => self.win.on_game_ended(),
                _ => {}
            },
            SubscriberId::Endgame => {
                if let GameEvent::GameEnded { is_win } = *event {
                    let first = self.endgame.on_game_ended(
                        is_win,
                        self.now,
                        &mut self.delayed,
                        self.generation,
                    );
                    // A finished game is never resumable.
                    if first {
                        self.save.delete();
                    }
                }
            }
        }
    }

    fn on_session_event(&mut self, event: &GameEvent, out: &mut Vec<GameEvent>) {
        match *event {
            GameEvent::CardFlipRequested { card } => {
                if self.ended || self.preview_active {
                    return;
                }
                FlipService::try_flip_up(&mut self.board, card, out);
            }

            GameEvent::CardFlipCompleted { card, face_up } => {
                if self.ended || self.preview_active || !face_up {
                    return;
                }
                // Only cards still awaiting pairing enter the queue.
                if !self.board.contains(card) || self.board.state(card) != CardState::FaceUp {
                    return;
                }
                if !self.queue.enqueue(card) {
                    warn!(%card, "match queue full, completion dropped");
                    return;
                }
                while self.queue.len() >= 2 {
                    if let (Some(a), Some(b)) = (self.queue.dequeue(), self.queue.dequeue()) {
                        out.push(GameEvent::PairReady { a, b });
                    }
                }
            }

            GameEvent::RestartRequested => {
                let seed = self.rng.next_seed();
                self.start_new_board(seed, out);
            }

            GameEvent::LayoutChangeRequested { layout } => {
                // Validate before any teardown; a bad request must leave the
                // running game untouched.
                if let Err(e) = layout.validate() {
                    warn!(%layout, error = %e, "rejected layout change");
                    return;
                }
                self.layout = layout;
                let seed = self.rng.next_seed();
                self.start_new_board(seed, out);
            }

            GameEvent::ScoreChanged { .. } | GameEvent::AttemptsChanged { .. } => {
                if self.rules.autosave && !self.ended {
                    self.persist();
                }
            }

            GameEvent::GameEnded { is_win } => {
                info!(is_win, score = self.score.score(), "game ended");
                self.ended = true;
            }

            GameEvent::PreviewEnded => {
                self.preview_active = false;
            }

            _ => {}
        }
    }

    fn run_delayed(&mut self, action: DelayedAction) {
        match action {
            DelayedAction::StartPreview => {
                if self.ended {
                    return;
                }
                let mut out = Vec::new();
                self.preview.start(
                    &mut self.board,
                    self.now,
                    &mut self.delayed,
                    self.generation,
                    &mut out,
                );
                for event in out {
                    self.publish(event);
                }
            }
            DelayedAction::EndPreview => {
                let mut out = Vec::new();
                self.preview.finish(&mut self.board, &mut out);
                for event in out {
                    self.publish(event);
                }
            }
            DelayedAction::Restart => self.publish(GameEvent::RestartRequested),
        }
    }

    // ---- lifecycle ----

    fn subscribe_session(&mut self) {
        for kind in [
            EventKind::CardFlipRequested,
            EventKind::CardFlipCompleted,
            EventKind::RestartRequested,
            EventKind::LayoutChangeRequested,
            EventKind::ScoreChanged,
            EventKind::AttemptsChanged,
            EventKind::GameEnded,
            EventKind::PreviewEnded,
        ] {
            self.bus.subscribe(kind, SubscriberId::Session, PERSISTENT);
        }
    }

    fn subscribe_services(&mut self) {
        let g = self.generation;
        self.bus.subscribe(EventKind::PairReady, SubscriberId::Matcher, g);
        self.bus.subscribe(EventKind::FlipBackPairDue, SubscriberId::Matcher, g);
        self.bus.subscribe(EventKind::CardFlipCompleted, SubscriberId::Matcher, g);
        self.bus.subscribe(EventKind::PairResolved, SubscriberId::Score, g);
        self.bus.subscribe(EventKind::PairResolved, SubscriberId::Attempts, g);
        self.bus.subscribe(EventKind::PairResolved, SubscriberId::Win, g);
        self.bus.subscribe(EventKind::GameEnded, SubscriberId::Win, g);
        self.bus.subscribe(EventKind::GameEnded, SubscriberId::Endgame, g);
    }

    /// Advance the generation, invalidating every per-board subscription and
    /// any pending timer entry from the old board.
    fn advance_generation(&mut self) {
        let old = self.generation;
        self.generation += 1;
        self.bus.unsubscribe_generation(old);
        self.ended = false;
        self.preview_active = false;
    }

    fn reset_services(&mut self) {
        self.queue = MatchQueue::new(self.layout.total_cards());
        self.matcher = MatchService::new(self.rules.mismatch_delay_seconds);
        self.score = ScoreService::new(
            self.rules.match_base,
            self.rules.mismatch_penalty,
            self.rules.win_bonus,
        );
        self.attempts = AttemptsService::new(self.rules.max_tries);
        self.win = WinConditionService::new();
        self.endgame = EndgameService::new(
            self.rules.win_restart_delay_seconds,
            self.rules.defeat_restart_delay_seconds,
        );
        self.preview = PreviewService::new(self.rules.preview_seconds);
    }

    /// Publish the fresh-board state resync and schedule the preview.
    fn begin_board(&mut self, out: &mut Vec<GameEvent>) {
        self.score.load_state(0, 0, out);
        self.attempts.load_state(self.rules.max_tries, out);

        if self.rules.preview_enabled && self.rules.preview_seconds > 0.0 {
            self.preview_active = true;
            self.delayed
                .schedule(self.now, DelayedAction::StartPreview, self.generation);
        }
    }

    /// Tear down the current board and start a new game on `self.layout`.
    fn start_new_board(&mut self, seed: u64, out: &mut Vec<GameEvent>) {
        let board = match BoardGenerator::create(self.layout, seed) {
            Ok(board) => board,
            Err(e) => {
                // Layouts are validated before they are ever stored, so this
                // cannot fire; refuse to tear down the running board.
                warn!(layout = %self.layout, error = %e, "board generation failed");
                return;
            }
        };

        debug!(layout = %self.layout, seed, "starting new board");
        self.advance_generation();
        self.save.delete();
        self.board = board;
        self.reset_services();
        self.subscribe_services();
        self.begin_board(out);
    }

    /// Resume from a snapshot. The board is rebuilt from the persisted pair
    /// identities with matched cards replayed; score, combo, and tries are
    /// reloaded and announced. No preview on resume.
    fn restore(&mut self, snapshot: SaveSnapshot) -> Result<(), EngineError> {
        if !snapshot.is_compatible(self.layout) {
            return Err(EngineError::IncompatibleSnapshot {
                reason: format!(
                    "snapshot is {}x{}, session layout is {}",
                    snapshot.rows, snapshot.cols, self.layout
                ),
            });
        }

        let pair_ids: Vec<PairId> = snapshot.pair_ids.iter().copied().map(PairId::new).collect();
        let mut board = BoardState::from_parts(snapshot.rows, snapshot.cols, pair_ids)?;
        board.apply_matched(&snapshot.matched);

        self.advance_generation();
        self.board = board;
        self.reset_services();
        self.subscribe_services();

        let mut out = Vec::new();
        self.score.load_state(snapshot.score, snapshot.combo, &mut out);
        self.attempts
            .load_state(snapshot.effective_tries(self.rules.max_tries), &mut out);
        for event in out {
            self.publish(event);
        }

        info!(
            layout = %self.layout,
            score = snapshot.score,
            "resumed from snapshot"
        );
        Ok(())
    }

    fn persist(&mut self) {
        let snapshot = SaveSnapshot::capture(
            &self.board,
            self.score.score(),
            self.score.combo(),
            self.attempts.remaining(),
        );
        self.save.save(&snapshot);
    }
}
