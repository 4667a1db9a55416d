//! The closed set of game events.
//!
//! Events are the sole channel between components: external input arrives
//! as events, services react to events, and the presentation layer renders
//! from events. The set is a tagged enum rather than open runtime type
//! lookup; `EventKind` is the stable discriminant the bus registry keys on.
//!
//! Inbound (consumed from presentation/input): `CardFlipRequested`,
//! `CardFlipCompleted`, `RestartRequested`, `LayoutChangeRequested`.
//! Outbound (rendered by presentation): `CardFlipStarted`,
//! `CardInteractableChanged`, `PairResolved`, `ScoreChanged`,
//! `AttemptsChanged`, `GameEnded`, `PreviewEnded`. The rest are internal
//! plumbing between services.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, Layout};

/// A game event with its payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player asked to flip a card face up.
    CardFlipRequested { card: CardId },
    /// The presentation finished animating a flip.
    CardFlipCompleted { card: CardId, face_up: bool },
    /// The engine started a flip; the presentation should animate it.
    CardFlipStarted { card: CardId, to_face_up: bool },
    /// A card's input lock changed.
    CardInteractableChanged { card: CardId, interactable: bool },
    /// Two completed face-up flips are ready to resolve.
    PairReady { a: CardId, b: CardId },
    /// A mismatched pair's flip-back delay elapsed.
    FlipBackPairDue { a: CardId, b: CardId },
    /// A pair resolved as a match or mismatch.
    PairResolved { a: CardId, b: CardId, is_match: bool },
    /// Score or combo changed. `delta` is the signed change this event.
    ScoreChanged { score: u32, combo: u32, delta: i32 },
    /// The try budget changed.
    AttemptsChanged { remaining: u32, max: u32 },
    /// The game ended in a win or a loss.
    GameEnded { is_win: bool },
    /// The opening preview finished hiding the cards again.
    PreviewEnded,
    /// A restart was requested (player input or post-game scheduling).
    RestartRequested,
    /// A different board layout was requested.
    LayoutChangeRequested { layout: Layout },
}

impl GameEvent {
    /// The stable discriminant of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::CardFlipRequested { .. } => EventKind::CardFlipRequested,
            GameEvent::CardFlipCompleted { .. } => EventKind::CardFlipCompleted,
            GameEvent::CardFlipStarted { .. } => EventKind::CardFlipStarted,
            GameEvent::CardInteractableChanged { .. } => EventKind::CardInteractableChanged,
            GameEvent::PairReady { .. } => EventKind::PairReady,
            GameEvent::FlipBackPairDue { .. } => EventKind::FlipBackPairDue,
            GameEvent::PairResolved { .. } => EventKind::PairResolved,
            GameEvent::ScoreChanged { .. } => EventKind::ScoreChanged,
            GameEvent::AttemptsChanged { .. } => EventKind::AttemptsChanged,
            GameEvent::GameEnded { .. } => EventKind::GameEnded,
            GameEvent::PreviewEnded => EventKind::PreviewEnded,
            GameEvent::RestartRequested => EventKind::RestartRequested,
            GameEvent::LayoutChangeRequested { .. } => EventKind::LayoutChangeRequested,
        }
    }
}

/// Stable event discriminant, used as the bus registry key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    CardFlipRequested,
    CardFlipCompleted,
    CardFlipStarted,
    CardInteractableChanged,
    PairReady,
    FlipBackPairDue,
    PairResolved,
    ScoreChanged,
    AttemptsChanged,
    GameEnded,
    PreviewEnded,
    RestartRequested,
    LayoutChangeRequested,
}
