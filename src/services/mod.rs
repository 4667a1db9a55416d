//! Gameplay services.
//!
//! Each service owns one concern of the rules and reacts to the events it
//! subscribes to, publishing follow-up events through the caller-provided
//! buffer. Services hold no references to each other; the session wires
//! them together through the event bus.

mod attempts;
mod endgame;
mod flip;
mod match_queue;
mod matcher;
mod preview;
mod score;
mod win;

pub use attempts::AttemptsService;
pub use endgame::EndgameService;
pub use flip::FlipService;
pub use match_queue::MatchQueue;
pub use matcher::MatchService;
pub use preview::PreviewService;
pub use score::ScoreService;
pub use win::WinConditionService;
