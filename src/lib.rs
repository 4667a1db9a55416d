//! Deterministic rules engine for tile-matching memory games.
//!
//! The engine is headless: it owns the board, the matching rules, scoring,
//! the try budget, the opening preview, and snapshot persistence, and talks
//! to the outside world exclusively through [`events::GameEvent`]. A driver
//! (UI, bot, test) feeds input events in, calls [`session::GameSession::tick`]
//! with its own clock, and drains the emitted events to render.
//!
//! Everything is deterministic: board permutations come from a seeded RNG,
//! time is injected, and the only wall-clock read is the timestamp stamped
//! on saved snapshots.
//!
//! ```
//! use pairmatch::core::{GameRules, Layout};
//! use pairmatch::save::MemorySaveStore;
//! use pairmatch::session::GameSession;
//!
//! let rules = GameRules::new().with_preview(false, 0.0).with_load_on_start(false);
//! let mut session = GameSession::new(rules, Layout::new(4, 4), 42, MemorySaveStore::new())
//!     .expect("valid configuration");
//!
//! // Drive it: flip two cards and acknowledge their animations.
//! let first = session.board().card_ids().next().unwrap();
//! session.request_flip(first);
//! session.flip_completed(first, true);
//!
//! for event in session.take_events() {
//!     println!("{event:?}");
//! }
//! ```

pub mod core;
pub mod events;
pub mod runtime;
pub mod save;
pub mod services;
pub mod session;

pub use crate::core::{
    BoardGenerator, BoardState, CardId, CardState, EngineError, EngineRng, GameRules, Layout,
    PairId,
};
pub use crate::events::{EventBus, EventKind, GameEvent};
pub use crate::save::{FileSaveStore, MemorySaveStore, SaveSnapshot, SaveStore};
pub use crate::session::GameSession;
