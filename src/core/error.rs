//! Engine error taxonomy.
//!
//! Nothing here reaches the player-facing boundary as a panic: invalid
//! layouts fail the rebuild attempt and leave the running session intact,
//! incompatible snapshots degrade to "no usable save", and persistence
//! failures are logged and swallowed inside the save layer. An illegal flip
//! is not an error at all, just a `false`-returning no-op.

use thiserror::Error;

/// Errors the engine can report.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Board dimensions are unusable: each dimension must be at least 2,
    /// the total card count even and at most 65535.
    #[error("invalid layout {rows}x{cols}: dimensions must be >= 2, rows*cols even and at most 65535")]
    InvalidLayout { rows: u16, cols: u16 },

    /// Game rules rejected at session start.
    #[error("invalid rules: {reason}")]
    InvalidRules { reason: String },

    /// A reconstructed board's pair identities are malformed
    /// (only reachable through snapshot data, never the generator).
    #[error("invalid board: {reason}")]
    InvalidBoard { reason: String },

    /// A snapshot does not fit the active layout. Treated as "no usable
    /// save" by the session, never surfaced to the player.
    #[error("incompatible snapshot: {reason}")]
    IncompatibleSnapshot { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = EngineError::InvalidLayout { rows: 3, cols: 3 };
        assert_eq!(
            err.to_string(),
            "invalid layout 3x3: dimensions must be >= 2, rows*cols even and at most 65535"
        );
    }
}
