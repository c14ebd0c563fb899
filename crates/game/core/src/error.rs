//! Common error infrastructure for prowl-core.
//!
//! This module provides shared types and traits used across all error types in the crate.
//! Domain-specific errors (e.g., `GridError`, `ConfigError`) are defined in their
//! respective modules alongside the data they validate.
//!
//! Nothing raised during a simulation tick is fatal to the host: errors only surface
//! while building a world (grid parsing, config validation) or when a caller asks
//! for an oracle that was never supplied.

use crate::state::{AgentId, Tick, TilePos};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the simulation can continue with a behavioral fallback
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: the world cannot be built at all
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the caller degrades to a safe fallback.
    ///
    /// Examples: grid not supplied to a running world
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: ragged grid rows, negative cooldowns
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - the world cannot be constructed.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ErrorContext {
    /// Agent involved in the failure (if applicable).
    pub agent: Option<AgentId>,

    /// Tile where the error occurred (if applicable).
    pub tile: Option<TilePos>,

    /// Simulation tick at the time of error.
    pub tick: Tick,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new error context at the given tick.
    #[must_use]
    pub const fn new(tick: Tick) -> Self {
        Self {
            agent: None,
            tile: None,
            tick,
            message: None,
        }
    }

    /// Attaches an agent to this context (builder pattern).
    #[must_use]
    pub const fn with_agent(mut self, agent: AgentId) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Attaches a tile to this context (builder pattern).
    #[must_use]
    pub const fn with_tile(mut self, tile: TilePos) -> Self {
        self.tile = Some(tile);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Common trait for all prowl-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_builder_attaches_fields() {
        let ctx = ErrorContext::new(Tick(7))
            .with_agent(AgentId(3))
            .with_tile(TilePos::new(1, 2))
            .with_message("stale target");

        assert_eq!(ctx.agent, Some(AgentId(3)));
        assert_eq!(ctx.tile, Some(TilePos::new(1, 2)));
        assert_eq!(ctx.tick, Tick(7));
        assert_eq!(ctx.message, Some("stale target"));
    }

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }
}
