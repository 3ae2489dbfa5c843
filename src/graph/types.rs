//! Core type definitions for the spatial graph

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Stable opaque identifier for a spatial entity
///
/// Identity of vertices and edges is the identity of the entity they wrap,
/// never its geometry. The top bit is reserved for identities the graph
/// mints itself (synthesized link edges and endpoint vertices created during
/// geometric assembly), so caller-supplied identifiers must stay below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    const SYNTHETIC_BIT: u64 = 1 << 63;

    pub fn new(id: u64) -> Self {
        debug_assert!(
            id & Self::SYNTHETIC_BIT == 0,
            "the top bit of EntityId is reserved for graph-minted identities"
        );
        EntityId(id)
    }

    /// Identity minted by a graph for a synthesized element
    pub(crate) fn synthetic(n: u64) -> Self {
        EntityId(n | Self::SYNTHETIC_BIT)
    }

    /// Whether this identity was minted by a graph rather than a caller
    pub fn is_synthetic(&self) -> bool {
        self.0 & Self::SYNTHETIC_BIT != 0
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_synthetic() {
            write!(f, "EntityId(synthetic:{})", self.0 & !Self::SYNTHETIC_BIT)
        } else {
            write!(f, "EntityId({})", self.0)
        }
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        EntityId::new(id)
    }
}

/// Result of a full edge reconciliation scan
///
/// An interrupted scan is a normal early exit, not an error: the edges
/// reconciled before the interruption are kept, nothing is rolled back, and
/// the graph is left consistent though possibly incompletely reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Every vertex pair was examined
    Complete,
    /// The scan stopped early at a cooperative cancellation point
    Interrupted,
}

impl RefreshOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, RefreshOutcome::Complete)
    }
}

/// Cooperative cancellation signal polled by long scans
///
/// Cloning shares the underlying flag, so a driver can hand one clone to the
/// scan owner and keep another to request cancellation.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of any scan polling this flag
    pub fn set(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Re-arm the flag for the next scan
    pub fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
