//! Drop-gesture contract between the engine and the drag layer
//!
//! Events carry item keys rather than widget references, so any front end
//! (list rows in a toolkit, the CLI, an IPC peer) can deliver them. The
//! host delivers one event per gesture, synchronously.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rows::Slot;

/// The transferable value captured when a drag starts.
///
/// Handed back by `ReorderEngine::begin_drag`; the anchor row never
/// produces one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragSource {
    pub key: String,
}

/// One drop gesture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropEvent {
    /// Key of the item being dragged.
    pub source_key: String,
    /// List the pointer was released over.
    pub target_slot: Slot,
    /// Row position the pointer was over; `None` when the drop landed
    /// outside any row.
    pub target_index: Option<usize>,
}

/// Outcome of resolving a drop gesture.
///
/// Rejections are ordinary outcomes, not errors: nothing was mutated and
/// nothing was persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropOutcome {
    Accepted,
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The dragged key is not present in either list.
    UnknownSource,
    /// The drop landed outside any row, or past the end of the target list.
    NoTargetRow,
    /// An item already in the secondary list landed on the anchor row.
    AnchorTarget,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::UnknownSource => write!(f, "source item is not in either list"),
            RejectReason::NoTargetRow => write!(f, "drop landed outside any row"),
            RejectReason::AnchorTarget => write!(f, "cannot displace the anchor from within its own list"),
        }
    }
}
