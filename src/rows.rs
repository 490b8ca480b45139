//! Row and slot types for the two ordered lists
//!
//! Items are opaque string keys (icon/button names). In memory every list
//! entry is a `Row`; the secondary list additionally carries the fixed
//! `Anchor` row, which has no key and therefore never reaches storage and
//! can never be named by a drag.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::list;

/// One of the two named ordered lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Primary,
    Secondary,
}

impl Slot {
    /// Key this slot's order is stored under.
    pub fn storage_key(self) -> &'static str {
        match self {
            Slot::Primary => list::PRIMARY_KEY,
            Slot::Secondary => list::SECONDARY_KEY,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Primary => write!(f, "primary"),
            Slot::Secondary => write!(f, "secondary"),
        }
    }
}

/// A single list entry.
///
/// The anchor is a tagged variant rather than a reserved title string, so
/// anchor-specific movement rules are enforced by matching, not by string
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// A user-reorderable item, identified by its key.
    Movable(String),
    /// The fixed, non-movable row at the bottom of the secondary list.
    Anchor,
}

impl Row {
    /// Item key, or `None` for the anchor.
    pub fn key(&self) -> Option<&str> {
        match self {
            Row::Movable(key) => Some(key),
            Row::Anchor => None,
        }
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self, Row::Anchor)
    }

    /// Text a front end would render for this row.
    pub fn title(&self) -> &str {
        match self {
            Row::Movable(key) => key,
            Row::Anchor => list::ANCHOR_TITLE,
        }
    }
}
