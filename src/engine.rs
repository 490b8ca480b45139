//! Drop-resolution and list-mutation engine
//!
//! Owns the in-memory representation of both lists and converts drop
//! gestures into deterministic move operations. Accepted drops are
//! committed through the injected store (both slots saved, then the
//! reorder signal toggled); on a persistence failure the in-memory
//! mutation is rolled back so lists and storage never diverge.

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::drag::{DragSource, DropEvent, DropOutcome, RejectReason};
use crate::rows::{Row, Slot};
use crate::store::OrderStore;

pub struct ReorderEngine<S: OrderStore> {
    store: S,
    primary: Vec<Row>,
    secondary: Vec<Row>,
}

impl<S: OrderStore> ReorderEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            primary: Vec::new(),
            secondary: Vec::new(),
        }
    }

    /// Build both lists from stored order. The anchor is appended to the
    /// secondary list; it exists only in memory and is re-added on every
    /// initialize.
    pub fn initialize(&mut self) {
        self.primary = self
            .store
            .load(Slot::Primary)
            .into_iter()
            .map(Row::Movable)
            .collect();
        self.secondary = self
            .store
            .load(Slot::Secondary)
            .into_iter()
            .map(Row::Movable)
            .collect();
        self.secondary.push(Row::Anchor);
        info!(
            primary = self.primary.len(),
            secondary = self.secondary.len() - 1,
            "Initialized lists from stored order"
        );
    }

    pub fn rows(&self, slot: Slot) -> &[Row] {
        match slot {
            Slot::Primary => &self.primary,
            Slot::Secondary => &self.secondary,
        }
    }

    fn rows_mut(&mut self, slot: Slot) -> &mut Vec<Row> {
        match slot {
            Slot::Primary => &mut self.primary,
            Slot::Secondary => &mut self.secondary,
        }
    }

    /// Keys to persist for a slot: everything in order, anchor excluded.
    pub fn persisted_keys(&self, slot: Slot) -> Vec<String> {
        self.rows(slot)
            .iter()
            .filter_map(|row| row.key().map(str::to_owned))
            .collect()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Capture the row a drag starts on.
    ///
    /// The anchor is not draggable: starting a drag on it (or on an empty
    /// position) returns `None` and the gesture silently never begins.
    pub fn begin_drag(&self, slot: Slot, index: usize) -> Option<DragSource> {
        match self.rows(slot).get(index) {
            Some(Row::Movable(key)) => Some(DragSource { key: key.clone() }),
            Some(Row::Anchor) | None => None,
        }
    }

    fn find_key(&self, key: &str) -> Option<(Slot, usize)> {
        for slot in [Slot::Primary, Slot::Secondary] {
            if let Some(index) = self.rows(slot).iter().position(|row| row.key() == Some(key)) {
                return Some((slot, index));
            }
        }
        None
    }

    /// Resolve one drop gesture.
    ///
    /// Rejections come back as `Ok(DropOutcome::Rejected(_))` with nothing
    /// mutated or persisted. An `Err` means the move was valid but could
    /// not be persisted; the in-memory lists have been rolled back.
    pub fn resolve_drop(&mut self, event: &DropEvent) -> Result<DropOutcome> {
        let Some((source_slot, source_index)) = self.find_key(&event.source_key) else {
            debug!(source = %event.source_key, "Rejected drop: source not present in either list");
            return Ok(DropOutcome::Rejected(RejectReason::UnknownSource));
        };

        let target_rows = self.rows(event.target_slot);
        let Some(target_index) = event.target_index.filter(|&i| i < target_rows.len()) else {
            debug!(
                source = %event.source_key,
                target = %event.target_slot,
                "Rejected drop: no row at target position"
            );
            return Ok(DropOutcome::Rejected(RejectReason::NoTargetRow));
        };

        // Landing exactly on the anchor row is only blocked for items that
        // already live in the secondary list; items coming from the primary
        // list push the anchor down instead.
        if target_rows[target_index].is_anchor() && source_slot == Slot::Secondary {
            debug!(source = %event.source_key, "Rejected drop: anchor row targeted from within secondary");
            return Ok(DropOutcome::Rejected(RejectReason::AnchorTarget));
        }

        let prior_primary = self.persisted_keys(Slot::Primary);
        let prior_secondary = self.persisted_keys(Slot::Secondary);

        let row = self.rows_mut(source_slot).remove(source_index);

        // Insert before the row that occupied the target position,
        // accounting for the removal shifting same-list indices.
        let insert_index = if source_slot == event.target_slot && source_index < target_index {
            target_index - 1
        } else {
            target_index
        };
        self.rows_mut(event.target_slot).insert(insert_index, row);

        if let Err(e) = self.commit() {
            let row = self.rows_mut(event.target_slot).remove(insert_index);
            self.rows_mut(source_slot).insert(source_index, row);
            self.restore_persisted(&prior_primary, &prior_secondary);
            return Err(e).context("drop accepted but persisting the new order failed");
        }

        info!(
            source = %event.source_key,
            from = %source_slot,
            to = %event.target_slot,
            index = insert_index,
            "Moved item"
        );
        Ok(DropOutcome::Accepted)
    }

    fn commit(&mut self) -> Result<()> {
        let primary = self.persisted_keys(Slot::Primary);
        let secondary = self.persisted_keys(Slot::Secondary);
        self.store.save(Slot::Primary, &primary)?;
        self.store.save(Slot::Secondary, &secondary)?;
        self.store.toggle_reorder_signal()?;
        Ok(())
    }

    fn restore_persisted(&mut self, primary: &[String], secondary: &[String]) {
        if let Err(e) = self.store.save(Slot::Primary, primary) {
            warn!(error = %e, "Could not restore primary order after failed commit");
        }
        if let Err(e) = self.store.save(Slot::Secondary, secondary) {
            warn!(error = %e, "Could not restore secondary order after failed commit");
        }
    }

    /// Clear both stored orders and emit one reorder signal.
    ///
    /// The live rows are left alone; callers rebuild them with
    /// `initialize` on the next render. Confirmation is the caller's job.
    pub fn reset(&mut self) -> Result<()> {
        self.store
            .save(Slot::Primary, &[])
            .context("Failed to clear primary order")?;
        self.store
            .save(Slot::Secondary, &[])
            .context("Failed to clear secondary order")?;
        self.store
            .toggle_reorder_signal()
            .context("Failed to emit reorder signal after reset")?;
        info!("Cleared stored order for both lists");
        Ok(())
    }
}
