//! The user-supplied `Cell` interface (spec.md §6) and the `Neighborhood`
//! view a cell's `update` is invoked with (spec.md §4.H).

use std::collections::{HashMap, HashSet};

use crate::error::DataflowError;

/// A user cell type. `Msg` must be default-constructible (the "silent
/// neighbor" empty message, spec.md scenario S6) and cheaply copyable.
pub trait Cell: Send + 'static {
    type Msg: Default + Clone + Send + Sync + 'static;

    /// Sub-steps per simulation step; the finest unit of scheduling.
    const NANO_STEPS_PER_STEP: u32;

    /// Update this cell from its neighbors' messages for `nano_step` of
    /// `step`. May call `hood.send` at most once per neighbor.
    fn update(&mut self, hood: &mut Neighborhood<'_, Self::Msg>, nano_step: u32, step: u64);
}

/// Per-update view of a cell's neighbors: inbound messages already
/// resolved, an outbound `send` that fans out to the neighbor's inbox at
/// the next global nano-step.
///
/// spec.md §9 prefers a result type over the original's exception-driven
/// `operator[]`: both accessors return `Result`, converted to task failure
/// at the dataflow boundary (`CellComponent::setup_dataflow`) rather than
/// unwound through `update` itself.
pub struct Neighborhood<'a, M> {
    neighbors: &'a [u64],
    messages: &'a HashMap<u64, M>,
    sent: HashSet<u64>,
    outbox: Vec<(u64, M)>,
}

impl<'a, M: Default + Clone> Neighborhood<'a, M> {
    pub(crate) fn new(neighbors: &'a [u64], messages: &'a HashMap<u64, M>) -> Self {
        Neighborhood {
            neighbors,
            messages,
            sent: HashSet::new(),
            outbox: Vec::new(),
        }
    }

    pub fn neighbors(&self) -> &[u64] {
        self.neighbors
    }

    /// The message `neighbor` sent for this global nano-step.
    pub fn get(&self, neighbor: u64) -> Result<&M, DataflowError> {
        self.messages.get(&neighbor).ok_or(DataflowError::UnknownNeighbor(neighbor))
    }

    /// Queue `msg` for delivery to `neighbor` at the next global
    /// nano-step. At most one send per neighbor per update; a second send
    /// to the same neighbor replaces the first (mirrors `hood[id] = msg`
    /// semantics, not an accumulating queue).
    pub fn send(&mut self, neighbor: u64, msg: M) -> Result<(), DataflowError> {
        if !self.neighbors.contains(&neighbor) {
            return Err(DataflowError::UnknownNeighbor(neighbor));
        }
        self.outbox.retain(|(id, _)| *id != neighbor);
        self.outbox.push((neighbor, msg));
        self.sent.insert(neighbor);
        Ok(())
    }

    /// Send a default-valued message to every neighbor not yet notified
    /// this update, guaranteeing every recipient makes progress (spec.md
    /// §4.H step 4, scenario S6).
    pub(crate) fn send_empty_to_unnotified_neighbors(&mut self) {
        for &neighbor in self.neighbors {
            if !self.sent.contains(&neighbor) {
                self.outbox.push((neighbor, M::default()));
                self.sent.insert(neighbor);
            }
        }
    }

    pub(crate) fn into_outbox(self) -> Vec<(u64, M)> {
        self.outbox
    }
}
