//! `CellComponent<C>`: the per-cell actor (spec.md §4.H).
//!
//! Implementation note (see DESIGN.md): the original chains one
//! `hpx::dataflow` task per `(step, nano_step)`, each depending on the
//! previous step's future plus that nano-step's inbound messages. A single
//! `async fn` per cell is the idiomatic Rust equivalent — within one cell,
//! updates are already strictly sequential (spec.md §5), so spawning a
//! separate task per nano-step would add scheduling overhead without
//! adding concurrency. Concurrency across cells still comes from running
//! each `CellComponent::setup_dataflow` future as its own `tokio::spawn`ed
//! task (see `crate::simulation::run_simulation`); cancelling that task's
//! `JoinHandle` cancels the whole per-cell future at whatever await point
//! it's suspended on, which is the same cancellation shape spec.md §5
//! describes for the chained-task version.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::trace;

use crate::cell::{Cell, Neighborhood};
use crate::error::DataflowError;
use crate::receiver::{endpoint_name, Receiver, ReceiverDirectory};

pub struct CellComponent<C: Cell> {
    id: u64,
    neighbors: Vec<u64>,
    cell: C,
    basename: String,
    directory: ReceiverDirectory<C::Msg>,
    /// Inbound: one receiver per neighbor, registered as
    /// `"<basename>_<neighbor>_to_<id>"`.
    inboxes: HashMap<u64, Receiver<C::Msg>>,
    /// Outbound: resolved lazily in `setup_dataflow`, one handle per
    /// neighbor at `"<basename>_<id>_to_<neighbor>"`. Mutated only during
    /// setup, read-only afterwards (spec.md §5).
    remote_ids: Arc<Mutex<HashMap<u64, Receiver<C::Msg>>>>,
}

impl<C: Cell> CellComponent<C> {
    /// Registers this cell's inbound mailboxes. Fails if any expected
    /// endpoint name is already taken (two cells with the same id on the
    /// same basename).
    pub fn new(
        id: u64,
        neighbors: Vec<u64>,
        cell: C,
        basename: impl Into<String>,
        directory: ReceiverDirectory<C::Msg>,
    ) -> Result<Self, DataflowError> {
        let basename = basename.into();
        let mut inboxes = HashMap::with_capacity(neighbors.len());
        for &neighbor in &neighbors {
            let name = endpoint_name(&basename, neighbor, id);
            inboxes.insert(neighbor, directory.make(name)?);
        }
        Ok(CellComponent {
            id,
            neighbors,
            cell,
            basename,
            directory,
            inboxes,
            remote_ids: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Run this cell through `max_steps` simulation steps
    /// (`max_steps * C::NANO_STEPS_PER_STEP` updates total), returning the
    /// final cell state. Fails (and stops making progress) on the first
    /// error observed — an unresolvable neighbor, a transport failure, or
    /// a protocol violation at a `Receiver`.
    pub async fn setup_dataflow(mut self, max_steps: u64) -> Result<C, DataflowError> {
        self.resolve_remote_handles().await;

        let nano_steps_per_step = C::NANO_STEPS_PER_STEP as u64;
        let mut result = Ok(());
        for step in 0..max_steps {
            for nano_step in 0..nano_steps_per_step {
                if let Err(e) = self.run_one_update(step, nano_step, nano_steps_per_step).await {
                    result = Err(e);
                    break;
                }
            }
            if result.is_err() {
                break;
            }
        }

        // Unregistering here (rather than via `Drop`) sidesteps partially
        // moving `self.cell` out of a type that implements `Drop`, and
        // matches spec.md §5: "named endpoints are unregistered at
        // simulation end" — end-of-run, not end-of-value-lifetime.
        self.unregister_inboxes();
        result.map(|_| self.cell)
    }

    fn unregister_inboxes(&self) {
        for &neighbor in &self.neighbors {
            self.directory.unregister(&endpoint_name(&self.basename, neighbor, self.id));
        }
    }

    async fn resolve_remote_handles(&self) {
        let finds = self.neighbors.iter().map(|&neighbor| {
            let name = endpoint_name(&self.basename, self.id, neighbor);
            let directory = self.directory.clone();
            async move { (neighbor, directory.find(name).await) }
        });
        let resolved = join_all(finds).await;
        let mut guard = self.remote_ids.lock().await;
        for (neighbor, handle) in resolved {
            guard.insert(neighbor, handle);
        }
    }

    async fn run_one_update(&mut self, step: u64, nano_step: u64, nano_steps_per_step: u64) -> Result<(), DataflowError> {
        let global_nano_step = step * nano_steps_per_step + nano_step;

        let mut messages = HashMap::with_capacity(self.neighbors.len());
        for &neighbor in &self.neighbors {
            let msg = if global_nano_step == 0 {
                C::Msg::default()
            } else {
                self.inboxes[&neighbor].get(global_nano_step).await?
            };
            messages.insert(neighbor, msg);
        }

        let mut hood = Neighborhood::new(&self.neighbors, &messages);
        self.cell.update(&mut hood, nano_step as u32, step);
        hood.send_empty_to_unnotified_neighbors();

        trace!(cell = self.id, global_nano_step, "update complete, delivering outbox");

        let target_global_nano_step = global_nano_step + 1;
        let remote_ids = self.remote_ids.lock().await;
        for (neighbor, msg) in hood.into_outbox() {
            let handle = remote_ids
                .get(&neighbor)
                .ok_or(DataflowError::UnknownNeighbor(neighbor))?;
            handle.put(target_global_nano_step, msg)?;
        }
        Ok(())
    }
}
