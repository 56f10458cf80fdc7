//! `Receiver<M>`: a named mailbox addressable from any rank, awaitable per
//! global-nano-step slot (spec.md §4.G).
//!
//! Endpoint names follow `"<basename>_<sender_id>_to_<receiver_id>"`
//! (spec.md §6). Resolution (`find`) may race registration (`make`) in
//! either order; a directory-wide `Notify` wakes every pending `find` each
//! time a new endpoint is registered instead of busy-polling.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{oneshot, Notify};
use tracing::{debug, warn};

use crate::error::DataflowError;

pub fn endpoint_name(basename: &str, sender: u64, receiver: u64) -> String {
    format!("{basename}_{sender}_to_{receiver}")
}

struct MailboxState<M> {
    /// Messages already `put` but not yet `get`.
    stored: HashMap<u64, M>,
    /// `get` calls waiting on a `put` that hasn't arrived yet.
    pending: HashMap<u64, oneshot::Sender<M>>,
    /// Every key ever `put`, kept even after the value is consumed, so a
    /// second `put` at the same key is still detected as a protocol
    /// violation (spec.md §4.G: "multiple puts at the same key").
    seen: std::collections::HashSet<u64>,
}

impl<M> Default for MailboxState<M> {
    fn default() -> Self {
        MailboxState {
            stored: HashMap::new(),
            pending: HashMap::new(),
            seen: std::collections::HashSet::new(),
        }
    }
}

struct Mailbox<M> {
    state: Mutex<MailboxState<M>>,
}

impl<M> Mailbox<M> {
    fn new() -> Self {
        Mailbox {
            state: Mutex::new(MailboxState::default()),
        }
    }
}

/// A mailbox endpoint, resolved either by `ReceiverDirectory::make` (the
/// owning side) or `ReceiverDirectory::find` (a remote peer wanting to
/// `put` into it).
#[derive(Clone)]
pub struct Receiver<M> {
    name: String,
    mailbox: Arc<Mailbox<M>>,
}

impl<M> Receiver<M> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store `message` under `global_nano_step`. Fails if this key was
    /// already put once, even if the earlier value has since been
    /// consumed by `get`.
    pub fn put(&self, global_nano_step: u64, message: M) -> Result<(), DataflowError> {
        let mut state = self.mailbox.state.lock().unwrap();
        if !state.seen.insert(global_nano_step) {
            return Err(DataflowError::DuplicateMessage {
                endpoint: self.name.clone(),
                global_nano_step,
            });
        }
        if let Some(tx) = state.pending.remove(&global_nano_step) {
            // A `get` is already waiting; hand it off directly instead of
            // round-tripping through `stored`. The receiver side dropping
            // its future (cancellation) makes `send` a no-op here.
            let _ = tx.send(message);
        } else {
            state.stored.insert(global_nano_step, message);
        }
        Ok(())
    }

    /// Await the message `put` at `global_nano_step`, however it arrives:
    /// already stored, or a future `put`. Each key is single-consumer —
    /// calling `get` twice for the same key races the two futures for
    /// whichever one observes the stored value or pending slot first.
    pub async fn get(&self, global_nano_step: u64) -> Result<M, DataflowError> {
        let rx = {
            let mut state = self.mailbox.state.lock().unwrap();
            if let Some(message) = state.stored.remove(&global_nano_step) {
                return Ok(message);
            }
            let (tx, rx) = oneshot::channel();
            state.pending.insert(global_nano_step, tx);
            rx
        };
        rx.await.map_err(|_| DataflowError::Cancelled(self.name.clone()))
    }
}

struct Directory<M> {
    mailboxes: HashMap<String, Arc<Mailbox<M>>>,
    notify: Arc<Notify>,
}

/// Process-wide (well, simulation-wide — one instance per `Msg` type)
/// registry of named mailboxes. Cheap to clone: every clone shares the
/// same underlying map.
#[derive(Clone)]
pub struct ReceiverDirectory<M> {
    inner: Arc<Mutex<Directory<M>>>,
}

impl<M> Default for ReceiverDirectory<M> {
    fn default() -> Self {
        ReceiverDirectory::new()
    }
}

impl<M> ReceiverDirectory<M> {
    pub fn new() -> Self {
        ReceiverDirectory {
            inner: Arc::new(Mutex::new(Directory {
                mailboxes: HashMap::new(),
                notify: Arc::new(Notify::new()),
            })),
        }
    }

    /// Register `name`, failing with `NameInUse` if it's already taken.
    pub fn make(&self, name: impl Into<String>) -> Result<Receiver<M>, DataflowError> {
        let name = name.into();
        let mut dir = self.inner.lock().unwrap();
        if dir.mailboxes.contains_key(&name) {
            return Err(DataflowError::NameInUse(name));
        }
        let mailbox = Arc::new(Mailbox::new());
        dir.mailboxes.insert(name.clone(), mailbox.clone());
        debug!(endpoint = %name, "registered receiver endpoint");
        dir.notify.notify_waiters();
        Ok(Receiver { name, mailbox })
    }

    /// Resolve `name`, waiting for a matching `make` if it hasn't happened
    /// yet. No timeout: the only way out of an unresolved `find` is
    /// dropping the returned future.
    pub async fn find(&self, name: impl Into<String>) -> Receiver<M> {
        let name = name.into();
        loop {
            let notify_arc = {
                let dir = self.inner.lock().unwrap();
                if let Some(mailbox) = dir.mailboxes.get(&name) {
                    return Receiver {
                        name,
                        mailbox: mailbox.clone(),
                    };
                }
                dir.notify.clone()
            };

            // Register intent to be woken *before* re-checking the
            // directory, so a `make` that races between the lock above
            // and this point still wakes us: `Notified` remembers a
            // `notify_waiters` that lands after it's created even if it
            // hasn't been polled yet.
            let notified = notify_arc.notified();
            {
                let dir = self.inner.lock().unwrap();
                if let Some(mailbox) = dir.mailboxes.get(&name) {
                    return Receiver {
                        name,
                        mailbox: mailbox.clone(),
                    };
                }
            }
            notified.await;
        }
    }

    /// Unregister `name`. Called at simulation end; a no-op if the name is
    /// unknown.
    pub fn unregister(&self, name: &str) {
        let mut dir = self.inner.lock().unwrap();
        if dir.mailboxes.remove(name).is_none() {
            warn!(endpoint = %name, "unregister called on unknown endpoint");
        }
    }
}
