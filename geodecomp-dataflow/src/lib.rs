//! The dataflow-scheduled cellular update engine (spec.md §4.G/§4.H).
//!
//! Per-cell update tasks are chained by futures: neighbors exchange typed
//! messages stamped with a global nano-step counter, and each cell
//! guarantees one update per `(step, nano_step)` after all inbound
//! messages have arrived. A missing send is back-filled with an empty
//! message so a silent neighbor can never stall the rest of the
//! simulation (spec.md scenario S6).
//!
//! [`ReceiverDirectory`]/[`Receiver`] implement the named-mailbox layer
//! (spec.md §4.G); [`CellComponent`] drives one cell's update loop against
//! its neighbors' receivers (spec.md §4.H); [`run_simulation`] wires a
//! whole grid's worth of `CellComponent`s from an [`Initializer`].

pub mod cell;
pub mod component;
pub mod error;
pub mod receiver;
pub mod simulation;

pub use cell::{Cell, Neighborhood};
pub use component::CellComponent;
pub use error::DataflowError;
pub use receiver::{endpoint_name, Receiver, ReceiverDirectory};
pub use simulation::{run_simulation, Initializer};
