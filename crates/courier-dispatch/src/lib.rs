//! `courier-dispatch` — package lifecycle, tick-driven movement, and riders.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`package`]   | `Package`, `PackageIntake`, `TraceEntry`, pricing              |
//! | [`event`]     | `TickEvent`: what happened to each package during a tick       |
//! | [`rider`]     | `Rider`, `Vehicle`, `RiderAction`, `RiderRoster`               |
//! | [`scheduler`] | `DeliveryScheduler`: state machine, cadence, stats             |
//! | [`store`]     | `PackageStore` write seam, `StoreError`, `NoopStore`           |
//! | [`error`]     | `DispatchError`, `DispatchResult<T>`                           |
//!
//! # Lifecycle model
//!
//! A package is `Created`, loaded onto a vehicle (`Loaded`), and then moved
//! one hop per cadence interval by [`DeliveryScheduler::advance_step`] until
//! it reaches its destination (`Arrived`), always along the *current*
//! shortest path, so a blocked road redirects the very next hop.  A rider
//! picks it up (`OutForDelivery`) and either completes it (`Delivered`) or
//! fails until the attempt limit returns it to sender (`Returned`).  The
//! routing graph and the persistence backend are passed into each operation,
//! never owned, so the scheduler itself stays a plain state machine.

pub mod error;
pub mod event;
pub mod package;
pub mod rider;
pub mod scheduler;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::{DispatchError, DispatchResult};
pub use event::TickEvent;
pub use package::{quote_price, Package, PackageIntake, TraceEntry, MAX_DELIVERY_ATTEMPTS};
pub use rider::{Rider, RiderAction, RiderRoster, Vehicle};
pub use scheduler::{DeliveryScheduler, NetworkStats};
pub use store::{NoopStore, PackageStore, StoreError};
