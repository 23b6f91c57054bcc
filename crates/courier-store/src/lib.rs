//! `courier-store` — persistence backends for the courier network.
//!
//! Two [`DepotStore`] implementations plus a CSV diagnostics log:
//!
//! | Type          | Backing                  | Use                                  |
//! |---------------|--------------------------|--------------------------------------|
//! | [`MemoryStore`] | in-process `Vec`s      | tests, throwaway simulations         |
//! | [`SqliteStore`] | one SQLite file        | durable state across restarts        |
//! | [`CsvTickLog`]  | two CSV files          | per-tick event and snapshot dumps    |
//!
//! Registry and rider state is saved as whole snapshots; packages are written
//! one row at a time through the `PackageStore` supertrait, so every mutation
//! the scheduler makes lands in the database before the call returns.
//!
//! # Usage
//!
//! ```rust,ignore
//! use courier_store::{DepotStore, SqliteStore};
//!
//! let mut store = SqliteStore::open(Path::new("./network.db"))?;
//! let cities = store.load_cities()?;
//! ```

pub mod codec;
pub mod csvlog;
pub mod depot;
pub mod error;
pub mod memory;
pub mod sqlite;


pub use codec::{encode_history, encode_plan, parse_history, parse_plan};
pub use csvlog::CsvTickLog;
pub use depot::DepotStore;
pub use error::{DepotError, DepotResult};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
