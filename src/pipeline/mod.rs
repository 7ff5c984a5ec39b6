//! Pipeline module - the cleaning steps, in the order they run

pub mod aggregate;
pub mod coerce;
pub mod dedup;
pub mod encode;
pub mod error;
pub mod fallback;
pub mod features;
pub mod loader;
pub mod missing;
pub mod profile;
pub mod prune;
pub mod runner;
pub mod schema;
pub mod temporal;
pub mod writer;

pub use aggregate::*;
pub use coerce::*;
pub use dedup::*;
pub use encode::*;
pub use error::CleanError;
pub use fallback::*;
pub use features::*;
pub use loader::*;
pub use missing::*;
pub use profile::*;
pub use prune::*;
pub use runner::*;
pub use schema::ColumnPresence;
pub use writer::*;
