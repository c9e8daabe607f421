pub mod config;
pub mod coordinator;
pub mod discovery;
pub mod error;
pub mod io;
pub mod lock;
pub mod paths;
pub mod session;
pub mod store;
pub mod types;

pub use coordinator::{Coordinator, SyncView};
pub use error::{CoordError, Result};
