mod conversions;
mod types;

pub use types::{ConsoleCommandRequest, ConsoleSnapshotResponse};
