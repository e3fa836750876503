//! Chunk snapshot persistence.
#![forbid(unsafe_code)]

pub mod snapshot;

pub use snapshot::{
    SNAPSHOT_MAGIC, SNAPSHOT_VERSION, SnapshotDir, SnapshotError, read_snapshot, write_snapshot,
};
