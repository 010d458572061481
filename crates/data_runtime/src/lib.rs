//! data_runtime: tuning and level data schemas + loaders.
//!
//! Kept free of simulation dependencies so server and client can depend on a
//! stable data API. Every config has a `Default` mirroring the shipped data
//! files, so the simulation can run (and tests can construct state) without
//! touching the filesystem.

use std::path::PathBuf;

pub mod configs {
    pub mod level;
    pub mod pawns;
}

pub(crate) fn data_root() -> PathBuf {
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}
