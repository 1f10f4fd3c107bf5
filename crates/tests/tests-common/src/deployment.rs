//! Locate static files used across test cases.

use std::path::PathBuf;

/// Find the project root via the crate root provided by `cargo test`,
/// and get a directory or file under `static/`.
/// This depends on the convention that this crate lives in `/crates/tests/<name>`.
pub fn get_static_path(path: &str) -> PathBuf {
    let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    d.push("../../../static");
    d.push(path);
    d
}
