//! Fixtures and helpers shared by the test suites of the workspace.

pub mod deployment;
pub mod fixtures;

/// Route `tracing` events through `env_logger`, honouring `RUST_LOG`.
/// Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
