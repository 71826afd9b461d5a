//! Shared helpers for the integration tests

/// Installs `env_logger` once per test binary; set `RUST_LOG=trace` to see
/// every cut and link.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
