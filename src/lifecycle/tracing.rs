/// Initializes the tracing/logging infrastructure for the console.
///
/// This is the embedding application's entry hook: the crate itself ships no
/// binary, so the host calls this once at startup before activating a
/// [`CatalogSystem`](crate::lifecycle::CatalogSystem). Panics if a global
/// subscriber is already installed, so tests that want output should install
/// their own.
///
/// Structured logging via the `tracing` crate with environment-based
/// filtering: set `RUST_LOG` to control verbosity, e.g.
/// `RUST_LOG=catalog_console=debug` to watch every command and settlement
/// the controller processes.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
