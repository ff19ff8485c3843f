//! Logging setup for the binaries.

/// Initialize the logger with INFO as the default level. The `RUST_LOG`
/// environment variable overrides the default.
pub fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{:5} {}] {}",
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        })
        .init();
}
