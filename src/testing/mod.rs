pub(crate) mod graph_enumerator;
pub(crate) mod grids;
pub(crate) mod random_graphs;

use std::sync::{LazyLock, Mutex};

use flexi_logger::{Logger, LoggerHandle};

static LOGGER: LazyLock<Mutex<LoggerHandle>> = LazyLock::new(|| {
    Mutex::new(
        Logger::try_with_env_or_str("warn")
            .unwrap()
            .write_mode(flexi_logger::WriteMode::SupportCapture)
            .log_to_stdout()
            .format(|w, now, record| {
                let style = flexi_logger::style(record.level());
                write!(
                    w,
                    "{} {pref}[{}] {}{suf}",
                    now.format("%H:%M:%S"),
                    &record.level().as_str()[0..1],
                    record.args(),
                    pref = style.prefix(),
                    suf = style.suffix(),
                )
            })
            .start()
            .unwrap(),
    )
});

/// Starts the test logger once per test binary, `RUST_LOG` overrides the level.
pub(crate) fn init_logger() {
    let _ = &*LOGGER;
}
