use std::sync::Once;

use env_logger::{Builder, Env, WriteStyle};

/// Options for [`init_logging`].
///
/// `filter` uses env_logger directive syntax ("info",
/// "enki_engine=debug,wgpu=warn") and takes precedence over `RUST_LOG`
/// when set. `write_style` controls ANSI coloring.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub write_style: WriteStyle,
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the global `log` backend.
///
/// Idempotent; calls after the first are no-ops, so libraries and tests
/// can call it without coordination. Filter precedence: explicit
/// `config.filter`, then `RUST_LOG`, then info level.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(move || {
        let mut builder = match &config.filter {
            Some(directives) => {
                let mut b = Builder::new();
                b.parse_filters(directives);
                b
            }
            None => Builder::from_env(Env::default().default_filter_or("info")),
        };
        builder.write_style(config.write_style);
        builder.init();
        log::debug!("logger ready");
    });
}
