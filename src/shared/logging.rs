use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::shared::config::LoggingConfig;

/// ログ設定の初期化。`RUST_LOG` が設定されていればそちらを優先する
pub fn init(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let fmt_layer = if config.json {
        fmt::layer().json().with_current_span(false).boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed()
    };

    // 二重初期化はテストなどで起こり得るので無視する
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();

    tracing::debug!(level = %config.level, json = config.json, "logging initialized");
}
