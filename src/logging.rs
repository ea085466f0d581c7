use crate::error::{Error, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Фильтр из RUST_LOG, иначе из конфигурации
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Логи пишутся в stderr, чтобы stdout оставался под JSON-вывод
pub fn setup_logging(filter: &str) -> Result<()> {
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_filter(env_filter(filter));

    tracing::subscriber::set_global_default(tracing_subscriber::registry().with(stderr_log))
        .map_err(|e| Error::Custom(format!("SetGlobalDefaultError: {e:?}")))
}
