use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::app::LogFormat;

const DEFAULT_FILTER: &str = "info,actix_web=info,meme_clash=info";

pub fn init_tracing(format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let base = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false);

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(base.json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(base.pretty())
            .init(),
    }
}
