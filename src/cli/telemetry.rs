use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

fn env_filter(verbosity_level: Level) -> Result<EnvFilter> {
    Ok(EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy()
        .add_directive("hyper=error".parse()?)
        .add_directive("hyper_util=error".parse()?)
        .add_directive("tokio=error".parse()?))
}

/// Initialize logging on stderr so stdout stays free for command output.
/// `RUST_LOG` takes precedence over the verbosity level.
///
/// # Errors
///
/// Returns an error if the subscriber cannot be installed
pub fn init(verbosity_level: Option<Level>, json: bool) -> Result<()> {
    let filter = env_filter(verbosity_level.unwrap_or(Level::ERROR))?;

    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(false);
        let subscriber = Registry::default().with(fmt_layer).with(filter);
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_target(false);
        let subscriber = Registry::default().with(fmt_layer).with(filter);
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_defaults_to_level() -> Result<()> {
        temp_env::with_vars([("RUST_LOG", None::<&str>)], || -> Result<()> {
            let filter = env_filter(Level::DEBUG)?;
            assert_eq!(filter.max_level_hint(), Some(Level::DEBUG.into()));
            Ok(())
        })
    }
}
