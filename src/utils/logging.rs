use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout only carries the outcome lines.
/// `RUST_LOG` wins over the verbosity flag when set.
pub fn init_logging(verbose: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));
    let _ = build_subscriber(filter, std::io::stderr).try_init();
}

pub(crate) fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("retail_dw_scripts=debug")
    } else {
        EnvFilter::new("warn")
    }
}

pub(crate) fn build_subscriber<W>(
    filter: EnvFilter,
    writer: W,
) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .finish()
}
