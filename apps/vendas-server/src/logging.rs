use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize tracing. `RUST_LOG` wins when set; otherwise the `-v` count
/// picks the level for our crates.
pub fn init(verbose: u8) {
    let default_directives = match verbose {
        0 => "vendas_server=info,users=info,sankhya=info,tower_http=info",
        1 => "vendas_server=debug,users=debug,sankhya=debug,tower_http=debug",
        _ => "vendas_server=trace,users=trace,sankhya=trace,tower_http=trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
