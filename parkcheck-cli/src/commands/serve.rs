//! Serve command - run the HTTP API until Ctrl+C.

use std::net::SocketAddr;

use parkcheck::config::{format_size, CacheBackendKind};
use parkcheck::server;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the serve command.
pub struct ServeArgs {
    pub bind: Option<SocketAddr>,
    pub no_cache: bool,
}

/// Run the serve command.
pub fn run(runner: &CliRunner, args: ServeArgs) -> Result<(), CliError> {
    runner.log_startup("serve");

    let mut config = runner.config().clone();
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if args.no_cache {
        config.cache.enabled = false;
    }

    let app = runner.build_app(&config)?;

    println!("ParkCheck v{}", parkcheck::VERSION);
    println!("===============");
    println!();
    println!("Listening:  http://{}", config.server.bind);
    println!("Overpass:   {}", config.geodata.endpoint);
    println!("Tiles:      {}", config.tiles.url);
    if app.maps().renderer().has_cache() {
        match config.cache.backend {
            CacheBackendKind::Disk => {
                println!("Cache:      Enabled (disk, {})", config.cache.directory.display())
            }
            CacheBackendKind::Memory => println!(
                "Cache:      Enabled (memory, {})",
                format_size(config.cache.memory_size)
            ),
        }
    } else {
        println!("Cache:      Disabled (all tiles fetched fresh)");
    }
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    ctrlc::set_handler(move || {
        println!();
        println!("Received shutdown signal, draining requests...");
        signal.cancel();
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    let runtime = runner.runtime()?;
    let bind = config.server.bind;
    runtime.block_on(async move {
        let listener = TcpListener::bind(bind)
            .await
            .map_err(|e| CliError::Serve(format!("Failed to bind {}: {}", bind, e)))?;
        server::serve(listener, app.state(), shutdown)
            .await
            .map_err(|e| CliError::Serve(e.to_string()))
    })?;

    println!("Server stopped.");
    Ok(())
}
