//! echo-server: a raw TCP echo server
//!
//! Every accepted connection runs in its own task and gets back exactly the
//! bytes it sends, in order, until it closes.
//!
//! Configuration via CLI arguments or TOML file.

use sockets_demo::config::Config;
use sockets_demo::{logging, Server};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    logging::init(&config.log_level);

    info!(
        listen = %config.listen,
        backlog = config.backlog,
        buffer_size = config.buffer_size,
        workers = ?config.workers,
        "Starting echo server"
    );

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    if let Some(workers) = config.workers {
        builder.worker_threads(workers);
    }
    let runtime = builder.enable_all().build()?;

    runtime.block_on(async {
        let server = Server::bind(&config)?;
        server.run().await
    })?;

    Ok(())
}
