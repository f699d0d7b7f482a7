//! frame-client: sends one framed message and prints the framed reply.

use sockets_demo::config::ClientOptions;
use sockets_demo::{logging, Client, Message};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Block until the operator presses Enter (or stdin closes).
async fn wait_for_enter() -> std::io::Result<()> {
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = ClientOptions::load()?;
    logging::init(&options.log_level);

    if options.prompt {
        println!("Press Enter to connect");
        wait_for_enter().await?;
    }

    let client = Client::connect(options.connect.as_str()).await?;

    println!("Sending {}", options.message);
    let response: Message = client.round_trip(&options.message).await?;
    println!("Received {}", response);

    if options.prompt {
        wait_for_enter().await?;
    }

    Ok(())
}
