use clap::Parser;
use client::network::Client;
use log::info;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:6000")]
    server: String,

    /// Display name shown to other players
    #[arg(short = 'n', long, default_value = "player")]
    name: String,

    /// Interval between state polls in milliseconds
    #[arg(short = 'p', long, default_value = "1000")]
    poll_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    info!("Starting client...");
    info!("Connecting to: {}", args.server);

    let mut client = Client::new(
        &args.server,
        &args.name,
        Duration::from_millis(args.poll_ms.max(1)),
    )
    .await?;

    client.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["client"]);
        assert_eq!(args.server, "127.0.0.1:6000");
        assert_eq!(args.name, "player");
        assert_eq!(args.poll_ms, 1000);
    }
}
