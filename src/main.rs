use anyhow::bail;
use docroot::config::Config;
use docroot::server;

const USAGE: &str = "usage: docroot <protocol 4|6> <port> <root>\n       docroot <config.yaml>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cfg = match args.len() {
        0 => Config::load()?,
        1 => Config::from_file(&args[0])?,
        3 => Config::from_args(&args[..])?,
        _ => bail!("{USAGE}"),
    };

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
