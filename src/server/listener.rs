use std::sync::Arc;

use anyhow::{Context, bail};
use tokio::net::{TcpListener, TcpSocket};
use tokio::sync::Semaphore;
use tracing::{Instrument, info};

use crate::config::{Config, Protocol};
use crate::http::connection::Connection;
use crate::server::ServeContext;

/// Binds the configured address with `SO_REUSEADDR` and starts listening.
pub fn bind(cfg: &Config) -> anyhow::Result<TcpListener> {
    let addr = cfg.listen_addr();

    let socket = match cfg.protocol {
        Protocol::V4 => TcpSocket::new_v4(),
        Protocol::V6 => TcpSocket::new_v6(),
    }
    .context("failed to create socket")?;

    socket.set_reuseaddr(true).context("failed to set SO_REUSEADDR")?;
    socket
        .bind(addr)
        .with_context(|| format!("failed to bind {addr}"))?;

    socket
        .listen(cfg.backlog)
        .with_context(|| format!("failed to listen on {addr}"))
}

/// Resolves the document root, binds, and serves until an accept fails.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let ctx = ServeContext::from_config(cfg)?;
    let listener = bind(cfg)?;
    info!("Listening on {}, serving {}", listener.local_addr()?, ctx.root.display());

    serve(listener, Arc::new(ctx)).await
}

/// Accept loop: every connection is handed to its own task and the loop
/// goes straight back to accepting.
///
/// With `max_connections` set, a permit must be free before the next
/// connection is accepted; the permit is held until that connection's task
/// ends.
pub async fn serve(listener: TcpListener, ctx: Arc<ServeContext>) -> anyhow::Result<()> {
    let gate = match ctx.max_connections {
        Some(0) => bail!("max_connections must be at least 1"),
        Some(n) => Some(Arc::new(Semaphore::new(n))),
        None => None,
    };

    loop {
        let permit = match &gate {
            Some(gate) => Some(Arc::clone(gate).acquire_owned().await?),
            None => None,
        };

        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let ctx = Arc::clone(&ctx);
        let span = tracing::info_span!("conn", %peer);
        tokio::spawn(
            async move {
                let _permit = permit;
                let mut conn = Connection::new(socket, ctx);
                if let Err(e) = conn.run().await {
                    tracing::error!("Connection error from {}: {:#}", peer, e);
                }
            }
            .instrument(span),
        );
    }
}
