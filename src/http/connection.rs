use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::files;
use crate::http::parser::{MAX_REQUEST_SIZE, has_terminator, parse_http_request};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::server::ServeContext;

/// One client connection, served for exactly one request.
///
/// The connection owns the socket and both buffers; dropping it closes the
/// socket whichever way `run` returned.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    ctx: Arc<ServeContext>,
}

pub enum ConnectionState {
    Reading,
    Processing,
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, ctx: Arc<ServeContext>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(MAX_REQUEST_SIZE),
            state: ConnectionState::Reading,
            ctx,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    if self.read_request().await? {
                        self.state = ConnectionState::Processing;
                    } else {
                        tracing::debug!("Peer closed before sending a complete request");
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Processing => {
                    let response = self.handle_request().await?;
                    self.state = ConnectionState::Writing(ResponseWriter::new(response));
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    // HTTP/1.0: one request per connection
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Accumulates request bytes until a terminator arrives or the buffer
    /// reaches `MAX_REQUEST_SIZE`.
    ///
    /// Returns `false` if the peer closed the connection first.
    pub async fn read_request(&mut self) -> anyhow::Result<bool> {
        let mut temp = [0u8; 1024];

        loop {
            if has_terminator(&self.buffer) || self.buffer.len() >= MAX_REQUEST_SIZE {
                return Ok(true);
            }

            let want = temp.len().min(MAX_REQUEST_SIZE - self.buffer.len());
            let n = match self.ctx.read_timeout {
                Some(limit) => tokio::time::timeout(limit, self.stream.read(&mut temp[..want]))
                    .await
                    .map_err(|_| anyhow::anyhow!("timed out after {limit:?} waiting for request"))??,
                None => self.stream.read(&mut temp[..want]).await?,
            };

            if n == 0 {
                // Client closed connection
                return Ok(false);
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }
    }

    async fn handle_request(&self) -> anyhow::Result<Response> {
        let request = match parse_http_request(&self.buffer) {
            Ok(request) => request,
            Err(e) => {
                tracing::info!(error = ?e, status = 400, "Rejected malformed request");
                return Ok(Response::bad_request());
            }
        };

        tracing::debug!(path = %request.path, "Requested");

        let response = files::respond(&self.ctx.root, &request).await?;

        tracing::info!(
            method = ?request.method,
            path = %request.path,
            status = response.status.as_u16(),
            bytes = response.body.len(),
            "Request served"
        );

        Ok(response)
    }
}
