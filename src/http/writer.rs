use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.0";

fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut head = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    head.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        head.extend_from_slice(k.as_bytes());
        head.extend_from_slice(b": ");
        head.extend_from_slice(v.as_bytes());
        head.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    head.extend_from_slice(b"\r\n");

    head
}

/// Serializes a response into one exactly-sized output buffer and writes it
/// out, resuming after short writes.
#[derive(Debug)]
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        let head = serialize_head(&response);

        let mut buffer = Vec::with_capacity(head.len() + response.body.len());
        buffer.extend_from_slice(&head);
        buffer.extend_from_slice(&response.body);

        Self { buffer, written: 0 }
    }

    /// The full serialized response.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.written
    }

    pub async fn write_to_stream<S>(&mut self, stream: &mut S) -> anyhow::Result<()>
    where
        S: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;

        Ok(())
    }
}
