use std::path::Path;

use anyhow::{Context, bail};
use tokio::io::AsyncReadExt;

use crate::files::resolver::{ResolvedTarget, resolve};
use crate::http::mime::mime_for_path;
use crate::http::request::Request;
use crate::http::response::Response;

/// Produces the response for a well-formed GET request.
///
/// Missing, non-regular and out-of-root targets become 404. An error is
/// returned only when a resolved file can no longer be read in full, which
/// means it changed underneath us.
pub async fn respond(root: &Path, request: &Request) -> anyhow::Result<Response> {
    match resolve(root, &request.path).await {
        ResolvedTarget::Valid { path, size } => {
            let body = read_exact_file(&path, size).await?;
            Ok(Response::ok(body, mime_for_path(&path)))
        }
        ResolvedTarget::Rejected(reason) => {
            tracing::debug!(path = %request.path, ?reason, "Not found");
            Ok(Response::not_found())
        }
    }
}

/// Reads exactly `size` bytes from `path`.
///
/// A file that has shrunk or vanished since it was stat'ed is an error. Bytes
/// appended after the stat are ignored.
pub async fn read_exact_file(path: &Path, size: u64) -> anyhow::Result<Vec<u8>> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("failed to open {}", path.display()))?;

    let capacity = usize::try_from(size)
        .with_context(|| format!("{} is too large to serve", path.display()))?;
    let mut body = Vec::with_capacity(capacity);

    file.take(size)
        .read_to_end(&mut body)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    if body.len() != capacity {
        bail!(
            "{} shrank from {} to {} bytes while being served",
            path.display(),
            size,
            body.len()
        );
    }

    Ok(body)
}
