use crate::http::request::{Method, Request};

/// Largest request the server will buffer. Reading stops once this many
/// bytes have arrived, whether or not a terminator was seen.
pub const MAX_REQUEST_SIZE: usize = 2000;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The request line is not `<method> /<path> ...`.
    InvalidRequest,
    /// The method token is not GET.
    InvalidMethod,
    /// The path token is not valid UTF-8.
    InvalidPath,
}

/// Returns true once `buf` holds a blank line, written either as
/// `\r\n\r\n` or as four bare `\n`.
pub fn has_terminator(buf: &[u8]) -> bool {
    find_headers_end(buf).is_some()
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n" || w == b"\n\n\n\n")
}

/// Parses an accumulated request buffer.
///
/// The buffer must start with `GET /` (method case-insensitive). The path
/// token runs from the `/` up to the next space; a request with no space
/// after the path is malformed.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    if buf.len() < 5 {
        return Err(ParseError::InvalidRequest);
    }

    let method = Method::from_bytes(&buf[..3]).ok_or(ParseError::InvalidMethod)?;

    if buf[3] != b' ' || buf[4] != b'/' {
        return Err(ParseError::InvalidRequest);
    }

    let rest = &buf[4..];
    let path_len = rest
        .iter()
        .position(|&b| b == b' ')
        .ok_or(ParseError::InvalidRequest)?;

    let path = std::str::from_utf8(&rest[..path_len]).map_err(|_| ParseError::InvalidPath)?;

    Ok(Request::new(method, path))
}
