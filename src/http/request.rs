/// HTTP request methods.
///
/// The server is a read-only HTTP/1.0 responder, so GET is the only method
/// it recognizes. Anything else is rejected while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
}

impl Method {
    /// Parses an HTTP method token, ignoring ASCII case.
    ///
    /// # Example
    ///
    /// ```
    /// # use docroot::http::request::Method;
    /// assert_eq!(Method::from_bytes(b"GET"), Some(Method::GET));
    /// assert_eq!(Method::from_bytes(b"get"), Some(Method::GET));
    /// assert_eq!(Method::from_bytes(b"POST"), None);
    /// ```
    pub fn from_bytes(token: &[u8]) -> Option<Self> {
        if token.eq_ignore_ascii_case(b"GET") {
            Some(Method::GET)
        } else {
            None
        }
    }
}

/// A parsed request line.
///
/// Only the pieces the file server acts on are kept; headers after the
/// request line are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method (always GET)
    pub method: Method,
    /// The raw requested path, starting with `/` (e.g., "/index.html")
    pub path: String,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}
