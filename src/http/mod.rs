//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.0 side of the file server: one GET
//! request per connection, answered with 200, 400 or 404 and then closed.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection handler implementing the read-process-write state machine
//! - **`parser`**: Recognizes the end of a request and extracts the GET path
//! - **`request`**: The parsed request line
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Accumulate up to 2000 bytes or a blank line
//!        └──────┬──────┘
//!               │ Request buffered          (peer closed → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Parse, resolve, load file
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!             Closed
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
