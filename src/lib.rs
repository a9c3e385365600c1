//! Docroot - HTTP/1.0 static file server
//!
//! Core library for request handling, file resolution and connection dispatch.

pub mod config;
pub mod files;
pub mod http;
pub mod server;
