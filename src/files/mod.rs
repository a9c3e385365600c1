//! Static file lookup and loading.

pub mod resolver;
pub mod serve;

pub use resolver::{RejectReason, ResolvedTarget, resolve};
pub use serve::respond;
