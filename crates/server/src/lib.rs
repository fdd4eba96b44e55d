//! MCP server exposing DocDocDoc document-request tools and `request://` resources.
//!
//! The protocol layer lives here; validation and HTTP calls are in `docdocdoc-api`.

pub mod error;
pub mod resources;
pub mod serve;
pub mod server;
pub mod tools;

pub use error::{Result, ServerError};
pub use resources::RequestCache;
pub use server::DocDocDocServer;
pub use tools::RequestTools;
