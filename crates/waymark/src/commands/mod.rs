//! CLI command implementations.

mod serve;
mod tree;

pub(crate) use serve::ServeArgs;
pub(crate) use tree::TreeArgs;
