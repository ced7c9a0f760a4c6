// Domain module
// Shell kinds, path resolution, and per-shell outcomes

pub mod paths;
pub mod shell;
pub mod status;
