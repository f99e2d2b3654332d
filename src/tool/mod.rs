// ABOUTME: Tool module - defines tools, registry, and execution.
// ABOUTME: Framework-neutral seam that host adapters translate from.

mod registry;
mod result;
mod traits;

pub use registry::*;
pub use result::*;
pub use traits::*;
