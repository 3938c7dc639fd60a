mod harvest;
mod node;
mod placement;

pub use harvest::*;
pub use node::*;
pub use placement::*;
