mod ledger;
mod sync;
mod transaction;

pub use ledger::*;
pub use sync::*;
pub use transaction::*;
