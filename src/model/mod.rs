mod competition;
mod query;
mod report;

pub use competition::*;
pub use query::*;
pub use report::*;
