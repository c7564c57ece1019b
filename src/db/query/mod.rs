mod executor;
mod rewrite;
mod script;
mod segment;
mod types;

pub use executor::*;
pub use rewrite::*;
pub use script::*;
pub use segment::*;
pub use types::*;
