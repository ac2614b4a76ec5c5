pub mod context;
pub mod errors;
pub mod merge;
pub mod resolver;
pub mod scanner;

pub use context::{ProjectContext, UpdateOutcome, unterminated_issues};
