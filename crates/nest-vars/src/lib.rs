//! Variable files: the `key = "value";` configuration store of an assembly.

pub mod escape;
pub mod parser;
pub mod store;

pub use escape::escape_value;
pub use parser::{ParsedEntry, SkipReason, SkippedEntry, is_valid_var_name, parse_vars};
pub use store::VarStore;
