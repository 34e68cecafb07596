// Application layer - the ledger operations and their error taxonomy.
// Every rejection is a typed result; no operation partially applies a
// mutation before detecting a violation (validate-then-commit).

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
