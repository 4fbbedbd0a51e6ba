pub mod error;
pub mod recur;
