pub mod check;

pub use check::{CheckContext, run_check};
