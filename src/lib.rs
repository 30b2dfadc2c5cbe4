pub mod checker;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod matcher;
pub mod output;
pub mod path_utils;
pub mod scanner;

pub use error::{Result, TodoGuardError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_VIOLATIONS: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
