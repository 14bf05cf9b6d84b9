pub mod collect;
pub mod config;
pub mod error;
pub mod model;
pub mod parse;
pub mod report;

#[cfg(test)]
mod model_test;
