#[cfg(test)]
pub mod common;

pub mod query_builders;
pub mod token_lifecycle;
