//! chatterm library exports for testing

pub mod connection;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;
