pub mod client;
pub mod config;
pub mod facade;
pub mod query;

#[cfg(test)]
pub(crate) mod fake;
