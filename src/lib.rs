pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod nrtm;
pub mod rpsl;
pub mod store;
pub mod types;

#[cfg(test)]
pub mod testing;
