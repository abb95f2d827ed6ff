pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;
