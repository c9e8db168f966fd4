pub mod balance;
pub mod cost;
pub mod log;
pub mod model;
pub mod provider;
