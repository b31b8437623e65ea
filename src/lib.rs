pub mod config;
pub mod error;
pub mod ir;
pub mod logging;
