//! Command implementations.

pub mod cache;
pub mod check;
pub mod config;
pub mod init;
pub mod map;
pub mod serve;
