// src/lib.rs

pub mod config;
pub mod dom;
pub mod extract;
pub mod models;
pub mod num;
pub mod output;
pub mod run;
pub mod services;
pub mod session;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, BoxError>;
