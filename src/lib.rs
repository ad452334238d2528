pub mod config;
pub mod csrf;
pub mod db;
pub mod error;
pub mod form;
pub mod models;
pub mod store;
pub mod web;

pub use crate::config::Config;
pub use crate::error::{Error, Result};
