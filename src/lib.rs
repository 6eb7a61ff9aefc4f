//! EduRanker: terminal front end for the EduRanker search service.
//!
//! Questions typed by the user are sent to the ranking backend through an
//! [`eduranker_client`] session; ranked results are printed as cards and can
//! be liked or disliked by number.
//!
//! # Architecture
//!
//! - **Config**: TOML file with the backend location ([`config::AppConfig`])
//! - **Session**: the client crate's state machine and async driver
//! - **Terminal**: line-oriented input parsing and card rendering ([`terminal`])

pub mod config;
pub mod error;
pub mod terminal;

pub use config::AppConfig;
pub use error::{AppError, Result};
