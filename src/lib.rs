//! Library crate for quiz-rally-back, exposing modules for the server binary and
//! integration tests.

pub mod catalog;
pub mod config;
mod dto;
mod error;
pub mod routes;
pub mod services;
pub mod state;
