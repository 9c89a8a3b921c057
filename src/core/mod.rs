//! Core translation engine module

pub mod chunk;
pub mod client;
pub mod config;
pub mod errors;
pub mod glossary;
pub mod mock;
pub mod models;
pub mod protect;
pub mod restore;
