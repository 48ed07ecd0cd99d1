// src/lib.rs

//! carta — renders the Lo de Paucar menu site from its JSON manifests.

pub mod config;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod locale;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod utils;
