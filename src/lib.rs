// src/lib.rs

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod member;
pub mod normalize;
pub mod specs;

pub mod csv;
pub mod file;
pub mod progress;
pub mod scrape;
pub mod service;
pub mod store;
