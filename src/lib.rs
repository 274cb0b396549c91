#![warn(rust_2018_idioms)]

pub mod app;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod formatter;
pub mod handler;
pub mod healthcheck;
pub mod notifier;
pub mod relay;
pub mod time;
