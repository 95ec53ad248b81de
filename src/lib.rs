//! bumpdep - bump one npm dependency across many package.json files
//!
//! This library provides the pieces of a single update run:
//! - Target version resolution (explicit or latest from the registry)
//! - package.json discovery with include/exclude directories
//! - Per-manifest rewrite with optional install and test commands
//! - Text and JSON rendering of the run summary

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod package_manager;
pub mod paths;
pub mod progress;
pub mod registry;
pub mod update;
