//! Core domain models for bumpdep
//!
//! This module contains the fundamental types used throughout the application:
//! - The validated update request and package manager choice
//! - Bare target versions and range-prefix handling
//! - Dependency sections of a manifest
//! - Per-file outcomes and the run summary

mod dependency;
mod manager;
mod outcome;
mod request;
mod summary;
mod version_spec;

pub use dependency::DependencyKind;
pub use manager::PackageManager;
pub use outcome::{FailureReason, FileOutcome, SkipReason};
pub use request::UpdateRequest;
pub use summary::{ManifestResult, UpdateSummary};
pub use version_spec::{strip_range_prefix, VersionSpec};
