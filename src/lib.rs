//! Alias-to-driver registry for the reporting application.
//!
//! Maps a human-chosen connection alias to the metadata needed to load a
//! database driver at runtime (fully-qualified class name plus an optional
//! jar path), and keeps that set synchronized with a JSON file on disk.

pub mod registry;

pub use registry::{DriverRecord, DriverRegistry, PersistOutcome, RegistryError};
