use std::fmt;

/// Errors that can occur when interacting with the driver registry.
#[derive(Debug)]
pub enum RegistryError {
    /// No driver is registered under the given alias.
    NotFound(String),
    /// The record's alias was empty or whitespace-only.
    EmptyAlias,
    /// A generic internal error.
    Internal(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::NotFound(alias) => {
                write!(f, "No driver registered for alias {}", alias)
            }
            RegistryError::EmptyAlias => write!(f, "Driver alias must not be empty"),
            RegistryError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for RegistryError {}
