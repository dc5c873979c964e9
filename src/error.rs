//! Application error types using thiserror
//!
//! Error hierarchy:
//! - RegistryError: Issues with package registry communication
//! - GraphError: Issues building the module graph
//! - PatchError: File system failures while patching a referrer
//! - ConfigError: Issues with CLI or config file configuration

use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Module graph related errors
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Patch related errors
    #[error(transparent)]
    Patch(#[from] PatchError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry} registry")]
    RateLimitExceeded { registry: String },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },
}

/// Errors related to building the module graph
#[derive(Error, Debug)]
pub enum GraphError {
    /// A specifier handed to the load policy is not a valid URL
    #[error("invalid module specifier '{specifier}': {message}")]
    InvalidSpecifier { specifier: String, message: String },

    /// The root module path could not be turned into a URL
    #[error("invalid root module '{path}'")]
    InvalidRoot { path: PathBuf },

    /// The root module could not be loaded
    #[error("failed to load module {specifier}: {message}")]
    Load { specifier: Url, message: String },
}

/// Errors related to reading referrer files for patching
#[derive(Error, Debug)]
pub enum PatchError {
    /// Failed to read referrer file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write referrer file
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse config file {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// Invalid path
    #[error("invalid path '{path}': {message}")]
    InvalidPath { path: PathBuf, message: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }
}

impl GraphError {
    /// Creates a new InvalidSpecifier error
    pub fn invalid_specifier(specifier: impl Into<String>, message: impl Into<String>) -> Self {
        GraphError::InvalidSpecifier {
            specifier: specifier.into(),
            message: message.into(),
        }
    }

    /// Creates a new Load error
    pub fn load(specifier: Url, message: impl Into<String>) -> Self {
        GraphError::Load {
            specifier,
            message: message.into(),
        }
    }
}

impl PatchError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PatchError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PatchError::WriteError {
            path: path.into(),
            source,
        }
    }
}

impl ConfigError {
    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}
