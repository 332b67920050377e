//! Error handling for sfc-inherit
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`InheritError`]) for every way an inheritance
//!    chain can fail to resolve
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions,
//!    built only at the CLI boundary
//!
//! Resolution never swallows or logs an error on its own: the first failure
//! anywhere in an ancestor chain aborts the whole request and travels back to
//! the caller unchanged.
//!
//! # Examples
//!
//! ```rust,no_run
//! use sfc_inherit::core::{InheritError, user_friendly_error};
//!
//! let error = InheritError::InvalidReference {
//!     reference: String::new(),
//!     reason: "reference is empty".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use super::file_error::FileOperationError;

/// The main error type for inheritance resolution
///
/// # Error Categories
///
/// - [`Parse`](InheritError::Parse) - malformed component source at any level
/// - [`Io`](InheritError::Io) - an ancestor file could not be read
/// - [`InvalidReference`](InheritError::InvalidReference) - malformed `extends` value
/// - [`InvalidAlias`](InheritError::InvalidAlias) - alias pattern that does not compile
/// - [`DuplicateExtension`](InheritError::DuplicateExtension) - two blocks fill one point
/// - [`CircularInheritance`](InheritError::CircularInheritance) - a component extends itself
/// - [`Config`](InheritError::Config) - configuration file problems
#[derive(Error, Debug)]
pub enum InheritError {
    /// Component source or template markup could not be parsed
    #[error("Failed to parse component {file}: {reason}")]
    Parse {
        /// File (or `<input>`) whose source was malformed
        file: String,
        /// What the parser rejected
        reason: String,
    },

    /// An ancestor file could not be read
    #[error(transparent)]
    Io(#[from] FileOperationError),

    /// The `extends` value cannot be turned into a path
    #[error("Invalid base component reference '{reference}': {reason}")]
    InvalidReference {
        /// The reference as written in the `extends` attribute
        reference: String,
        /// Why it was rejected
        reason: String,
    },

    /// A pattern-mode alias key is not a valid regular expression
    #[error("Invalid alias pattern '{pattern}': {reason}")]
    InvalidAlias {
        /// The offending alias key
        pattern: String,
        /// Regex compiler message
        reason: String,
    },

    /// Two extension blocks in one component target the same extension point
    #[error("Extension point '{point}' is filled more than once in {file}")]
    DuplicateExtension {
        /// Point name targeted twice
        point: String,
        /// Component declaring the duplicates
        file: String,
    },

    /// A component transitively extends itself
    #[error("Circular inheritance detected: {chain}")]
    CircularInheritance {
        /// Rendered chain, e.g. `A.vue -> B.vue -> A.vue`
        chain: String,
    },

    /// Configuration file could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },
}

/// Result alias used throughout the library
pub type Result<T, E = InheritError> = std::result::Result<T, E>;

/// Error wrapper with user-facing details and a suggestion
///
/// ```rust,no_run
/// use sfc_inherit::core::{ErrorContext, InheritError};
///
/// let context = ErrorContext::new(InheritError::Config { message: "bad toml".into() })
///     .with_suggestion("Check sfc-inherit.toml for syntax errors")
///     .with_details("The configuration is read before any component is resolved");
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// Primary message, already rendered
    pub error: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from an [`InheritError`]
    #[must_use]
    pub fn new(error: InheritError) -> Self {
        Self::message(error.to_string())
    }

    /// Create a new error context from an already-rendered message
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`]
///
/// Recognises [`InheritError`] and bare [`FileOperationError`] anywhere in the
/// `anyhow` chain; everything else is rendered with its full context chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(inherit_error) = cause.downcast_ref::<InheritError>() {
            return create_error_context(inherit_error);
        }
        if let Some(file_error) = cause.downcast_ref::<FileOperationError>() {
            return ErrorContext::message(file_error.to_string())
                .with_details(file_error.user_message());
        }
    }

    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let context = ErrorContext::message(error.to_string());
    if chain.is_empty() {
        context
    } else {
        context.with_details(chain.join("\n"))
    }
}

fn create_error_context(error: &InheritError) -> ErrorContext {
    let context = ErrorContext::message(error.to_string());
    match error {
        InheritError::Parse {
            ..
        } => context
            .with_suggestion("Check that every <template>, <script> and <style> block is closed")
            .with_details("Malformed source anywhere in the ancestor chain aborts the whole resolution"),
        InheritError::Io(file_error) => context
            .with_details(file_error.user_message())
            .with_suggestion("Fix the `extends` attribute or the alias configuration"),
        InheritError::InvalidReference {
            ..
        } => context.with_suggestion(
            "Set `extends` to a relative path (./Base.vue) or an aliased path (@/components/Base.vue)",
        ),
        InheritError::InvalidAlias {
            ..
        } => context.with_suggestion(
            "In pattern alias mode every alias key must be a valid regular expression",
        ),
        InheritError::DuplicateExtension {
            ..
        } => context
            .with_suggestion("Remove or merge the repeated <extension> blocks")
            .with_details("Each extension point may be filled by at most one extension block per component"),
        InheritError::CircularInheritance {
            ..
        } => context.with_suggestion("Break the cycle so the chain ends in a component without `extends`"),
        InheritError::Config {
            ..
        } => context.with_suggestion("Check sfc-inherit.toml for syntax errors and unknown keys"),
    }
}
