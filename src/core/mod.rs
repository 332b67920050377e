//! Core error types for sfc-inherit
//!
//! - [`InheritError`] - every failure mode of an inheritance resolution
//! - [`FileOperationError`] - a failed ancestor read, carrying the path
//! - [`ErrorContext`] / [`user_friendly_error`] - CLI-facing rendering with suggestions

pub mod error;
pub mod file_error;

pub use error::{ErrorContext, InheritError, Result, user_friendly_error};
pub use file_error::{FileOperation, FileOperationError, FileOps, FileResultExt};
