//! Error types for the host boundary and compiler invocation.

use std::{io, path::PathBuf};
use thiserror::Error;

/// A violation of the entry point argument contract.
///
/// These never become a result pair; the host raises them as `badarg`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BadArg {
    #[error("expected exactly 1 argument, got {0}")]
    Arity(usize),
    #[error("argument is not a character sequence")]
    NotAString,
    #[error("character sequence contains a NUL character at index {0}")]
    InteriorNul(usize),
    #[error("failed to allocate a {0} byte native buffer")]
    Alloc(usize),
}

/// A failure to get as far as running the compiler.
#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("Unable to resolve the current working directory: {0}")]
    WorkingDirectory(#[source] io::Error),
    #[error("Invalid stylesheet path: {}", .0.display())]
    InvalidPath(PathBuf),
    #[error("Unable to allocate a compile context.")]
    ContextAlloc,
}
