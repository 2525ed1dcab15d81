//! Shared primitives for the sitewise workspace.
//!
//! `sitewise-core` provides the foundation the inference crates build on:
//!
//! - **Error types** — [`SitewiseError`] and [`Result`] for structured error
//!   handling
//! - **Traits** — Display contracts like [`Summarizable`] and [`Annotated`]

pub mod error;
pub mod traits;

pub use error::{Result, SitewiseError};
pub use traits::*;
