//! This is the library of the checkbox label action.
//!
//! The [`labels`] module is the core: it extracts label directives from issue descriptions and
//! computes label modifications, without doing any I/O. The [`github`] and [`sync`] modules apply
//! those modifications to a GitHub repository.
pub mod config;
pub mod github;
pub mod labels;
pub mod sync;
pub mod utils;

#[cfg(test)]
mod tests;
