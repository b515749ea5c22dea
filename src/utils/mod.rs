//! Shared helpers: input validation and natural ordering of file names.

pub mod natural;
pub mod validation;
