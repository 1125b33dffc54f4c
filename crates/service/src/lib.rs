//! Service layer for the video resource.
//! - Separates request-argument rules and existence policy from data access.
//! - Reuses the entity and validation helpers from the `models` crate.

pub mod errors;
#[cfg(test)]
pub mod test_support;
pub mod video;
