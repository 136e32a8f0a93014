//! Progress display while a story is being generated

pub mod reporter;
