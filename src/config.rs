//! Settings: the `Settings` schema plus layered loading from a TOML file
//! and `NOCTURNE__*` environment variables.

mod load;
mod schema;

pub use load::default_log_path;
pub use schema::*;

#[cfg(test)]
mod tests;
