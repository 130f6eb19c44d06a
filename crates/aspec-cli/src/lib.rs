//! Library components of the `aspec-normalize` command.

pub mod logging;
pub mod pipeline;
