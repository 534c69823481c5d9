pub mod builder;
pub mod equalizer;
pub mod error;
pub mod model;
pub mod node;
pub mod prompt;
pub mod queue;
pub mod registry;
pub mod session;
pub mod util;

#[cfg(test)]
pub(crate) mod testutil;
