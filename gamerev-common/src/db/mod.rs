//! Document store and collection operations

pub mod documents;
pub mod games;
pub mod init;
pub mod ratings;

pub use documents::{Collection, GAMES, RATINGS};
pub use init::*;
