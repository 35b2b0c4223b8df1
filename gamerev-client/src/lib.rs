//! gamerev-client - HTTP client for the gamerev API
//!
//! [`ApiClient`] wraps every endpoint; the `gamerev` binary builds its list,
//! detail and form views on top of it.

pub mod client;
pub mod error;
pub mod forms;
pub mod views;

pub use client::{ApiClient, GameList, GameRatings, RatingList};
pub use error::{ClientError, ClientResult};
pub use forms::{GameForm, GameListParams, RatingForm, RatingListParams};
