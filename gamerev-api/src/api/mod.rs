//! HTTP API handlers for gamerev-api

pub mod buildinfo;
pub mod extract;
pub mod games;
pub mod health;
pub mod index;
pub mod ratings;

pub use buildinfo::get_build_info;
pub use extract::{JsonBody, ListParamsQuery};
pub use games::{create_game, delete_game, get_game, list_games, update_game};
pub use health::health_routes;
pub use index::{api_index, not_found, root_index};
pub use ratings::{
    create_rating, delete_rating, get_rating, list_ratings, ratings_by_game, update_rating,
};
