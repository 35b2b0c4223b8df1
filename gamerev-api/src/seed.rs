//! Sample data loader
//!
//! Clears both collections, then inserts three games and five ratings that
//! reference them.

use gamerev_common::db::{games, ratings};
use gamerev_common::Result;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::info;

/// Counts of documents written by [`seed_database`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub games: usize,
    pub ratings: usize,
}

fn sample_games() -> Vec<Value> {
    vec![
        json!({
            "title": "The Legend of Zelda: Breath of the Wild",
            "genre": "Action-Adventure",
            "platform": ["Nintendo Switch", "Wii U"],
            "releaseDate": "2017-03-03",
            "developer": "Nintendo EPD",
            "publisher": "Nintendo",
            "rating": 9.7,
            "description": "An open-world action-adventure game set in the kingdom of Hyrule.",
        }),
        json!({
            "title": "God of War",
            "genre": "Action",
            "platform": ["PlayStation 4", "PC"],
            "releaseDate": "2018-04-20",
            "developer": "Santa Monica Studio",
            "publisher": "Sony Interactive Entertainment",
            "rating": 9.5,
            "description": "Kratos embarks on a new adventure with his son Atreus in Norse mythology.",
        }),
        json!({
            "title": "Cyberpunk 2077",
            "genre": "RPG",
            "platform": ["PC", "PlayStation 4", "Xbox One", "PlayStation 5", "Xbox Series X/S"],
            "releaseDate": "2020-12-10",
            "developer": "CD Projekt Red",
            "publisher": "CD Projekt",
            "rating": 7.8,
            "description": "An open-world cyberpunk RPG set in Night City.",
        }),
    ]
}

/// (index into the sample games, score, review text)
const SAMPLE_RATINGS: [(usize, f64, &str); 5] = [
    (0, 10.0, "Absolutely amazing! Best game I've ever played."),
    (0, 9.0, "Great open-world experience with beautiful graphics."),
    (1, 9.0, "Emotional story with excellent combat mechanics."),
    (2, 8.0, "Good game despite the initial bugs. Much better now!"),
    (2, 7.0, "Interesting story but needed more polish at launch."),
];

/// Replace the contents of the store with the sample data set
pub async fn seed_database(pool: &SqlitePool) -> Result<SeedSummary> {
    let removed_ratings = ratings::delete_all_ratings(pool).await?;
    let removed_games = games::delete_all_games(pool).await?;
    info!(
        "Cleared {} games and {} ratings",
        removed_games, removed_ratings
    );

    info!("Creating sample games...");
    let mut created = Vec::new();
    for input in sample_games() {
        created.push(games::create_game(pool, &input).await?);
    }

    info!("Creating sample ratings...");
    for (index, score, text) in SAMPLE_RATINGS {
        let input = json!({
            "gameId": created[index].id,
            "rating": score,
            "ratingText": text,
        });
        ratings::create_rating(pool, &input).await?;
    }

    let summary = SeedSummary {
        games: created.len(),
        ratings: SAMPLE_RATINGS.len(),
    };
    info!(
        "Created {} games and {} ratings",
        summary.games, summary.ratings
    );
    Ok(summary)
}
