//! Plain-text renderings of games and ratings for the terminal

use std::fmt::Write;

use gamerev_common::models::{Game, Rating, RatingWithGame};
use gamerev_common::pagination::Pagination;

/// Mean of the scores that are present, `None` when no rating has a score
pub fn average_rating(ratings: &[RatingWithGame]) -> Option<f64> {
    let scores: Vec<f64> = ratings.iter().filter_map(|r| r.rating).collect();
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

fn score(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}", v))
}

/// One line per game in list views
pub fn game_line(game: &Game) -> String {
    format!(
        "{}  {:<40}  {:<18}  {:>4}  {}",
        game.id,
        game.title,
        game.genre,
        score(game.rating),
        game.platform.join(", ")
    )
}

/// One line per rating in list views
pub fn rating_line(rating: &RatingWithGame) -> String {
    let title = rating
        .game
        .as_ref()
        .map_or("(deleted game)", |g| g.title.as_str());
    format!(
        "{}  {:>4}  {:<40}  {}",
        rating.id,
        score(rating.rating),
        title,
        rating.rating_text.as_deref().unwrap_or("")
    )
}

/// Confirmation line after a rating is created or edited
pub fn rating_saved(rating: &Rating) -> String {
    format!(
        "Saved rating {} ({}) for game {}",
        rating.id,
        score(rating.rating),
        rating.game_id
    )
}

/// Footer under a paged list
pub fn pagination_footer(pagination: &Pagination) -> String {
    format!(
        "Page {} of {} ({} total)",
        pagination.page, pagination.pages, pagination.total
    )
}

/// Detail view: every game field followed by its ratings and their average
pub fn game_detail(game: &Game, ratings: &[RatingWithGame]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", game.title, game.id);
    let _ = writeln!(out, "  Genre:       {}", game.genre);
    let _ = writeln!(out, "  Platforms:   {}", game.platform.join(", "));
    if let Some(date) = game.release_date {
        let _ = writeln!(out, "  Released:    {}", date.format("%Y-%m-%d"));
    }
    if let Some(developer) = &game.developer {
        let _ = writeln!(out, "  Developer:   {}", developer);
    }
    if let Some(publisher) = &game.publisher {
        let _ = writeln!(out, "  Publisher:   {}", publisher);
    }
    let _ = writeln!(out, "  Rating:      {}", score(game.rating));
    if let Some(description) = &game.description {
        let _ = writeln!(out, "  {}", description);
    }

    let _ = writeln!(out);
    match average_rating(ratings) {
        Some(avg) => {
            let _ = writeln!(out, "Ratings ({}, average {:.1}):", ratings.len(), avg);
        }
        None => {
            let _ = writeln!(out, "Ratings ({}):", ratings.len());
        }
    }
    for rating in ratings {
        let _ = writeln!(
            out,
            "  {}  {:>4}  {}",
            rating.id,
            score(rating.rating),
            rating.rating_text.as_deref().unwrap_or("")
        );
    }
    out
}
