//! gamerev - command-line front end for the gamerev API

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gamerev_client::client::DEFAULT_BASE_URL;
use gamerev_client::views::{
    game_detail, game_line, pagination_footer, rating_line, rating_saved,
};
use gamerev_client::{ApiClient, GameForm, GameListParams, RatingForm, RatingListParams};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "gamerev")]
#[command(about = "Browse and edit game reviews")]
#[command(version)]
struct Cli {
    /// Base URL of the gamerev API
    #[arg(long, env = "GAMEREV_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Game records
    #[command(subcommand)]
    Games(GamesCommand),
    /// Ratings of games
    #[command(subcommand)]
    Ratings(RatingsCommand),
}

#[derive(Subcommand, Debug)]
enum GamesCommand {
    /// List games
    List {
        #[arg(long)]
        genre: Option<String>,
        #[command(flatten)]
        range: RangeArgs,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Show a game with its ratings
    Show { id: String },
    /// Create a game
    Create {
        #[command(flatten)]
        fields: GameFields,
    },
    /// Change fields of a game
    Edit {
        id: String,
        #[command(flatten)]
        fields: GameFields,
    },
    /// Delete a game
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum RatingsCommand {
    /// List ratings
    List {
        /// Only ratings of this game
        #[arg(long)]
        game: Option<String>,
        /// Only ratings with (true) or without (false) review text
        #[arg(long)]
        has_text: Option<bool>,
        #[command(flatten)]
        range: RangeArgs,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Rate a game
    Add {
        #[arg(long)]
        game: String,
        #[arg(long)]
        rating: Option<f64>,
        #[arg(long)]
        text: Option<String>,
    },
    /// Change a rating
    Edit {
        id: String,
        #[arg(long)]
        rating: Option<f64>,
        #[arg(long)]
        text: Option<String>,
    },
    /// Delete a rating
    Delete { id: String },
}

#[derive(Args, Debug)]
struct RangeArgs {
    #[arg(long)]
    min_rating: Option<f64>,
    #[arg(long)]
    max_rating: Option<f64>,
}

#[derive(Args, Debug)]
struct PageArgs {
    /// Sort spec, e.g. `-rating` or `title,-releaseDate`
    #[arg(long)]
    sort: Option<String>,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
}

#[derive(Args, Debug)]
struct GameFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    genre: Option<String>,
    /// Repeat for several platforms
    #[arg(long = "platform")]
    platforms: Vec<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    release_date: Option<String>,
    #[arg(long)]
    developer: Option<String>,
    #[arg(long)]
    publisher: Option<String>,
    #[arg(long)]
    rating: Option<f64>,
    #[arg(long)]
    description: Option<String>,
}

impl From<GameFields> for GameForm {
    fn from(fields: GameFields) -> Self {
        GameForm {
            title: fields.title,
            genre: fields.genre,
            platform: (!fields.platforms.is_empty()).then_some(fields.platforms),
            release_date: fields.release_date,
            developer: fields.developer,
            publisher: fields.publisher,
            rating: fields.rating,
            description: fields.description,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "gamerev_client=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url).context("Failed to build HTTP client")?;

    match cli.command {
        Command::Games(command) => run_games(&client, command).await,
        Command::Ratings(command) => run_ratings(&client, command).await,
    }
}

async fn run_games(client: &ApiClient, command: GamesCommand) -> Result<()> {
    match command {
        GamesCommand::List {
            genre,
            range,
            paging,
        } => {
            let params = GameListParams {
                genre,
                min_rating: range.min_rating,
                max_rating: range.max_rating,
                sort: paging.sort,
                page: paging.page,
                limit: paging.limit,
            };
            let list = client.get_all_games(&params).await.context("Failed to list games")?;
            if list.games.is_empty() {
                println!("No games found");
            }
            for game in &list.games {
                println!("{}", game_line(game));
            }
            println!("{}", pagination_footer(&list.pagination));
        }
        GamesCommand::Show { id } => {
            let game = client.get_game_by_id(&id).await.context("Failed to load game")?;
            let ratings = client
                .get_ratings_by_game(&id)
                .await
                .context("Failed to load ratings")?;
            print!("{}", game_detail(&game, &ratings.ratings));
        }
        GamesCommand::Create { fields } => {
            let game = client
                .create_game(&fields.into())
                .await
                .context("Failed to create game")?;
            println!("Created game {} ({})", game.title, game.id);
        }
        GamesCommand::Edit { id, fields } => {
            let game = client
                .update_game(&id, &fields.into())
                .await
                .context("Failed to update game")?;
            println!("Updated game {} ({})", game.title, game.id);
        }
        GamesCommand::Delete { id } => {
            let message = client.delete_game(&id).await.context("Failed to delete game")?;
            println!("{}", message);
        }
    }
    Ok(())
}

async fn run_ratings(client: &ApiClient, command: RatingsCommand) -> Result<()> {
    match command {
        RatingsCommand::List {
            game,
            has_text,
            range,
            paging,
        } => {
            let params = RatingListParams {
                game_id: game,
                min_rating: range.min_rating,
                max_rating: range.max_rating,
                has_text,
                sort: paging.sort,
                page: paging.page,
                limit: paging.limit,
            };
            let list = client
                .get_all_ratings(&params)
                .await
                .context("Failed to list ratings")?;
            if list.ratings.is_empty() {
                println!("No ratings found");
            }
            for rating in &list.ratings {
                println!("{}", rating_line(rating));
            }
            println!("{}", pagination_footer(&list.pagination));
        }
        RatingsCommand::Add { game, rating, text } => {
            let form = RatingForm {
                game_id: Some(game),
                rating,
                rating_text: text,
            };
            let saved = client.create_rating(&form).await.context("Failed to add rating")?;
            println!("{}", rating_saved(&saved));
        }
        RatingsCommand::Edit { id, rating, text } => {
            let form = RatingForm {
                game_id: None,
                rating,
                rating_text: text,
            };
            let saved = client
                .update_rating(&id, &form)
                .await
                .context("Failed to update rating")?;
            println!("{}", rating_saved(&saved));
        }
        RatingsCommand::Delete { id } => {
            let message = client
                .delete_rating(&id)
                .await
                .context("Failed to delete rating")?;
            println!("{}", message);
        }
    }
    Ok(())
}
