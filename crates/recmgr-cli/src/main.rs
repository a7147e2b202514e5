//! recmgr - movie recommendation service CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path};
use recmgr_api::recsvc::{
    AdvancedSearchParams, Credentials, InteractionType, LocalRecSvcApi, Movie, NewUser,
    RecSvcClient, Recommendations,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Override the service base URL (falls back to config, then the
    /// library default).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Account registration and login.
    Auth(AuthCommand),
    /// Browse and search the movie catalog.
    Movies(MoviesCommand),
    /// Record a like/dislike signal.
    Interact(InteractArgs),
    /// Personalized recommendations.
    Recommend(RecommendCommand),
    /// Genre, actor, and director queries.
    Catalog(CatalogCommand),
    /// User record queries.
    Users(UsersCommand),
    /// Show or edit the stored configuration.
    Config(ConfigCommand),
}

/// Arguments for the `auth` subcommand.
#[derive(clap::Args)]
struct AuthCommand {
    /// Auth subcommand to run.
    #[command(subcommand)]
    command: AuthSubcommands,
}

/// Available auth subcommands.
#[derive(Subcommand)]
enum AuthSubcommands {
    /// Create a new account.
    Register(RegisterArgs),
    /// Authenticate with an existing account.
    Login(LoginArgs),
}

/// Arguments for the `auth register` subcommand.
#[derive(clap::Args)]
struct RegisterArgs {
    /// E-mail address.
    #[arg(long, required = true)]
    email: String,
    /// Password.
    #[arg(long, required = true)]
    password: String,
    /// Display name.
    #[arg(long)]
    name: Option<String>,
}

/// Arguments for the `auth login` subcommand.
#[derive(clap::Args)]
struct LoginArgs {
    /// E-mail address.
    #[arg(long, required = true)]
    email: String,
    /// Password.
    #[arg(long, required = true)]
    password: String,
}

/// Arguments for the `movies` subcommand.
#[derive(clap::Args)]
struct MoviesCommand {
    /// Movies subcommand to run.
    #[command(subcommand)]
    command: MoviesSubcommands,
}

/// Available movies subcommands.
#[derive(Subcommand)]
enum MoviesSubcommands {
    /// List movies from the catalog.
    List(LimitArgs),
    /// Fetch a single movie by ID.
    Get(MovieIdArgs),
    /// Search movies by title substring.
    Search(QueryArgs),
    /// Multi-field filtered search.
    Advanced(AdvancedArgs),
    /// List the most liked movies.
    Top(LimitArgs),
    /// List the most recent movies.
    Latest(LimitArgs),
    /// List movies suited to a season.
    Season(SeasonArgs),
}

/// Limit argument shared by listing subcommands.
#[derive(clap::Args)]
struct LimitArgs {
    /// Maximum number of results (server default when omitted).
    #[arg(long)]
    limit: Option<u32>,
}

/// Movie ID argument.
#[derive(clap::Args)]
struct MovieIdArgs {
    /// Movie ID.
    #[arg(long, required = true)]
    id: String,
}

/// Free-text query argument.
#[derive(clap::Args)]
struct QueryArgs {
    /// Search query (e.g. "the thing").
    #[arg(long, required = true)]
    query: String,
}

/// Arguments for the `movies advanced` subcommand.
#[derive(clap::Args)]
struct AdvancedArgs {
    /// Filter by title substring.
    #[arg(long)]
    title: Option<String>,
    /// Filter by genre name.
    #[arg(long)]
    genre: Option<String>,
    /// Filter by actor name.
    #[arg(long)]
    actor: Option<String>,
    /// Filter by director name.
    #[arg(long)]
    director: Option<String>,
    /// Filter by season name.
    #[arg(long)]
    season: Option<String>,
}

/// Arguments for the `movies season` subcommand.
#[derive(clap::Args)]
struct SeasonArgs {
    /// Season name (substring match, e.g. "winter").
    #[arg(long, required = true)]
    name: String,
}

/// Arguments for the `interact` subcommand.
#[derive(clap::Args)]
struct InteractArgs {
    /// Acting user ID.
    #[arg(long, required = true)]
    user_id: String,
    /// Target movie ID.
    #[arg(long, required = true)]
    movie_id: String,
    /// Signal type: "like" or "dislike".
    kind: String,
    /// Fetch fresh recommendations after recording the signal.
    #[arg(long)]
    refresh: bool,
}

/// Arguments for the `recommend` subcommand.
#[derive(clap::Args)]
struct RecommendCommand {
    /// Recommend subcommand to run.
    #[command(subcommand)]
    command: RecommendSubcommands,
}

/// Available recommend subcommands.
#[derive(Subcommand)]
enum RecommendSubcommands {
    /// List personalized recommendations for a user.
    List(RecommendListArgs),
    /// Explain why a movie was recommended.
    Explain(RecommendExplainArgs),
}

/// Arguments for the `recommend list` subcommand.
#[derive(clap::Args)]
struct RecommendListArgs {
    /// User ID.
    #[arg(long, required = true)]
    user_id: String,
    /// Maximum number of recommendations.
    #[arg(long)]
    limit: Option<u32>,
}

/// Arguments for the `recommend explain` subcommand.
#[derive(clap::Args)]
struct RecommendExplainArgs {
    /// User ID.
    #[arg(long, required = true)]
    user_id: String,
    /// Movie ID.
    #[arg(long, required = true)]
    movie_id: String,
}

/// Arguments for the `catalog` subcommand.
#[derive(clap::Args)]
struct CatalogCommand {
    /// Catalog subcommand to run.
    #[command(subcommand)]
    command: CatalogSubcommands,
}

/// Available catalog subcommands.
#[derive(Subcommand)]
enum CatalogSubcommands {
    /// List all genres.
    Genres,
    /// List all actors.
    Actors,
    /// List all directors.
    Directors,
    /// Search actors by name substring.
    SearchActors(QueryArgs),
    /// List movies linked to a genre.
    GenreMovies(EntityMoviesArgs),
    /// List movies linked to an actor.
    ActorMovies(EntityMoviesArgs),
    /// List movies linked to a director.
    DirectorMovies(EntityMoviesArgs),
}

/// Arguments for per-entity movie listings.
#[derive(clap::Args)]
struct EntityMoviesArgs {
    /// Entity name (genre, actor, or director).
    #[arg(long, required = true)]
    name: String,
    /// Relationship-weight floor (server default when omitted).
    #[arg(long)]
    min_weight: Option<f64>,
}

/// Arguments for the `users` subcommand.
#[derive(clap::Args)]
struct UsersCommand {
    /// Users subcommand to run.
    #[command(subcommand)]
    command: UsersSubcommands,
}

/// Available users subcommands.
#[derive(Subcommand)]
enum UsersSubcommands {
    /// Fetch a user record by ID.
    Get(UserIdArgs),
}

/// User ID argument.
#[derive(clap::Args)]
struct UserIdArgs {
    /// User ID.
    #[arg(long, required = true)]
    id: String,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show the stored configuration.
    Show,
    /// Store a new service base URL.
    Set(ConfigSetArgs),
}

/// Arguments for the `config set` subcommand.
#[derive(clap::Args)]
struct ConfigSetArgs {
    /// Service base URL to store (e.g. "http://localhost:5001/").
    #[arg(long, required = true)]
    base_url: String,
}

/// Builds a `RecSvcClient` from the `--base-url` flag, falling back to the
/// stored config, then to the library default.
///
/// # Errors
///
/// Returns an error if a configured URL is invalid or the client fails to
/// build.
#[instrument(skip_all)]
fn build_client(base_url: Option<&str>, dir: Option<&PathBuf>) -> Result<RecSvcClient> {
    let base_url = match base_url {
        Some(raw) => Some(Url::parse(raw).context("invalid --base-url")?),
        None => {
            let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
            let config = AppConfig::load(&config_path).context("failed to load config")?;
            config
                .server
                .base_url
                .as_deref()
                .map(Url::parse)
                .transpose()
                .context("invalid base_url in config")?
        }
    };

    let mut builder = RecSvcClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(url) = base_url {
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build API client")
}

/// Logs a movie listing as aligned columns.
fn log_movies(movies: &[Movie]) {
    tracing::info!("ID\tTitle\t\t\tYear\tGenres");
    for movie in movies {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            movie.id,
            movie.title,
            movie
                .year
                .map_or_else(|| String::from("-"), |y| y.to_string()),
            movie.genres.join(","),
        );
    }
    tracing::info!("Total: {} movies", movies.len());
}

/// Logs an opaque JSON value line by line.
///
/// # Errors
///
/// Returns an error if the value cannot be rendered.
fn log_json(value: &serde_json::Value) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value).context("failed to render JSON")?;
    for line in pretty.lines() {
        tracing::info!("{line}");
    }
    Ok(())
}

/// Runs the `auth register` subcommand.
///
/// # Errors
///
/// Returns an error if the API client fails to build or the registration
/// is rejected.
#[instrument(skip_all)]
async fn run_auth_register(
    args: RegisterArgs,
    base_url: Option<&str>,
    dir: Option<&PathBuf>,
) -> Result<()> {
    let client = build_client(base_url, dir)?;

    let user = NewUser {
        email: args.email,
        password: args.password,
        name: args.name,
    };
    let response = client.register(&user).await.context("registration failed")?;

    tracing::info!("{}", response.message);
    tracing::info!(
        "email: {}  name: {}",
        response.user.email,
        response.user.name.as_deref().unwrap_or("-"),
    );

    Ok(())
}

/// Runs the `auth login` subcommand.
///
/// # Errors
///
/// Returns an error if the API client fails to build or the credentials
/// are rejected.
#[instrument(skip_all)]
async fn run_auth_login(
    args: LoginArgs,
    base_url: Option<&str>,
    dir: Option<&PathBuf>,
) -> Result<()> {
    let client = build_client(base_url, dir)?;

    let credentials = Credentials {
        email: args.email,
        password: args.password,
    };
    let response = client.login(&credentials).await.context("login failed")?;

    tracing::info!("{}", response.message);
    tracing::info!(
        "email: {}  name: {}",
        response.user.email,
        response.user.name.as_deref().unwrap_or("-"),
    );

    Ok(())
}

/// Runs the `movies` subcommand tree.
///
/// # Errors
///
/// Returns an error if the API client fails to build or a request fails.
#[instrument(skip_all)]
async fn run_movies(
    cmd: MoviesSubcommands,
    base_url: Option<&str>,
    dir: Option<&PathBuf>,
) -> Result<()> {
    let client = build_client(base_url, dir)?;

    match cmd {
        MoviesSubcommands::List(args) => {
            let movies = client
                .all_movies(args.limit)
                .await
                .context("failed to fetch movies")?;
            log_movies(&movies);
        }
        MoviesSubcommands::Get(args) => {
            let movie = client
                .movie(&args.id)
                .await
                .context("failed to fetch movie")?;
            tracing::info!("ID: {}", movie.id);
            tracing::info!("Title: {}", movie.title);
            tracing::info!(
                "Year: {}",
                movie
                    .year
                    .map_or_else(|| String::from("-"), |y| y.to_string())
            );
            tracing::info!("Description: {}", movie.description.as_deref().unwrap_or("-"));
            tracing::info!("Genres: {}", movie.genres.join(", "));
            tracing::info!("Actors: {}", movie.actors.join(", "));
            tracing::info!("Directors: {}", movie.directors.join(", "));
            tracing::info!("Seasons: {}", movie.seasons.join(", "));
        }
        MoviesSubcommands::Search(args) => {
            let movies = client
                .search_movies(&args.query)
                .await
                .context("movie search failed")?;
            log_movies(&movies);
        }
        MoviesSubcommands::Advanced(args) => {
            let params = advanced_params(args)?;
            let movies = client
                .advanced_search(&params)
                .await
                .context("advanced search failed")?;
            log_movies(&movies);
        }
        MoviesSubcommands::Top(args) => {
            let movies = client
                .top_movies(args.limit)
                .await
                .context("failed to fetch top movies")?;
            log_movies(&movies);
        }
        MoviesSubcommands::Latest(args) => {
            let movies = client
                .latest_movies(args.limit)
                .await
                .context("failed to fetch latest movies")?;
            log_movies(&movies);
        }
        MoviesSubcommands::Season(args) => {
            let movies = client
                .movies_by_season(&args.name)
                .await
                .context("failed to fetch movies by season")?;
            log_movies(&movies);
        }
    }

    Ok(())
}

/// Converts `movies advanced` flags into filter params.
///
/// Mirrors the form validation the service expects: at least one filter
/// must survive blank trimming, otherwise the backend rejects the query.
///
/// # Errors
///
/// Returns an error when every filter is absent or blank.
fn advanced_params(args: AdvancedArgs) -> Result<AdvancedSearchParams> {
    let mut params = AdvancedSearchParams::new();
    if let Some(title) = args.title {
        params = params.title(title);
    }
    if let Some(genre) = args.genre {
        params = params.genre(genre);
    }
    if let Some(actor) = args.actor {
        params = params.actor(actor);
    }
    if let Some(director) = args.director {
        params = params.director(director);
    }
    if let Some(season) = args.season {
        params = params.season(season);
    }

    if params.is_empty() {
        bail!("at least one search filter must be specified");
    }
    Ok(params)
}

/// Runs the `interact` subcommand.
///
/// # Errors
///
/// Returns an error if the signal kind is unknown, the API client fails
/// to build, or a request fails.
#[instrument(skip_all)]
async fn run_interact(
    args: InteractArgs,
    base_url: Option<&str>,
    dir: Option<&PathBuf>,
) -> Result<()> {
    let kind: InteractionType = args.kind.parse().map_err(anyhow::Error::msg)?;

    let client = build_client(base_url, dir)?;

    let ack = client
        .add_interaction(&args.user_id, &args.movie_id, kind)
        .await
        .context("failed to record interaction")?;
    tracing::info!(
        "{} ({} on {})",
        ack.message.as_deref().unwrap_or("recorded"),
        kind,
        args.movie_id,
    );

    if args.refresh {
        let recs = client
            .recommendations(&args.user_id, None)
            .await
            .context("failed to fetch recommendations")?;
        log_recommendations(&recs);
    }

    Ok(())
}

/// Logs a recommendations response.
fn log_recommendations(recs: &Recommendations) {
    if let Some(message) = recs.message.as_deref() {
        tracing::info!("{message}");
    }
    tracing::info!("Score\tID\tTitle");
    for movie in &recs.recommendations {
        tracing::info!(
            "{}\t{}\t{}",
            movie
                .score
                .map_or_else(|| String::from("-"), |s| format!("{s:.4}")),
            movie.id,
            movie.title,
        );
    }
    tracing::info!("Total: {} recommendations", recs.recommendations.len());
}

/// Runs the `recommend` subcommand tree.
///
/// # Errors
///
/// Returns an error if the API client fails to build or a request fails.
#[instrument(skip_all)]
async fn run_recommend(
    cmd: RecommendSubcommands,
    base_url: Option<&str>,
    dir: Option<&PathBuf>,
) -> Result<()> {
    let client = build_client(base_url, dir)?;

    match cmd {
        RecommendSubcommands::List(args) => {
            let recs = client
                .recommendations(&args.user_id, args.limit)
                .await
                .context("failed to fetch recommendations")?;
            log_recommendations(&recs);
        }
        RecommendSubcommands::Explain(args) => {
            let explanation = client
                .explain_recommendation(&args.user_id, &args.movie_id)
                .await
                .context("failed to fetch explanation")?;
            log_json(&explanation)?;
        }
    }

    Ok(())
}

/// Runs the `catalog` subcommand tree.
///
/// # Errors
///
/// Returns an error if the API client fails to build or a request fails.
#[instrument(skip_all)]
async fn run_catalog(
    cmd: CatalogSubcommands,
    base_url: Option<&str>,
    dir: Option<&PathBuf>,
) -> Result<()> {
    let client = build_client(base_url, dir)?;

    match cmd {
        CatalogSubcommands::Genres => {
            let genres = client.all_genres().await.context("failed to fetch genres")?;
            log_json(&serde_json::Value::Array(genres))?;
        }
        CatalogSubcommands::Actors => {
            let actors = client.all_actors().await.context("failed to fetch actors")?;
            log_json(&serde_json::Value::Array(actors))?;
        }
        CatalogSubcommands::Directors => {
            let directors = client
                .all_directors()
                .await
                .context("failed to fetch directors")?;
            log_json(&serde_json::Value::Array(directors))?;
        }
        CatalogSubcommands::SearchActors(args) => {
            let actors = client
                .search_actors(&args.query)
                .await
                .context("actor search failed")?;
            log_json(&serde_json::Value::Array(actors))?;
        }
        CatalogSubcommands::GenreMovies(args) => {
            let movies = client
                .movies_by_genre(&args.name, args.min_weight)
                .await
                .context("failed to fetch movies by genre")?;
            log_movies(&movies);
        }
        CatalogSubcommands::ActorMovies(args) => {
            let movies = client
                .movies_by_actor(&args.name, args.min_weight)
                .await
                .context("failed to fetch movies by actor")?;
            log_movies(&movies);
        }
        CatalogSubcommands::DirectorMovies(args) => {
            let movies = client
                .movies_by_director(&args.name, args.min_weight)
                .await
                .context("failed to fetch movies by director")?;
            log_movies(&movies);
        }
    }

    Ok(())
}

/// Runs the `users` subcommand tree.
///
/// # Errors
///
/// Returns an error if the API client fails to build or a request fails.
#[instrument(skip_all)]
async fn run_users(
    cmd: UsersSubcommands,
    base_url: Option<&str>,
    dir: Option<&PathBuf>,
) -> Result<()> {
    let client = build_client(base_url, dir)?;

    match cmd {
        UsersSubcommands::Get(args) => {
            let user = client.user(&args.id).await.context("failed to fetch user")?;
            log_json(&user)?;
        }
    }

    Ok(())
}

/// Runs the `config` subcommand tree.
///
/// # Errors
///
/// Returns an error if config resolution, parsing, or writing fails.
#[instrument(skip_all)]
fn run_config(cmd: ConfigSubcommands, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;

    match cmd {
        ConfigSubcommands::Show => {
            let config = AppConfig::load(&config_path).context("failed to load config")?;
            tracing::info!("config: {}", config_path.display());
            tracing::info!(
                "base_url: {}",
                config
                    .server
                    .base_url
                    .as_deref()
                    .unwrap_or("(default) http://localhost:5000/"),
            );
        }
        ConfigSubcommands::Set(args) => {
            Url::parse(&args.base_url).context("invalid --base-url")?;
            let mut config = AppConfig::load(&config_path).context("failed to load config")?;
            config.server.base_url = Some(args.base_url);
            config.save(&config_path).context("failed to save config")?;
            tracing::info!("Saved base_url to {}", config_path.display());
        }
    }

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let base_url = cli.base_url.as_deref();
    let dir = cli.dir.as_ref();

    match cli.command {
        Commands::Auth(auth) => match auth.command {
            AuthSubcommands::Register(args) => run_auth_register(args, base_url, dir).await,
            AuthSubcommands::Login(args) => run_auth_login(args, base_url, dir).await,
        },
        Commands::Movies(movies) => run_movies(movies.command, base_url, dir).await,
        Commands::Interact(args) => run_interact(args, base_url, dir).await,
        Commands::Recommend(rec) => run_recommend(rec.command, base_url, dir).await,
        Commands::Catalog(catalog) => run_catalog(catalog.command, base_url, dir).await,
        Commands::Users(users) => run_users(users.command, base_url, dir).await,
        Commands::Config(cfg) => run_config(cfg.command, dir),
    }
}
