//! CLI entry and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use ladle_core::api::ApiClient;
use ladle_core::auth::SessionStore;
use ladle_core::config::Config;
use ladle_core::recipes::RecipeStore;
use ladle_types::Difficulty;

mod commands;

#[derive(Parser)]
#[command(name = "ladle")]
#[command(version = "0.1")]
#[command(about = "Recipe box CLI client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create an account (logs in on success)
    Signup {
        /// Email address to register
        #[arg(long)]
        email: String,
    },

    /// Log in to the recipe backend
    Login {
        /// Email address of the account
        #[arg(long)]
        email: String,
    },

    /// Log out and clear stored credentials
    Logout,

    /// Show the current session
    Status,

    /// Manage recipes
    Recipes {
        #[command(subcommand)]
        command: RecipeCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum RecipeCommands {
    /// Lists your recipes
    List,
    /// Shows a single recipe with its owner
    Show {
        /// The id of the recipe to show
        #[arg(value_name = "RECIPE_ID")]
        id: String,
    },
    /// Creates a recipe
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// easy, medium, or hard
        #[arg(long, default_value = "easy")]
        difficulty: Difficulty,
    },
    /// Updates a recipe (unset flags keep their current value)
    Update {
        /// The id of the recipe to update
        #[arg(value_name = "RECIPE_ID")]
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// easy, medium, or hard
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },
    /// Deletes a recipe
    Delete {
        /// The id of the recipe to delete
        #[arg(value_name = "RECIPE_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults
    Generate,
}

/// Services shared by every command. Constructed once per invocation.
pub struct App {
    pub session: Arc<SessionStore>,
    pub recipes: RecipeStore,
    pub base_url: String,
}

impl App {
    fn new(config: &Config) -> Self {
        let client = ApiClient::from_config(config);
        let base_url = client.base_url().to_string();
        let session = Arc::new(SessionStore::new(client.clone()));
        let recipes = RecipeStore::new(client, Arc::clone(&session));
        Self {
            session,
            recipes,
            base_url,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

/// Diagnostics go to stderr, filtered by LADLE_LOG (default: warn).
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("LADLE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    // Config commands work without services (and without a backend)
    if let Commands::Config { command } = &cli.command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        };
    }

    let config = Config::load().context("load config")?;
    let app = App::new(&config);

    match cli.command {
        Commands::Signup { email } => commands::auth::signup(&app, &email).await,
        Commands::Login { email } => commands::auth::login(&app, &email).await,
        Commands::Logout => commands::auth::logout(&app),
        Commands::Status => commands::auth::status(&app),
        Commands::Recipes { command } => match command {
            RecipeCommands::List => commands::recipes::list(&app).await,
            RecipeCommands::Show { id } => commands::recipes::show(&app, &id).await,
            RecipeCommands::Create {
                title,
                description,
                difficulty,
            } => commands::recipes::create(&app, title, description, difficulty).await,
            RecipeCommands::Update {
                id,
                title,
                description,
                difficulty,
            } => commands::recipes::update(&app, &id, title, description, difficulty).await,
            RecipeCommands::Delete { id } => commands::recipes::delete(&app, &id).await,
        },
        Commands::Config { .. } => unreachable!("handled above"),
    }
}
