use carnet::graphql;
use carnet::seed;
use carnet::settings::Settings;
use carnet::token::TokenService;
use carnet::web;
use clap::{Parser, Subcommand};
use miette::Result;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "carnet",
    version,
    about = "GraphQL API over users, posts and projets"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the GraphQL server (default)
    Serve,
    /// Print a bearer token for a seeded user
    Token {
        /// Id of the user the token is for
        user_id: String,
    },
    /// Print the GraphQL schema in SDL form
    Schema,
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env_filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    // load settings
    let settings = Settings::load(&cli.config)?;
    tracing::debug!(?settings, "Loaded configuration");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let store = seed::initial_store(settings.store.seed_path.as_deref())?;
            let tokens = TokenService::from_settings(&settings.auth)?;
            let schema = graphql::build_schema(store.into_shared(), tokens, settings.auth.issuance);
            web::serve(settings, schema).await?;
        }
        Command::Token { user_id } => {
            if settings.auth.secret.is_none() {
                return Err(miette::miette!(
                    help = "Set auth.secret in the config file or CARNET__AUTH__SECRET",
                    "A token minted without a configured secret would not be accepted by the server"
                ));
            }
            let store = seed::initial_store(settings.store.seed_path.as_deref())?;
            let tokens = TokenService::from_settings(&settings.auth)?;
            let token = tokens.issue(&store, &user_id)?;
            println!("{token}");
        }
        Command::Schema => {
            let schema = graphql::build_schema(
                seed::fixtures().into_shared(),
                TokenService::ephemeral(None),
                settings.auth.issuance,
            );
            println!("{}", schema.sdl());
        }
    }
    Ok(())
}
