use clap::{Parser, Subcommand};

use crate::auth::{Identity, TokenIssuer};
use crate::config::AppConfig;
use crate::database::DatabaseManager;

#[derive(Parser)]
#[command(name = "music-catalog-api")]
#[command(about = "REST API for a music catalog of songs, albums, artists and labels")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on, overriding API_PORT")]
        port: Option<u16>,
    },

    #[command(about = "Apply database migrations and exit")]
    Migrate,

    #[command(about = "Print a signed bearer token for a user id")]
    Token {
        #[arg(help = "User id to place in the token subject")]
        id: String,
    },
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => crate::server::serve(config, port).await,
        Commands::Migrate => {
            let pool = DatabaseManager::connect(config.database_url()?, &config.database).await?;
            DatabaseManager::migrate(&pool).await?;
            DatabaseManager::close(pool).await;
            Ok(())
        }
        Commands::Token { id } => {
            let issuer = TokenIssuer::from_config(&config.security)?;
            println!("{}", issuer.generate(&Identity::new(id))?);
            Ok(())
        }
    }
}
