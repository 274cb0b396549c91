mod router;
pub mod server;
mod state;
pub mod tracing;

pub use router::router;
pub use state::AppState;

use crate::auth::issue_token;
use crate::config::{Cli, Command, CreateTokenArgs, Settings};
use crate::error::HookError;
use clap::Parser;

/// Application entry point. Dispatches subcommands or starts the server.
pub async fn run() -> Result<(), HookError> {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Healthcheck { port }) => Ok(crate::healthcheck::check_health(port).await?),
        Some(Command::CreateToken(args)) => create_token(args),
        None => {
            tracing::init_tracing();

            let settings = Settings::from_args(&cli.serve)?;
            ::tracing::info!(
                minecraft_server_timezone = %settings.minecraft_server_timezone,
                notification_timezone = %settings.notification_timezone,
                "Loaded settings"
            );

            let state = AppState::from_settings(&settings)?;
            server::serve(router(state), &settings.host, settings.port).await
        }
    }
}

fn create_token(args: CreateTokenArgs) -> Result<(), HookError> {
    let secret = match args.jwt_secret_key {
        Some(secret) => secret,
        None => rpassword::prompt_password("HS256 secret key: ")?,
    };
    let issued_at = chrono::Utc::now().timestamp();

    println!("{}", issue_token(&args.sub, &secret, issued_at, args.exp)?);
    Ok(())
}
