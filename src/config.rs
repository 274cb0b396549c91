use crate::error::ConfigError;
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use std::env;
use std::fs;
use std::time::Duration;
use url::Url;

const SECRET_ENV: &str = "APP_JWT_SECRET_KEY";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub serve: ServeArgs,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check the local /health endpoint (container healthcheck)
    Healthcheck {
        #[arg(long, env = "APP_PORT", default_value_t = crate::healthcheck::DEFAULT_HTTP_PORT)]
        port: u16,
    },
    /// Print an HS256 bearer token for the log shipper
    CreateToken(CreateTokenArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CreateTokenArgs {
    /// Subject claim identifying the shipper
    #[arg(long, default_value = "fluentd")]
    pub sub: String,

    /// Expiration as a unix timestamp
    #[arg(long, default_value_t = crate::auth::DEFAULT_EXPIRES_AT)]
    pub exp: i64,

    /// Signing secret; prompted for when absent
    #[arg(long, env = "APP_JWT_SECRET_KEY", hide_env_values = true)]
    pub jwt_secret_key: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "APP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "APP_PORT", default_value_t = 8000)]
    pub port: u16,

    /// IANA timezone the Minecraft server writes its log timestamps in
    #[arg(long, env = "APP_MINECRAFT_SERVER_TIMEZONE")]
    pub minecraft_server_timezone: Option<String>,

    /// IANA timezone used in notifications
    #[arg(long, env = "APP_NOTIFICATION_TIMEZONE")]
    pub notification_timezone: Option<String>,

    /// HS256 secret for bearer tokens (APP_JWT_SECRET_KEY_FILE is also read)
    #[arg(long, env = "APP_JWT_SECRET_KEY", hide_env_values = true)]
    pub jwt_secret_key: Option<String>,

    /// Discord webhook receiving the notifications
    #[arg(long, env = "APP_DISCORD_WEBHOOK_URL", hide_env_values = true)]
    pub discord_webhook_url: Option<String>,

    /// Upper bound for one webhook call, in seconds
    #[arg(long, env = "APP_DELIVERY_TIMEOUT_SECS", default_value_t = 5)]
    pub delivery_timeout_secs: u64,
}

/// Validated process-wide settings. Built once at startup, never mutated.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub minecraft_server_timezone: Tz,
    pub notification_timezone: Tz,
    pub jwt_secret_key: String,
    pub discord_webhook_url: Url,
    pub delivery_timeout: Duration,
}

impl Settings {
    pub fn from_args(args: &ServeArgs) -> Result<Self, ConfigError> {
        if args.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if args.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if args.delivery_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        let minecraft_server_timezone = parse_timezone(
            "minecraft_server_timezone",
            required(
                &args.minecraft_server_timezone,
                "--minecraft-server-timezone",
                "APP_MINECRAFT_SERVER_TIMEZONE",
            )?,
        )?;
        let notification_timezone = parse_timezone(
            "notification_timezone",
            required(
                &args.notification_timezone,
                "--notification-timezone",
                "APP_NOTIFICATION_TIMEZONE",
            )?,
        )?;

        let jwt_secret_key = match &args.jwt_secret_key {
            Some(secret) => secret.clone(),
            None => secret_from_file(SECRET_ENV)?.ok_or(ConfigError::Missing {
                flag: "--jwt-secret-key",
                env: SECRET_ENV,
            })?,
        };
        if jwt_secret_key.is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        let discord_webhook_url = parse_webhook_url(required(
            &args.discord_webhook_url,
            "--discord-webhook-url",
            "APP_DISCORD_WEBHOOK_URL",
        )?)?;

        Ok(Self {
            host: args.host.clone(),
            port: args.port,
            minecraft_server_timezone,
            notification_timezone,
            jwt_secret_key,
            discord_webhook_url,
            delivery_timeout: Duration::from_secs(args.delivery_timeout_secs),
        })
    }
}

fn required<'a>(
    value: &'a Option<String>,
    flag: &'static str,
    env: &'static str,
) -> Result<&'a str, ConfigError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing { flag, env })
}

fn parse_timezone(setting: &'static str, value: &str) -> Result<Tz, ConfigError> {
    value
        .parse::<Tz>()
        .map_err(|_| ConfigError::InvalidTimezone {
            setting,
            value: value.to_string(),
        })
}

fn parse_webhook_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            value: value.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

/// Read `<env_name>_FILE` if set (Docker Secrets).
fn secret_from_file(env_name: &str) -> Result<Option<String>, ConfigError> {
    let file_env = format!("{env_name}_FILE");
    match env::var(&file_env) {
        Ok(path) => fs::read_to_string(&path)
            .map(|content| Some(content.trim().to_string()))
            .map_err(|source| ConfigError::SecretFile {
                env: file_env,
                source,
            }),
        Err(_) => Ok(None),
    }
}
