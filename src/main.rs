use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use jwt_token::observability::init_tracing;
use jwt_token::{Config, JwtTokenService, TokenCreator, TokenParser};
use tracing::info;

/// Issue and verify HS256 tokens using the secret in the environment.
#[derive(Parser)]
#[command(name = "jwt-token", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign a JSON object of claims and print the token
    Create {
        /// Claims as a JSON object, e.g. '{"sub":"user-123"}'
        #[arg(default_value = "{}")]
        claims: String,
    },
    /// Verify a token and print the verification result
    Parse {
        /// Compact token string
        token: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(&config.tracing).context("failed to initialize tracing")?;

    let mut service = JwtTokenService::new(&config);
    service.resolve_secret()?;

    match cli.command {
        Command::Create { claims } => {
            let value: serde_json::Value =
                serde_json::from_str(&claims).context("claims must be valid JSON")?;
            let serde_json::Value::Object(claims) = value else {
                bail!("claims must be a JSON object");
            };
            let token = service.create_token(claims)?;
            info!("token issued");
            println!("{token}");
        }
        Command::Parse { token } => {
            let verified = service.parse_token(&token)?;
            info!(alg = ?verified.algorithm, "token valid");
            println!("{}", serde_json::to_string_pretty(&verified)?);
        }
    }

    Ok(())
}
