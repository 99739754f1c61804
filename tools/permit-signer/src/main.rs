use std::process::ExitCode;

use anyhow::Result;
use clap::{error::ErrorKind, Parser};
use tracing::error;
use tracing_subscriber::EnvFilter;

use permit_signer::{
    config::{Cli, PermitArgs},
    output::PermitReport,
    token::RpcTokenReader,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Lets RPC_URL / PRIVATE_KEY come from a local .env file.
    dotenv::dotenv().ok();
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "permit signing failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let args = PermitArgs::resolve(cli)?;
    let reader = RpcTokenReader::connect(&args.rpc_url, args.token)?;
    let signed = permit_signer::sign(&args, &reader).await?;

    let report = PermitReport::from(&signed);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

/// Logs go to stderr so stdout only carries the result. `RUST_LOG` overrides the default.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("permit_signer=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
