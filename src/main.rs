use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod api;
mod cli;
mod config;
mod filter;
mod prelude;
mod services;
mod session;
mod ui;
mod validation;
mod views;
mod web;

#[cfg(test)]
mod testing;

use crate::prelude::*;
use crate::services::ServicesContainer;

/// Admin dashboard for the media platform's backend.
#[derive(Parser, Debug)]
#[command(name = "media-admin", version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, short, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web dashboard
    Serve,

    /// Print the records of a section
    List {
        section: String,

        #[arg(long, short)]
        search: Option<String>,

        /// Role tab for the users section (users, moderators, admins)
        #[arg(long)]
        tab: Option<String>,
    },

    /// Delete a record from a section
    Delete {
        section: String,
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Show the principal decoded from the configured token
    Whoami,
}

#[actix_web::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = match Config::load_or_default(&args.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut telemetry =
        tracing_batteries::Session::new("media-admin", env!("CARGO_PKG_VERSION"));
    if let Some(endpoint) = config.telemetry.otlp_endpoint.as_deref() {
        telemetry = telemetry.with_battery(tracing_batteries::OpenTelemetry::new(endpoint));
    }

    let result = run(args.command, config).await;
    if let Err(err) = &result {
        error!(error = %err, "media-admin exited with an error.");
        eprintln!("{err}");
    }

    telemetry.shutdown();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

async fn run(command: Command, config: Config) -> Result<(), human_errors::Error> {
    let session = config
        .session
        .token
        .clone()
        .map(Session::from_token)
        .unwrap_or_else(Session::anonymous);

    if let Command::Whoami = command {
        println!("{}", cli::whoami(&session));
        return Ok(());
    }

    let services = ServicesContainer::new(config)?;

    match command {
        Command::Serve => web::run_web_server(services).await,
        Command::List {
            section,
            search,
            tab,
        } => {
            let section = cli::parse_section(&section)?;
            let output = cli::list(
                &services.api(),
                &session,
                section,
                search.as_deref().unwrap_or_default(),
                tab.as_deref(),
            )
            .await?;
            println!("{output}");
            Ok(())
        }
        Command::Delete { section, id, yes } => {
            let section = cli::parse_section(&section)?;
            cli::delete(&services.api(), &session, section, &id, yes).await?;
            println!("Deleted '{id}' from {}.", section.slug());
            Ok(())
        }
        Command::Whoami => Ok(()),
    }
}
