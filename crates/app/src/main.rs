//! Storefront - Main Entry Point
//!
//! Loads the configuration, wires the services and runs one command
//! against the search cluster and the ERP.

mod app;
mod cli;

use clap::Parser;
use serde_json::Value;
use storefront_domain::{IndexSet, Locale, NavigationOutcome, NavigationTarget};
use storefront_infrastructure::StorefrontConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::Storefront;
use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = StorefrontConfig::load(cli.config.as_deref())?;
    let mut storefront = Storefront::build(&config)?;

    if let Some(code) = cli.locale {
        storefront.locale.set_locale(Locale::new(code)?)?;
    }

    if let Some(erp) = storefront.erp.as_mut()
        && let Err(err) = erp.auth.restore_session().await
    {
        tracing::warn!(error = %err, "continuing without the saved session");
    }

    run(&mut storefront, cli.command).await?;

    if let Some(erp) = storefront.erp.as_mut() {
        erp.refresh_settings().await;
    }
    Ok(())
}

async fn run(
    storefront: &mut Storefront,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Search { query, indexes } => {
            if !indexes.is_empty() {
                storefront.search.change_indexes(IndexSet::new(indexes)?)?;
            }
            let query = query.map(|q| serde_json::from_str::<Value>(&q)).transpose()?;
            let response = storefront.search.search(query).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Navigate { path, protected } => {
            let target = if protected {
                NavigationTarget::protected(path)
            } else {
                NavigationTarget::public(path)
            };
            match storefront.navigator.navigate(&target).await? {
                NavigationOutcome::Matched(matches) => {
                    for route in matches {
                        println!("{} -> {:?}", route.path, route.view);
                    }
                }
                NavigationOutcome::Redirect(to) => println!("redirect {to}"),
                NavigationOutcome::NotFound => println!("not found: {}", target.path),
            }
        }
        Command::Register {
            name,
            login,
            password,
        } => {
            let erp = storefront.require_erp()?;
            let outcome = erp.auth.register_user(&name, &password, &login).await?;
            println!("registered: {}", outcome.success);
        }
        Command::Login { login, password } => {
            let erp = storefront.require_erp()?;
            let outcome = erp.auth.login(&login, &password).await?;
            println!("signed in: {}", outcome.success);
        }
        Command::Logout => {
            storefront.require_erp()?.auth.logout().await?;
            println!("signed out");
        }
        Command::Whoami => match storefront.auth.current_user() {
            Some(user) => println!("{}", serde_json::to_string_pretty(user.raw())?),
            None => println!("anonymous"),
        },
    }
    Ok(())
}
