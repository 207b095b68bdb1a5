#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use clap::Parser;

use crate::app_config::AppConfig;
use crate::args::{CliArgs, Command};
use crate::profile::{get_profile_path, Profile};

mod app_config;
mod args;
mod commands;
mod formatters;
mod profile;
mod service;

#[cfg(test)]
mod test;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let profile_path = get_profile_path(&args.config.profile_path);

    if let Some(command) = args.command {
        let profile = Profile::from_path(&profile_path)?;
        let config = AppConfig::from_args(&args.config, &profile_path, profile.as_ref());

        match command {
            Command::Config => commands::config::config_cmd(&config)?,
            Command::Init => commands::init::init_cmd(&config, &profile_path)?,
            Command::Account(subcommand) => commands::account::account_cmd(&config, subcommand).await?,
            Command::Company(subcommand) => commands::company::company_cmd(&config, subcommand).await?,
            Command::Establishment(subcommand) => {
                commands::establishment::establishment_cmd(&config, subcommand).await?
            }
            Command::Product(subcommand) => commands::product::product_cmd(&config, subcommand).await?,
            Command::Supplier(subcommand) => commands::supplier::supplier_cmd(&config, subcommand).await?,
            Command::Purchase(subcommand) => commands::purchase::purchase_cmd(&config, subcommand).await?,
        }
    }

    Ok(())
}
