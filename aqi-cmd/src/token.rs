use crate::Options;
use aqi_utils::tokens::{mask, AQI_TOKEN_KEY};
use clap::Subcommand;
use log::info;

#[derive(Subcommand, Debug)]
pub enum TokenAction {
    /// Save the AQI provider token
    Set {
        /// Token value
        value: String,
    },
    /// Show the stored token (masked)
    Show,
    /// Remove the stored token
    Clear,
}

pub fn run_token(action: TokenAction, options: &Options) -> anyhow::Result<()> {
    let mut store = options.load_store()?;
    match action {
        TokenAction::Set { value } => {
            if value.trim().is_empty() {
                anyhow::bail!("Token must not be empty");
            }
            store.set(AQI_TOKEN_KEY, value.trim());
            store.save()?;
            info!("Saved token to {}", store.path().display());
            println!("Token saved.");
        }
        TokenAction::Show => match store.get(AQI_TOKEN_KEY) {
            Some(token) => println!("{}", mask(token)),
            None => println!("No token stored in {}.", store.path().display()),
        },
        TokenAction::Clear => {
            if store.remove(AQI_TOKEN_KEY).is_some() {
                store.save()?;
                println!("Token removed.");
            } else {
                println!("No token stored.");
            }
        }
    }
    Ok(())
}
