//! Command dispatch: bridges CLI args -> storefront calls -> output formatting.

pub mod bonus;
pub mod cart;
pub mod config_cmd;
pub mod dates;
pub mod offers;
pub mod util;

use getaway_core::Storefront;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a storefront-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    storefront: &Storefront,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Offers(args) => offers::handle(storefront, args, global).await,
        Command::Cart(args) => cart::handle(storefront, args, global).await,
        Command::Bonus(args) => bonus::handle(storefront, args, global).await,
        // Handled before a storefront is built
        Command::Dates(_) | Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
