use crate::{pin_commands::PinCommands, session_commands::SessionCommands};

use clap::Subcommand;

#[derive(Subcommand, Debug, PartialEq)]
pub(crate) enum Commands {
    /// Run the startup flow: restore or create the session
    Start {
        /// Also fetch the configured resource once the session is ready
        #[arg(long)]
        fetch: bool,

        /// Resource to fetch instead of the configured one (implies --fetch)
        #[arg(long)]
        url: Option<String>,
    },

    /// Session operations
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },

    /// Map pin operations, scoped to the current user
    Pins {
        #[command(subcommand)]
        action: PinCommands,
    },

    /// Fetch a resource in the background and print the delivered result
    Fetch {
        /// Resource to fetch instead of the configured one
        #[arg(long)]
        url: Option<String>,
    },
}
