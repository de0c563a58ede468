use clap::Subcommand;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SessionCommands {
    /// Show the current identity
    Show,
    /// Forget the current identity
    Clear,
    /// Replace the current identity
    Save {
        /// Stable user identifier
        #[arg(long)]
        id: String,
        /// Display name
        #[arg(long)]
        name: String,
    },
}
