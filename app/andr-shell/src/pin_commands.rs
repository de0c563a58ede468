use clap::Subcommand;

#[derive(Subcommand, Debug, PartialEq)]
pub enum PinCommands {
    /// Save a pin for the current user
    Add {
        /// Pin name
        #[arg(long)]
        name: String,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Replace the pin stored under this id
        #[arg(long)]
        id: Option<u64>,
    },
    /// List the current user's pins
    List,
}
