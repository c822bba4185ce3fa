use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gramgate")]
#[command(author, version, about = "HTTP gateway for Instagram post and profile metadata", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides WEB_PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Fetch one target and print the envelope to stdout
    Fetch {
        /// Post URL, bare shortcode, or @username
        target: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
