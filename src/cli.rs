//! Command line flag surface.
//!
//! Every override flag is an `Option` so the resolver can tell "explicitly
//! passed" apart from "defaulted": a flag that was not given on the command
//! line must never override a value set by the config file.

use std::path::PathBuf;

use clap::Parser;

/// Command line flags.
#[derive(Parser, Debug)]
#[command(name = "hapttic")]
#[command(version, about = "Connects HTTP requests to shell scripts", long_about = None)]
pub struct Cli {
    /// The yaml config file with settings, e.g. config.yml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// The script that is called to handle requests [default: ./hapttic_request_handler.sh]
    #[arg(long)]
    pub script: Option<String>,

    /// A shell command used instead of a script file
    #[arg(long)]
    pub command: Option<String>,

    /// The host to bind to, e.g. 0.0.0.0 or localhost [default: 0.0.0.0]
    #[arg(long)]
    pub bind: Option<String>,

    /// The port to listen on, e.g. 8080 [default: 8080]
    #[arg(long)]
    pub port: Option<u16>,

    /// Echo script failure output to clients and the log
    #[arg(long)]
    pub error: bool,
}
