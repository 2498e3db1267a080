//! cli subcommands for classhub.
//!
//! - `classhub serve` - Run the api server
//! - `classhub users create` - Create a staff or student account
//! - `classhub users list` - List accounts

mod serve;
mod users;

pub use serve::ServeCommand;
pub use users::UsersCommand;

use clap::{Parser, Subcommand};

/// classhub - school management backend
#[derive(Parser, Debug)]
#[command(name = "classhub")]
#[command(about = "School management backend", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// run the api server
    Serve(ServeCommand),

    /// manage user accounts
    #[command(subcommand)]
    Users(UsersCommand),
}
