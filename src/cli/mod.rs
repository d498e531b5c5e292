//! Command-line interface for the meal-plan server.

use clap::{Parser, Subcommand};

/// Meal-plan API server
#[derive(Parser)]
#[command(name = "mealplan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve,

    /// Write a default config.toml into the working directory
    Init,

    /// Create a superuser account unless the email is already registered
    CreateSuperuser {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["mealplan"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_create_superuser_args() {
        let cli = Cli::try_parse_from([
            "mealplan",
            "create-superuser",
            "--email",
            "root@example.com",
            "--password",
            "pw",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::CreateSuperuser { email, password }) => {
                assert_eq!(email, "root@example.com");
                assert_eq!(password, "pw");
            }
            _ => panic!("expected create-superuser"),
        }
    }

    #[test]
    fn test_create_superuser_requires_email() {
        assert!(Cli::try_parse_from(["mealplan", "create-superuser", "--password", "pw"]).is_err());
    }
}
