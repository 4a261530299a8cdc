use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cardflow")]
#[command(author, version, about = "Telegram bot serving payment requisites to an affiliate team", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot with long polling (default)
    Run,

    /// Apply database migrations and seed defaults, then exit
    Migrate,

    /// Replace the admin panel password stored in the database
    SetAdminPassword {
        /// New password
        password: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["cardflow"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_set_admin_password_takes_value() {
        let cli = Cli::try_parse_from(["cardflow", "set-admin-password", "s3cret"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::SetAdminPassword {
                password: "s3cret".to_string()
            })
        );
    }
}
