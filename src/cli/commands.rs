use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "todo", about = concat!("todo v", env!("CARGO_PKG_VERSION"), " - a small list that remembers"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Keep todos and preferences in this directory
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a todo to the end of the list
    Add(AddArgs),
    /// List todos
    List(ListArgs),
    /// Flip a todo between active and completed
    Toggle(IdArgs),
    /// Replace a todo's text
    Edit(EditArgs),
    /// Delete a todo
    Delete(IdArgs),
    /// Remove every completed todo
    Clear,
    /// Count active todos
    Count,
    /// Show or change the color theme
    Theme(ThemeArgs),
    /// Show or change the interface language
    Lang(LangArgs),
    /// View or prune the recovery log
    Recovery(RecoveryArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Todo text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Which todos to show (all, active, completed)
    #[arg(long, short = 'f')]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Todo ID
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Todo ID
    pub id: String,
    /// New text
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// dark, light, toggle, or system (forget the saved choice)
    pub value: Option<String>,
}

#[derive(Args)]
pub struct LangArgs {
    /// en, ar, or toggle
    pub value: Option<String>,
}

#[derive(Args)]
pub struct RecoveryArgs {
    /// Number of entries to show (most recent first)
    #[arg(long)]
    pub limit: Option<usize>,
    /// Remove entries older than 30 days
    #[arg(long)]
    pub prune: bool,
    /// With --prune, remove every entry
    #[arg(long, requires = "prune")]
    pub all: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_joins_words() {
        let cli = Cli::try_parse_from(["todo", "add", "Buy", "milk"]).unwrap();
        match cli.command {
            Some(Commands::Add(args)) => assert_eq!(args.text.join(" "), "Buy milk"),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["todo", "list", "--json", "-d", "/tmp/x", "-f", "active"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/x"));
        match cli.command {
            Some(Commands::List(args)) => assert_eq!(args.filter.as_deref(), Some("active")),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn recovery_all_requires_prune() {
        assert!(Cli::try_parse_from(["todo", "recovery", "--all"]).is_err());
        assert!(Cli::try_parse_from(["todo", "recovery", "--prune", "--all"]).is_ok());
    }
}
