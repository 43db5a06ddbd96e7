use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `mangactl` binary.
#[derive(Debug, Parser)]
#[command(name = "mangactl", version, about = "SiteManga - manga catalog, reader, and admin client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (only errors on stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{AdminCommands, AdminMangaCommands, AuthCommands, UserCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_and_after_subcommand() {
        let cli = Cli::try_parse_from(["mangactl", "--format", "table", "--verbose", "latest"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Latest));

        let cli = Cli::try_parse_from(["mangactl", "latest", "--format", "raw", "--quiet"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["mangactl", "--format", "xml", "latest"]).is_err());
    }

    #[test]
    fn catalog_flags() {
        let cli = Cli::try_parse_from([
            "mangactl", "catalog", "--search", "berserk", "--status", "Finalizado", "--sort",
            "title", "--page", "2",
        ])
        .expect("cli should parse");
        let Commands::Catalog(args) = cli.command else {
            panic!("expected catalog");
        };
        assert_eq!(args.search.as_deref(), Some("berserk"));
        assert_eq!(args.status.as_deref(), Some("Finalizado"));
        assert_eq!(args.sort.as_str(), "title");
        assert_eq!(args.page, 2);
    }

    #[test]
    fn login_requires_credentials() {
        assert!(Cli::try_parse_from(["mangactl", "auth", "login", "--username", "ana"]).is_err());
        let cli = Cli::try_parse_from([
            "mangactl", "auth", "login", "--username", "ana", "--password", "segredo",
        ])
        .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Login(_)
            }
        ));
    }

    #[test]
    fn admin_create_collects_chapters() {
        let cli = Cli::try_parse_from([
            "mangactl",
            "admin",
            "mangas",
            "create",
            "--title",
            "Akira",
            "--description",
            "Neo-Tóquio",
            "--cover",
            "capa.png",
            "--chapter",
            "c1/0.png,c1/1.png",
            "--chapter",
            "c2/0.png",
            "--latest",
        ])
        .expect("cli should parse");
        let Commands::Admin {
            action: AdminCommands::Mangas {
                action: AdminMangaCommands::Create(args),
            },
        } = cli.command
        else {
            panic!("expected admin mangas create");
        };
        assert_eq!(args.manga.chapters.len(), 2);
        assert!(args.manga.latest);
        assert_eq!(args.manga.status, "Em andamento");
    }

    #[test]
    fn admin_user_role_parses_role() {
        let cli = Cli::try_parse_from(["mangactl", "admin", "users", "role", "7", "admin"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Admin {
                action: AdminCommands::Users {
                    action: UserCommands::Role { id: 7, .. }
                }
            }
        ));
        assert!(Cli::try_parse_from(["mangactl", "admin", "users", "role", "7", "root"]).is_err());
    }
}
