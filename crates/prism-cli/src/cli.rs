use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "prism",
    about = "prism — prefix-routed resource lookup",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Override the separator declared in the manifest
    #[arg(long, global = true)]
    pub separator: Option<String>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve a key to its value
    Resolve(KeyArgs),
    /// Check whether a key resolves
    Exists(KeyArgs),
    /// List every fully-qualified key
    Keys(ManifestArgs),
    /// Print every key with its resolved value
    Dump(ManifestArgs),
}

#[derive(Args)]
pub struct ManifestArgs {
    /// Path to the TOML manifest
    pub manifest: PathBuf,
}

#[derive(Args)]
pub struct KeyArgs {
    /// Path to the TOML manifest
    pub manifest: PathBuf,
    /// Fully-qualified key, e.g. `soup.another.yas`
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_resolve() {
        let cli = Cli::try_parse_from(["prism", "resolve", "bundle.toml", "a.test"]).unwrap();
        if let Command::Resolve(args) = cli.command {
            assert_eq!(args.manifest, PathBuf::from("bundle.toml"));
            assert_eq!(args.key, "a.test");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_exists() {
        let cli = Cli::try_parse_from(["prism", "exists", "bundle.toml", "x"]).unwrap();
        assert!(matches!(cli.command, Command::Exists(_)));
    }

    #[test]
    fn parse_keys() {
        let cli = Cli::try_parse_from(["prism", "keys", "bundle.toml"]).unwrap();
        if let Command::Keys(args) = cli.command {
            assert_eq!(args.manifest, PathBuf::from("bundle.toml"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_dump() {
        let cli = Cli::try_parse_from(["prism", "dump", "bundle.toml"]).unwrap();
        assert!(matches!(cli.command, Command::Dump(_)));
    }

    #[test]
    fn resolve_requires_key() {
        assert!(Cli::try_parse_from(["prism", "resolve", "bundle.toml"]).is_err());
    }

    #[test]
    fn parse_separator_override() {
        let cli = Cli::try_parse_from(["prism", "keys", "bundle.toml", "--separator", "::"]).unwrap();
        assert_eq!(cli.separator.as_deref(), Some("::"));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["prism", "--verbose", "keys", "bundle.toml"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["prism", "--format", "json", "dump", "bundle.toml"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
