use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::LogFormat;
use crate::constants::{APP_DESCRIPTION, APP_NAME};

/// A passphrase-encrypted store for password entries
#[derive(Parser, Debug)]
#[clap(name = APP_NAME, about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Document file to operate on (overrides SEALDOC_FILE)
    #[clap(short = 'f', long, global = true)]
    pub file: Option<PathBuf>,

    /// Read and write the document as plaintext JSON without encryption
    #[clap(long, global = true)]
    pub plain: bool,

    /// Log output format: text or json (overrides SEALDOC_LOG_FORMAT)
    #[clap(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Print verbose output
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Create a new, empty document
    Init,
    /// List entry titles
    List,
    /// Show one entry
    Show {
        /// Title of the entry (case-insensitive)
        title: String,
        /// Print the password instead of masking it
        #[clap(long)]
        reveal: bool,
    },
    /// Add an entry; the password is prompted for or read from SEALDOC_ENTRY_PASSWORD
    Add {
        #[clap(long)]
        title: String,
        #[clap(long)]
        user: Option<String>,
        #[clap(long)]
        url: Option<String>,
        #[clap(long)]
        notes: Option<String>,
    },
    /// Remove an entry
    Remove {
        /// Title of the entry (case-insensitive)
        title: String,
    },
    /// Re-encrypt the document under a new passphrase
    Rekey,
    /// Write a plaintext copy of the document
    Export {
        #[clap(short = 'o', long)]
        output: PathBuf,
    },
    /// Encrypt a plaintext document into the document file
    Import {
        #[clap(short = 'i', long)]
        input: PathBuf,
    },
    /// Describe the container header without decrypting
    Inspect,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        CliArgs::parse_from(std::env::args())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_defaults() {
        let args = CliArgs::parse_from(vec!["sealdoc", "list"]);
        assert_eq!(args.command, Command::List);
        assert!(args.file.is_none());
        assert!(!args.plain);
        assert!(args.log_format.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from(vec![
            "sealdoc",
            "list",
            "--file",
            "/tmp/vault.sdoc",
            "--plain",
            "-v",
            "--log-format",
            "json",
        ]);
        assert_eq!(args.file, Some(PathBuf::from("/tmp/vault.sdoc")));
        assert!(args.plain);
        assert!(args.verbose);
        assert_eq!(args.log_format, Some(LogFormat::Json));
    }

    #[test]
    fn test_show_with_reveal() {
        let args = CliArgs::parse_from(vec!["sealdoc", "show", "Mail", "--reveal"]);
        assert_eq!(
            args.command,
            Command::Show {
                title: "Mail".to_string(),
                reveal: true
            }
        );
    }

    #[test]
    fn test_add_fields() {
        let args = CliArgs::parse_from(vec![
            "sealdoc", "add", "--title", "Bank", "--user", "bob", "--url", "https://bank.example",
        ]);
        assert_eq!(
            args.command,
            Command::Add {
                title: "Bank".to_string(),
                user: Some("bob".to_string()),
                url: Some("https://bank.example".to_string()),
                notes: None,
            }
        );
    }

    #[test]
    fn test_export_and_import_paths() {
        let args = CliArgs::parse_from(vec!["sealdoc", "export", "-o", "out.json"]);
        assert_eq!(
            args.command,
            Command::Export {
                output: PathBuf::from("out.json")
            }
        );

        let args = CliArgs::parse_from(vec!["sealdoc", "import", "--input", "in.json"]);
        assert_eq!(
            args.command,
            Command::Import {
                input: PathBuf::from("in.json")
            }
        );
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let result = CliArgs::try_parse_from(vec!["sealdoc", "list", "--log-format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(CliArgs::try_parse_from(vec!["sealdoc"]).is_err());
    }
}
