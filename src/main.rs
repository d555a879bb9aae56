/*!
# Sealdoc - A passphrase-encrypted store for password entries

This file contains the main application flow: it parses arguments, loads
configuration, sets up logging, obtains passphrases and dispatches to the
operations in `sealdoc::ops`.

## Usage

```
sealdoc [OPTIONS] <COMMAND>

Commands:
  init     Create a new, empty document
  list     List entry titles
  show     Show one entry
  add      Add an entry
  remove   Remove an entry
  rekey    Re-encrypt the document under a new passphrase
  export   Write a plaintext copy of the document
  import   Encrypt a plaintext document into the document file
  inspect  Describe the container header without decrypting

Options:
  -f, --file <FILE>              Document file to operate on
      --plain                    Read and write the document as plaintext JSON
      --log-format <LOG_FORMAT>  Log output format: text or json
  -v, --verbose                  Print verbose output
```

## Configuration

- `SEALDOC_FILE`: the document file (defaults to "~/.sealdoc/entries.sdoc")
- `SEALDOC_LOG_FORMAT`, `SEALDOC_LOG_LEVEL`: logging; `RUST_LOG` takes precedence
- `SEALDOC_PASSPHRASE`, `SEALDOC_NEW_PASSPHRASE`, `SEALDOC_ENTRY_PASSWORD`:
  skip the interactive prompts
*/

use std::path::{Path, PathBuf};
use std::process;

use sealdoc::cli::{CliArgs, Command};
use sealdoc::config::{expand_path, Config, LogFormat};
use sealdoc::constants::{
    ENV_VAR_SEALDOC_PASSPHRASE, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
};
use sealdoc::document::Entry;
use sealdoc::errors::{AppError, AppResult, ErrorChain};
use sealdoc::{ops, passphrase};
use secrecy::SecretString;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = CliArgs::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(2);
        }
    };

    if let Err(e) = init_tracing(config.log_format, &config.log_level) {
        eprintln!("Warning: logging is unavailable: {}", e);
    }
    let span = info_span!(TRACING_ROOT_SPAN_NAME, service = TRACING_SERVICE_NAME);
    let _guard = span.enter();
    debug!(?config, ?args, "Starting sealdoc");

    if let Err(err) = run(args, &config) {
        error!(error = %ErrorChain(&err), "Command failed");
        eprintln!("Error: {}", err);
        if err.is_authentication_failure() {
            eprintln!("Check the passphrase; if it is right, the file has been damaged.");
        }
        process::exit(1);
    }
}

/// Environment configuration with command-line overrides applied.
fn load_config(args: &CliArgs) -> AppResult<Config> {
    let mut config = Config::load()?;
    if let Some(file) = &args.file {
        config.document_path = absolutize(&expand_path(&file.to_string_lossy())?)?;
    }
    if let Some(format) = args.log_format {
        config.log_format = format;
    }
    if args.verbose {
        config.log_level = "debug".to_string();
    }
    config.validate()?;
    Ok(config)
}

fn absolutize(path: &Path) -> AppResult<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(
    format: LogFormat,
    level: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    }
}

/// Passphrase for opening the existing document, or `None` in plaintext mode.
fn unlock(plain: bool) -> AppResult<Option<SecretString>> {
    if plain {
        Ok(None)
    } else {
        passphrase::existing_passphrase().map(Some)
    }
}

/// Passphrase for writing a fresh document, or `None` in plaintext mode.
fn choose(plain: bool) -> AppResult<Option<SecretString>> {
    if plain {
        Ok(None)
    } else {
        passphrase::new_passphrase(ENV_VAR_SEALDOC_PASSPHRASE).map(Some)
    }
}

fn run(args: CliArgs, config: &Config) -> AppResult<()> {
    let path = config.document_path.as_path();
    let plain = args.plain;

    match args.command {
        Command::Init => {
            let secret = choose(plain)?;
            ops::init_document(path, secret.as_ref())?;
            println!("Created {}", path.display());
        }
        Command::List => {
            let secret = unlock(plain)?;
            for title in ops::list_entries(path, secret.as_ref())? {
                println!("{}", title);
            }
        }
        Command::Show { title, reveal } => {
            let secret = unlock(plain)?;
            let view = ops::show_entry(path, secret.as_ref(), &title, reveal)?;
            print!("{}", view);
        }
        Command::Add {
            title,
            user,
            url,
            notes,
        } => {
            let secret = unlock(plain)?;
            let mut entry = Entry::new(title.clone())
                .with_user(user.unwrap_or_default())
                .with_url(url.unwrap_or_default())
                .with_notes(notes.unwrap_or_default());
            if let Some(password) = passphrase::entry_password()? {
                entry = entry.with_password(password.as_str());
            }
            let count = ops::add_entry(path, secret.as_ref(), entry)?;
            println!("Added '{}' ({} entries)", title, count);
        }
        Command::Remove { title } => {
            let secret = unlock(plain)?;
            let count = ops::remove_entry(path, secret.as_ref(), &title)?;
            println!("Removed '{}' ({} entries)", title, count);
        }
        Command::Rekey => {
            if plain {
                return Err(AppError::Usage(
                    "rekey works on encrypted documents; use import to encrypt a plaintext one"
                        .to_string(),
                ));
            }
            let old = passphrase::existing_passphrase()?;
            let new = passphrase::rekey_passphrase()?;
            let count = ops::rekey_document(path, &old, new)?;
            println!("Passphrase changed ({} entries)", count);
        }
        Command::Export { output } => {
            let secret = unlock(plain)?;
            let output = absolutize(&output)?;
            let count = ops::export_document(path, secret.as_ref(), &output)?;
            println!("Exported {} entries to {}", count, output.display());
        }
        Command::Import { input } => {
            let secret = choose(plain)?;
            let input = absolutize(&input)?;
            let count = ops::import_document(&input, path, secret.as_ref())?;
            println!("Imported {} entries into {}", count, path.display());
        }
        Command::Inspect => {
            let summary = ops::inspect_document(path)?;
            print!("{}", summary);
        }
    }

    info!("Command completed");
    Ok(())
}
