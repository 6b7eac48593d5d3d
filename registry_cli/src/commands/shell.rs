use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::config::Config;
use crate::render;
use crate::session::Session;

#[derive(Parser, Debug)]
#[command(name = "registry", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ShellCommand {
    /// Register a new property owned by this account
    Register { location: String, size: String },

    /// Properties you own (sell view)
    Mine,

    /// Properties listed for sale (buy view)
    Market,

    /// List a property for sale
    Sell { property_id: String, price: String },

    /// Buy a listed property with this account
    Buy { property_id: String },

    /// Every registered property
    Status,

    /// Ownership and transfer history of a property
    History { property_id: String },

    /// Write the ownership certificate to the certificates directory
    Certificate { property_id: String },

    /// Show the connected wallet
    Whoami,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub async fn run(config: &Config) -> Result<()> {
    let session = Session::from_config(config);

    println!("Land registry session");
    println!("Connected wallet: {}", session.account());

    let delays = session.registry().config();
    info!(
        register_ms = delays.register_delay.as_millis() as u64,
        listing_ms = delays.listing_delay.as_millis() as u64,
        purchase_ms = delays.purchase_delay.as_millis() as u64,
        "Confirmation delays"
    );
    println!("Type 'help' for commands, 'quit' to leave.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("registry> ");
        std::io::stdout().flush().context("Failed to flush prompt")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        if execute(&session, command).await? == Flow::Quit {
            break;
        }
    }

    println!("Session ended, {} properties on chain", session.registry().len());
    Ok(())
}

fn parse_line(line: &str) -> Result<Option<ShellCommand>> {
    let args = split_args(line)?;
    if args.is_empty() {
        return Ok(None);
    }

    let parsed = ShellLine::try_parse_from(args)?;
    Ok(Some(parsed.command))
}

/// Whitespace split with double-quoted spans kept whole.
fn split_args(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        bail!("Unterminated quote");
    }
    if has_token {
        args.push(current);
    }

    Ok(args)
}

async fn execute(session: &Session, command: ShellCommand) -> Result<Flow> {
    match command {
        ShellCommand::Register { location, size } => {
            println!("Registering property...");
            match session.register(&location, &size).await {
                Ok(record) => {
                    println!("Property registered on blockchain!");
                    println!(
                        "{} in block #{} [Hash: {}]",
                        record.property_id, record.sequence_number, record.pseudo_hash
                    );
                }
                Err(e) => println!("Registration failed: {}", e),
            }
        }
        ShellCommand::Mine => render::print_records("My Properties", &session.my_properties()),
        ShellCommand::Market => {
            render::print_records("Properties For Sale", &session.market())
        }
        ShellCommand::Status => render::print_records("All Properties", &session.status()),
        ShellCommand::Sell { property_id, price } => {
            println!("Listing {}...", property_id);
            match session.list_for_sale(&property_id, &price).await {
                Ok(_) => {
                    println!("Property listed for sale!");
                    render::print_records("My Properties", &session.my_properties());
                }
                Err(e) => println!("Listing failed: {}", e),
            }
        }
        ShellCommand::Buy { property_id } => {
            println!("Processing payment...");
            match session.buy(&property_id).await {
                Ok(purchase) => {
                    println!("Purchase successful! You are now the owner!");
                    render::print_receipt(&purchase);
                    render::print_records("Properties For Sale", &session.market());
                }
                Err(e) => println!("Purchase failed! ({})", e),
            }
        }
        ShellCommand::History { property_id } => match session.history(&property_id) {
            Some(history) => render::print_history(&history),
            None => println!("No property registered with id {}", property_id),
        },
        ShellCommand::Certificate { property_id } => {
            match session.export_certificate(&property_id) {
                Ok(path) => println!("Certificate saved to: {}", path.display()),
                Err(e) => println!("Certificate failed: {:#}", e),
            }
        }
        ShellCommand::Whoami => println!("{}", session.account()),
        ShellCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use registry_db::{Registry, RegistryConfig};

    #[test]
    fn test_split_args_quotes() -> Result<()> {
        assert_eq!(
            split_args(r#"register "Plot 1, Riverside" "1000 sq ft""#)?,
            vec!["register", "Plot 1, Riverside", "1000 sq ft"]
        );
        assert_eq!(split_args("  buy   PROP-1 ")?, vec!["buy", "PROP-1"]);
        assert_eq!(split_args(r#"sell PROP-1 """#)?, vec!["sell", "PROP-1", ""]);
        assert!(split_args("   ")?.is_empty());
        assert!(split_args(r#"register "Plot 1"#).is_err());
        Ok(())
    }

    #[test]
    fn test_parse_line() -> Result<()> {
        assert_eq!(
            parse_line(r#"sell PROP-2 "50 ETH""#)?,
            Some(ShellCommand::Sell {
                property_id: "PROP-2".to_string(),
                price: "50 ETH".to_string()
            })
        );
        assert_eq!(parse_line("exit")?, Some(ShellCommand::Quit));
        assert_eq!(parse_line("")?, None);
        assert!(parse_line("buy").is_err());
        assert!(parse_line("teleport PROP-1").is_err());
        assert_eq!(parse_line("whoami")?, Some(ShellCommand::Whoami));
        Ok(())
    }

    #[test]
    fn test_help_describes_every_command() {
        let help = ShellLine::command().render_help().to_string();

        for (name, about) in [
            ("buy", "Buy a listed property"),
            ("history", "Ownership and transfer history"),
            ("whoami", "Show the connected wallet"),
            ("quit", "End the session"),
        ] {
            assert!(help.contains(name), "missing {}", name);
            assert!(help.contains(about), "missing description for {}", name);
        }

        let blank = ShellLine::command()
            .get_subcommands()
            .filter(|c| c.get_name() != "help")
            .filter(|c| c.get_about().is_none())
            .map(|c| c.get_name().to_string())
            .collect::<Vec<_>>();
        assert!(blank.is_empty(), "undocumented: {:?}", blank);
    }

    #[tokio::test]
    async fn test_execute_flow() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let session = Session::new(Registry::new(RegistryConfig::instant()), "0xme", dir.path());

        let flow = execute(
            &session,
            ShellCommand::Register {
                location: "Plot 1".to_string(),
                size: "1 acre".to_string(),
            },
        )
        .await?;
        assert_eq!(flow, Flow::Continue);

        // failures are reported, not raised
        let flow = execute(
            &session,
            ShellCommand::Buy {
                property_id: "PROP-1".to_string(),
            },
        )
        .await?;
        assert_eq!(flow, Flow::Continue);
        assert!(session.history("PROP-1").is_some_and(|h| h.transfer_history.is_empty()));

        execute(
            &session,
            ShellCommand::Certificate {
                property_id: "PROP-1".to_string(),
            },
        )
        .await?;
        assert!(dir.path().join("Land_Certificate_PROP-1.txt").exists());

        assert_eq!(execute(&session, ShellCommand::Quit).await?, Flow::Quit);
        Ok(())
    }
}
