//! Interactive shell for the Porage service.

use std::io::Write;

use clap::Parser;
use porage::client::PorageClient;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(
    name = "porage-client",
    about = "A client to interact with the Porage service",
    long_about = "A simple interactive client for Porage. Purpose is to demonstrate the usage of the Porage service."
)]
struct Opts {
    /// Address of the Porage server.
    #[arg(short = 's', long = "server", default_value = "localhost:32901")]
    server: String,
}

const COMMAND_USAGE: &[(&str, &str)] = &[
    ("create-ledger", "create-ledger <ledger_id>"),
    ("append-entry", "append-entry <ledger_id> <payload>"),
    ("get-entry", "get-entry <ledger_id> <entry_id>"),
    ("close-ledger", "close-ledger <ledger_id>"),
    ("list-ledgers", "list-ledgers"),
    ("list-workers", "list-workers"),
    ("ledger-len", "ledger-len <ledger_id>"),
    ("help", "show help information"),
    ("quit", "exit the client"),
];

#[tokio::main]
async fn main() {
    let opts = Opts::parse();

    let mut client = match PorageClient::connect(&opts.server).await {
        Ok(client) => client,
        Err(error) => {
            eprintln!("Failed to connect to Porage server at {}: {error}", opts.server);
            std::process::exit(1);
        }
    };

    println!("Welcome to Porage CLI. Type 'quit' to exit.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("-> ");
        let _ = std::io::stdout().flush();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(error) => {
                eprintln!("Failed to read input: {error}");
                break;
            }
        };
        if !handle_command(&mut client, line.trim()).await {
            break;
        }
    }
}

/// Dispatches one command line. Returns `false` when the shell should exit.
async fn handle_command(client: &mut PorageClient, input: &str) -> bool {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some(&command) = parts.first() else {
        return true;
    };

    match command {
        "create-ledger" => {
            let Some(ledger_id) = parse_arg(&parts, 1, 2) else {
                return true;
            };
            match client.create_ledger(ledger_id).await {
                Ok(()) => println!("Ledger created successfully"),
                Err(status) => println!("Failed to create ledger: {}", status.message()),
            }
        }
        "append-entry" => {
            if parts.len() != 3 {
                print_usage(command);
                return true;
            }
            let Some(ledger_id) = parse_arg(&parts, 1, 3) else {
                return true;
            };
            match client
                .append_entry(ledger_id, parts[2].as_bytes().to_vec())
                .await
            {
                Ok(entry_id) => println!("Entry appended with ID: {entry_id}"),
                Err(status) => println!("Failed to append entry: {}", status.message()),
            }
        }
        "get-entry" => {
            if parts.len() != 3 {
                print_usage(command);
                return true;
            }
            let (Some(ledger_id), Some(entry_id)) =
                (parse_arg(&parts, 1, 3), parse_arg::<i64>(&parts, 2, 3))
            else {
                return true;
            };
            match client.get_entry(ledger_id, entry_id).await {
                Ok(payload) => println!("Entry payload: {}", String::from_utf8_lossy(&payload)),
                Err(status) => println!("Failed to get entry: {}", status.message()),
            }
        }
        "close-ledger" => {
            let Some(ledger_id) = parse_arg(&parts, 1, 2) else {
                return true;
            };
            match client.close_ledger(ledger_id).await {
                Ok(()) => println!("Ledger closed successfully"),
                Err(status) => println!("Failed to close ledger: {}", status.message()),
            }
        }
        "list-ledgers" => match client.list_ledgers().await {
            Ok(mut ledger_ids) => {
                ledger_ids.sort_unstable();
                println!("Ledgers: {ledger_ids:?}");
            }
            Err(status) => println!("Failed to list ledgers: {}", status.message()),
        },
        "list-workers" => match client.list_workers().await {
            Ok(workers) => {
                let mut workers: Vec<_> = workers.into_iter().collect();
                workers.sort();
                let name_width = workers
                    .iter()
                    .map(|(name, _)| name.len())
                    .max()
                    .unwrap_or(0)
                    .max("WORKER".len());
                println!("{:<name_width$}  DESCRIPTION", "WORKER");
                for (name, description) in workers {
                    println!("{name:<name_width$}  {description}");
                }
            }
            Err(status) => println!("Failed to list workers: {}", status.message()),
        },
        "ledger-len" => {
            let Some(ledger_id) = parse_arg(&parts, 1, 2) else {
                return true;
            };
            match client.ledger_length(ledger_id).await {
                Ok(length) => println!("Ledger length: {length}"),
                Err(status) => println!("Failed to get ledger length: {}", status.message()),
            }
        }
        "help" => {
            println!("Available commands:");
            for (_, usage) in COMMAND_USAGE {
                println!("  {usage}");
            }
        }
        "quit" => {
            println!("Exiting Porage CLI");
            return false;
        }
        unknown => {
            println!("Unknown command: {unknown}. Type 'help' for more information.");
        }
    }
    true
}

/// Parses positional argument `position`, printing usage on arity or parse
/// errors.
fn parse_arg<T: std::str::FromStr>(parts: &[&str], position: usize, arity: usize) -> Option<T> {
    if parts.len() != arity {
        print_usage(parts[0]);
        return None;
    }
    match parts[position].parse() {
        Ok(value) => Some(value),
        Err(_) => {
            println!("Invalid argument: {}", parts[position]);
            None
        }
    }
}

fn print_usage(command: &str) {
    for (name, usage) in COMMAND_USAGE {
        if *name == command {
            println!("Usage: {usage}");
            return;
        }
    }
}
