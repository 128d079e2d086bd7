//! finledger CLI
//!
//! Interactive client for a running ledger server.

use std::io::{self, Write};

use clap::Parser;
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finledger_client::LedgerClient;
use finledger_common::{Transaction, TransactionId, TransactionKind, UserId};

/// finledger interactive CLI
#[derive(Parser, Debug)]
#[command(name = "ledger-cli")]
#[command(about = "Interactive client for the finledger server")]
struct Args {
    /// Address of the ledger server
    #[arg(long, default_value = "127.0.0.1:50051")]
    server: String,

    /// User whose ledger to operate on
    #[arg(long, default_value = "default")]
    user: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Interactive tool: keep logs quiet unless asked for.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let user = UserId::new(args.user);

    let mut client = LedgerClient::connect(&args.server).await?;
    println!("Connected to {} as user '{}'", args.server, user);

    loop {
        println!();
        println!("1. Add Credit");
        println!("2. Add Debit");
        println!("3. View Balance");
        println!("4. List Transactions");
        println!("5. Look Up Transaction");
        println!("6. Exit");

        let choice = read_line("Choose: ")?;
        match choice.as_str() {
            "1" | "2" => {
                let kind = if choice == "1" {
                    TransactionKind::Credit
                } else {
                    TransactionKind::Debit
                };

                let name = read_line("Name: ")?;
                let description = if name.is_empty() { None } else { Some(name) };

                let input = read_line("Amount: ")?;
                let amount: Decimal = match input.parse() {
                    Ok(amount) => amount,
                    Err(_) => {
                        eprintln!("Not a valid amount: {input}");
                        continue;
                    }
                };

                match client
                    .create_transaction(&user, amount, kind, None, description)
                    .await
                {
                    Ok(tx) => println!(
                        "Added: {} {} ({})",
                        tx.description.as_deref().unwrap_or("-"),
                        tx.amount,
                        tx.kind
                    ),
                    Err(err) => eprintln!("Error: {err}"),
                }
            }

            "3" => match client.get_balance(&user).await {
                Ok(balance) => println!("Current Balance: {balance}"),
                Err(err) => eprintln!("Error: {err}"),
            },

            "4" => match client.list_transactions(&user).await {
                Ok(transactions) => {
                    if transactions.is_empty() {
                        println!("No transactions");
                    }
                    for tx in &transactions {
                        print_transaction(tx);
                    }
                }
                Err(err) => eprintln!("Error: {err}"),
            },

            "5" => {
                let input = read_line("Transaction id: ")?;
                let id = match TransactionId::parse(&input) {
                    Ok(id) => id,
                    Err(_) => {
                        eprintln!("Not a valid transaction id: {input}");
                        continue;
                    }
                };
                match client.get_transaction(id).await {
                    Ok(tx) => print_transaction(&tx),
                    Err(err) => eprintln!("Error: {err}"),
                }
            }

            "6" => break,

            "" => {}

            other => println!("Unknown choice: {other}"),
        }
    }

    Ok(())
}

/// Print the prompt and read a trimmed line from stdin.
fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn print_transaction(tx: &Transaction) {
    println!(
        "[{}] {}: {}  (id {})",
        tx.kind,
        tx.description.as_deref().unwrap_or("-"),
        tx.amount,
        tx.id
    );
}
