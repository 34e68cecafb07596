use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::application::{AppError, LedgerService, PaymentOutcome};
use crate::domain::{format_cents, parse_amount, Customer};

/// Fiado - store credit tab tracker
#[derive(Parser)]
#[command(name = "fiado")]
#[command(about = "Track store credit (fiado) tabs for your customers")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Start the session with a couple of sample customers
    #[arg(long)]
    pub demo: bool,
}

/// One line of shell input, parsed as a command.
#[derive(Parser)]
#[command(multicall = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Register a new customer
    Add {
        /// Customer name
        name: String,

        /// Phone number
        #[arg(short, long)]
        phone: Option<String>,

        /// Credit limit (e.g., "500.00", defaults to 500.00 if omitted or invalid)
        #[arg(short, long)]
        limit: Option<String>,
    },

    /// Add a purchase to a customer's tab
    Purchase {
        /// Customer name or id
        customer: String,

        /// Purchase amount (e.g., "12.50")
        amount: String,
    },

    /// Record a payment against a customer's tab
    Pay {
        /// Customer name or id
        customer: String,

        /// Payment amount (defaults to the full owed amount)
        amount: Option<String>,
    },

    /// Delete a customer permanently
    Remove {
        /// Customer name or id
        customer: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List all customers
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show detailed customer information
    Show {
        /// Customer name or id
        customer: String,
    },

    /// Show ledger totals
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Exit the shell
    #[command(alias = "exit")]
    Quit,
}

enum LoopControl {
    Continue,
    Exit,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut service = LedgerService::new();
        if self.demo {
            seed_demo(&mut service)?;
        }

        let mut editor = DefaultEditor::new()?;
        println!("fiado - store credit tracker (type 'help' for commands, 'quit' to exit)");

        loop {
            match editor.readline("fiado> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    editor.add_history_entry(trimmed).ok();

                    match handle_line(&mut service, &mut editor, trimmed) {
                        Ok(LoopControl::Continue) => {}
                        Ok(LoopControl::Exit) => break,
                        Err(err) => eprintln!("Error: {err:#}"),
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }

        let summary = service.summary();
        println!(
            "Session closed. Total owed: {} across {} customer(s) in debt.",
            format_cents(summary.total_owed),
            summary.customers_in_debt
        );
        Ok(())
    }
}

fn handle_line(
    service: &mut LedgerService,
    editor: &mut DefaultEditor,
    line: &str,
) -> Result<LoopControl> {
    let tokens = match shell_words::split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            eprintln!("{err}");
            return Ok(LoopControl::Continue);
        }
    };

    let parsed = match ShellLine::try_parse_from(tokens) {
        Ok(parsed) => parsed,
        Err(err) => {
            // Renders help/usage output for `help`, bad flags, etc.
            let _ = err.print();
            return Ok(LoopControl::Continue);
        }
    };

    match parsed.command {
        ShellCommand::Add { name, phone, limit } => {
            // An unparsable limit falls back to the default rather than failing
            let limit = limit.as_deref().and_then(|s| parse_amount(s).ok());
            let customer = service.add_customer(&name, phone, limit)?;
            println!(
                "Added customer: {} (limit {})",
                customer.name,
                format_cents(customer.limit)
            );
        }

        ShellCommand::Purchase { customer, amount } => {
            let id = service.resolve_customer(&customer)?.id;
            let amount =
                parse_amount(&amount).context("Invalid amount format. Use '50.00' or '50'")?;

            match service.record_purchase(id, amount) {
                Ok(result) => println!(
                    "Recorded purchase of {} for {} (owed {}, available {})",
                    format_cents(amount),
                    result.customer.name,
                    format_cents(result.customer.owed),
                    format_cents(result.customer.headroom())
                ),
                Err(AppError::LimitExceeded { available, .. }) => println!(
                    "Credit limit exceeded. Available credit: {}",
                    format_cents(available)
                ),
                Err(err) => return Err(err.into()),
            }
        }

        ShellCommand::Pay { customer, amount } => {
            let target = service.resolve_customer(&customer)?;
            let (id, owed) = (target.id, target.owed);

            if owed == 0 {
                println!("{} is already settled, nothing to pay.", target.name);
                return Ok(LoopControl::Continue);
            }

            // Omitting the amount pays off the whole tab
            let amount = match amount {
                Some(raw) => {
                    parse_amount(&raw).context("Invalid amount format. Use '50.00' or '50'")?
                }
                None => owed,
            };

            match service.record_payment(id, amount) {
                Ok(result) => match result.outcome {
                    PaymentOutcome::Settled => {
                        println!("Payment of {} recorded. Tab fully settled!", format_cents(amount))
                    }
                    PaymentOutcome::Partial => println!(
                        "Payment of {} recorded. Remaining balance: {}",
                        format_cents(amount),
                        format_cents(result.customer.owed)
                    ),
                },
                Err(AppError::OverpaymentRejected { owed, .. }) => println!(
                    "Payment exceeds the outstanding tab ({}). Nothing recorded.",
                    format_cents(owed)
                ),
                Err(err) => return Err(err.into()),
            }
        }

        ShellCommand::Remove { customer, yes } => {
            let target = service.resolve_customer(&customer)?;
            let (id, name) = (target.id, target.name.clone());

            if !yes && !confirm_delete(editor, &name)? {
                println!("Cancelled.");
                return Ok(LoopControl::Continue);
            }

            // Deletion itself is non-interactive and idempotent
            match service.delete_customer(id) {
                Some(removed) => println!("Deleted customer: {}", removed.name),
                None => println!("Customer already removed."),
            }
        }

        ShellCommand::List { json } => run_list_command(service, json)?,

        ShellCommand::Show { customer } => {
            let customer = service.resolve_customer(&customer)?;
            print_customer_detail(customer);
        }

        ShellCommand::Summary { json } => {
            let summary = service.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Total owed:        {}", format_cents(summary.total_owed));
                println!(
                    "Customers:         {} ({} in debt)",
                    service.list_customers().len(),
                    summary.customers_in_debt
                );
            }
        }

        ShellCommand::Quit => return Ok(LoopControl::Exit),
    }

    Ok(LoopControl::Continue)
}

/// Deleting a customer is destructive and irreversible, so ask first.
fn confirm_delete(editor: &mut DefaultEditor, name: &str) -> Result<bool> {
    let answer = editor.readline(&format!("Delete {}? This cannot be undone [y/N]: ", name));
    match answer {
        Ok(line) => Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes")),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

fn run_list_command(service: &LedgerService, json: bool) -> Result<()> {
    let customers = service.list_customers();

    if json {
        println!("{}", serde_json::to_string_pretty(customers)?);
        return Ok(());
    }

    if customers.is_empty() {
        println!("No customers registered. Use 'add <name>' to register one.");
        return Ok(());
    }

    println!(
        "{:<20} {:<16} {:>10} {:>10}  {:<8}",
        "NAME", "PHONE", "OWED", "LIMIT", "STATUS"
    );
    println!("{}", "-".repeat(68));
    for customer in customers {
        println!(
            "{:<20} {:<16} {:>10} {:>10}  {:<8}",
            customer.name,
            customer.phone.as_deref().unwrap_or("-"),
            format_cents(customer.owed),
            format_cents(customer.limit),
            if customer.is_settled() {
                "settled"
            } else {
                "in debt"
            }
        );
    }
    Ok(())
}

fn print_customer_detail(customer: &Customer) {
    println!("Customer: {}", customer.name);
    println!("  ID:         {}", customer.id);
    if let Some(phone) = &customer.phone {
        println!("  Phone:      {}", phone);
    }
    println!(
        "  Registered: {}",
        customer.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!();
    println!("  Owed:       {}", format_cents(customer.owed));
    println!("  Limit:      {}", format_cents(customer.limit));
    println!("  Available:  {}", format_cents(customer.headroom()));
    println!(
        "  Status:     {}",
        if customer.is_settled() {
            "settled"
        } else {
            "in debt"
        }
    );
}

/// Seed the sample customers the app ships with for demos.
fn seed_demo(service: &mut LedgerService) -> Result<()> {
    let maria = service.add_customer(
        "Maria Santos",
        Some("(11) 98888-7777".to_string()),
        Some(100_000),
    )?;
    service.record_purchase(maria.id, 35_000)?;

    service.add_customer(
        "José Oliveira",
        Some("(11) 97777-6666".to_string()),
        Some(80_000),
    )?;

    Ok(())
}
