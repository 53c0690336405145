//! Order command - open orders and move them through their lifecycle.

use clap::{Args, Subcommand, ValueEnum};
use console::style;

use comex_core::OrderStatus;

use super::Context;

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    #[command(subcommand)]
    command: OrderCommand,
}

#[derive(Subcommand)]
enum OrderCommand {
    /// Open a new order for a client
    New {
        /// Client identifier
        client_id: String,
    },

    /// List a client's orders
    List {
        /// Client identifier
        client_id: String,
    },

    /// Show one order as JSON
    Show {
        client_id: String,
        order_id: String,
    },

    /// Set an order's status
    Status {
        client_id: String,
        order_id: String,
        #[arg(value_enum)]
        status: StatusArg,
    },

    /// List the file names the order's documents download as
    Docs {
        client_id: String,
        order_id: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StatusArg {
    New,
    InProgress,
    Completed,
    Cancelled,
}

impl From<StatusArg> for OrderStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::New => OrderStatus::New,
            StatusArg::InProgress => OrderStatus::InProgress,
            StatusArg::Completed => OrderStatus::Completed,
            StatusArg::Cancelled => OrderStatus::Cancelled,
        }
    }
}

pub fn run(args: OrderArgs, mut ctx: Context) -> anyhow::Result<()> {
    match args.command {
        OrderCommand::New { client_id } => {
            let order = ctx.store.create_order(&client_id)?;
            ctx.save()?;
            println!(
                "{} Created order {} ({})",
                style("✓").green(),
                style(&order.number).bold(),
                order.id
            );
        }
        OrderCommand::List { client_id } => {
            let client = ctx
                .store
                .get_client(&client_id)
                .ok_or_else(|| anyhow::anyhow!("Client not found: {}", client_id))?;

            if client.orders.is_empty() {
                println!("{} {} has no orders.", style("ℹ").blue(), client.name);
                return Ok(());
            }
            for order in &client.orders {
                println!(
                    "{:<14} {:<38} {:<12} {:<12} {} files, {} documents",
                    order.number,
                    order.id,
                    order.date,
                    order.status.label(),
                    order.uploaded_files.len(),
                    order.generated_docs.len()
                );
            }
        }
        OrderCommand::Show { client_id, order_id } => {
            let order = find_order(&ctx, &client_id, &order_id)?;
            println!("{}", serde_json::to_string_pretty(order)?);
        }
        OrderCommand::Status {
            client_id,
            order_id,
            status,
        } => {
            let mut order = find_order(&ctx, &client_id, &order_id)?.clone();
            order.status = status.into();
            order.updated_at = chrono::Utc::now();
            ctx.store.update_order(&client_id, order.clone())?;
            ctx.save()?;
            println!(
                "{} Order {} is now {}",
                style("✓").green(),
                order.number,
                order.status.label()
            );
        }
        OrderCommand::Docs { client_id, order_id } => {
            let order = find_order(&ctx, &client_id, &order_id)?;
            if order.generated_docs.is_empty() {
                println!(
                    "{} No documents generated yet. Run 'comex process' first.",
                    style("ℹ").blue()
                );
            }
            for doc in &order.generated_docs {
                println!("{}", doc.name);
            }
        }
    }

    Ok(())
}

fn find_order<'a>(
    ctx: &'a Context,
    client_id: &str,
    order_id: &str,
) -> anyhow::Result<&'a comex_core::Order> {
    ctx.store.get_order(client_id, order_id).ok_or_else(|| {
        anyhow::anyhow!("Order {} not found for client {}", order_id, client_id)
    })
}
