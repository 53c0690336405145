//! Client command - create, inspect and remove clients.

use clap::{Args, Subcommand};
use console::style;

use comex_core::registry;
use comex_core::{DocumentType, NewClient};

use super::Context;

/// Arguments for the client command.
#[derive(Args)]
pub struct ClientArgs {
    #[command(subcommand)]
    command: ClientCommand,
}

#[derive(Subcommand)]
enum ClientCommand {
    /// Create a client
    Add(ClientFields),

    /// List all clients
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one client as JSON
    Show {
        /// Client identifier
        id: String,
    },

    /// Replace a client's contact details and document selection
    Edit {
        /// Client identifier
        id: String,

        #[command(flatten)]
        fields: ClientFields,
    },

    /// Choose which documents are generated for a client
    Types {
        /// Client identifier
        id: String,

        /// Document types (invoice, packingList, priceList, quality)
        #[arg(value_delimiter = ',')]
        types: Vec<DocumentType>,
    },

    /// Delete a client and all of its orders
    Remove {
        /// Client identifier
        id: String,
    },
}

#[derive(Args)]
struct ClientFields {
    /// Company name
    #[arg(long)]
    name: String,

    /// Contact email
    #[arg(long)]
    email: String,

    #[arg(long, default_value = "")]
    address: String,

    #[arg(long, default_value = "")]
    phone: String,

    #[arg(long, default_value = "")]
    country: String,

    /// Document types, comma separated (default: all)
    #[arg(short, long, value_delimiter = ',')]
    types: Vec<DocumentType>,
}

impl ClientFields {
    fn into_new_client(self) -> NewClient {
        let document_types = if self.types.is_empty() {
            registry::list_types()
        } else {
            self.types
        };

        NewClient {
            name: self.name,
            email: self.email,
            address: self.address,
            phone: self.phone,
            country: self.country,
            document_types,
        }
    }
}

pub fn run(args: ClientArgs, mut ctx: Context) -> anyhow::Result<()> {
    match args.command {
        ClientCommand::Add(fields) => {
            let client = ctx.store.create_client(fields.into_new_client())?;
            ctx.save()?;
            println!(
                "{} Created client {} ({})",
                style("✓").green(),
                style(&client.name).bold(),
                client.id
            );
        }
        ClientCommand::List { json } => list_clients(&ctx, json)?,
        ClientCommand::Show { id } => {
            let client = ctx
                .store
                .get_client(&id)
                .ok_or_else(|| anyhow::anyhow!("Client not found: {}", id))?;
            println!("{}", serde_json::to_string_pretty(client)?);
        }
        ClientCommand::Edit { id, fields } => {
            let client = ctx.store.update_client(&id, fields.into_new_client())?;
            ctx.save()?;
            println!("{} Updated client {}", style("✓").green(), client.name);
        }
        ClientCommand::Types { id, types } => {
            let client = ctx.store.set_document_types(&id, &types)?;
            ctx.save()?;
            let names: Vec<&str> = client
                .document_types
                .iter()
                .map(|&t| registry::get_config(t).name)
                .collect();
            println!(
                "{} {} now receives: {}",
                style("✓").green(),
                client.name,
                names.join(", ")
            );
        }
        ClientCommand::Remove { id } => {
            let client = ctx.store.delete_client(&id)?;
            ctx.save()?;
            println!(
                "{} Removed client {} and {} orders",
                style("✓").green(),
                client.name,
                client.orders.len()
            );
        }
    }

    Ok(())
}

fn list_clients(ctx: &Context, json: bool) -> anyhow::Result<()> {
    let clients = ctx.store.clients();

    if json {
        println!("{}", serde_json::to_string_pretty(clients)?);
        return Ok(());
    }

    if clients.is_empty() {
        println!("{} No clients yet. Add one with 'comex client add'.", style("ℹ").blue());
        return Ok(());
    }

    println!(
        "{:<38} {:<30} {:<12} {:>6}  {}",
        style("ID").bold(),
        style("NAME").bold(),
        style("COUNTRY").bold(),
        style("ORDERS").bold(),
        style("DOCUMENTS").bold()
    );
    for client in clients {
        let types: Vec<&str> = client.document_types.iter().map(|t| t.as_str()).collect();
        println!(
            "{:<38} {:<30} {:<12} {:>6}  {}",
            client.id,
            client.name,
            client.country,
            client.orders.len(),
            types.join(",")
        );
    }

    Ok(())
}
