//! Export, import, statistics and clearing of the stored data.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use super::Context;

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// Export file to read
    input: PathBuf,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Do not ask for confirmation
    #[arg(long)]
    yes: bool,
}

pub fn export(args: ExportArgs, ctx: Context) -> anyhow::Result<()> {
    let json = ctx.store.export_data()?;

    match &args.output {
        Some(path) => {
            fs::write(path, &json)?;
            println!(
                "{} Exported {} clients to {}",
                style("✓").green(),
                ctx.store.clients().len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

pub fn import(args: ImportArgs, mut ctx: Context) -> anyhow::Result<()> {
    let json = fs::read_to_string(&args.input)?;
    let count = ctx.store.import_data(&json)?;
    ctx.save()?;

    println!(
        "{} Imported {} clients from {}",
        style("✓").green(),
        count,
        args.input.display()
    );
    Ok(())
}

pub fn stats(ctx: Context) -> anyhow::Result<()> {
    let stats = ctx.store.stats();

    println!("Clients:             {}", stats.total_clients);
    println!("Orders:              {}", stats.total_orders);
    println!("Generated documents: {}", stats.total_generated_docs);
    println!("Storage used:        {}", stats.storage_used);
    println!(
        "Data directory:      {}",
        ctx.config.storage.data_dir.display()
    );
    Ok(())
}

pub fn clear(args: ClearArgs, mut ctx: Context) -> anyhow::Result<()> {
    if !args.yes {
        eprint!("Delete all clients and orders? [y/N] ");
        let confirmed = console::Term::stderr()
            .read_line()
            .map(|line| {
                let answer = line.trim().to_lowercase();
                answer == "y" || answer == "yes"
            })
            .unwrap_or(false);
        if !confirmed {
            println!("{} Aborted, nothing was deleted.", style("ℹ").blue());
            return Ok(());
        }
    }

    ctx.clear()?;
    println!("{} All client data deleted.", style("✓").green());
    Ok(())
}
