//! Types command - list the registered document types.

use clap::Args;
use console::style;

use comex_core::registry;

/// Arguments for the types command.
#[derive(Args)]
pub struct TypesArgs {
    /// Print the full configuration, including default templates, as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: TypesArgs) -> anyhow::Result<()> {
    let configs: Vec<_> = registry::list_types()
        .into_iter()
        .map(registry::get_config)
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&configs)?);
        return Ok(());
    }

    for config in configs {
        println!(
            "{:<12} {}",
            style(config.kind.as_str()).bold(),
            config.name
        );
        println!("    required: {}", config.required_fields.join(", "));
        println!("    optional: {}", config.optional_fields.join(", "));
    }

    Ok(())
}
