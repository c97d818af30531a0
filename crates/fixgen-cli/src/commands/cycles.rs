//! `fixgen cycles`: print the dependency cycles of both datasets

use super::{repodata_table, scaffold_table, CommandContext};
use fixgen_config::CliOverrides;
use fixgen_core::graph::dependency_cycles;
use fixgen_core::{FixResult, PackageTable};

/// Execute the cycles command
pub async fn execute(ctx: &CommandContext) -> FixResult<()> {
    let config = ctx.load_config(&CliOverrides::default()).await?;

    print_cycles("repodata", &repodata_table(&config), ctx);
    print_cycles("scaffold", &scaffold_table(&config), ctx);
    Ok(())
}

/// Print one line per group of mutually dependent names
pub fn print_cycles(label: &str, table: &PackageTable, ctx: &CommandContext) {
    let cycles = dependency_cycles(table);
    ctx.output.info(&format!("{}: {} dependency cycles", label, cycles.len()));

    for cycle in &cycles {
        ctx.output.line(&format!("  {}", format_cycle(cycle)));
    }
}

/// Cycle members as a set, e.g. `{a, b, qux}`
pub fn format_cycle(cycle: &[String]) -> String {
    format!("{{{}}}", cycle.join(", "))
}
