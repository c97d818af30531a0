//! `fixgen check`: verify a repodata file

use super::{cycles::print_cycles, CommandContext};
use camino::Utf8Path;
use fixgen_core::{datasets, FixResult, FixtureError};
use fixgen_repodata::{read_repodata, verify, Inconsistency};

/// Execute the check command
pub async fn execute(path: &Utf8Path, ctx: &CommandContext) -> FixResult<()> {
    let path = ctx.resolve(path);
    let document = read_repodata(path.as_std_path())?;

    let (warnings, errors): (Vec<_>, Vec<_>) =
        verify(&document).into_iter().partition(Inconsistency::is_warning);
    for warning in &warnings {
        ctx.output.warn(&warning.to_string());
    }
    if !errors.is_empty() {
        for problem in &errors {
            ctx.output.error(&problem.to_string());
        }
        return Err(FixtureError::InconsistentRepodata {
            path: path.to_string(),
            count: errors.len(),
        });
    }

    let table = document.to_table();
    ctx.output.success(&format!("{} packages in {} are consistent", table.len(), path));

    let unknown = table.unknown_dependencies(datasets::EXTERNAL);
    if !unknown.is_empty() {
        let names: Vec<&str> = unknown.iter().map(String::as_str).collect();
        ctx.output.warn(&format!("No package provides: {}", names.join(", ")));
    }

    print_cycles(path.as_str(), &table, ctx);
    Ok(())
}
