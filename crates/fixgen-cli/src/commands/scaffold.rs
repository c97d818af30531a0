//! `fixgen scaffold`: write the setup.py projects and upload them

use super::CommandContext;
use fixgen_config::CliOverrides;
use fixgen_core::{datasets, FixResult};
use fixgen_scaffold::{CommandUploader, NoopUploader, Scaffolder, Uploader};

/// Execute the scaffold command
pub async fn execute(overrides: &CliOverrides, ctx: &CommandContext) -> FixResult<()> {
    let config = ctx.load_config(overrides).await?;
    let section = &config.scaffold;

    let projects = if section.projects.is_empty() {
        datasets::scaffold_projects()
    } else {
        section.projects.clone()
    };

    let uploader: Box<dyn Uploader> = if section.upload_enabled() {
        Box::new(CommandUploader::new(section.python(), section.repository()))
    } else {
        Box::new(NoopUploader)
    };

    let root = ctx.resolve(&section.root_dir());
    let scaffolder = Scaffolder::new(root.as_std_path(), uploader);
    let summary = scaffolder.run(&projects)?;

    for report in summary.reports.iter().filter(|r| !r.is_complete()) {
        ctx.output.warn(&format!(
            "{}: {} files or directories could not be written",
            report.folder,
            report.errors.len()
        ));
    }

    ctx.output.success(&format!(
        "Scaffolded {} projects in {} ({} uploaded)",
        summary.scaffolded(),
        root,
        summary.uploaded
    ));
    Ok(())
}
