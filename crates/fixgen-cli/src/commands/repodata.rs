//! `fixgen repodata`: write the conda repository index

use super::{repodata_table, CommandContext};
use fixgen_config::{CliOverrides, RepodataSection};
use fixgen_core::FixResult;
use fixgen_repodata::{write_repodata, RecordTemplate, RepoData};
use tracing::info;

/// Execute the repodata command
pub async fn execute(overrides: &CliOverrides, ctx: &CommandContext) -> FixResult<()> {
    let config = ctx.load_config(overrides).await?;
    let section = &config.repodata;

    let table = repodata_table(&config);
    let template = record_template(section);
    let version = section.repodata_version.unwrap_or(RepoData::DEFAULT_VERSION);
    let document = RepoData::from_table(&table, &template, version);

    let path = ctx.resolve(&section.output_path());
    info!("Writing {} packages to {}", document.packages.len(), path);
    write_repodata(&document, path.as_std_path(), section.pretty())?;

    ctx.output.success(&format!(
        "Wrote {} packages ({}) to {}",
        document.packages.len(),
        document.info.subdir,
        path
    ));
    Ok(())
}

/// Record metadata from the `[repodata]` section, defaulting unset fields
pub fn record_template(section: &RepodataSection) -> RecordTemplate {
    let defaults = RecordTemplate::default();

    RecordTemplate {
        build: section.build.clone().unwrap_or(defaults.build),
        build_number: section.build_number.unwrap_or(defaults.build_number),
        license: section.license.clone().unwrap_or(defaults.license),
        md5: section.md5.clone().unwrap_or(defaults.md5),
        noarch: section.noarch.clone().unwrap_or(defaults.noarch),
        sha256: section.sha256.clone().unwrap_or(defaults.sha256),
        size: section.size.unwrap_or(defaults.size),
        subdir: section.subdir.clone().unwrap_or(defaults.subdir),
        timestamp: section.timestamp.unwrap_or(defaults.timestamp),
    }
}
