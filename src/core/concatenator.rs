use crate::core::pattern::compile_patterns;
use crate::domain::models::{ConcatConfig, ConcatSummary, FileBody};
use crate::infra::file_system::{read_file_body, relative_display_path, walk_directories};
use crate::infra::output::ReportWriter;
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Writes the concatenation report for `config.root_path` into
/// `config.output_path`, replacing whatever was there.
///
/// The output file is created before the walk starts, so an unwritable
/// destination fails without touching the tree. When the output lives inside
/// the root it is left out of its own report.
pub fn concatenate_files(config: &ConcatConfig) -> anyhow::Result<ConcatSummary> {
    info!(
        "Concatenating files from {} into {}",
        config.root_path, config.output_path
    );
    let writer = ReportWriter::create(&config.output_path)?;
    let output = fs::canonicalize(&config.output_path).ok();
    let (summary, writer) = concatenate_skipping(config, writer, output.as_deref())?;
    writer.finish()?;
    Ok(summary)
}

/// Same as [`concatenate_files`] but writes into an existing sink. The sink is
/// returned unflushed alongside the summary.
pub fn concatenate_into<W: Write>(
    config: &ConcatConfig,
    writer: ReportWriter<W>,
) -> anyhow::Result<(ConcatSummary, ReportWriter<W>)> {
    concatenate_skipping(config, writer, None)
}

fn is_same_file(path: &Path, other: Option<&Path>) -> bool {
    other.is_some_and(|other| fs::canonicalize(path).ok().as_deref() == Some(other))
}

fn concatenate_skipping<W: Write>(
    config: &ConcatConfig,
    mut writer: ReportWriter<W>,
    output: Option<&Path>,
) -> anyhow::Result<(ConcatSummary, ReportWriter<W>)> {
    let root = Path::new(&config.root_path);
    let patterns = compile_patterns(&config.extensions)?;
    let mut summary = ConcatSummary::default();

    writer.write_preamble(config)?;

    let directories_visited = walk_directories(config, |batch| {
        debug!(
            "Matching {} files in {}",
            batch.files.len(),
            batch.dir.display()
        );
        for pattern in &patterns {
            for file in batch.matching(pattern) {
                if is_same_file(&file.path, output) {
                    debug!("Leaving report file out of itself: {}", file.path.display());
                    continue;
                }

                let relative_path = relative_display_path(&file.path, root);
                debug!("Matched {} with {}", relative_path, pattern);

                writer.write_header(&relative_path)?;
                let body = read_file_body(&file.path, config.read_error_policy)?;
                match body {
                    FileBody::Text(_) => {}
                    FileBody::Undecodable => summary.undecodable_files += 1,
                    FileBody::Unreadable(_) => summary.skipped_files += 1,
                }

                writer.write_body(&relative_path, &body)?;
                summary.files_written += 1;
            }
        }
        Ok(())
    })?;
    summary.directories_visited = directories_visited;

    info!(
        "Concatenated {} files ({} undecodable, {} skipped) from {} directories",
        summary.files_written,
        summary.undecodable_files,
        summary.skipped_files,
        summary.directories_visited
    );
    Ok((summary, writer))
}
