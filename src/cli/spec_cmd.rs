//! Spec commands: create, process, labels

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::output::Output;
use crate::domain::{PositionLabel, Spec};
use crate::process::SpecProcessor;
use crate::storage::{read_spec, write_spec, BookConfig, GlobalConfig};

/// Builds a raw spec from a book file
pub fn create(
    output: &Output,
    global: &GlobalConfig,
    book_path: &Path,
    out: Option<&Path>,
) -> Result<()> {
    let book = BookConfig::load(book_path)?;
    let base = book_path.parent().unwrap_or_else(|| Path::new("."));
    output.verbose_ctx(
        "create",
        &format!(
            "Loading {} game(s) from {}",
            book.games.len(),
            base.display()
        ),
    );

    let options = book.into_book_options(base, global.spec_options())?;
    let spec = Spec::create(options).context("Failed to create spec")?;

    write_spec(&spec, out)?;
    if let Some(path) = out {
        output.success(&format!(
            "Created spec with {} game(s) at {}",
            spec.sgf_mapping.len(),
            path.display()
        ));
    }
    Ok(())
}

/// Expands every position in a spec
pub fn process(output: &Output, spec_path: &Path, out: Option<&Path>) -> Result<()> {
    let spec = read_spec(spec_path)?;
    output.verbose_ctx(
        "process",
        &format!(
            "Processing {} game(s) with {:?} ids",
            spec.sgf_mapping.len(),
            spec.spec_options.id_gen_type
        ),
    );

    let processed = SpecProcessor::new(&spec)
        .process()
        .with_context(|| format!("Failed to process spec: {}", spec_path.display()))?;

    write_spec(&processed, out)?;
    if let Some(path) = out {
        let count = processed.root_grouping.generated_positions().count();
        output.success(&format!("Generated {} position(s) at {}", count, path.display()));
    }
    Ok(())
}

#[derive(Serialize)]
struct LabelSummary<'a> {
    id: &'a str,
    labels: BTreeMap<PositionLabel, Vec<String>>,
}

/// Lists the labels of every generated set
pub fn labels(output: &Output, spec_path: &Path) -> Result<()> {
    let spec = read_spec(spec_path)?;

    let summaries: Vec<_> = spec
        .root_grouping
        .descendants()
        .into_iter()
        .flat_map(|g| g.generated.values())
        .map(|gen| LabelSummary {
            id: &gen.id,
            labels: gen.position_labels(),
        })
        .collect();

    if summaries.is_empty() {
        output.verbose_ctx("labels", "No generated positions; was the spec processed?");
    }

    if output.is_json() {
        output.data(&summaries);
        return Ok(());
    }

    for summary in &summaries {
        for (label, ids) in &summary.labels {
            let count = ids.len().to_string();
            output.row(&[summary.id, label.as_str(), &count, &ids.join(",")]);
        }
    }
    Ok(())
}
