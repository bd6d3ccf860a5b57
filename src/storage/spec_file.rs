//! Reading and writing spec JSON files

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::Spec;

/// Reads a spec; `-` reads stdin
pub fn read_spec(path: &Path) -> Result<Spec> {
    let content = if path == Path::new("-") {
        io::read_to_string(io::stdin()).context("Failed to read spec from stdin")?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read spec: {}", path.display()))?
    };
    Spec::deserialize_json(&content)
        .with_context(|| format!("Failed to parse spec: {}", path.display()))
}

/// Writes a spec as pretty JSON to `path`, or stdout when there is none.
///
/// Files are written to a temp file first and renamed into place.
pub fn write_spec(spec: &Spec, path: Option<&Path>) -> Result<()> {
    let json = spec.serialize_json().context("Failed to serialize spec")?;

    let Some(path) = path else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", json).context("Failed to write spec to stdout")?;
        return Ok(());
    };

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, format!("{}\n", json))
        .with_context(|| format!("Failed to write spec: {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to move spec into place: {}", path.display()))
}
