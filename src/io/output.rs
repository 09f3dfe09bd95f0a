use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::RecordSet;

/// Write the two dataset tables into `out_dir`
///
/// Returns the paths actually written. A table with no records is not
/// written at all.
pub fn write_tables(records: &RecordSet, out_dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    let mut written = Vec::new();

    if !records.pairs.is_empty() || !records.chains.is_empty() {
        let path = out_dir.join("conversations.csv");
        write_conversations(&path, records)?;
        written.push(path);
    }

    if !records.orphans.is_empty() {
        let path = out_dir.join("no_response.csv");
        let mut file = create_file(&path)?;
        write_section(&mut file, &records.orphans)?;
        written.push(path);
    }

    Ok(written)
}

/// Conversations table: the pair section, then the chain section, each with
/// its own header row and separated by one blank line
fn write_conversations(path: &Path, records: &RecordSet) -> Result<()> {
    let mut file = create_file(path)?;

    if !records.pairs.is_empty() {
        write_section(&mut file, &records.pairs)?;
    }

    if !records.chains.is_empty() {
        if !records.pairs.is_empty() {
            writeln!(file).context("Failed to write section separator")?;
        }
        write_section(&mut file, &records.chains)?;
    }

    Ok(())
}

fn create_file(path: &Path) -> Result<std::fs::File> {
    std::fs::File::create(path).with_context(|| format!("Failed to create file: {:?}", path))
}

/// Serialize one record shape as a header'd CSV section
fn write_section<T: Serialize>(file: &mut std::fs::File, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(&mut *file);
    for row in rows {
        writer.serialize(row).context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}
