use anyhow::Context as _;

use crate::formats::BookRecord;

/// Write one CSV row per record, header first.
///
/// An empty record list is a valid degraded outcome, not an error; nothing
/// is written and no file is created.
pub fn write_csv(records: &[BookRecord], path: &str) -> anyhow::Result<()> {
    if records.is_empty() {
        tracing::info!("nothing to save");
        return Ok(());
    }

    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create csv output: {path}"))?;

    writer
        .write_record(BookRecord::header())
        .context("write csv header")?;
    for record in records {
        writer.write_record(record.row()).context("write csv row")?;
    }
    writer.flush().context("flush csv output")?;

    tracing::info!(rows = records.len(), path, "saved csv");
    Ok(())
}
