use std::io::Write;

use super::OutcomeRecord;

pub(crate) fn export_to_json_impl(
    records: &[OutcomeRecord],
    mut writer: impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}
