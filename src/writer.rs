use log::info;
use std::path::Path;

use crate::crawler::ReviewRecord;

/// Writes the collected reviews as CSV with a header row. An empty record
/// set is a no-op: the target file is neither created nor truncated.
pub fn write_csv(records: &[ReviewRecord], path: &Path) -> Result<(), csv::Error> {
    if records.is_empty() {
        info!("No reviews collected, leaving {} untouched", path.display());
        return Ok(());
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!("Wrote {} reviews to {}", records.len(), path.display());
    Ok(())
}
