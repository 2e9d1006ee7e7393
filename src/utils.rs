use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::schedule::Schedule;

/// Write one CSV row per actuator trigger, in schedule order.
pub fn export_schedule_to_csv(path: impl AsRef<Path>, schedule: &Schedule) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "onset_ms,line,column,intensity,duration_ms")?;
    for (onset, step) in schedule.triggers() {
        writeln!(
            writer,
            "{},{},{},{},{}",
            onset, step.line, step.column, step.intensity, step.duration
        )?;
    }
    writer.flush()
}
