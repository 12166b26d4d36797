use pausa_core::{HistoryLog, TotalsSnapshot};

/// Running totals live in the final history block; with no history yet the
/// report is all zeros.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let log = HistoryLog::open_default()?;
    let totals = log.last_totals()?.unwrap_or(TotalsSnapshot::default());
    println!("{}", serde_json::to_string_pretty(&totals)?);
    Ok(())
}
