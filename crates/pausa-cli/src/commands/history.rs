use pausa_core::HistoryLog;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let log = HistoryLog::open_default()?;
    match log.read()? {
        Some(contents) => print!("{contents}"),
        None => println!("no history yet"),
    }
    Ok(())
}
