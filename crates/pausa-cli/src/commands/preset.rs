use clap::Subcommand;
use pausa_core::{DurationConfig, PresetStore, SavedPreset};

#[derive(Subcommand)]
pub enum PresetAction {
    /// List saved presets
    List,
    /// Save a new preset
    Save {
        /// Work interval in seconds
        #[arg(long)]
        work: u32,
        /// Short break in seconds
        #[arg(long)]
        short_break: u32,
        /// Long break in seconds
        #[arg(long)]
        long_break: u32,
        /// Work sessions before a long break
        #[arg(long)]
        cycles: u32,
    },
}

pub fn run(action: PresetAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = PresetStore::open_default()?;

    match action {
        PresetAction::List => {
            let presets = store.load_all();
            if presets.is_empty() {
                println!("no presets saved");
            } else {
                for (i, preset) in presets.iter().enumerate() {
                    println!("{}. {}", i + 1, describe(&preset.config));
                }
            }
        }
        PresetAction::Save {
            work,
            short_break,
            long_break,
            cycles,
        } => {
            if work == 0 || short_break == 0 || long_break == 0 || cycles == 0 {
                return Err("all durations and the cycle count must be positive".into());
            }
            let config = DurationConfig::new(work, short_break, long_break, cycles);
            store.append(SavedPreset { config })?;
            println!("saved preset {}", store.load_all().len());
        }
    }
    Ok(())
}

pub fn describe(config: &DurationConfig) -> String {
    format!(
        "work {}s, short break {}s, long break {}s, {} cycles",
        config.work_secs,
        config.short_break_secs,
        config.long_break_secs,
        config.cycles_before_long_break
    )
}
