//! The interactive session loop.
//!
//! A stdin reader thread feeds lines into an mpsc channel; the main thread
//! drains it with `recv_timeout` against a one-second tick deadline, so
//! ticking and discrete command events interleave on a single thread of
//! control. All timer mutations happen here.

use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use pausa_core::{
    Config, DesktopNotifier, DurationConfig, Event, HistoryLog, Phase, PresetStore, SavedPreset,
    Timer,
};

use super::preset::describe;

const TICK: Duration = Duration::from_secs(1);

/// One parsed line of in-session input.
enum Command {
    Pause,
    Resume,
    Stop,
    Reset,
    History,
    Stats,
    Help,
    /// Empty line: starts the next session when the timer is idle.
    Confirm,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Command::Confirm,
            "p" | "pause" => Command::Pause,
            "r" | "resume" => Command::Resume,
            "s" | "stop" => Command::Stop,
            "x" | "reset" => Command::Reset,
            "history" => Command::History,
            "stats" => Command::Stats,
            "help" => Command::Help,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// What the user chose after stopping a session.
enum StopOutcome {
    /// Begin a brand-new setup flow.
    Restart,
    /// Leave the process with exit code 0.
    Exit,
}

pub fn run(preset: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let input = spawn_stdin_reader();
    let mut preset_arg = preset;

    loop {
        let durations = select_durations(&config, preset_arg.take(), &input)?;
        match session_loop(durations, &config, &input)? {
            StopOutcome::Restart => continue,
            StopOutcome::Exit => return Ok(()),
        }
    }
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn read_line(input: &Receiver<String>) -> Result<String, Box<dyn std::error::Error>> {
    input.recv().map_err(|_| "input closed".into())
}

// ── Setup flow ───────────────────────────────────────────────────────

/// Collect a [`DurationConfig`] from a preset or the interactive prompts.
fn select_durations(
    config: &Config,
    preset_arg: Option<usize>,
    input: &Receiver<String>,
) -> Result<DurationConfig, Box<dyn std::error::Error>> {
    let store = PresetStore::open_default()?;
    let presets = store.load_all();

    if let Some(index) = preset_arg {
        match presets.get(index.wrapping_sub(1)) {
            Some(preset) if index >= 1 => return Ok(preset.config),
            _ => println!("no preset #{index} ({} saved)", presets.len()),
        }
    }

    if !presets.is_empty() {
        for (i, preset) in presets.iter().enumerate() {
            println!("{}. {}", i + 1, describe(&preset.config));
        }
        loop {
            prompt(&format!(
                "load preset [1-{}], or press enter to set durations manually: ",
                presets.len()
            ))?;
            let line = read_line(input)?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }
            match trimmed.parse::<usize>() {
                Ok(index) if index >= 1 && index <= presets.len() => {
                    return Ok(presets[index - 1].config);
                }
                _ => println!("invalid preset index"),
            }
        }
    }

    let defaults = config.duration_config();
    let durations = DurationConfig::new(
        prompt_number(input, "work seconds", defaults.work_secs)?,
        prompt_number(input, "short break seconds", defaults.short_break_secs)?,
        prompt_number(input, "long break seconds", defaults.long_break_secs)?,
        prompt_number(input, "cycles before long break", defaults.cycles_before_long_break)?,
    );

    prompt("save these durations as a preset? [y/N] ")?;
    let answer = read_line(input)?;
    if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        store.append(SavedPreset { config: durations })?;
        println!("saved preset {}", store.load_all().len());
    }

    Ok(durations)
}

/// Prompt for one positive integer; blank, unparsable, or zero input falls
/// back to the default.
fn prompt_number(
    input: &Receiver<String>,
    label: &str,
    default: u32,
) -> Result<u32, Box<dyn std::error::Error>> {
    prompt(&format!("{label} [{default}]: "))?;
    let line = read_line(input)?;
    Ok(match line.trim().parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => default,
    })
}

fn prompt(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    print!("{text}");
    std::io::stdout().flush()?;
    Ok(())
}

// ── Session loop ─────────────────────────────────────────────────────

fn session_loop(
    durations: DurationConfig,
    config: &Config,
    input: &Receiver<String>,
) -> Result<StopOutcome, Box<dyn std::error::Error>> {
    let history = HistoryLog::open_default()?;
    let notifier = DesktopNotifier::new(config.notifications.clone());
    let mut timer = Timer::new(durations, Box::new(history), Box::new(notifier));

    timer.start();
    announce_start(&timer);
    print_help();

    let mut next_tick = Instant::now() + TICK;
    loop {
        let timeout = next_tick.saturating_duration_since(Instant::now());
        match input.recv_timeout(timeout) {
            Err(RecvTimeoutError::Timeout) => {
                next_tick += TICK;
                match timer.tick()? {
                    Some(Event::SessionCompleted {
                        completed_phase, ..
                    }) => {
                        println!();
                        match completed_phase {
                            Phase::OnBreak => println!("break over"),
                            _ => println!("work session complete"),
                        }
                        println!("press enter to start the next session");
                    }
                    _ => {
                        if timer.is_running() && !timer.is_paused() {
                            print_remaining(&timer)?;
                        }
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => return Ok(StopOutcome::Exit),
            Ok(line) => match Command::parse(&line) {
                Command::Pause => {
                    if timer.pause().is_some() {
                        println!("paused at {}", clock(timer.remaining_secs()));
                    } else {
                        println!("nothing to pause");
                    }
                }
                Command::Resume => {
                    if timer.resume().is_some() {
                        println!("resumed at {}", clock(timer.remaining_secs()));
                    } else {
                        println!("nothing to resume");
                    }
                }
                Command::Stop => {
                    if timer.stop().is_some() {
                        return prompt_restart(input);
                    }
                    println!("no session running");
                }
                Command::Reset => {
                    timer.reset();
                    println!("timer reset; press enter to start session 1");
                }
                Command::History => match HistoryLog::open_default()?.read()? {
                    Some(contents) => print!("{contents}"),
                    None => println!("no history yet"),
                },
                Command::Stats => {
                    println!("{}", serde_json::to_string_pretty(&timer.stats())?);
                }
                Command::Help => print_help(),
                Command::Confirm => {
                    if timer.start().is_some() {
                        announce_start(&timer);
                    }
                }
                Command::Unknown(cmd) => {
                    println!("unrecognized command: {cmd}");
                    print_help();
                }
            },
        }
    }
}

/// Restart-or-exit prompt after a stop; invalid answers re-prompt.
fn prompt_restart(input: &Receiver<String>) -> Result<StopOutcome, Box<dyn std::error::Error>> {
    loop {
        prompt("start a new session? [Y/N] ")?;
        let answer = read_line(input)?;
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(StopOutcome::Restart),
            "n" | "no" => return Ok(StopOutcome::Exit),
            _ => println!("please answer Y or N"),
        }
    }
}

fn announce_start(timer: &Timer) {
    let label = match timer.phase() {
        Phase::OnBreak => "break",
        _ => "work",
    };
    println!(
        "session {}: {} for {}",
        timer.session_number(),
        label,
        clock(timer.remaining_secs())
    );
}

fn print_remaining(timer: &Timer) -> Result<(), Box<dyn std::error::Error>> {
    print!("\r  {} remaining   ", clock(timer.remaining_secs()));
    std::io::stdout().flush()?;
    Ok(())
}

fn print_help() {
    println!("commands: p pause, r resume, s stop, x reset, history, stats, help");
}

fn clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
