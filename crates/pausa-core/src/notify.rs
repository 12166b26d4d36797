//! Desktop notification and tone playback.
//!
//! Both calls are one-way and best-effort: failures are reported on stderr
//! and otherwise ignored, never retried, never fatal. The engine invokes
//! them exactly twice per session (start and end).

use notify_rust::Notification;

use crate::storage::NotificationsConfig;

/// The seam between the timer engine and the desktop.
pub trait Notifier {
    fn notify(&self, title: &str, message: &str);
    fn play_tone(&self);
}

/// Stock tone candidates, tried in order. The first file that exists wins.
const TONE_CANDIDATES: &[(&str, &str)] = &[
    ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
    ("aplay", "/usr/share/sounds/sound-icons/prompt.wav"),
    ("aplay", "/usr/share/sounds/generic.wav"),
];

/// Notifier backed by desktop popups and a system audio player.
pub struct DesktopNotifier {
    config: NotificationsConfig,
}

impl DesktopNotifier {
    pub fn new(config: NotificationsConfig) -> Self {
        Self { config }
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, message: &str) {
        if !self.config.enabled {
            return;
        }
        if let Err(e) = Notification::new()
            .summary(title)
            .body(message)
            .appname("pausa")
            .icon("alarm-clock")
            .show()
        {
            eprintln!("notification error: {e}");
        }
    }

    fn play_tone(&self) {
        if !self.config.sound {
            return;
        }

        let candidate = match &self.config.custom_sound {
            Some(path) => Some(("paplay", path.clone())),
            None => TONE_CANDIDATES
                .iter()
                .find(|(_, file)| std::path::Path::new(file).exists())
                .map(|(cmd, file)| (*cmd, (*file).to_string())),
        };

        let Some((cmd, file)) = candidate else {
            return;
        };

        // Detached so playback never suspends ticking.
        if let Err(e) = std::process::Command::new(cmd)
            .arg(file)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
        {
            eprintln!("tone playback error: {e}");
        }
    }
}

/// No-op notifier for headless use and engine tests.
#[derive(Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _title: &str, _message: &str) {}
    fn play_tone(&self) {}
}
