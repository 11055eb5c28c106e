/// Command registry — named editor actions and the keys bound to them.
///
/// Input adapters translate physical key events into a `KeyChord` and
/// ask the registry for the command. The session never sees keys.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::config::{ConfigError, StudioConfig};

/// Every action a key or toolbar button can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ShowPsychology,
    ShowMythology,
    ShowCollaboration,
    ShowBeatBoard,
    RequestSuggestion,
    ExportPdf,
    ExportText,
    ExportFountain,
    CopyDraft,
    CopyScript,
    NewScript,
    ToggleDarkMode,
    ClosePanels,
}

impl Command {
    pub const ALL: [Command; 13] = [
        Self::ShowPsychology,
        Self::ShowMythology,
        Self::ShowCollaboration,
        Self::ShowBeatBoard,
        Self::RequestSuggestion,
        Self::ExportPdf,
        Self::ExportText,
        Self::ExportFountain,
        Self::CopyDraft,
        Self::CopyScript,
        Self::NewScript,
        Self::ToggleDarkMode,
        Self::ClosePanels,
    ];

    /// Stable action name, e.g. `"show_beat_board"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShowPsychology => "show_psychology",
            Self::ShowMythology => "show_mythology",
            Self::ShowCollaboration => "show_collaboration",
            Self::ShowBeatBoard => "show_beat_board",
            Self::RequestSuggestion => "request_suggestion",
            Self::ExportPdf => "export_pdf",
            Self::ExportText => "export_text",
            Self::ExportFountain => "export_fountain",
            Self::CopyDraft => "copy_draft",
            Self::CopyScript => "copy_script",
            Self::NewScript => "new_script",
            Self::ToggleDarkMode => "toggle_dark_mode",
            Self::ClosePanels => "close_panels",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// A key plus the Ctrl modifier. Key names are stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub ctrl: bool,
    pub key: String,
}

impl KeyChord {
    pub fn new(key: &str, ctrl: bool) -> Self {
        Self {
            ctrl,
            key: key.to_lowercase(),
        }
    }

    /// Parse `"ctrl+p"`, `"Ctrl+Shift"`... only `ctrl` is recognised as a
    /// modifier.
    pub fn parse(s: &str) -> Option<Self> {
        let mut ctrl = false;
        let mut key = None;
        for part in s.split('+').map(str::trim) {
            if part.eq_ignore_ascii_case("ctrl") {
                ctrl = true;
            } else if part.is_empty() || key.is_some() {
                return None;
            } else {
                key = Some(part);
            }
        }
        key.map(|k| Self::new(k, ctrl))
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "ctrl+{}", self.key)
        } else {
            f.write_str(&self.key)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    bindings: FxHashMap<KeyChord, Command>,
}

impl CommandRegistry {
    /// The stock key map.
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        for (chord, command) in [
            ("escape", Command::ClosePanels),
            ("ctrl+p", Command::ShowPsychology),
            ("ctrl+m", Command::ShowMythology),
            ("ctrl+c", Command::ShowCollaboration),
            ("ctrl+b", Command::ShowBeatBoard),
            ("ctrl+a", Command::RequestSuggestion),
            ("ctrl+e", Command::ExportPdf),
        ] {
            if let Some(chord) = KeyChord::parse(chord) {
                registry.bind(chord, command);
            }
        }
        registry
    }

    /// Defaults with the config's overrides applied on top.
    pub fn from_config(config: &StudioConfig) -> Result<Self, ConfigError> {
        let mut registry = Self::with_defaults();
        for (chord, action) in &config.key_bindings {
            let parsed = KeyChord::parse(chord)
                .ok_or_else(|| ConfigError::InvalidBinding(chord.clone()))?;
            let command = Command::from_name(action)
                .ok_or_else(|| ConfigError::InvalidBinding(format!("{chord} = {action}")))?;
            registry.bind(parsed, command);
        }
        Ok(registry)
    }

    pub fn bind(&mut self, chord: KeyChord, command: Command) {
        self.bindings.insert(chord, command);
    }

    /// Look up the command for a key event.
    pub fn resolve(&self, key: &str, ctrl: bool) -> Option<Command> {
        self.bindings.get(&KeyChord::new(key, ctrl)).copied()
    }

    /// Bindings as `(chord, action)` pairs, sorted by chord.
    pub fn bindings(&self) -> Vec<(String, &'static str)> {
        let mut out: Vec<_> = self
            .bindings
            .iter()
            .map(|(chord, command)| (chord.to_string(), command.name()))
            .collect();
        out.sort();
        out
    }
}
