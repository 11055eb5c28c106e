/// Editing session — the single owner of a script, its beat board and the
/// open panel.
///
/// The session executes commands and reports what the presentation layer
/// should do as a list of `Effect`s. It never renders anything itself.

use serde::Serialize;

use crate::core::beat_board::BeatSequence;
use crate::core::buffer::ScriptBuffer;
use crate::core::commands::{Command, CommandRegistry};
use crate::core::config::{ConfigError, StudioConfig};
use crate::core::file_io::{self, ExportArtifact, FileIo};
use crate::core::presenter::{self, MythologyModel, PsychologyModel};
use crate::core::suggest::{
    self, SuggestionError, SuggestionRequest, SuggestionSlot, SuggestionState, SuggestionTicket,
};
use crate::schema::format::{ExportFormat, ImportFormat};
use crate::schema::panel::Panel;

pub const COLLABORATION_INVITE: &str = "Share your script (demo only)";
pub const COLLABORATION_NOTE: &str = "(Realtime editing requires server)";

/// Content of an open panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum PanelView {
    Psychology { model: PsychologyModel },
    Mythology { model: MythologyModel },
    Collaboration { invite: String, note: String },
    BeatBoard { beats: Vec<String> },
    AiSuggestions {
        suggestion: SuggestionState,
        /// What the panel body shows: the waiting text or the suggestion.
        message: String,
    },
}

impl PanelView {
    pub fn panel(&self) -> Panel {
        match self {
            Self::Psychology { .. } => Panel::Psychology,
            Self::Mythology { .. } => Panel::Mythology,
            Self::Collaboration { .. } => Panel::Collaboration,
            Self::BeatBoard { .. } => Panel::BeatBoard,
            Self::AiSuggestions { .. } => Panel::AiSuggestions,
        }
    }

    pub fn suggestions(suggestion: SuggestionState) -> Self {
        let message = match &suggestion {
            SuggestionState::Idle => String::new(),
            SuggestionState::Waiting => suggest::WAITING.to_string(),
            SuggestionState::Ready(text) => text.clone(),
        };
        Self::AiSuggestions {
            suggestion,
            message,
        }
    }
}

/// An instruction for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", content = "value", rename_all = "snake_case")]
pub enum Effect {
    /// Short-lived toast message.
    Notice(String),
    /// Persistent status line text.
    Status(String),
    OpenPanel(PanelView),
    ClosePanels,
    Download(ExportArtifact),
    CopyToClipboard(String),
    SendSuggestion(SuggestionRequest),
    DarkMode(bool),
}

pub struct Session {
    buffer: ScriptBuffer,
    beats: BeatSequence,
    open_panel: Option<Panel>,
    dark_mode: bool,
    suggestion: SuggestionSlot,
    commands: CommandRegistry,
    config: StudioConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            buffer: ScriptBuffer::default(),
            beats: BeatSequence::default(),
            open_panel: None,
            dark_mode: false,
            suggestion: SuggestionSlot::default(),
            commands: CommandRegistry::with_defaults(),
            config: StudioConfig::default(),
        }
    }
}

impl Session {
    pub fn new(config: StudioConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            buffer: ScriptBuffer::default(),
            beats: BeatSequence::with_seed(config.seed_beats.iter().cloned()),
            open_panel: None,
            dark_mode: false,
            suggestion: SuggestionSlot::default(),
            commands: CommandRegistry::from_config(&config)?,
            config,
        })
    }

    pub fn buffer(&self) -> &ScriptBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut ScriptBuffer {
        &mut self.buffer
    }

    pub fn beats(&self) -> &BeatSequence {
        &self.beats
    }

    pub fn open_panel(&self) -> Option<Panel> {
        self.open_panel
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn suggestion_state(&self) -> SuggestionState {
        self.suggestion.state()
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Run the command bound to a key event, if any.
    pub fn handle_key(&mut self, key: &str, ctrl: bool) -> Option<Vec<Effect>> {
        let command = self.commands.resolve(key, ctrl)?;
        Some(self.execute(command))
    }

    /// Run a command by its action name.
    pub fn execute_named(&mut self, name: &str) -> Option<Vec<Effect>> {
        let command = Command::from_name(name)?;
        Some(self.execute(command))
    }

    pub fn execute(&mut self, command: Command) -> Vec<Effect> {
        log::debug!("executing {}", command.name());
        match command {
            Command::ShowPsychology => {
                let model = presenter::analyze_psychology(self.buffer.current_text());
                self.open(PanelView::Psychology { model })
            }
            Command::ShowMythology => {
                let model = presenter::analyze_mythology(self.buffer.current_text());
                self.open(PanelView::Mythology { model })
            }
            Command::ShowCollaboration => self.open(PanelView::Collaboration {
                invite: COLLABORATION_INVITE.to_string(),
                note: COLLABORATION_NOTE.to_string(),
            }),
            Command::ShowBeatBoard => self.open(self.beat_board_view()),
            Command::RequestSuggestion => self.request_suggestion(),
            Command::ExportPdf => self.export(ExportFormat::Pdf),
            Command::ExportText => self.export(ExportFormat::Text),
            Command::ExportFountain => self.export(ExportFormat::Fountain),
            Command::CopyDraft => vec![
                Effect::CopyToClipboard(self.buffer.current_text().to_string()),
                Effect::Notice("Draft copied to clipboard!".to_string()),
            ],
            Command::CopyScript => vec![
                Effect::CopyToClipboard(self.buffer.current_text().to_string()),
                Effect::Notice("Script copied to clipboard!".to_string()),
            ],
            Command::NewScript => {
                self.buffer.clear();
                self.close_panels();
                vec![
                    Effect::Status("New blank script. Start writing!".to_string()),
                    Effect::Notice("Blank screenplay ready.".to_string()),
                    Effect::ClosePanels,
                ]
            }
            Command::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
                let notice = if self.dark_mode {
                    "Dark mode on!"
                } else {
                    "Light mode!"
                };
                vec![
                    Effect::DarkMode(self.dark_mode),
                    Effect::Notice(notice.to_string()),
                ]
            }
            Command::ClosePanels => {
                self.close_panels();
                vec![Effect::ClosePanels]
            }
        }
    }

    /// Close one panel, as when Escape is pressed inside it.
    pub fn close_panel(&mut self, panel: Panel) -> Vec<Effect> {
        if self.open_panel != Some(panel) {
            return Vec::new();
        }
        self.close_panels();
        vec![Effect::ClosePanels]
    }

    /// Add a beat and refresh the beat board.
    pub fn add_beat(&mut self, label: &str) -> Vec<Effect> {
        self.beats.append(label);
        self.refresh_beat_board()
    }

    /// Drop the beat dragged from `source` onto `destination`.
    pub fn move_beat(&mut self, source: usize, destination: usize) -> Vec<Effect> {
        self.beats.move_beat(source, destination);
        self.refresh_beat_board()
    }

    /// Replace the script with the contents of a file. On failure the
    /// script and panels are left exactly as they were.
    pub fn import(&mut self, file_name: &str, io: &dyn FileIo) -> Vec<Effect> {
        let mut effects = Vec::new();
        match file_io::detect_import_format(file_name) {
            Ok(ImportFormat::Pdf) => effects.push(Effect::Notice("Importing PDF…".to_string())),
            Ok(ImportFormat::PlainText) => {}
            Err(e) => {
                log::warn!("rejected import of {}: {}", file_name, e);
                effects.push(Effect::Notice(e.to_string()));
                return effects;
            }
        }

        match file_io::import_text(file_name, io) {
            Ok(text) => {
                self.buffer.replace_text(text);
                self.close_panels();
                effects.push(Effect::Status(format!("Imported {file_name}")));
                effects.push(Effect::Notice(format!("Script imported: {file_name}")));
                effects.push(Effect::ClosePanels);
            }
            Err(e) => {
                log::warn!("import of {} failed: {}", file_name, e);
                effects.push(Effect::Notice(e.to_string()));
            }
        }
        effects
    }

    /// Deliver the result of a suggestion call. Stale tickets are ignored.
    pub fn complete_suggestion(
        &mut self,
        ticket: SuggestionTicket,
        result: Result<String, SuggestionError>,
    ) -> Vec<Effect> {
        match self.suggestion.complete(ticket, result) {
            Some(_) if self.open_panel == Some(Panel::AiSuggestions) => {
                vec![Effect::OpenPanel(PanelView::suggestions(self.suggestion.state()))]
            }
            _ => Vec::new(),
        }
    }

    fn request_suggestion(&mut self) -> Vec<Effect> {
        self.close_panels();
        let request = self
            .suggestion
            .begin(self.buffer.current_text(), &self.config.suggestion);
        self.open_panel = Some(Panel::AiSuggestions);
        vec![
            Effect::ClosePanels,
            Effect::OpenPanel(PanelView::suggestions(self.suggestion.state())),
            Effect::SendSuggestion(request),
        ]
    }

    fn export(&self, format: ExportFormat) -> Vec<Effect> {
        let artifact = file_io::export(self.buffer.current_text(), format, &self.config.pdf);
        vec![
            Effect::Download(artifact),
            Effect::Notice(format.notice().to_string()),
        ]
    }

    fn beat_board_view(&self) -> PanelView {
        PanelView::BeatBoard {
            beats: self.beats.read(),
        }
    }

    fn refresh_beat_board(&mut self) -> Vec<Effect> {
        if self.open_panel == Some(Panel::BeatBoard) {
            vec![Effect::OpenPanel(self.beat_board_view())]
        } else {
            Vec::new()
        }
    }

    fn open(&mut self, view: PanelView) -> Vec<Effect> {
        self.close_panels();
        self.open_panel = Some(view.panel());
        vec![Effect::ClosePanels, Effect::OpenPanel(view)]
    }

    fn close_panels(&mut self) {
        if self.open_panel == Some(Panel::AiSuggestions) {
            self.suggestion.cancel();
        }
        self.open_panel = None;
    }
}

/// Hand text downloads in `effects` to the collaborator and return the
/// effects still left for the presentation layer.
pub fn deliver_downloads(effects: Vec<Effect>, io: &dyn FileIo) -> Vec<Effect> {
    effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::Download(artifact) => file_io::deliver(artifact, io).map(Effect::Download),
            other => Some(other),
        })
        .collect()
}
