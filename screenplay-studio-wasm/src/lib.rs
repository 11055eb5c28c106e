//! WASM bindings for screenplay-studio — drives the browser editor.
//!
//! Every method that changes the session returns a JSON array of effects
//! for the page to apply (open a panel, show a toast, send a suggestion
//! request...). Text exports are handed straight to the page's
//! `studioHost.download`; PDF layouts come back as `download` effects.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use screenplay_studio::core::config::StudioConfig;
use screenplay_studio::core::file_io::{self, FileIo, ImportError};
use screenplay_studio::core::presenter;
use screenplay_studio::core::suggest::{self, SuggestionError, SuggestionTicket};
use screenplay_studio::schema::format::ImportFormat;
use screenplay_studio::schema::panel::Panel;
use screenplay_studio::{deliver_downloads, Effect, Session};

// ---------------------------------------------------------------------------
// Embedded data — compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const DEFAULT_CONFIG: &str = include_str!("../../studio_data/default_config.ron");
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = studioHost, js_name = download)]
    fn host_download(content: &str, file_name: &str, mime_type: &str);
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("screenplay studio module initialized");
    }
}

// ---------------------------------------------------------------------------
// File contents handed over by the page
// ---------------------------------------------------------------------------

/// The page reads files itself (FileReader, pdf.js) and passes the result
/// in. Downloads are handed back to the page's host object.
#[derive(Default)]
struct HandedOver {
    text: Option<String>,
    pages: Option<Vec<Vec<String>>>,
}

impl FileIo for HandedOver {
    fn read_as_text(&self, file_name: &str) -> Result<String, ImportError> {
        self.text
            .clone()
            .ok_or_else(|| ImportError::Read(format!("{file_name} was not read as text")))
    }

    fn read_as_pdf_pages(&self, file_name: &str) -> Result<Vec<Vec<String>>, ImportError> {
        self.pages
            .clone()
            .ok_or_else(|| ImportError::Read(format!("{file_name} was not read as PDF")))
    }

    fn download(&self, content: &str, file_name: &str, mime_type: &str) {
        log::info!("downloading {file_name}");
        host_download(content, file_name, mime_type);
    }
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------
fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

fn effects_to_json(effects: Vec<Effect>) -> Result<String, JsError> {
    to_json(&deliver_downloads(effects, &HandedOver::default()))
}

fn parse_panel(s: &str) -> Option<Panel> {
    match s {
        "psychology" => Some(Panel::Psychology),
        "mythology" => Some(Panel::Mythology),
        "collaboration" => Some(Panel::Collaboration),
        "beat_board" | "beatboard" => Some(Panel::BeatBoard),
        "ai_suggestions" | "ai" => Some(Panel::AiSuggestions),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// StudioApp — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct StudioApp {
    session: Session,
}

#[wasm_bindgen]
impl StudioApp {
    /// Create a session. `config_ron` overrides the built-in configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config_ron: Option<String>) -> Result<StudioApp, JsError> {
        let source = config_ron.as_deref().unwrap_or(data::DEFAULT_CONFIG);
        let config = StudioConfig::parse_ron(source)
            .map_err(|e| JsError::new(&format!("Config error: {e}")))?;
        let session =
            Session::new(config).map_err(|e| JsError::new(&format!("Config error: {e}")))?;
        Ok(StudioApp { session })
    }

    /// The current script text.
    pub fn text(&self) -> String {
        self.session.buffer().current_text().to_string()
    }

    /// Mirror the textarea contents and selection into the session.
    pub fn sync(&mut self, text: &str, selection_start: usize, selection_end: usize) {
        let buffer = self.session.buffer_mut();
        buffer.replace_text(text);
        buffer.set_selection(selection_start, selection_end);
    }

    /// Insert a formatting template ("scene", "shot", "action",
    /// "character", "dialogue") at the cursor. Returns the new cursor.
    pub fn insert_format(&mut self, element: &str) -> usize {
        let buffer = self.session.buffer_mut();
        buffer.insert_format_named(element);
        buffer.cursor()
    }

    /// Run a command by action name, e.g. `"show_beat_board"`.
    pub fn execute(&mut self, action: &str) -> Result<String, JsError> {
        let effects = self
            .session
            .execute_named(action)
            .ok_or_else(|| JsError::new(&format!("Unknown action: {action}")))?;
        effects_to_json(effects)
    }

    /// Run whatever is bound to a key event. Returns `null` when the key is
    /// unbound so the page can let the browser handle it.
    pub fn handle_key(&mut self, key: &str, ctrl: bool) -> Result<Option<String>, JsError> {
        self.session
            .handle_key(key, ctrl)
            .map(effects_to_json)
            .transpose()
    }

    /// Escape pressed inside a panel.
    pub fn close_panel(&mut self, panel: &str) -> Result<String, JsError> {
        let panel =
            parse_panel(panel).ok_or_else(|| JsError::new(&format!("Unknown panel: {panel}")))?;
        to_json(&self.session.close_panel(panel))
    }

    pub fn add_beat(&mut self, label: &str) -> Result<String, JsError> {
        to_json(&self.session.add_beat(label))
    }

    pub fn move_beat(&mut self, source: usize, destination: usize) -> Result<String, JsError> {
        to_json(&self.session.move_beat(source, destination))
    }

    /// JSON array of the current beats.
    pub fn beats(&self) -> Result<String, JsError> {
        to_json(&self.session.beats().read())
    }

    /// How the page should read a file before import: `"plain_text"`,
    /// `"pdf"`, or `null` when the format is not supported.
    pub fn import_format(file_name: &str) -> Option<String> {
        match file_io::detect_import_format(file_name) {
            Ok(ImportFormat::PlainText) => Some("plain_text".to_string()),
            Ok(ImportFormat::Pdf) => Some("pdf".to_string()),
            Err(_) => None,
        }
    }

    /// Import text the page read from a file. Unsupported names produce a
    /// notice effect and leave the script alone.
    pub fn import_text(&mut self, file_name: &str, content: String) -> Result<String, JsError> {
        let io = HandedOver {
            text: Some(content),
            pages: None,
        };
        to_json(&self.session.import(file_name, &io))
    }

    /// Import a PDF given as a JSON array of pages, each an array of text
    /// items.
    pub fn import_pdf(&mut self, file_name: &str, pages_json: &str) -> Result<String, JsError> {
        let pages: Vec<Vec<String>> = serde_json::from_str(pages_json)
            .map_err(|e| JsError::new(&format!("Invalid pages JSON: {e}")))?;
        let io = HandedOver {
            text: None,
            pages: Some(pages),
        };
        to_json(&self.session.import(file_name, &io))
    }

    /// Deliver the raw response body of a suggestion request.
    pub fn complete_suggestion(&mut self, ticket: u64, response: &str) -> Result<String, JsError> {
        let result = suggest::parse_response(response);
        to_json(&self.session.complete_suggestion(SuggestionTicket(ticket), result))
    }

    /// Report that a suggestion request failed in transit.
    pub fn fail_suggestion(&mut self, ticket: u64, message: &str) -> Result<String, JsError> {
        let result = Err(SuggestionError::Transport(message.to_string()));
        to_json(&self.session.complete_suggestion(SuggestionTicket(ticket), result))
    }

    pub fn dark_mode(&self) -> bool {
        self.session.dark_mode()
    }

    /// JSON list of `[chord, action]` pairs for a help overlay.
    pub fn key_bindings(&self) -> Result<String, JsError> {
        to_json(&self.session.commands().bindings())
    }

    /// Psychology view of arbitrary text, without touching a session.
    pub fn psychology(text: &str) -> Result<String, JsError> {
        to_json(&presenter::analyze_psychology(text))
    }

    /// Mythology view of arbitrary text, without touching a session.
    pub fn mythology(text: &str) -> Result<String, JsError> {
        to_json(&presenter::analyze_mythology(text))
    }
}
