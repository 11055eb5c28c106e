/// Session integration tests — config loading, import and the editing loop.

use std::cell::RefCell;
use std::path::Path;

use screenplay_studio::core::commands::Command;
use screenplay_studio::core::config::{ConfigError, StudioConfig};
use screenplay_studio::core::file_io::{ExportArtifact, FileIo, ImportError};
use screenplay_studio::core::suggest::{SuggestionError, SuggestionState};
use screenplay_studio::schema::panel::Panel;
use screenplay_studio::{deliver_downloads, Effect, PanelView, Session};

/// Reads fixtures from disk and records downloads.
#[derive(Default)]
struct FixtureIo {
    downloads: RefCell<Vec<String>>,
}

impl FileIo for FixtureIo {
    fn read_as_text(&self, file_name: &str) -> Result<String, ImportError> {
        std::fs::read_to_string(Path::new("tests/fixtures").join(file_name))
            .map_err(|e| ImportError::Read(e.to_string()))
    }

    fn read_as_pdf_pages(&self, _file_name: &str) -> Result<Vec<Vec<String>>, ImportError> {
        Ok(vec![
            vec!["FADE IN:".to_string(), "A dock.".to_string()],
            vec!["RETURN".to_string()],
        ])
    }

    fn download(&self, _content: &str, file_name: &str, _mime_type: &str) {
        self.downloads.borrow_mut().push(file_name.to_string());
    }
}

fn fixture_config() -> StudioConfig {
    StudioConfig::load_from_ron(Path::new("tests/fixtures/test_config.ron")).unwrap()
}

#[test]
fn default_config_file_matches_defaults() {
    let config = StudioConfig::load_from_ron(Path::new("studio_data/default_config.ron")).unwrap();
    assert_eq!(config, StudioConfig::default());
}

#[test]
fn fixture_config_applies() {
    let mut session = Session::new(fixture_config()).unwrap();
    assert_eq!(session.beats().read(), vec!["Opening Image", "Catalyst"]);

    let effects = session.handle_key("d", true).unwrap();
    assert_eq!(effects[0], Effect::DarkMode(true));

    let effects = session.handle_key("s", true).unwrap();
    assert!(matches!(
        &effects[0],
        Effect::Download(ExportArtifact::Text { file_name, .. }) if file_name == "Screenplay.fountain"
    ));
}

#[test]
fn bad_binding_rejected() {
    let config = StudioConfig::load_from_ron(Path::new("tests/fixtures/bad_binding.ron")).unwrap();
    assert!(matches!(
        Session::new(config),
        Err(ConfigError::InvalidBinding(_))
    ));
}

#[test]
fn import_fountain_then_analyze() {
    let mut session = Session::default();
    session.execute(Command::ShowBeatBoard);

    let effects = session.import("sample_script.fountain", &FixtureIo::default());
    assert!(effects.contains(&Effect::Status("Imported sample_script.fountain".to_string())));
    assert_eq!(session.open_panel(), None);
    assert!(session.buffer().current_text().starts_with("Title: The Lighthouse Keeper"));

    let effects = session.execute(Command::ShowPsychology);
    match &effects[1] {
        Effect::OpenPanel(PanelView::Psychology { model }) => {
            assert_eq!(model.profiles()[0].name, "MARGARET");
        }
        other => panic!("unexpected effect: {:?}", other),
    }
}

#[test]
fn import_pdf_joins_pages() {
    let mut session = Session::default();
    let effects = session.import("draft.PDF", &FixtureIo::default());
    assert_eq!(effects[0], Effect::Notice("Importing PDF…".to_string()));
    assert_eq!(session.buffer().current_text(), "FADE IN: A dock.\nRETURN\n");
}

#[test]
fn unsupported_import_leaves_buffer() {
    let mut session = Session::default();
    session.buffer_mut().replace_text("keep me");
    session.execute(Command::ShowMythology);

    let effects = session.import("notes.rtf", &FixtureIo::default());
    assert_eq!(effects, vec![Effect::Notice("Unsupported format: rtf".to_string())]);
    assert_eq!(session.buffer().current_text(), "keep me");
    assert_eq!(session.open_panel(), Some(Panel::Mythology));
}

#[test]
fn failed_read_leaves_buffer() {
    let mut session = Session::default();
    session.buffer_mut().replace_text("keep me");
    let effects = session.import("missing.txt", &FixtureIo::default());
    assert_eq!(effects.len(), 1);
    assert!(matches!(&effects[0], Effect::Notice(msg) if msg.starts_with("Import error: ")));
    assert_eq!(session.buffer().current_text(), "keep me");
}

#[test]
fn exports_reach_collaborator() {
    let io = FixtureIo::default();
    let mut session = Session::default();
    session.buffer_mut().replace_text("JOHN\nHi.");

    for command in [Command::ExportText, Command::ExportFountain] {
        let left = deliver_downloads(session.execute(command), &io);
        assert!(left.iter().all(|e| !matches!(e, Effect::Download(_))));
        assert!(matches!(left.as_slice(), [Effect::Notice(_)]));
    }
    assert_eq!(
        *io.downloads.borrow(),
        vec!["Screenplay.txt".to_string(), "Screenplay.fountain".to_string()]
    );

    let left = deliver_downloads(session.execute(Command::ExportPdf), &io);
    assert!(matches!(&left[0], Effect::Download(ExportArtifact::Pdf { .. })));
    assert_eq!(io.downloads.borrow().len(), 2);
}

#[test]
fn pdf_export_lays_out_pages() {
    let mut session = Session::default();
    session
        .buffer_mut()
        .replace_text(vec!["A line of action."; 120].join("\n"));
    let effects = session.execute(Command::ExportPdf);
    match &effects[0] {
        Effect::Download(ExportArtifact::Pdf { file_name, layout }) => {
            assert_eq!(file_name, "Screenplay.pdf");
            assert!(layout.pages.len() >= 3);
            assert_eq!(layout.pages[0][0].text, "Screenplay Export");
        }
        other => panic!("unexpected effect: {:?}", other),
    }
    assert_eq!(effects[1], Effect::Notice("Exported PDF!".to_string()));
}

#[test]
fn suggestion_uses_configured_excerpt() {
    let mut session = Session::new(fixture_config()).unwrap();
    session
        .buffer_mut()
        .replace_text(format!("{}0123456789", "x".repeat(40)));

    let effects = session.execute(Command::RequestSuggestion);
    let request = match effects.last() {
        Some(Effect::SendSuggestion(request)) => request.clone(),
        other => panic!("expected request, got {:?}", other),
    };
    assert_eq!(
        request.body["contents"][0]["parts"][0]["text"],
        "Screenplay excerpt:\n0123456789\nSuggest the next scene or continue the story."
    );

    let effects = session.complete_suggestion(
        request.ticket,
        Err(SuggestionError::Transport("offline".to_string())),
    );
    assert_eq!(
        effects,
        vec![Effect::OpenPanel(PanelView::suggestions(SuggestionState::Ready(
            "[Error] offline".to_string()
        )))]
    );
}

#[test]
fn stale_suggestion_after_switching_panels() {
    let mut session = Session::default();
    session.buffer_mut().replace_text("FADE IN:");
    let effects = session.execute(Command::RequestSuggestion);
    let Some(Effect::SendSuggestion(request)) = effects.last() else {
        panic!("expected request");
    };
    let ticket = request.ticket;

    session.execute(Command::ShowBeatBoard);
    let beats_before = session.beats().read();
    let text_before = session.buffer().current_text().to_string();

    assert!(session
        .complete_suggestion(ticket, Ok("too late".to_string()))
        .is_empty());
    assert_eq!(session.beats().read(), beats_before);
    assert_eq!(session.buffer().current_text(), text_before);
    assert_eq!(session.open_panel(), Some(Panel::BeatBoard));
}

#[test]
fn beat_board_round_trip() {
    let mut session = Session::default();
    session.execute(Command::ShowBeatBoard);
    session.add_beat("Belly of the Whale");
    assert_eq!(
        session.beats().read().last().map(String::as_str),
        Some("Belly of the Whale")
    );

    let last = session.beats().len() - 1;
    let effects = session.move_beat(last, 0);
    match &effects[0] {
        Effect::OpenPanel(PanelView::BeatBoard { beats }) => {
            assert_eq!(beats[0], "Belly of the Whale");
        }
        other => panic!("unexpected effect: {:?}", other),
    }

    session.add_beat("   ");
    assert_eq!(session.beats().len(), 4);
}

#[test]
fn effects_serialize_for_presentation() {
    let mut session = Session::default();
    let effects = session.execute(Command::ShowMythology);
    let json = serde_json::to_value(&effects).unwrap();
    assert_eq!(json[0]["effect"], "close_panels");
    assert_eq!(json[1]["effect"], "open_panel");
    assert_eq!(json[1]["value"]["panel"], "mythology");
    assert_eq!(
        json[1]["value"]["model"]["structure_summary"],
        "No major beats detected yet."
    );
}
