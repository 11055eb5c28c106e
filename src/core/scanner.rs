/// Text scanning — character cue extraction and structural beat detection.
///
/// Both scans are pure functions of the input text. They never fail and
/// never touch anything outside their argument.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;

use crate::schema::beat_tag::StructuralBeatTag;
use crate::schema::character::CharacterNameCandidate;

static FADE_IN: Lazy<Regex> = Lazy::new(|| Regex::new(r"FADE\s*IN").expect("valid regex"));
static CALL_TO_ADVENTURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)call to adventure").expect("valid regex"));
static RETURN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)return").expect("valid regex"));

/// Collect character cue lines, deduplicated, in order of first appearance.
pub fn extract_character_names(text: &str) -> Vec<CharacterNameCandidate> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut names = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if CharacterNameCandidate::is_cue(trimmed) && seen.insert(trimmed) {
            names.extend(CharacterNameCandidate::from_line(trimmed));
        }
    }

    log::debug!("extracted {} character cue(s)", names.len());
    names
}

/// Detect which structural beats are present anywhere in the text.
///
/// The returned set iterates in canonical order regardless of where the
/// markers sit in the script.
pub fn detect_structural_beats(text: &str) -> BTreeSet<StructuralBeatTag> {
    let mut tags = BTreeSet::new();
    if FADE_IN.is_match(text) {
        tags.insert(StructuralBeatTag::OrdinaryWorld);
    }
    if CALL_TO_ADVENTURE.is_match(text) {
        tags.insert(StructuralBeatTag::CallToAdventure);
    }
    if RETURN.is_match(text) {
        tags.insert(StructuralBeatTag::ReturnOrReward);
    }

    log::debug!("detected {} structural beat(s)", tags.len());
    tags
}
