/// Analysis presenter — turns scanner output into display models.
///
/// Models carry data only. Rendering them (HTML, JSON, terminal text) is
/// the job of whatever sink receives them; `Display` gives a plain-text
/// rendering for the CLI and for logs.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::core::scanner;
use crate::schema::archetype::Archetype;
use crate::schema::beat_tag::StructuralBeatTag;
use crate::schema::character::CharacterNameCandidate;
use crate::schema::panel::Panel;

pub const NO_CHARACTERS_MESSAGE: &str = "No character names found so far.";
pub const NO_BEATS_MESSAGE: &str = "No major beats detected yet.";
pub const MOTIVATION: &str = "To discover/change/protect";
pub const TRAITS: [&str; 3] = ["Courageous", "Driven", "Resilient"];
pub const MYTHIC_ARCHETYPES: [Archetype; 3] =
    [Archetype::Mentor, Archetype::Guardian, Archetype::Shadow];

/// One character card in the psychology view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterProfile {
    pub name: String,
    pub archetype: Archetype,
    pub motivation: String,
    pub traits: Vec<String>,
}

/// The psychology view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "characters", rename_all = "snake_case")]
pub enum PsychologyModel {
    /// No character cues in the script yet.
    NoCharacters,
    Characters(Vec<CharacterProfile>),
}

impl PsychologyModel {
    pub fn profiles(&self) -> &[CharacterProfile] {
        match self {
            Self::NoCharacters => &[],
            Self::Characters(profiles) => profiles,
        }
    }
}

/// The mythology view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MythologyModel {
    pub structure_summary: String,
    pub beats_detected: bool,
    pub archetypes: Vec<Archetype>,
}

/// Assign archetypes by cue position, cycling every five characters.
pub fn build_psychology_model(names: &[CharacterNameCandidate]) -> PsychologyModel {
    if names.is_empty() {
        return PsychologyModel::NoCharacters;
    }

    let profiles = names
        .iter()
        .enumerate()
        .map(|(i, name)| CharacterProfile {
            name: name.as_str().to_string(),
            archetype: Archetype::for_position(i),
            motivation: MOTIVATION.to_string(),
            traits: TRAITS.iter().map(|t| t.to_string()).collect(),
        })
        .collect();
    PsychologyModel::Characters(profiles)
}

/// Summarise detected beats in canonical order.
pub fn build_mythology_model(tags: &BTreeSet<StructuralBeatTag>) -> MythologyModel {
    let structure_summary = if tags.is_empty() {
        NO_BEATS_MESSAGE.to_string()
    } else {
        tags.iter()
            .map(StructuralBeatTag::label)
            .collect::<Vec<_>>()
            .join(", ")
    };

    MythologyModel {
        structure_summary,
        beats_detected: !tags.is_empty(),
        archetypes: MYTHIC_ARCHETYPES.to_vec(),
    }
}

/// Scan `text` and build the psychology view in one step.
pub fn analyze_psychology(text: &str) -> PsychologyModel {
    build_psychology_model(&scanner::extract_character_names(text))
}

/// Scan `text` and build the mythology view in one step.
pub fn analyze_mythology(text: &str) -> MythologyModel {
    build_mythology_model(&scanner::detect_structural_beats(text))
}

impl fmt::Display for PsychologyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Panel::Psychology.title())?;
        match self {
            Self::NoCharacters => writeln!(f, "{}", NO_CHARACTERS_MESSAGE),
            Self::Characters(profiles) => {
                for profile in profiles {
                    writeln!(f)?;
                    writeln!(f, "{}", profile.name)?;
                    writeln!(f, "  Archetype: {}", profile.archetype)?;
                    writeln!(f, "  Motivation: {}", profile.motivation)?;
                    writeln!(f, "  Traits: {}", profile.traits.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for MythologyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let archetypes: Vec<&str> = self.archetypes.iter().map(Archetype::label).collect();
        writeln!(f, "{}", Panel::Mythology.title())?;
        writeln!(f, "  Structure: {}", self.structure_summary)?;
        writeln!(f, "  Archetypes: {}", archetypes.join(", "))
    }
}
