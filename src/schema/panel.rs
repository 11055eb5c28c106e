use serde::{Deserialize, Serialize};

/// The side panels of the editor. At most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Psychology,
    Mythology,
    Collaboration,
    BeatBoard,
    AiSuggestions,
}

impl Panel {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Psychology => "Psychological Analysis",
            Self::Mythology => "Mythological Analysis",
            Self::Collaboration => "Collaboration",
            Self::BeatBoard => "Beat Board",
            Self::AiSuggestions => "AI Suggestions",
        }
    }
}
