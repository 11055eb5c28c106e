use serde::{Deserialize, Serialize};
use std::fmt;

/// A story-structure milestone detected by text pattern presence.
///
/// Declaration order is the canonical render order, so an ordered set of
/// tags always iterates Ordinary World, Call to Adventure, Return/Reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StructuralBeatTag {
    OrdinaryWorld,
    CallToAdventure,
    ReturnOrReward,
}

impl StructuralBeatTag {
    pub const ALL: [StructuralBeatTag; 3] = [
        Self::OrdinaryWorld,
        Self::CallToAdventure,
        Self::ReturnOrReward,
    ];

    /// Human-readable label used in the mythology view.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OrdinaryWorld => "Ordinary World",
            Self::CallToAdventure => "Call to Adventure",
            Self::ReturnOrReward => "Return/Reward",
        }
    }
}

impl fmt::Display for StructuralBeatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
