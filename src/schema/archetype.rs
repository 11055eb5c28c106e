use serde::{Deserialize, Serialize};
use std::fmt;

/// A narrative-role label. Assigned heuristically, never inferred from
/// what a character actually does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Hero,
    Mentor,
    Shadow,
    Trickster,
    Guardian,
}

impl Archetype {
    /// The cycle used when handing out archetypes by cue position.
    pub const CYCLE: [Archetype; 5] = [
        Self::Hero,
        Self::Mentor,
        Self::Shadow,
        Self::Trickster,
        Self::Guardian,
    ];

    /// Archetype for the character at zero-based `position`.
    pub fn for_position(position: usize) -> Self {
        Self::CYCLE[position % Self::CYCLE.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hero => "Hero",
            Self::Mentor => "Mentor",
            Self::Shadow => "Shadow",
            Self::Trickster => "Trickster",
            Self::Guardian => "Guardian",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_wrap_every_five() {
        assert_eq!(Archetype::for_position(0), Archetype::Hero);
        assert_eq!(Archetype::for_position(1), Archetype::Mentor);
        assert_eq!(Archetype::for_position(4), Archetype::Guardian);
        assert_eq!(Archetype::for_position(5), Archetype::Hero);
        assert_eq!(Archetype::for_position(11), Archetype::Mentor);
    }
}
