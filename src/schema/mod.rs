pub mod archetype;
pub mod beat_tag;
pub mod character;
pub mod format;
pub mod panel;
