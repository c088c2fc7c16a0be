//! Player preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::persistence;
use crate::tuning::{DeviceTier, TuningConfig};

/// Selectable character skin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Character(u8);

impl Character {
    /// Number of selectable characters
    pub const COUNT: u8 = 4;

    pub fn new(id: u8) -> Option<Self> {
        (1..=Self::COUNT).contains(&id).then_some(Self(id))
    }

    pub fn id(&self) -> u8 {
        self.0
    }

    /// Sprite image, if this character has one
    pub fn image(&self) -> Option<&'static str> {
        match self.0 {
            1 => Some("amit.png"),
            _ => None,
        }
    }

    /// Text shown when there is no sprite (or it failed to load)
    pub fn placeholder_label(&self) -> String {
        format!("C{}", self.0)
    }

    /// Bounding box used for collisions
    pub fn dimensions(&self) -> (f32, f32) {
        (40.0, 40.0)
    }
}

impl Default for Character {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u8> for Character {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Character::new(id).ok_or_else(|| format!("no character {}", id))
    }
}

impl From<Character> for u8 {
    fn from(c: Character) -> u8 {
        c.0
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Music and sound effects on/off
    pub music_enabled: bool,
    /// Last chosen character
    pub character: Character,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            character: Character::default(),
        }
    }
}

impl Settings {
    /// LocalStorage keys
    const MUSIC_KEY: &'static str = "flappyFirePoleMusic";
    const CHARACTER_KEY: &'static str = "flappyFirePoleCharacter";

    /// Flip music on/off, returning the new state
    pub fn toggle_music(&mut self) -> bool {
        self.music_enabled = !self.music_enabled;
        self.music_enabled
    }

    /// Tuning for this device with the chosen character's hitbox
    pub fn tuning(&self, tier: DeviceTier, field_width: f32, field_height: f32) -> TuningConfig {
        let (w, h) = self.character.dimensions();
        TuningConfig::for_tier(tier)
            .with_field(field_width, field_height)
            .with_player(w, h)
    }

    /// Load settings from storage, falling back per key
    pub fn load() -> Self {
        let defaults = Self::default();
        let settings = Self {
            music_enabled: persistence::load(Self::MUSIC_KEY).unwrap_or(defaults.music_enabled),
            character: persistence::load(Self::CHARACTER_KEY).unwrap_or(defaults.character),
        };
        log::info!(
            "Settings: music {}, character {}",
            settings.music_enabled,
            settings.character.id()
        );
        settings
    }

    pub fn save(&self) {
        persistence::save(Self::MUSIC_KEY, &self.music_enabled);
        persistence::save(Self::CHARACTER_KEY, &self.character);
        log::info!("Settings saved");
    }
}
