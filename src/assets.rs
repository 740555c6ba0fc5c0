//! Logical asset names
//!
//! The simulation only ever refers to sprites and sounds by these ids. A
//! platform layer resolves each id to a concrete handle once at startup via
//! [`AssetTable::resolve`]; a missing asset is reported there, never mid-game.

use thiserror::Error;

/// Asset resolution failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("missing sprite: {name}")]
    MissingSprite { name: &'static str },

    #[error("missing sound: {name}")]
    MissingSound { name: &'static str },
}

/// Sprite handles the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Player,
    /// Alternate player look, unlocked by score
    PlayerAlt,
    Background,
    Obstacle,
    Coin,
    PowerUp,
}

impl SpriteId {
    pub const ALL: [SpriteId; 6] = [
        SpriteId::Player,
        SpriteId::PlayerAlt,
        SpriteId::Background,
        SpriteId::Obstacle,
        SpriteId::Coin,
        SpriteId::PowerUp,
    ];

    /// Image file under `images/`
    pub fn file_name(self) -> &'static str {
        match self {
            SpriteId::Player => "mario.png",
            SpriteId::PlayerAlt => "luigi.png",
            SpriteId::Background => "castle.png",
            SpriteId::Obstacle => "Thwomp.png",
            SpriteId::Coin => "yoshi_coin.png",
            SpriteId::PowerUp => "star.png",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Sounds the game plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Background music, started once at boot
    Theme,
    Death,
    Coin,
    /// Extra obstacle joins the field
    HardMode,
    /// Alternate player sprite unlocked
    Unlock,
}

impl Sound {
    pub const ALL: [Sound; 5] = [
        Sound::Theme,
        Sound::Death,
        Sound::Coin,
        Sound::HardMode,
        Sound::Unlock,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Sound::Theme => "bowser_song.mp3",
            Sound::Death => "mario_dead.mp3",
            Sound::Coin => "coin_collect.mp3",
            Sound::HardMode => "bowser_laugh.mp3",
            Sound::Unlock => "luigi_voice.mp3",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Every sprite and sound resolved to a platform handle
#[derive(Debug, Clone)]
pub struct AssetTable<I, A> {
    sprites: Vec<I>,
    sounds: Vec<A>,
}

impl<I, A> AssetTable<I, A> {
    /// Resolve all assets up front, failing on the first one missing
    pub fn resolve(
        mut sprite: impl FnMut(SpriteId) -> Option<I>,
        mut sound: impl FnMut(Sound) -> Option<A>,
    ) -> Result<Self, AssetError> {
        let sprites = SpriteId::ALL
            .iter()
            .map(|&id| {
                sprite(id).ok_or(AssetError::MissingSprite {
                    name: id.file_name(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let sounds = Sound::ALL
            .iter()
            .map(|&id| {
                sound(id).ok_or(AssetError::MissingSound {
                    name: id.file_name(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "Resolved {} sprites and {} sounds",
            sprites.len(),
            sounds.len()
        );
        Ok(Self { sprites, sounds })
    }

    pub fn sprite(&self, id: SpriteId) -> &I {
        &self.sprites[id.index()]
    }

    pub fn sound(&self, id: Sound) -> &A {
        &self.sounds[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_all() {
        let table = AssetTable::resolve(|s| Some(s.file_name()), |s| Some(s.file_name())).unwrap();
        assert_eq!(*table.sprite(SpriteId::PowerUp), "star.png");
        assert_eq!(*table.sprite(SpriteId::Player), "mario.png");
        assert_eq!(*table.sound(Sound::Unlock), "luigi_voice.mp3");
    }

    #[test]
    fn test_missing_sprite_reported() {
        let result = AssetTable::resolve(
            |s| (s != SpriteId::Coin).then_some(()),
            |_| Some(()),
        );
        assert_eq!(
            result.unwrap_err(),
            AssetError::MissingSprite {
                name: "yoshi_coin.png"
            }
        );
    }

    #[test]
    fn test_missing_sound_reported() {
        let result = AssetTable::resolve(|_| Some(()), |s| (s != Sound::Death).then_some(()));
        assert_eq!(
            result.unwrap_err().to_string(),
            "missing sound: mario_dead.mp3"
        );
    }

    #[test]
    fn test_last_sound_timing_out_still_fails_startup() {
        let mut asked = Vec::new();
        let result = AssetTable::resolve(
            |_| Some(()),
            |s| {
                asked.push(s);
                (s != Sound::Unlock).then_some(())
            },
        );
        assert_eq!(
            result.unwrap_err(),
            AssetError::MissingSound {
                name: "luigi_voice.mp3"
            }
        );
        assert_eq!(asked, Sound::ALL.to_vec());
    }
}
