//=========================================================================
// Sound Registry
//=========================================================================
//
// Stock AudioService. Mixing is out of scope here: the registry records
// what was played and which mode owns which loaded sounds, so that a
// mode's sounds can be freed when the mode is destroyed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;

//=== Internal Dependencies ===============================================

use super::AudioService;
use crate::core::mode::ModeHandle;

//=== SoundRegistry =======================================================

/// Tracks played sounds and per-owner sound resources.
#[derive(Debug, Default)]
pub struct SoundRegistry {
    owned: HashMap<ModeHandle, Vec<String>>,
    played: Vec<String>,
}

impl SoundRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sounds currently held on behalf of `owner`.
    pub fn owned_by(&self, owner: ModeHandle) -> &[String] {
        self.owned.get(&owner).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of owners with live resources.
    pub fn owner_count(&self) -> usize {
        self.owned.len()
    }

    /// Every sound played since the last `take_played()`.
    pub fn played(&self) -> &[String] {
        &self.played
    }

    /// Drains the played-sound log.
    pub fn take_played(&mut self) -> Vec<String> {
        std::mem::take(&mut self.played)
    }
}

//=== AudioService ========================================================

impl AudioService for SoundRegistry {
    fn play_sound(&mut self, name: &str) {
        self.played.push(name.to_string());
    }

    fn play_owned(&mut self, owner: ModeHandle, name: &str) {
        let sounds = self.owned.entry(owner).or_default();
        if !sounds.iter().any(|s| s == name) {
            sounds.push(name.to_string());
        }
        self.played.push(name.to_string());
    }

    fn release_resources_owned_by(&mut self, owner: ModeHandle) {
        if let Some(sounds) = self.owned.remove(&owner) {
            debug!(target: "audio", "Released {} sound(s) owned by {:?}", sounds.len(), owner);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
