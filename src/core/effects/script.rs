//=========================================================================
// Script Supervisor
//=========================================================================
//
// Named per-frame hooks owned by a single game mode.
//
// Hooks run in registration order every update and are dropped together
// with the mode that owns them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

use log::{debug, warn};

//=== ScriptHook ==========================================================

/// A per-frame callback receiving the elapsed update time.
pub type ScriptHook = Box<dyn FnMut(Duration) + Send>;

//=== ScriptSupervisor ====================================================

#[derive(Default)]
pub struct ScriptSupervisor {
    hooks: Vec<(String, ScriptHook)>,
}

impl ScriptSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Registration -----------------------------------------------------

    /// Registers `hook` under `name`, replacing a hook of the same name.
    pub fn add<F>(&mut self, name: impl Into<String>, hook: F)
    where
        F: FnMut(Duration) + Send + 'static,
    {
        let name = name.into();
        if let Some(slot) = self.hooks.iter_mut().find(|(existing, _)| *existing == name) {
            warn!(target: "effects", "Script hook '{}' was already registered and has been replaced", name);
            slot.1 = Box::new(hook);
            return;
        }

        debug!(target: "effects", "Registered script hook '{}'", name);
        self.hooks.push((name, Box::new(hook)));
    }

    /// Removes the hook registered under `name`.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|(existing, _)| existing != name);
        before != self.hooks.len()
    }

    //--- Update Loop ------------------------------------------------------

    pub fn update(&mut self, elapsed: Duration) {
        for (_, hook) in &mut self.hooks {
            hook(elapsed);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for ScriptSupervisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.hooks.iter().map(|(name, _)| name))
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
