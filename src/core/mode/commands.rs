//=========================================================================
// Mode Commands
//=========================================================================
//
// Queue for stack requests made by a running mode.
//
// Modes queue requests here during update/reset. The manager turns them
// into regular push/pop calls as soon as the mode returns, so they are
// resolved at the next resolution point like any other request.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::GameMode;

//=== ModeCommand =========================================================

/// One queued stack request.
pub enum ModeCommand {
    Push {
        mode: Box<dyn GameMode>,
        fade_out: bool,
        fade_in: bool,
    },
    Pop {
        fade_out: bool,
        fade_in: bool,
    },
    PopAll,
}

impl fmt::Debug for ModeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push { mode, fade_out, fade_in } => f
                .debug_struct("Push")
                .field("mode_type", &format_args!("{}", mode.mode_type()))
                .field("fade_out", fade_out)
                .field("fade_in", fade_in)
                .finish(),
            Self::Pop { fade_out, fade_in } => f
                .debug_struct("Pop")
                .field("fade_out", fade_out)
                .field("fade_in", fade_in)
                .finish(),
            Self::PopAll => f.write_str("PopAll"),
        }
    }
}

//=== ModeCommands ========================================================

#[derive(Debug, Default)]
pub struct ModeCommands {
    queue: Vec<ModeCommand>,
}

impl ModeCommands {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Requests `mode` be pushed onto the stack.
    pub fn push<M>(&mut self, mode: M, fade_out: bool, fade_in: bool)
    where
        M: GameMode + 'static,
    {
        self.queue.push(ModeCommand::Push {
            mode: Box::new(mode),
            fade_out,
            fade_in,
        });
    }

    /// Requests the top mode be popped.
    pub fn pop(&mut self, fade_out: bool, fade_in: bool) {
        self.queue.push(ModeCommand::Pop { fade_out, fade_in });
    }

    /// Requests every mode on the stack be popped.
    pub fn pop_all(&mut self) {
        self.queue.push(ModeCommand::PopAll);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all queued commands in request order, leaving the queue empty.
    pub fn take(&mut self) -> Vec<ModeCommand> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
