//=========================================================================
// Host Handle
//=========================================================================
//
// Stock AppHost: latches an exit request on the logic thread and
// forwards it to the platform thread so the window loop can stop.
//
// Architecture:
//   ModeStackManager ─► HostHandle::request_exit()
//                            │  (crossbeam)
//                            ▼
//                       Platform ─► event_loop.exit()
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::AppHost;

//=== CoreEvent ===========================================================

/// Events sent from the logic thread back to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreEvent {
    /// The application asked to shut down.
    ExitRequested,
}

//=== HostHandle ==========================================================

/// Application host reachable from the logic thread.
#[derive(Debug)]
pub struct HostHandle {
    sender: Option<Sender<CoreEvent>>,
    exit_requested: bool,
}

impl HostHandle {
    /// Creates a host that notifies the platform through `sender`.
    pub fn new(sender: Sender<CoreEvent>) -> Self {
        Self {
            sender: Some(sender),
            exit_requested: false,
        }
    }

    /// Creates a host with no platform attached (tools, tests).
    pub fn detached() -> Self {
        Self {
            sender: None,
            exit_requested: false,
        }
    }

    /// Returns true once an exit was requested.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

//=== AppHost =============================================================

impl AppHost for HostHandle {
    fn request_exit(&mut self) {
        if self.exit_requested {
            return;
        }
        self.exit_requested = true;
        info!(target: "host", "Application exit requested");

        if let Some(sender) = &self.sender {
            if sender.send(CoreEvent::ExitRequested).is_err() {
                warn!(target: "host", "Platform channel disconnected, exit not forwarded");
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn exit_is_forwarded_once() {
        let (tx, rx) = unbounded();
        let mut host = HostHandle::new(tx);

        host.request_exit();
        host.request_exit();

        assert!(host.exit_requested());
        assert_eq!(rx.try_recv(), Ok(CoreEvent::ExitRequested));
        assert!(rx.try_recv().is_err(), "Second request must not be forwarded");
    }

    #[test]
    fn detached_host_latches_request() {
        let mut host = HostHandle::detached();
        assert!(!host.exit_requested());
        host.request_exit();
        assert!(host.exit_requested());
    }

    #[test]
    fn disconnected_platform_does_not_panic() {
        let (tx, rx) = unbounded();
        drop(rx);
        let mut host = HostHandle::new(tx);
        host.request_exit();
        assert!(host.exit_requested());
    }
}
