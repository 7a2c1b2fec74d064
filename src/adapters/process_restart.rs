//! Process restart adapter.
//!
//! Production [`RestartHandle`] that relaunches the current executable
//! with the same arguments and exits. Invoked by the locale coordinator
//! only after the new locale has been flushed to local storage.

use std::process::Command;

use tracing::{error, info};

use crate::traits::RestartHandle;

/// Restart handle that spawns the current executable and exits.
#[derive(Debug, Default)]
pub struct ProcessRestart;

impl ProcessRestart {
    /// Create a new restart handle.
    pub fn new() -> Self {
        Self
    }
}

impl RestartHandle for ProcessRestart {
    fn terminate_and_relaunch(&self) {
        let exe = match std::env::current_exe() {
            Ok(exe) => exe,
            Err(e) => {
                error!("Failed to resolve current executable: {}", e);
                std::process::exit(1);
            }
        };

        let args: Vec<String> = std::env::args().skip(1).collect();
        match Command::new(&exe).args(&args).spawn() {
            Ok(_) => {
                info!("Relaunched {}, exiting", exe.display());
                std::process::exit(0);
            }
            Err(e) => {
                error!("Failed to relaunch {}: {}", exe.display(), e);
                std::process::exit(1);
            }
        }
    }
}
