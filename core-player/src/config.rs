//! # Player Configuration
//!
//! Configuration for the playback control core.

use serde::{Deserialize, Serialize};

/// Player configuration.
///
/// Controls how the command worker thread is set up and how it behaves when
/// the player is torn down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Name given to the dedicated command worker thread.
    ///
    /// Shown in debuggers, panics, and (when enabled) log output. Linux
    /// truncates thread names at 15 bytes; longer names are legal but will
    /// be cut off by the OS.
    ///
    /// Default: `"player-commands"`.
    #[serde(default = "default_thread_name")]
    pub command_thread_name: String,

    /// Whether the worker executes commands that are already queued when
    /// the player is dropped.
    ///
    /// `true` drains the mailbox before the worker exits (a safe quit);
    /// `false` discards everything still queued and exits as soon as
    /// possible.
    ///
    /// Default: `true`.
    #[serde(default = "default_drain_on_close")]
    pub drain_on_close: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            command_thread_name: default_thread_name(),
            drain_on_close: default_drain_on_close(),
        }
    }
}

impl PlayerConfig {
    /// Create a configuration that discards queued commands on teardown.
    ///
    /// Useful for hosts that destroy players aggressively (e.g. view
    /// recycling) and do not care whether trailing seeks ever ran.
    pub fn fast_shutdown() -> Self {
        Self {
            drain_on_close: false,
            ..Default::default()
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.command_thread_name.is_empty() {
            return Err("command_thread_name must not be empty".to_string());
        }

        if self.command_thread_name.contains('\0') {
            return Err("command_thread_name must not contain nul bytes".to_string());
        }

        Ok(())
    }
}

fn default_thread_name() -> String {
    "player-commands".to_string()
}

fn default_drain_on_close() -> bool {
    true
}
