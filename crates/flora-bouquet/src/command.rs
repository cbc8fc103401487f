use crossbeam::channel::{Receiver, Sender, TrySendError};
use flora_core::ColorScheme;

/// Capacity of the UI command queue.
const COMMAND_QUEUE_LEN: usize = 256;

/// Commands sent from a control surface to the bouquet driver.
///
/// They are drained at the start of each frame, so a change becomes visible on
/// the frame after it was sent.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    /// Set a surface parameter by its camelCase field name.
    SetParam { name: String, value: f64 },
    /// Switch between running and paused.
    TogglePlayback,
    /// Time back to zero, default parameters, playback running.
    Reset,
    /// Advance to the next built-in color scheme.
    CycleColorScheme,
    SetColorScheme(ColorScheme),
}

/// Cloneable sending half of the command queue. Safe to move to other threads.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<UiCommand>,
}

impl CommandSender {
    /// Queue a command. Returns `false` if the queue is full or the driver
    /// has been dropped.
    pub fn send(&self, command: UiCommand) -> bool {
        match self.tx.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Full(cmd)) => {
                log::warn!("command queue full, dropping {cmd:?}");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    pub fn set_param(&self, name: impl Into<String>, value: f64) -> bool {
        self.send(UiCommand::SetParam { name: name.into(), value })
    }

    pub fn toggle_playback(&self) -> bool {
        self.send(UiCommand::TogglePlayback)
    }

    pub fn reset(&self) -> bool {
        self.send(UiCommand::Reset)
    }

    pub fn cycle_color_scheme(&self) -> bool {
        self.send(UiCommand::CycleColorScheme)
    }

    pub fn set_color_scheme(&self, scheme: ColorScheme) -> bool {
        self.send(UiCommand::SetColorScheme(scheme))
    }
}

/// Create a bounded command queue.
pub fn command_channel() -> (CommandSender, Receiver<UiCommand>) {
    let (tx, rx) = crossbeam::channel::bounded(COMMAND_QUEUE_LEN);
    (CommandSender { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_arrive_in_order() {
        let (tx, rx) = command_channel();
        assert!(tx.set_param("xPoints", 20.0));
        assert!(tx.toggle_playback());
        assert_eq!(
            rx.try_recv().ok(),
            Some(UiCommand::SetParam { name: "xPoints".into(), value: 20.0 })
        );
        assert_eq!(rx.try_recv().ok(), Some(UiCommand::TogglePlayback));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_full_queue_drops() {
        let (tx, _rx) = command_channel();
        for _ in 0..COMMAND_QUEUE_LEN {
            assert!(tx.reset());
        }
        assert!(!tx.reset());
    }

    #[test]
    fn test_disconnected() {
        let (tx, rx) = command_channel();
        drop(rx);
        assert!(!tx.cycle_color_scheme());
    }
}
