//! Keyboard and DOM input mapping

use crate::sim::OrbId;
use crate::surface::SurfaceInput;

/// Attribute carrying the orb id on orb elements
pub const ORB_ATTR: &str = "data-orb";

/// What the host should do for an input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Forward to the session
    Session(SurfaceInput),
    /// Flip sound on/off
    ToggleMute,
}

/// Map a `KeyboardEvent.key` to a command
///
/// Enter/Space start a round while idle, or pop the focused orb while
/// running. Escape stops the round. M toggles sound.
pub fn command_for_key(key: &str, running: bool, focused_orb: Option<OrbId>) -> Option<Command> {
    match key {
        "Enter" | " " => {
            if !running {
                Some(Command::Session(SurfaceInput::StartRequested))
            } else {
                focused_orb.map(|id| Command::Session(SurfaceInput::Activate(id)))
            }
        }
        "Escape" if running => Some(Command::Session(SurfaceInput::StopRequested)),
        "m" | "M" => Some(Command::ToggleMute),
        _ => None,
    }
}

/// Parse the value of an orb element's `data-orb` attribute
pub fn parse_orb_id(attr: &str) -> Option<OrbId> {
    attr.trim().parse().ok()
}
