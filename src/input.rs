use serde::{Deserialize, Serialize};

// ---------------------------------------------
// LOGICAL ACTIONS
// ---------------------------------------------

/// The closed set of actions the simulation understands. Whatever feeds
/// the loop (keyboard polling, a gamepad, the scripted demo) maps its
/// device events onto these; the core never sees raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    ToggleEngine,
}

/// Which actions are held during the current tick.
///
/// Produced fresh each frame by the input collaborator and read-only
/// inside the simulation. `backward` doubles as the brake while the
/// vehicle is rolling without power.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub toggle_engine: bool,
}

impl InputSnapshot {
    pub fn held(&self, action: Action) -> bool {
        match action {
            Action::Forward => self.forward,
            Action::Backward => self.backward,
            Action::TurnLeft => self.turn_left,
            Action::TurnRight => self.turn_right,
            Action::ToggleEngine => self.toggle_engine,
        }
    }
}
