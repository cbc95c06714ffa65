use serde::Serialize;
use tracing::info;

/// Warm-up interval between ignition and the engine honoring throttle.
pub const WARM_UP_MS: f32 = 2000.0;

// ---------------------------------------------
// ENGINE STATE
// ---------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    Off,
    Starting,
    Running,
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Off => "off",
            EngineState::Starting => "starting",
            EngineState::Running => "running",
        }
    }
}

/// Ignition state machine.
///
/// The warm-up is plain elapsed-time accumulation checked every tick;
/// there is no timer task behind it. Switching off mid-warm-up just
/// abandons the accumulated time, so the next ignition starts from 0.
#[derive(Debug)]
pub struct EngineStateMachine {
    state: EngineState,
    warm_up_ms: f32, // accumulated since ignition, meaningful in Starting only
}

impl EngineStateMachine {
    pub fn new() -> Self {
        Self {
            state: EngineState::Off,
            warm_up_ms: 0.0,
        }
    }

    /// Flip the ignition. Off goes to Starting with a fresh warm-up
    /// timer; Starting or Running go straight to Off. Returns the new
    /// state so callers can cue audio / relabel the HUD.
    pub fn toggle(&mut self) -> EngineState {
        self.state = match self.state {
            EngineState::Off => {
                self.warm_up_ms = 0.0;
                EngineState::Starting
            }
            EngineState::Starting | EngineState::Running => EngineState::Off,
        };
        info!(state = self.state.as_str(), "engine toggled");
        self.state
    }

    /// Advance the warm-up timer; Starting becomes Running once the
    /// accumulated elapsed time reaches the threshold.
    pub fn tick(&mut self, elapsed_ms: f32) {
        if self.state == EngineState::Starting {
            self.warm_up_ms += elapsed_ms;
            if self.warm_up_ms >= WARM_UP_MS {
                self.state = EngineState::Running;
                info!("engine warmed up");
            }
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// True from ignition until switched off (Starting or Running).
    pub fn is_running(&self) -> bool {
        matches!(self.state, EngineState::Starting | EngineState::Running)
    }

    /// True only once warmed up. Gates acceleration, never deceleration.
    pub fn is_ready(&self) -> bool {
        self.state == EngineState::Running
    }
}

impl Default for EngineStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
