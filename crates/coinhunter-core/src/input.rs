use std::collections::HashSet;

/// The per-frame input sample consumed by the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Keyboard state, updated from key-down/key-up events.
///
/// Event handlers push key codes in; the frame loop samples a
/// [`FrameInput`] once per frame and calls [`InputState::end_frame`]
/// afterwards to clear the edge sets.
pub struct InputState {
    /// Keys currently held down.
    pub keys_down: HashSet<String>,
    /// Keys pressed this frame (cleared each frame).
    pub keys_just_pressed: HashSet<String>,
    /// Keys released this frame (cleared each frame).
    pub keys_just_released: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            keys_just_released: HashSet::new(),
        }
    }

    /// Register a key down event. Auto-repeat (a key already held) does
    /// not re-enter the just-pressed set.
    pub fn on_key_down(&mut self, code: String) {
        if self.keys_down.insert(code.clone()) {
            self.keys_just_pressed.insert(code);
        }
    }

    pub fn on_key_up(&mut self, code: String) {
        self.keys_down.remove(&code);
        self.keys_just_released.insert(code);
    }

    pub fn is_key_down(&self, code: &str) -> bool {
        self.keys_down.contains(code)
    }

    pub fn is_key_just_pressed(&self, code: &str) -> bool {
        self.keys_just_pressed.contains(code)
    }

    /// Clear per-frame state. Call at the end of each frame.
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample the movement bindings: A/ArrowLeft, D/ArrowRight, and
/// Space/W/ArrowUp for jump.
pub fn frame_input(input: &InputState) -> FrameInput {
    FrameInput {
        left: input.is_key_down("KeyA") || input.is_key_down("ArrowLeft"),
        right: input.is_key_down("KeyD") || input.is_key_down("ArrowRight"),
        jump: input.is_key_down("Space")
            || input.is_key_down("ArrowUp")
            || input.is_key_down("KeyW"),
    }
}

/// Non-movement bindings sampled on key edges rather than held state.
pub mod bindings {
    pub const PAUSE: &str = "KeyP";
    pub const MUTE: &str = "KeyM";
    pub const CONFIRM: &str = "Enter";
}
