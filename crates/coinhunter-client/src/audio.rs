use coinhunter_core::events::GameEvent;

/// Sound effects the game systems can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    Jump,
    Coin,
    Stomp,
    Spring,
    Hurt,
    Fell,
    LevelComplete,
    GameOver,
}

impl AudioEvent {
    /// Map a simulation event to its sound effect, if it has one.
    pub fn from_game_event(event: &GameEvent) -> Option<AudioEvent> {
        match event {
            GameEvent::Jumped => Some(AudioEvent::Jump),
            GameEvent::CoinCollected { .. } => Some(AudioEvent::Coin),
            GameEvent::EnemyStomped { .. } => Some(AudioEvent::Stomp),
            GameEvent::SpringBounced => Some(AudioEvent::Spring),
            GameEvent::PlayerHurt { .. } => Some(AudioEvent::Hurt),
            GameEvent::PlayerFell { .. } => Some(AudioEvent::Fell),
            GameEvent::LevelComplete { .. } => Some(AudioEvent::LevelComplete),
            GameEvent::GameOver => Some(AudioEvent::GameOver),
        }
    }
}

/// Master volume for sound effects.
const SFX_VOLUME: f32 = 0.35;

/// Queue of audio events to be processed each frame.
#[derive(Default)]
pub struct AudioEventQueue {
    events: Vec<AudioEvent>,
}

impl AudioEventQueue {
    pub fn push(&mut self, event: AudioEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn process(&mut self, manager: &AudioManager, muted: bool) {
        for event in self.events.drain(..) {
            if muted {
                continue;
            }
            let (freq, dur, wave) = match event {
                AudioEvent::Jump => (330.0, 0.08, WaveType::Triangle),
                AudioEvent::Coin => (880.0, 0.09, WaveType::Sine),
                AudioEvent::Stomp => (220.0, 0.12, WaveType::Square),
                AudioEvent::Spring => (520.0, 0.18, WaveType::Triangle),
                AudioEvent::Hurt => (180.0, 0.25, WaveType::Square),
                AudioEvent::Fell => (140.0, 0.4, WaveType::Sawtooth),
                AudioEvent::LevelComplete => (660.0, 0.5, WaveType::Triangle),
                AudioEvent::GameOver => (110.0, 0.8, WaveType::Square),
            };
            manager.play_tone(freq, dur, SFX_VOLUME, wave);
        }
    }
}

/// Wrapper around the Web Audio context. Construction failure leaves the
/// game silent but playable.
#[derive(Clone)]
pub struct AudioManager {
    #[cfg(target_family = "wasm")]
    ctx: Option<web_sys::AudioContext>,
    #[cfg(not(target_family = "wasm"))]
    _phantom: (),
}

impl AudioManager {
    pub fn new() -> Self {
        #[cfg(target_family = "wasm")]
        {
            let ctx = web_sys::AudioContext::new().ok();
            if ctx.is_none() {
                crate::diag::console_warn!("AudioContext unavailable, running silent");
            }
            Self { ctx }
        }
        #[cfg(not(target_family = "wasm"))]
        {
            Self { _phantom: () }
        }
    }

    #[allow(unused_variables)]
    pub fn play_tone(&self, frequency: f32, duration: f32, volume: f32, wave_type: WaveType) {
        #[cfg(target_family = "wasm")]
        {
            let Some(ctx) = &self.ctx else {
                return;
            };
            let Ok(oscillator) = ctx.create_oscillator() else {
                return;
            };
            let Ok(gain_node) = ctx.create_gain() else {
                return;
            };

            oscillator.set_type(match wave_type {
                WaveType::Sine => web_sys::OscillatorType::Sine,
                WaveType::Square => web_sys::OscillatorType::Square,
                WaveType::Triangle => web_sys::OscillatorType::Triangle,
                WaveType::Sawtooth => web_sys::OscillatorType::Sawtooth,
            });

            oscillator.frequency().set_value(frequency);
            gain_node.gain().set_value(volume);

            let now = ctx.current_time();
            let _ = gain_node
                .gain()
                .linear_ramp_to_value_at_time(volume, now + 0.01);
            let _ = gain_node
                .gain()
                .linear_ramp_to_value_at_time(0.0, now + duration as f64);

            let _ = oscillator.connect_with_audio_node(&gain_node);
            let _ = gain_node.connect_with_audio_node(&ctx.destination());
            let _ = oscillator.start();
            let _ = oscillator.stop_with_when(now + duration as f64);
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum WaveType {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// Background-music loop: a repeating interval timer that plays the next
/// melody note each tick. Owns its timer handle so every state
/// transition out of play can stop it deterministically.
pub struct Bgm {
    #[cfg(target_family = "wasm")]
    interval_id: Option<i32>,
    #[cfg(target_family = "wasm")]
    tick: Option<wasm_bindgen::closure::Closure<dyn FnMut()>>,
    #[cfg(not(target_family = "wasm"))]
    playing: bool,
}

/// Milliseconds between melody notes.
const BGM_NOTE_MS: i32 = 250;
const BGM_VOLUME: f32 = 0.08;
const MELODY: [f32; 8] = [262.0, 330.0, 392.0, 330.0, 440.0, 392.0, 330.0, 294.0];

impl Bgm {
    pub fn new() -> Self {
        Self {
            #[cfg(target_family = "wasm")]
            interval_id: None,
            #[cfg(target_family = "wasm")]
            tick: None,
            #[cfg(not(target_family = "wasm"))]
            playing: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        #[cfg(target_family = "wasm")]
        {
            self.interval_id.is_some()
        }
        #[cfg(not(target_family = "wasm"))]
        {
            self.playing
        }
    }

    /// Start (or restart) the loop. Idempotent via `stop`.
    #[allow(unused_variables)]
    pub fn start(&mut self, manager: &AudioManager) {
        self.stop();
        #[cfg(target_family = "wasm")]
        {
            use wasm_bindgen::JsCast;
            use wasm_bindgen::closure::Closure;

            let manager = manager.clone();
            let mut beat = 0usize;
            let tick = Closure::wrap(Box::new(move || {
                let freq = MELODY[beat % MELODY.len()];
                beat += 1;
                manager.play_tone(freq, 0.22, BGM_VOLUME, WaveType::Triangle);
            }) as Box<dyn FnMut()>);

            let Some(window) = web_sys::window() else {
                return;
            };
            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                BGM_NOTE_MS,
            ) {
                Ok(id) => {
                    self.interval_id = Some(id);
                    self.tick = Some(tick);
                },
                Err(_) => {
                    crate::diag::console_warn!("Failed to schedule background music");
                },
            }
        }
        #[cfg(not(target_family = "wasm"))]
        {
            self.playing = true;
        }
    }

    /// Cancel the timer. Safe to call when the loop is not running.
    pub fn stop(&mut self) {
        #[cfg(target_family = "wasm")]
        {
            if let Some(id) = self.interval_id.take()
                && let Some(window) = web_sys::window()
            {
                window.clear_interval_with_handle(id);
            }
            self.tick = None;
        }
        #[cfg(not(target_family = "wasm"))]
        {
            self.playing = false;
        }
    }
}

impl Default for Bgm {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Bgm {
    fn drop(&mut self) {
        self.stop();
    }
}
