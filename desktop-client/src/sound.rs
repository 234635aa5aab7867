use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle};
use ttt_common::games::tictactoe::SessionEvent;
use ttt_common::{GameStatus, log};

const VOLUME: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Move,
    AiMove,
    Win,
    Draw,
}

impl Cue {
    /// (frequency in Hz, duration in ms) for each note of the cue.
    fn notes(&self) -> &'static [(f32, u64)] {
        match self {
            Cue::Move => &[(660.0, 60)],
            Cue::AiMove => &[(440.0, 60)],
            Cue::Win => &[(523.0, 120), (659.0, 120), (784.0, 240)],
            Cue::Draw => &[(392.0, 150), (330.0, 250)],
        }
    }

    fn source(&self) -> impl Source<Item = f32> + Send + 'static {
        let notes: Vec<_> = self
            .notes()
            .iter()
            .map(|&(freq, ms)| SineWave::new(freq).take_duration(Duration::from_millis(ms)))
            .collect();
        rodio::source::from_iter(notes).amplify(VOLUME)
    }
}

pub fn cue_for(event: &SessionEvent) -> Option<Cue> {
    match event {
        SessionEvent::MovePlaced { by_ai: false, .. } => Some(Cue::Move),
        SessionEvent::MovePlaced { by_ai: true, .. } => Some(Cue::AiMove),
        SessionEvent::GameOver { status, .. } => match status {
            GameStatus::XWon | GameStatus::OWon => Some(Cue::Win),
            GameStatus::Draw => Some(Cue::Draw),
            GameStatus::InProgress => None,
        },
        SessionEvent::AiThinking { .. } | SessionEvent::Reset => None,
    }
}

/// Plays short synthesized cues. Without an audio device it stays silent.
pub struct SoundPlayer {
    output: Option<(OutputStream, OutputStreamHandle)>,
}

impl SoundPlayer {
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self::silent();
        }
        match OutputStream::try_default() {
            Ok(output) => Self {
                output: Some(output),
            },
            Err(e) => {
                log!("Sound unavailable: {}", e);
                Self::silent()
            }
        }
    }

    pub fn silent() -> Self {
        Self { output: None }
    }

    pub fn play_for(&self, event: &SessionEvent) {
        if let Some(cue) = cue_for(event) {
            self.play(cue);
        }
    }

    fn play(&self, cue: Cue) {
        let Some((_, handle)) = &self.output else {
            return;
        };
        if let Err(e) = handle.play_raw(cue.source()) {
            log!("Failed to play {:?} sound: {}", cue, e);
        }
    }
}
