//! Sound cues driven by simulation events
//!
//! The simulation only emits `GameEvent`s. `AudioCues` turns them into
//! concrete playback commands and keeps track of whether the music loop is
//! running, so a backend only has to play what it is told.

use crate::sim::GameEvent;

/// Playback commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Start or continue the background loop
    MusicPlay,
    /// Hold the loop at its current position
    MusicPause,
    /// Stop the loop and rewind
    MusicStop,
    /// Player hit something lethal
    Death,
    /// Launched off a bounce pad
    Bounce,
    /// Touched down on a wall
    Land,
    /// Passed the previous best
    HighScore,
}

/// Something that can play sound effects
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("audio: {effect:?} at {volume:.2}");
    }
}

#[derive(Debug, Clone)]
pub struct AudioCues {
    master_volume: f32,
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl Default for AudioCues {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioCues {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            music_volume: 0.5,
            sfx_volume: 0.5,
            muted: false,
            music_playing: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    fn volume_for(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = match effect {
            SoundEffect::MusicPlay | SoundEffect::MusicPause | SoundEffect::MusicStop => {
                self.music_volume
            }
            _ => self.sfx_volume,
        };
        self.master_volume * channel
    }

    /// Commands for one event
    pub fn cues_for(&mut self, event: &GameEvent) -> Vec<SoundEffect> {
        match event {
            GameEvent::RunStarted | GameEvent::Resumed => {
                if self.music_playing {
                    Vec::new()
                } else {
                    self.music_playing = true;
                    vec![SoundEffect::MusicPlay]
                }
            }
            GameEvent::Paused => {
                self.music_playing = false;
                vec![SoundEffect::MusicPause]
            }
            GameEvent::LethalCollision => {
                self.music_playing = false;
                vec![SoundEffect::MusicStop, SoundEffect::Death]
            }
            GameEvent::RunStopped => {
                if self.music_playing {
                    self.music_playing = false;
                    vec![SoundEffect::MusicStop]
                } else {
                    Vec::new()
                }
            }
            GameEvent::Bounced => vec![SoundEffect::Bounce],
            GameEvent::Landed => vec![SoundEffect::Land],
            GameEvent::NewHighScore(_) => vec![SoundEffect::HighScore],
        }
    }

    /// Translate a batch of events and send them to `sink`
    pub fn dispatch(&mut self, events: &[GameEvent], sink: &mut dyn AudioSink) {
        for event in events {
            for effect in self.cues_for(event) {
                let volume = self.volume_for(effect);
                sink.play(effect, volume);
            }
        }
    }
}
