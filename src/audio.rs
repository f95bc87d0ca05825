//! Sound effects.
//!
//! The game core only names sounds ([`SoundId`]); an [`AudioSink`] decides
//! what playing one means. Decoding happens off the frame loop: a worker
//! thread fills the [`SoundCache`] through a channel and the frame loop only
//! polls it, so a sound that is not ready yet is simply skipped.

use std::collections::HashMap;
use std::io::Write;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    ButtonPress,
    Hit,
    Score,
}

impl SoundId {
    pub const ALL: [SoundId; 3] = [SoundId::ButtonPress, SoundId::Hit, SoundId::Score];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ButtonPress => "button-press",
            Self::Hit => "hit",
            Self::Score => "score",
        }
    }
}

/// A decoded, ready-to-play sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundClip {
    pub id: SoundId,
    /// Bytes written to the output device to play the clip.
    pub data: Vec<u8>,
}

/// Terminal rendition of each effect: a bell per pulse.
pub fn decode_bell(id: SoundId) -> SoundClip {
    let pulses = match id {
        SoundId::ButtonPress => 1,
        SoundId::Hit => 2,
        SoundId::Score => 1,
    };
    SoundClip {
        id,
        data: vec![0x07; pulses],
    }
}

/// Anything that can play the game's sound cues.
pub trait AudioSink {
    fn play_sound(&mut self, sound: SoundId);
}

/// Decoded clips, filled asynchronously.
#[derive(Debug, Default)]
pub struct SoundCache {
    receiver: Option<Receiver<SoundClip>>,
    clips: HashMap<SoundId, SoundClip>,
}

impl SoundCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start decoding every sound on a worker thread. Repeated calls while
    /// a load is running, or after one finished, do nothing.
    pub fn load(&mut self, decode: fn(SoundId) -> SoundClip) {
        if self.receiver.is_some() || !self.clips.is_empty() {
            return;
        }
        let (sender, receiver) = channel();
        thread::spawn(move || {
            for id in SoundId::ALL {
                if sender.send(decode(id)).is_err() {
                    break;
                }
            }
        });
        self.receiver = Some(receiver);
    }

    /// Move any finished clips into the cache. Never blocks.
    pub fn poll(&mut self) {
        let Some(receiver) = &self.receiver else {
            return;
        };
        let mut finished = false;
        loop {
            match receiver.try_recv() {
                Ok(clip) => {
                    self.clips.insert(clip.id, clip);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    finished = true;
                    break;
                }
            }
        }
        if finished {
            self.receiver = None;
        }
    }

    pub fn get(&self, id: SoundId) -> Option<&SoundClip> {
        self.clips.get(&id)
    }

    pub fn is_loading(&self) -> bool {
        self.receiver.is_some()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Plays cached clips by writing them to a terminal.
pub struct TerminalBell<W: Write> {
    pub cache: SoundCache,
    out: W,
    pub muted: bool,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self {
            cache: SoundCache::new(),
            out,
            muted: false,
        }
    }

    pub fn load(&mut self) {
        self.cache.load(decode_bell);
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play_sound(&mut self, sound: SoundId) {
        self.cache.poll();
        if self.muted {
            return;
        }
        if let Some(clip) = self.cache.get(sound) {
            // A failed write only loses the sound
            let _ = self.out.write_all(&clip.data);
            let _ = self.out.flush();
        }
    }
}

/// Remembers every sound asked for. Used by headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudioSink {
    pub played: Vec<SoundId>,
}

impl AudioSink for RecordingAudioSink {
    fn play_sound(&mut self, sound: SoundId) {
        self.played.push(sound);
    }
}
