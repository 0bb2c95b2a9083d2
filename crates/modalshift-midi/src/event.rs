//! RT-safe MIDI event types.
//!
//! Frame offsets are carried so hosts can pass their event lists through
//! unchanged; the engine applies every event in a block at block start.

use midi_msg::{Channel, ChannelVoiceMsg, MidiMsg};

use crate::{Error, Result};

/// MIDI channel-voice event with a frame offset into the current block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MidiEvent {
    /// Offset within the current buffer (0 = first sample).
    pub frame_offset: usize,
    pub channel: Channel,
    pub msg: ChannelVoiceMsg,
}

impl MidiEvent {
    #[inline]
    pub fn note_on(frame_offset: usize, channel: u8, note: u8, velocity: u8) -> Self {
        Self {
            frame_offset,
            channel: Channel::from_u8(channel),
            msg: ChannelVoiceMsg::NoteOn { note, velocity },
        }
    }

    #[inline]
    pub fn note_off(frame_offset: usize, channel: u8, note: u8, velocity: u8) -> Self {
        Self {
            frame_offset,
            channel: Channel::from_u8(channel),
            msg: ChannelVoiceMsg::NoteOff { note, velocity },
        }
    }

    /// Note-on with non-zero velocity.
    #[inline]
    pub fn is_note_on(&self) -> bool {
        matches!(self.msg, ChannelVoiceMsg::NoteOn { velocity, .. } if velocity > 0)
    }

    #[inline]
    pub fn note(&self) -> Option<u8> {
        match self.msg {
            ChannelVoiceMsg::NoteOn { note, .. } | ChannelVoiceMsg::NoteOff { note, .. } => {
                Some(note)
            }
            _ => None,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with_offset(bytes, 0)
    }

    /// Parse a raw channel-voice message as delivered by a host.
    pub fn from_bytes_with_offset(bytes: &[u8], frame_offset: usize) -> Result<Self> {
        let (msg, _len) = MidiMsg::from_midi(bytes).map_err(Error::Parse)?;
        match msg {
            MidiMsg::ChannelVoice { channel, msg } => Ok(Self {
                frame_offset,
                channel,
                msg,
            }),
            _ => Err(Error::NotChannelVoice),
        }
    }
}
