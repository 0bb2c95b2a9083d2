//! Error types for modalshift-midi.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("MIDI parse error: {0:?}")]
    Parse(midi_msg::ParseError),

    #[error("Expected a channel voice message")]
    NotChannelVoice,
}

pub type Result<T> = std::result::Result<T, Error>;
