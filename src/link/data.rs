use std::fmt::Display;

/// Tuple value type tag for unsigned integers.
pub const TUPLE_UINT: u8 = 0x02;

/// A command the phone can be asked to execute.
///
/// The discriminants are the 1-byte codes written on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start ringing
    Start = 0x01,
    /// Stop ringing
    Stop = 0x02,
}

impl Command {
    /// The 1-byte wire code of this command.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Start => write!(f, "ring"),
            Command::Stop => write!(f, "silence"),
        }
    }
}

/// A single key-value entry of a message frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuple {
    /// Dictionary key
    pub key: u32,
    /// Value type tag
    pub kind: u8,
    /// Raw value bytes
    pub value: Vec<u8>,
}

/// A key-value message exchanged with the companion bridge.
///
/// Body layout: `u8` tuple count, then per tuple a `u32` LE key, a `u8`
/// type tag, a `u16` LE value length, and the value bytes. On the wire each
/// body is preceded by a `u16` LE length prefix (written by the link core,
/// not part of [`encode`]).
///
/// [`encode`]: Frame::encode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub tuples: Vec<Tuple>,
}

impl Frame {
    /// Builds the outbound frame for a command: a single unsigned-integer
    /// tuple holding the command code under the given key.
    pub fn command(key: u32, cmd: Command) -> Self {
        Self {
            tuples: vec![Tuple {
                key,
                kind: TUPLE_UINT,
                value: vec![cmd.code()],
            }],
        }
    }

    /// Encoded size of the frame body in bytes.
    pub fn encoded_len(&self) -> usize {
        1 + self
            .tuples
            .iter()
            .map(|tuple| 7 + tuple.value.len())
            .sum::<usize>()
    }

    /// Encodes the frame body.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.push(self.tuples.len() as u8);
        for tuple in &self.tuples {
            out.extend_from_slice(&tuple.key.to_le_bytes());
            out.push(tuple.kind);
            out.extend_from_slice(&(tuple.value.len() as u16).to_le_bytes());
            out.extend_from_slice(&tuple.value);
        }
        out
    }

    /// Decodes a frame body.
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        let (&count, mut rest) = bytes.split_first().ok_or(FrameError::Truncated)?;
        let mut tuples = Vec::with_capacity(count as usize);
        for _ in 0..count {
            if rest.len() < 7 {
                return Err(FrameError::Truncated);
            }
            let key = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]);
            let kind = rest[4];
            let len = u16::from_le_bytes([rest[5], rest[6]]) as usize;
            rest = &rest[7..];
            if rest.len() < len {
                return Err(FrameError::Truncated);
            }
            tuples.push(Tuple {
                key,
                kind,
                value: rest[..len].to_vec(),
            });
            rest = &rest[len..];
        }
        if !rest.is_empty() {
            return Err(FrameError::TrailingBytes(rest.len()));
        }
        Ok(Self { tuples })
    }
}

/// Delivery outcomes and inbound traffic reported by the link actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// An outbound command was handed to the bridge
    Sent { cmd: Command },
    /// An outbound command could not be handed to the bridge
    SendFailed { cmd: Command },
    /// The bridge sent us a message; the payload is not interpreted
    Received(Frame),
}

/// Errors surfaced directly by [`Link::send`].
///
/// [`Link::send`]: super::Link::send
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// The bounded outbox has no room for another command
    #[error("outbox full, command dropped")]
    OutboxFull,
    /// The link actor is gone
    #[error("link actor is gone")]
    Closed,
}

/// Errors produced while decoding or accepting frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The body ended before the declared tuples did
    #[error("frame truncated")]
    Truncated,
    /// Bytes were left over after the last declared tuple
    #[error("{0} trailing bytes after the last tuple")]
    TrailingBytes(usize),
    /// The frame is larger than the inbox accepts
    #[error("frame of {len} bytes exceeds the {max} byte inbox")]
    Oversize { len: usize, max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_codes() {
        assert_eq!(Command::Start.code(), 0x01);
        assert_eq!(Command::Stop.code(), 0x02);
        assert_eq!(Command::Start.to_string(), "ring");
        assert_eq!(Command::Stop.to_string(), "silence");
    }

    #[test]
    fn test_command_frame_layout() {
        let frame = Frame::command(0x0, Command::Start);
        // count, key (4), type, length (2), value
        assert_eq!(
            frame.encode(),
            vec![0x01, 0x00, 0x00, 0x00, 0x00, TUPLE_UINT, 0x01, 0x00, 0x01]
        );
        assert_eq!(frame.encoded_len(), 9);

        let frame = Frame::command(0x1, Command::Stop);
        assert_eq!(
            frame.encode(),
            vec![0x01, 0x01, 0x00, 0x00, 0x00, TUPLE_UINT, 0x01, 0x00, 0x02]
        );
    }

    #[test]
    fn test_decode_matches_encode() {
        let frame = Frame::command(0x1, Command::Stop);
        assert_eq!(Frame::decode(&frame.encode()).unwrap(), frame);
    }

    #[test]
    fn test_decode_rejects_truncated() {
        assert_eq!(Frame::decode(&[]), Err(FrameError::Truncated));
        // One tuple declared, header cut short.
        assert_eq!(Frame::decode(&[0x01, 0x00, 0x00]), Err(FrameError::Truncated));
        // Value length says 4 bytes, only 1 present.
        assert_eq!(
            Frame::decode(&[0x01, 0x00, 0x00, 0x00, 0x00, TUPLE_UINT, 0x04, 0x00, 0x01]),
            Err(FrameError::Truncated)
        );
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = Frame::command(0x0, Command::Start).encode();
        bytes.extend_from_slice(&[0xAA, 0xBB]);
        assert_eq!(Frame::decode(&bytes), Err(FrameError::TrailingBytes(2)));
    }

    #[test]
    fn test_empty_frame_is_well_formed() {
        assert_eq!(Frame::decode(&[0x00]).unwrap(), Frame::default());
    }
}
