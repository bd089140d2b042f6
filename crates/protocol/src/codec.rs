//! Binary codec for shared-state messages.

use crate::SharedStateMessage;
use thiserror::Error;

/// Errors that can occur during encoding/decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

/// Encode a message to bytes.
pub fn encode(message: &SharedStateMessage) -> Result<Vec<u8>, CodecError> {
    Ok(bincode::serde::encode_to_vec(message, bincode::config::standard())?)
}

/// Decode a message from bytes.
pub fn decode(data: &[u8]) -> Result<SharedStateMessage, CodecError> {
    let (message, _) = bincode::serde::decode_from_slice(data, bincode::config::standard())?;
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agarium_core::{PlayerState, PlayersSnapshot, PLAYERS_KEY};

    #[test]
    fn put_survives_encoding() {
        let msg = SharedStateMessage::put(PLAYERS_KEY, "k3x9a0pq", PlayerState { x: 12.5, y: 1999.0, size: 20.5 });
        let decoded = decode(&encode(&msg).unwrap()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn snapshot_keeps_every_entry() {
        let mut entries = PlayersSnapshot::new();
        for (i, id) in ["aaaa1111", "bbbb2222", "cccc3333"].iter().enumerate() {
            entries.insert(id.to_string(), PlayerState { x: i as f32, y: 0.0, size: 20.0 + i as f32 });
        }
        let msg = SharedStateMessage::snapshot(PLAYERS_KEY, entries.clone());

        match decode(&encode(&msg).unwrap()).unwrap() {
            SharedStateMessage::Snapshot(snapshot) => {
                assert_eq!(snapshot.key, PLAYERS_KEY);
                assert_eq!(snapshot.entries, entries);
            }
            other => panic!("wrong message type: {other:?}"),
        }
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(decode(&[0xff, 0xff, 0xff]), Err(CodecError::Decode(_))));
    }
}
