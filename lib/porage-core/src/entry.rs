use bytes::{Buf, BufMut, Bytes, BytesMut};
use snafu::{ensure, Snafu};

/// Identifier of a ledger. Assigned by the client on creation.
pub type LedgerId = u64;

/// Identifier of an entry within a ledger. Dense, starting at 0.
pub type EntryId = i64;

/// Number of header bytes preceding the payload of a serialized [`LedgerEntry`].
pub(crate) const LEDGER_ENTRY_HEADER_LEN: usize = 8;

/// Number of header bytes preceding the payload of a serialized
/// [`JournalEntryPayload`].
pub(crate) const JOURNAL_PAYLOAD_HEADER_LEN: usize = 16;

/// Error when decoding a serialized entry or index value.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(display("buffer too short for {what}: need {need} bytes, have {have}"))]
pub struct DecodeError {
    what: &'static str,
    need: usize,
    have: usize,
}

/// A single `(entry_id, payload)` pair in a ledger.
///
/// Serialized as the big-endian 8-byte entry ID followed by the raw payload;
/// the total size is carried by the enclosing container (index entry or
/// journal frame), not the record itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerEntry {
    pub entry_id: EntryId,
    pub payload: Bytes,
}

impl LedgerEntry {
    pub fn new(entry_id: EntryId, payload: Bytes) -> Self {
        Self { entry_id, payload }
    }

    /// Total serialized size, header included.
    pub fn encoded_len(&self) -> usize {
        LEDGER_ENTRY_HEADER_LEN + self.payload.len()
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.reserve(self.encoded_len());
        buf.put_i64(self.entry_id);
        buf.put_slice(&self.payload);
    }

    pub fn decode(mut buf: Bytes) -> Result<Self, DecodeError> {
        ensure!(
            buf.remaining() >= LEDGER_ENTRY_HEADER_LEN,
            DecodeSnafu {
                what: "ledger entry",
                need: LEDGER_ENTRY_HEADER_LEN,
                have: buf.remaining(),
            }
        );
        let entry_id = buf.get_i64();
        Ok(Self {
            entry_id,
            payload: buf,
        })
    }
}

/// Payload of a journal frame: the ledger the entry belongs to, its assigned
/// ID, and the raw bytes.
///
/// Serialized as big-endian `ledger_id ‖ entry_id ‖ payload`; the payload
/// length is derived from the enclosing frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JournalEntryPayload {
    pub ledger_id: LedgerId,
    pub entry_id: EntryId,
    pub payload: Bytes,
}

impl JournalEntryPayload {
    pub fn new(ledger_id: LedgerId, entry_id: EntryId, payload: Bytes) -> Self {
        Self {
            ledger_id,
            entry_id,
            payload,
        }
    }

    /// Total serialized size, header included.
    pub fn encoded_len(&self) -> usize {
        JOURNAL_PAYLOAD_HEADER_LEN + self.payload.len()
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.reserve(self.encoded_len());
        buf.put_u64(self.ledger_id);
        buf.put_i64(self.entry_id);
        buf.put_slice(&self.payload);
    }

    pub fn decode(mut buf: Bytes) -> Result<Self, DecodeError> {
        ensure!(
            buf.remaining() >= JOURNAL_PAYLOAD_HEADER_LEN,
            DecodeSnafu {
                what: "journal entry payload",
                need: JOURNAL_PAYLOAD_HEADER_LEN,
                have: buf.remaining(),
            }
        );
        let ledger_id = buf.get_u64();
        let entry_id = buf.get_i64();
        Ok(Self {
            ledger_id,
            entry_id,
            payload: buf,
        })
    }
}

/// Location of a committed entry inside its ledger's entry log.
///
/// Stored as the value of the index, serialized as 16 big-endian bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexValue {
    pub offset: u64,
    pub size: u64,
}

impl IndexValue {
    pub(crate) const ENCODED_LEN: usize = 16;

    pub(crate) fn encode(&self) -> [u8; Self::ENCODED_LEN] {
        let mut buf = [0u8; Self::ENCODED_LEN];
        buf[..8].copy_from_slice(&self.offset.to_be_bytes());
        buf[8..].copy_from_slice(&self.size.to_be_bytes());
        buf
    }

    pub(crate) fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        ensure!(
            buf.len() >= Self::ENCODED_LEN,
            DecodeSnafu {
                what: "index value",
                need: Self::ENCODED_LEN,
                have: buf.len(),
            }
        );
        let mut offset = [0u8; 8];
        let mut size = [0u8; 8];
        offset.copy_from_slice(&buf[..8]);
        size.copy_from_slice(&buf[8..16]);
        Ok(Self {
            offset: u64::from_be_bytes(offset),
            size: u64::from_be_bytes(size),
        })
    }
}

/// Transient per-write record produced by the entry log, drained on flush and
/// promoted into the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryMetadata {
    pub entry_id: EntryId,
    pub offset: u64,
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_entry_codec() {
        let entry = LedgerEntry::new(42, Bytes::from_static(b"hello"));
        let mut buf = BytesMut::new();
        entry.encode(&mut buf);
        assert_eq!(buf.len(), entry.encoded_len());

        let decoded = LedgerEntry::decode(buf.freeze()).expect("decode should succeed");
        assert_eq!(decoded, entry);
    }

    #[test]
    fn journal_payload_codec() {
        let payload = JournalEntryPayload::new(7, 3, Bytes::from_static(b"payload"));
        let mut buf = BytesMut::new();
        payload.encode(&mut buf);

        let decoded = JournalEntryPayload::decode(buf.freeze()).expect("decode should succeed");
        assert_eq!(decoded, payload);
    }

    #[test]
    fn empty_payload_is_valid() {
        let entry = LedgerEntry::new(0, Bytes::new());
        let mut buf = BytesMut::new();
        entry.encode(&mut buf);
        assert_eq!(buf.len(), LEDGER_ENTRY_HEADER_LEN);

        let decoded = LedgerEntry::decode(buf.freeze()).expect("decode should succeed");
        assert!(decoded.payload.is_empty());
    }

    #[test]
    fn truncated_buffers_are_rejected() {
        let err = LedgerEntry::decode(Bytes::from_static(&[0u8; 4])).unwrap_err();
        assert!(err.to_string().contains("ledger entry"));

        let err = JournalEntryPayload::decode(Bytes::from_static(&[0u8; 15])).unwrap_err();
        assert!(err.to_string().contains("journal entry payload"));

        assert!(IndexValue::decode(&[0u8; 8]).is_err());
    }

    #[test]
    fn index_value_round_trip() {
        let value = IndexValue {
            offset: 1 << 40,
            size: 513,
        };
        let decoded = IndexValue::decode(&value.encode()).expect("decode should succeed");
        assert_eq!(decoded, value);
    }
}
