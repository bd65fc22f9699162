use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaqError {
    #[error("Bit stream ended before the requested field could be read")]
    TruncatedStream = 1,
    #[error("Bit sequence matches no Huffman codeword in the active table")]
    InvalidCode = 2,
    #[error("Block header selects a reconstruction mode outside the defined set")]
    InvalidMode = 3,
    #[error("Fewer samples decoded than the packet declared")]
    IncompleteData = 4,

    // Packet envelope errors
    #[error("Packet shorter than its declared length")]
    PacketTooShort = 10,
    #[error("Secondary header sync marker mismatch")]
    InvalidSyncMarker = 11,
}
