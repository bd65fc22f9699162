pub mod constants;
pub mod error;

pub use block_decoder::{BlockDecoder, SampleBlock};
pub use error::BaqError;
pub use huffman::CodeTables;
pub use packet_decoder::{DecodedPacket, IncompletePacket, PacketDecoder};

use num_enum::TryFromPrimitive;

/// Per-block reconstruction mode selector.
///
/// Read from the 3-bit field at the head of every compression block. Values
/// 0 through 4 are the FDBAQ bit rate codes and select one Huffman table and
/// one reconstruction level table each. Value 7 marks an uncompressed block
/// whose samples are stored as raw 10-bit two's-complement values. The
/// remaining selector values are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum ReconstructionMode {
    Brc0 = 0,
    Brc1 = 1,
    Brc2 = 2,
    Brc3 = 3,
    Brc4 = 4,
    Bypass = 7,
}

impl ReconstructionMode {
    /// Parses the raw selector field of a block header.
    pub fn from_selector(raw: u8) -> Result<Self, BaqError> {
        Self::try_from(raw).map_err(|_| BaqError::InvalidMode)
    }

    /// Index into the per-mode Huffman and reconstruction level tables.
    /// `None` for bypass blocks, which carry no coded magnitudes.
    pub fn table_index(self) -> Option<usize> {
        match self {
            Self::Bypass => None,
            mode => Some(mode as usize),
        }
    }

    /// Number of distinct magnitude codes the mode can produce.
    pub fn symbol_count(self) -> usize {
        match self {
            Self::Brc0 => 4,
            Self::Brc1 => 5,
            Self::Brc2 => 7,
            Self::Brc3 => 10,
            Self::Brc4 => 16,
            Self::Bypass => 0,
        }
    }

    pub fn is_bypass(self) -> bool {
        self == Self::Bypass
    }
}

/// How consecutive decoded values are distributed over the I and Q channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelLayout {
    /// Values alternate I, Q, I, Q across the block stream.
    Alternating,
    /// The first half of the value stream is the I channel, the second half
    /// the Q channel. This matches the channel-sequential sub-streams of the
    /// packet format.
    #[default]
    Contiguous,
}

pub mod bit_io;
pub mod block_decoder;
pub mod huffman;
pub mod isp;
pub mod packet_decoder;
pub mod reconstruction;
