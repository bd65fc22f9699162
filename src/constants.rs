// Block layout of the FDBAQ user data field, as defined in the Sentinel-1
// SAR Space Packet Protocol Data Unit specification.

/// Samples carried by one full compression block.
pub const BLOCK_SAMPLE_COUNT: usize = 128;

/// Width of the per-block reconstruction mode selector (bit rate code).
pub const MODE_SELECTOR_BITS: u8 = 3;

/// Width of the per-block scale index (threshold index).
pub const SCALE_INDEX_BITS: u8 = 8;

/// Width of one uncompressed sample in bypass blocks (two's complement).
pub const BYPASS_SAMPLE_BITS: u8 = 10;

/// Longest Huffman codeword over all reconstruction modes (BRC4).
pub const MAX_CODE_LENGTH: usize = 10;

/// Number of distinct scale indices (8-bit threshold index).
pub const SCALE_INDEX_COUNT: usize = 256;

/// CCSDS space packet primary header size in bytes.
pub const PRIMARY_HEADER_SIZE: usize = 6;

/// Sentinel-1 packet secondary header size in bytes.
pub const SECONDARY_HEADER_SIZE: usize = 62;

/// Expected value of the secondary header sync marker field.
pub const SYNC_MARKER: u32 = 0x352E_F853;
