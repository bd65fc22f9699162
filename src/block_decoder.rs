//! Per-block decoding: header parse plus sample expansion.
//!
//! A block starts with a 3-bit mode selector and an 8-bit scale index.
//! Huffman-coded blocks then carry one sign bit and one magnitude codeword
//! per sample; bypass blocks carry raw 10-bit two's-complement samples.
//! A block either decodes completely or fails as a whole.

use crate::bit_io::BitReader;
use crate::constants::{BYPASS_SAMPLE_BITS, MODE_SELECTOR_BITS, SCALE_INDEX_BITS};
use crate::error::BaqError;
use crate::huffman::CodeTables;
use crate::reconstruction;
use crate::ReconstructionMode;

/// One decoded compression block.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBlock {
    pub mode: ReconstructionMode,
    pub scale_index: u8,
    pub samples: Vec<f32>,
}

/// Decodes one block at a time against a shared set of code tables.
pub struct BlockDecoder<'t> {
    tables: &'t CodeTables,
}

impl<'t> BlockDecoder<'t> {
    pub fn new(tables: &'t CodeTables) -> Self {
        Self { tables }
    }

    /// Decodes the block at the reader's current position.
    ///
    /// `sample_count` is the number of sample slots to fill, at most the
    /// format's block length; the caller passes fewer for the final block
    /// of a packet. On any error the reader is left mid-block and the
    /// block yields no samples at all.
    pub fn decode_block(
        &self,
        reader: &mut BitReader,
        sample_count: usize,
    ) -> Result<SampleBlock, BaqError> {
        let selector = reader.read_bits(MODE_SELECTOR_BITS)? as u8;
        let mode = ReconstructionMode::from_selector(selector)?;
        let scale_index = reader.read_bits(SCALE_INDEX_BITS)? as u8;

        let mut samples = Vec::with_capacity(sample_count);
        if mode.is_bypass() {
            // scale is identity for uncompressed samples
            for _ in 0..sample_count {
                let raw = reader.read_bits(BYPASS_SAMPLE_BITS)?;
                samples.push(sign_extend_bypass(raw) as f32);
            }
        } else {
            let scale = reconstruction::scale_factor(scale_index);
            for _ in 0..sample_count {
                let sign = reader.read_bit()?;
                let mcode = self.tables.decode_symbol(mode, reader)?;
                samples.push(reconstruction::reconstruct(sign, mcode, mode, scale));
            }
        }

        Ok(SampleBlock {
            mode,
            scale_index,
            samples,
        })
    }
}

/// Interprets a raw 10-bit field as a two's-complement value.
fn sign_extend_bypass(raw: u32) -> i32 {
    let sign_bit = 1u32 << (BYPASS_SAMPLE_BITS - 1);
    if raw & sign_bit != 0 {
        raw as i32 - (1 << BYPASS_SAMPLE_BITS)
    } else {
        raw as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit_io::BitWriter;
    use crate::reconstruction::{scale_factor, NRL_BRC0};

    #[test]
    fn test_bypass_block_passes_values_through() {
        let mut writer = BitWriter::new();
        writer.write_bits(7, MODE_SELECTOR_BITS); // bypass selector
        writer.write_bits(42, SCALE_INDEX_BITS); // scale declared but identity
        for raw in [5u32, 0x3FF, 0x200, 0x1FF] {
            writer.write_bits(raw, BYPASS_SAMPLE_BITS);
        }
        let bytes = writer.finish();

        let tables = CodeTables::new();
        let block = BlockDecoder::new(&tables)
            .decode_block(&mut BitReader::new(&bytes), 4)
            .unwrap();

        assert_eq!(block.mode, ReconstructionMode::Bypass);
        assert_eq!(block.scale_index, 42);
        assert_eq!(block.samples, vec![5.0, -1.0, -512.0, 511.0]);
    }

    #[test]
    fn test_brc0_block_known_codewords() {
        // two samples: (+, mcode 0) and (-, mcode 3)
        let mut writer = BitWriter::new();
        writer.write_bits(0, MODE_SELECTOR_BITS);
        writer.write_bits(1, SCALE_INDEX_BITS);
        writer.write_bit(0);
        writer.write_bits(0b0, 1); // mcode 0
        writer.write_bit(1);
        writer.write_bits(0b111, 3); // mcode 3
        let bytes = writer.finish();

        let tables = CodeTables::new();
        let block = BlockDecoder::new(&tables)
            .decode_block(&mut BitReader::new(&bytes), 2)
            .unwrap();

        let scale = scale_factor(1);
        assert_eq!(block.samples.len(), 2);
        assert!((block.samples[0] - NRL_BRC0[0] * scale).abs() < 1e-6);
        assert!((block.samples[1] + NRL_BRC0[3] * scale).abs() < 1e-6);
    }

    #[test]
    fn test_reserved_selector_is_rejected() {
        for selector in [5u32, 6] {
            let mut writer = BitWriter::new();
            writer.write_bits(selector, MODE_SELECTOR_BITS);
            writer.write_bits(0, SCALE_INDEX_BITS);
            let bytes = writer.finish();

            let tables = CodeTables::new();
            let result =
                BlockDecoder::new(&tables).decode_block(&mut BitReader::new(&bytes), 1);
            assert_eq!(result, Err(BaqError::InvalidMode));
        }
    }

    #[test]
    fn test_truncated_header() {
        let tables = CodeTables::new();
        let decoder = BlockDecoder::new(&tables);

        // selector readable, scale index missing
        let data = [0b000_00000];
        let mut reader = BitReader::with_bit_len(&data, 6);
        assert_eq!(decoder.decode_block(&mut reader, 1), Err(BaqError::TruncatedStream));
    }

    #[test]
    fn test_truncated_sample_aborts_block() {
        let mut writer = BitWriter::new();
        writer.write_bits(0, MODE_SELECTOR_BITS);
        writer.write_bits(1, SCALE_INDEX_BITS);
        writer.write_bit(0);
        writer.write_bits(0b0, 1); // one complete sample
        writer.write_bit(1); // second sample: sign only
        let bit_len = writer.bit_len();
        let bytes = writer.finish();

        let tables = CodeTables::new();
        let mut reader = BitReader::with_bit_len(&bytes, bit_len);
        let result = BlockDecoder::new(&tables).decode_block(&mut reader, 2);
        assert_eq!(result, Err(BaqError::TruncatedStream));
    }

    #[test]
    fn test_sign_extend_bypass_range() {
        assert_eq!(sign_extend_bypass(0), 0);
        assert_eq!(sign_extend_bypass(511), 511);
        assert_eq!(sign_extend_bypass(512), -512);
        assert_eq!(sign_extend_bypass(1023), -1);
    }
}
