// Decoder validation against hand-assembled FDBAQ block streams.
//
// The streams are built with the crate's own BitWriter and the encode side
// of the Huffman tables, so every test documents the exact bit pattern it
// decodes.

use baqdec_rs::bit_io::{BitReader, BitWriter};
use baqdec_rs::block_decoder::BlockDecoder;
use baqdec_rs::constants::{
    BLOCK_SAMPLE_COUNT, BYPASS_SAMPLE_BITS, MODE_SELECTOR_BITS, SCALE_INDEX_BITS,
};
use baqdec_rs::reconstruction::{reconstruct, scale_factor};
use baqdec_rs::{BaqError, ChannelLayout, CodeTables, PacketDecoder, ReconstructionMode};

const HUFFMAN_MODES: [ReconstructionMode; 5] = [
    ReconstructionMode::Brc0,
    ReconstructionMode::Brc1,
    ReconstructionMode::Brc2,
    ReconstructionMode::Brc3,
    ReconstructionMode::Brc4,
];

/// Appends a block header and Huffman-coded samples to `writer`.
fn write_huffman_block(
    writer: &mut BitWriter,
    tables: &CodeTables,
    mode: ReconstructionMode,
    scale_index: u8,
    samples: &[(u8, u8)],
) {
    writer.write_bits(mode as u32, MODE_SELECTOR_BITS);
    writer.write_bits(scale_index as u32, SCALE_INDEX_BITS);
    let table = tables.table(mode).unwrap();
    for &(sign, mcode) in samples {
        writer.write_bit(sign);
        let code = table.code(mcode);
        writer.write_bits(code.value as u32, code.length);
    }
}

fn write_bypass_block(writer: &mut BitWriter, values: &[i32]) {
    writer.write_bits(7, MODE_SELECTOR_BITS);
    writer.write_bits(0, SCALE_INDEX_BITS);
    for &v in values {
        writer.write_bits((v & 0x3FF) as u32, BYPASS_SAMPLE_BITS);
    }
}

#[test]
fn roundtrip_every_symbol_of_every_mode() {
    let tables = CodeTables::new();
    let decoder = BlockDecoder::new(&tables);
    let scale_index = 4u8;

    for mode in HUFFMAN_MODES {
        // alternate signs over the full magnitude code range
        let samples: Vec<(u8, u8)> = (0..mode.symbol_count() as u8)
            .map(|mcode| ((mcode % 2), mcode))
            .collect();

        let mut writer = BitWriter::new();
        write_huffman_block(&mut writer, &tables, mode, scale_index, &samples);
        let bytes = writer.finish();

        let block = decoder
            .decode_block(&mut BitReader::new(&bytes), samples.len())
            .unwrap();

        assert_eq!(block.mode, mode);
        assert_eq!(block.scale_index, scale_index);
        let scale = scale_factor(scale_index);
        for (value, &(sign, mcode)) in block.samples.iter().zip(&samples) {
            let expected = reconstruct(sign, mcode, mode, scale);
            assert_eq!(*value, expected, "mode {mode:?} mcode {mcode}");
        }
    }
}

#[test]
fn bypass_block_returns_twos_complement_values_unchanged() {
    // scenario: 4 fixed-width samples, identity scale
    let values = [5, -1, -512, 511];
    let mut writer = BitWriter::new();
    write_bypass_block(&mut writer, &values);
    let bytes = writer.finish();

    let tables = CodeTables::new();
    let block = BlockDecoder::new(&tables)
        .decode_block(&mut BitReader::new(&bytes), 4)
        .unwrap();

    assert_eq!(block.samples, vec![5.0, -1.0, -512.0, 511.0]);
}

#[test]
fn brc0_documented_bit_pattern() {
    // After the 11 header bits (mode 0, scale index 1), the byte-sized
    // pattern 0b0110_1110 decodes as two samples: sign 0 + codeword 110
    // (mcode 2) and sign 1 + codeword 110 (mcode 2), with 0 left over.
    let mut writer = BitWriter::new();
    writer.write_bits(0, MODE_SELECTOR_BITS);
    writer.write_bits(1, SCALE_INDEX_BITS);
    writer.write_bits(0b0110_1110, 8);
    let bytes = writer.finish();

    let tables = CodeTables::new();
    let block = BlockDecoder::new(&tables)
        .decode_block(&mut BitReader::new(&bytes), 2)
        .unwrap();

    let expected = 1.8208f32 * 0.63;
    assert!((block.samples[0] - expected).abs() < 1e-6);
    assert!((block.samples[1] + expected).abs() < 1e-6);
}

#[test]
fn garbage_tail_yields_partial_result_not_crash() {
    // a valid full block, then 3 bits that cannot start a block
    let values: Vec<i32> = (0..BLOCK_SAMPLE_COUNT as i32).map(|v| v - 64).collect();
    let mut writer = BitWriter::new();
    write_bypass_block(&mut writer, &values);
    writer.write_bits(0b101, 3);
    let bytes = writer.finish();

    let tables = CodeTables::new();
    let err = PacketDecoder::new(&tables)
        .decode(&bytes, 66, ChannelLayout::Alternating)
        .unwrap_err();

    assert_eq!(err.partial.blocks_consumed, 1);
    assert_eq!(err.partial.i_samples.len(), 64);
    assert_eq!(err.partial.q_samples.len(), 64);
    assert_eq!(err.partial.i_samples[0], -64.0);
    assert!(matches!(
        err.cause,
        BaqError::TruncatedStream | BaqError::InvalidMode
    ));
}

#[test]
fn decoding_is_idempotent() {
    let tables = CodeTables::new();
    let samples: Vec<(u8, u8)> = (0..16u8).map(|i| (i % 2, i % 10)).collect();
    let mut writer = BitWriter::new();
    write_huffman_block(&mut writer, &tables, ReconstructionMode::Brc3, 17, &samples);
    let bytes = writer.finish();

    let decoder = PacketDecoder::new(&tables);
    let first = decoder.decode(&bytes, 8, ChannelLayout::Contiguous).unwrap();
    let second = decoder.decode(&bytes, 8, ChannelLayout::Contiguous).unwrap();
    assert_eq!(first, second);
}

#[test]
fn concurrent_decodes_share_tables_without_divergence() {
    let tables = CodeTables::new();
    let samples: Vec<(u8, u8)> = (0..64u8).map(|i| (i % 2, i % 16)).collect();
    let mut writer = BitWriter::new();
    write_huffman_block(&mut writer, &tables, ReconstructionMode::Brc4, 100, &samples);
    let bytes = writer.finish();

    let reference = PacketDecoder::new(&tables)
        .decode(&bytes, 32, ChannelLayout::Alternating)
        .unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    PacketDecoder::new(&tables)
                        .decode(&bytes, 32, ChannelLayout::Alternating)
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), reference);
        }
    });
}
