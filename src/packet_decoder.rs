//! Packet-level decoding: drives the block decoder across one packet's
//! source data field and assembles the I and Q channel sequences.

use thiserror::Error;

use crate::bit_io::BitReader;
use crate::block_decoder::BlockDecoder;
use crate::constants::BLOCK_SAMPLE_COUNT;
use crate::error::BaqError;
use crate::huffman::CodeTables;
use crate::ChannelLayout;

/// Fully decoded channel sequences of one packet.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPacket {
    pub i_samples: Vec<f32>,
    pub q_samples: Vec<f32>,
    pub blocks_consumed: usize,
}

/// Failure report for a packet that could not be fully decoded.
///
/// Everything recovered before the failure is carried along, so a batch
/// consumer can keep partial results and diagnostics instead of losing the
/// packet outright.
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "Incomplete data: decoded {}/{expected} I and {}/{expected} Q samples in {} blocks: {cause}",
    .partial.i_samples.len(),
    .partial.q_samples.len(),
    .partial.blocks_consumed
)]
pub struct IncompletePacket {
    pub cause: BaqError,
    pub expected: usize,
    pub partial: DecodedPacket,
}

/// Decodes whole packets against a shared set of code tables.
///
/// Holds no mutable state: one instance may serve any number of packets,
/// concurrently, as long as the tables outlive it.
pub struct PacketDecoder<'t> {
    blocks: BlockDecoder<'t>,
}

impl<'t> PacketDecoder<'t> {
    pub fn new(tables: &'t CodeTables) -> Self {
        Self {
            blocks: BlockDecoder::new(tables),
        }
    }

    /// Decodes `samples_per_channel` I and Q samples from `data`.
    ///
    /// Blocks are consumed until the declared count is reached; trailing
    /// blocks and padding are left unread. If the buffer runs out or a
    /// block fails first, the partial result is returned inside the error.
    pub fn decode(
        &self,
        data: &[u8],
        samples_per_channel: usize,
        layout: ChannelLayout,
    ) -> Result<DecodedPacket, IncompletePacket> {
        let total = samples_per_channel * 2;
        let mut i_samples = Vec::with_capacity(samples_per_channel);
        let mut q_samples = Vec::with_capacity(samples_per_channel);
        let mut blocks_consumed = 0;

        let mut reader = BitReader::new(data);
        let mut produced = 0;
        while produced < total {
            if reader.bits_remaining() == 0 {
                // clean exhaustion at a block boundary
                return Err(IncompletePacket {
                    cause: BaqError::IncompleteData,
                    expected: samples_per_channel,
                    partial: DecodedPacket {
                        i_samples,
                        q_samples,
                        blocks_consumed,
                    },
                });
            }

            let slots = BLOCK_SAMPLE_COUNT.min(total - produced);
            match self.blocks.decode_block(&mut reader, slots) {
                Ok(block) => {
                    for value in block.samples {
                        route_sample(
                            layout,
                            produced,
                            samples_per_channel,
                            value,
                            &mut i_samples,
                            &mut q_samples,
                        );
                        produced += 1;
                    }
                    blocks_consumed += 1;
                }
                Err(cause) => {
                    return Err(IncompletePacket {
                        cause,
                        expected: samples_per_channel,
                        partial: DecodedPacket {
                            i_samples,
                            q_samples,
                            blocks_consumed,
                        },
                    });
                }
            }
        }

        Ok(DecodedPacket {
            i_samples,
            q_samples,
            blocks_consumed,
        })
    }
}

fn route_sample(
    layout: ChannelLayout,
    index: usize,
    samples_per_channel: usize,
    value: f32,
    i_samples: &mut Vec<f32>,
    q_samples: &mut Vec<f32>,
) {
    let is_i = match layout {
        ChannelLayout::Alternating => index % 2 == 0,
        ChannelLayout::Contiguous => index < samples_per_channel,
    };
    if is_i {
        i_samples.push(value);
    } else {
        q_samples.push(value);
    }
}
