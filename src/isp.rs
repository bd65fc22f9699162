//! Instrument Source Packet envelope parsing.
//!
//! A packet is a 6-byte CCSDS primary header, a 62-byte secondary header,
//! and the source data field carrying the compressed samples. Only the
//! fields the decoder and the CLI consume are surfaced here; everything
//! else in the secondary header is skipped by offset.

use num_enum::FromPrimitive;

use crate::constants::{PRIMARY_HEADER_SIZE, SECONDARY_HEADER_SIZE, SYNC_MARKER};
use crate::error::BaqError;

/// CCSDS space packet primary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryHeader {
    pub version: u8,
    pub packet_type: u8,
    pub has_secondary_header: bool,
    pub apid: u16,
    pub sequence_flags: u8,
    pub sequence_count: u16,
    /// One less than the user data field length in bytes.
    pub data_length: u16,
}

impl PrimaryHeader {
    pub fn parse(data: &[u8]) -> Result<Self, BaqError> {
        if data.len() < PRIMARY_HEADER_SIZE {
            return Err(BaqError::PacketTooShort);
        }
        let word0 = u16::from_be_bytes([data[0], data[1]]);
        let word1 = u16::from_be_bytes([data[2], data[3]]);
        let word2 = u16::from_be_bytes([data[4], data[5]]);
        Ok(Self {
            version: (word0 >> 13) as u8,
            packet_type: ((word0 >> 12) & 1) as u8,
            has_secondary_header: (word0 >> 11) & 1 == 1,
            apid: word0 & 0x07FF,
            sequence_flags: (word1 >> 14) as u8,
            sequence_count: word1 & 0x3FFF,
            data_length: word2,
        })
    }

    /// Length in bytes of the user data field following this header.
    pub fn user_data_len(&self) -> usize {
        self.data_length as usize + 1
    }
}

/// Signal type carried in the secondary header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum SignalType {
    Echo = 0,
    Noise = 1,
    TxCal = 8,
    RxCal = 9,
    EpdnCal = 10,
    TaCal = 11,
    ApdnCal = 12,
    TxHCal = 15,
    #[num_enum(default)]
    Unknown = 255,
}

/// Sentinel-1 packet secondary header, radar configuration subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondaryHeader {
    pub coarse_time: u32,
    pub fine_time: u16,
    pub data_take_id: u32,
    pub ecc_number: u8,
    pub space_packet_count: u32,
    pub pri_count: u32,
    pub error_flag: bool,
    pub baq_mode: u8,
    pub baq_block_length: u8,
    pub range_decimation: u8,
    pub rx_gain: u8,
    pub tx_ramp_rate: u16,
    pub tx_pulse_start_frequency: u16,
    pub tx_pulse_length: u32,
    pub rank: u8,
    pub pri: u32,
    pub swst: u32,
    pub swl: u32,
    pub signal_type: SignalType,
    pub swap_flag: bool,
    pub swath_number: u8,
    pub number_of_quads: u16,
}

impl SecondaryHeader {
    pub fn parse(data: &[u8]) -> Result<Self, BaqError> {
        if data.len() < SECONDARY_HEADER_SIZE {
            return Err(BaqError::PacketTooShort);
        }
        let sync = u32::from_be_bytes([data[6], data[7], data[8], data[9]]);
        if sync != SYNC_MARKER {
            return Err(BaqError::InvalidSyncMarker);
        }
        Ok(Self {
            coarse_time: u32::from_be_bytes([data[0], data[1], data[2], data[3]]),
            fine_time: u16::from_be_bytes([data[4], data[5]]),
            data_take_id: u32::from_be_bytes([data[10], data[11], data[12], data[13]]),
            ecc_number: data[14],
            space_packet_count: u32::from_be_bytes([data[23], data[24], data[25], data[26]]),
            pri_count: u32::from_be_bytes([data[27], data[28], data[29], data[30]]),
            error_flag: data[31] & 0x80 != 0,
            baq_mode: data[31] & 0x1F,
            baq_block_length: data[32],
            range_decimation: data[34],
            rx_gain: data[35],
            tx_ramp_rate: u16::from_be_bytes([data[36], data[37]]),
            tx_pulse_start_frequency: u16::from_be_bytes([data[38], data[39]]),
            tx_pulse_length: u32::from_be_bytes([0, data[40], data[41], data[42]]),
            rank: data[43] & 0x1F,
            pri: u32::from_be_bytes([0, data[44], data[45], data[46]]),
            swst: u32::from_be_bytes([0, data[47], data[48], data[49]]),
            swl: u32::from_be_bytes([0, data[50], data[51], data[52]]),
            signal_type: SignalType::from(data[58] >> 4),
            swap_flag: data[58] & 1 != 0,
            swath_number: data[59],
            number_of_quads: u16::from_be_bytes([data[60], data[61]]),
        })
    }

    /// Declared number of samples per channel of an echo packet.
    pub fn samples_per_channel(&self) -> usize {
        2 * self.number_of_quads as usize
    }
}

/// One packet sliced out of a stream: headers plus the source data field.
#[derive(Debug, Clone, PartialEq)]
pub struct Isp<'a> {
    pub primary: PrimaryHeader,
    pub secondary: SecondaryHeader,
    pub source_data: &'a [u8],
}

/// Iterator over the packets of a contiguous byte stream.
///
/// Stops after the first framing error; a truncated tail is reported as
/// `PacketTooShort` rather than silently dropped.
pub struct IspReader<'a> {
    data: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> IspReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            failed: false,
        }
    }
}

impl<'a> Iterator for IspReader<'a> {
    type Item = Result<Isp<'a>, BaqError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.data.len() {
            return None;
        }
        let rest = &self.data[self.offset..];

        let primary = match PrimaryHeader::parse(rest) {
            Ok(header) => header,
            Err(err) => {
                self.failed = true;
                return Some(Err(err));
            }
        };
        let packet_len = PRIMARY_HEADER_SIZE + primary.user_data_len();
        if rest.len() < packet_len {
            self.failed = true;
            return Some(Err(BaqError::PacketTooShort));
        }

        let user_data = &rest[PRIMARY_HEADER_SIZE..packet_len];
        let secondary = match SecondaryHeader::parse(user_data) {
            Ok(header) => header,
            Err(err) => {
                self.failed = true;
                return Some(Err(err));
            }
        };

        self.offset += packet_len;
        Some(Ok(Isp {
            primary,
            secondary,
            source_data: &user_data[SECONDARY_HEADER_SIZE..],
        }))
    }
}
