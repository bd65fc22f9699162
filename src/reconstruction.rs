//! Reconstruction level and scale lookup tables.
//!
//! A decoded magnitude code is an index into the normalised reconstruction
//! level table of its block's mode; the block's 8-bit scale index selects a
//! sigma factor that linearly scales every sample in the block. All values
//! are fixed calibration constants of the encoding standard.

use crate::constants::SCALE_INDEX_COUNT;
use crate::ReconstructionMode;

/// Normalised reconstruction levels, one table per bit rate code. Entry
/// counts match the magnitude code ranges of the matching Huffman tables.
pub const NRL_BRC0: [f32; 4] = [0.3637, 1.0915, 1.8208, 2.6406];

pub const NRL_BRC1: [f32; 5] = [0.3042, 0.9127, 1.5216, 2.1313, 2.8426];

pub const NRL_BRC2: [f32; 7] = [
    0.2305, 0.6916, 1.1528, 1.6140, 2.0754, 2.5369, 3.1191,
];

pub const NRL_BRC3: [f32; 10] = [
    0.1702, 0.5107, 0.8511, 1.1916, 1.5321, 1.8726, 2.2131, 2.5536, 2.8942, 3.3744,
];

pub const NRL_BRC4: [f32; 16] = [
    0.1130, 0.3389, 0.5649, 0.7908, 1.0167, 1.2428, 1.4687, 1.6947,
    1.9206, 2.1466, 2.3725, 2.5985, 2.8244, 3.0504, 3.2764, 3.6623,
];

/// Sigma factors indexed by the block scale index (threshold index).
/// Piecewise linear in the index, with a steeper segment above index 100.
pub const SIGMA_FACTORS: [f32; SCALE_INDEX_COUNT] = [
    0.00, 0.63, 1.25, 1.88, 2.51, 3.13, 3.76, 4.39,
    5.01, 5.64, 6.27, 6.89, 7.52, 8.15, 8.77, 9.40,
    10.03, 10.65, 11.28, 11.91, 12.53, 13.16, 13.79, 14.41,
    15.04, 15.67, 16.29, 16.92, 17.55, 18.17, 18.80, 19.43,
    20.05, 20.68, 21.31, 21.93, 22.56, 23.19, 23.81, 24.44,
    25.07, 25.69, 26.32, 26.95, 27.57, 28.20, 28.83, 29.45,
    30.08, 30.71, 31.34, 31.96, 32.59, 33.22, 33.84, 34.47,
    35.10, 35.72, 36.35, 36.98, 37.60, 38.23, 38.86, 39.48,
    40.11, 40.74, 41.36, 41.99, 42.62, 43.24, 43.87, 44.50,
    45.12, 45.75, 46.38, 47.00, 47.63, 48.26, 48.88, 49.51,
    50.14, 50.76, 51.39, 52.02, 52.64, 53.27, 53.90, 54.52,
    55.15, 55.78, 56.40, 57.03, 57.66, 58.28, 58.91, 59.54,
    60.16, 60.79, 61.42, 62.04, 62.67, 63.93, 65.18, 66.44,
    67.70, 68.95, 70.21, 71.47, 72.72, 73.98, 75.24, 76.49,
    77.75, 79.01, 80.26, 81.52, 82.78, 84.03, 85.29, 86.55,
    87.80, 89.06, 90.32, 91.57, 92.83, 94.09, 95.34, 96.60,
    97.86, 99.11, 100.37, 101.63, 102.88, 104.14, 105.40, 106.65,
    107.91, 109.17, 110.42, 111.68, 112.94, 114.19, 115.45, 116.71,
    117.96, 119.22, 120.48, 121.73, 122.99, 124.25, 125.50, 126.76,
    128.02, 129.28, 130.53, 131.79, 133.05, 134.30, 135.56, 136.82,
    138.07, 139.33, 140.59, 141.84, 143.10, 144.36, 145.61, 146.87,
    148.13, 149.38, 150.64, 151.90, 153.15, 154.41, 155.67, 156.92,
    158.18, 159.44, 160.69, 161.95, 163.21, 164.46, 165.72, 166.98,
    168.23, 169.49, 170.75, 172.00, 173.26, 174.52, 175.77, 177.03,
    178.29, 179.54, 180.80, 182.06, 183.31, 184.57, 185.83, 187.08,
    188.34, 189.60, 190.85, 192.11, 193.37, 194.62, 195.88, 197.14,
    198.39, 199.65, 200.91, 202.16, 203.42, 204.68, 205.93, 207.19,
    208.45, 209.70, 210.96, 212.22, 213.47, 214.73, 215.99, 217.24,
    218.50, 219.76, 221.01, 222.27, 223.53, 224.78, 226.04, 227.30,
    228.55, 229.81, 231.07, 232.32, 233.58, 234.84, 236.09, 237.35,
    238.61, 239.86, 241.12, 242.38, 243.63, 244.89, 246.15, 247.40,
    248.66, 249.92, 251.18, 252.43, 253.69, 254.95, 256.20, 257.46,
];

/// Reconstruction level for a magnitude code under `mode`.
///
/// Total for every magnitude code the mode's Huffman table can produce.
/// For bypass blocks the level of a raw magnitude is the magnitude itself.
pub fn reconstruction_level(mode: ReconstructionMode, mcode: u8) -> f32 {
    match mode {
        ReconstructionMode::Brc0 => NRL_BRC0[mcode as usize],
        ReconstructionMode::Brc1 => NRL_BRC1[mcode as usize],
        ReconstructionMode::Brc2 => NRL_BRC2[mcode as usize],
        ReconstructionMode::Brc3 => NRL_BRC3[mcode as usize],
        ReconstructionMode::Brc4 => NRL_BRC4[mcode as usize],
        ReconstructionMode::Bypass => f32::from(mcode),
    }
}

/// Sigma factor for a block scale index.
pub fn scale_factor(scale_index: u8) -> f32 {
    SIGMA_FACTORS[scale_index as usize]
}

/// Maps a decoded sign bit and magnitude code to a calibrated sample value.
///
/// Evaluated in f32 with the scale applied last:
/// `(sign * level) * scale`. Sign bit 0 is positive, 1 negative.
pub fn reconstruct(sign: u8, mcode: u8, mode: ReconstructionMode, scale: f32) -> f32 {
    let magnitude = reconstruction_level(mode, mcode);
    let signed = if sign == 0 { magnitude } else { -magnitude };
    signed * scale
}
