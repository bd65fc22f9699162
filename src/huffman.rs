//! Huffman decoding tables for the FDBAQ bit rate codes.
//!
//! Each reconstruction mode has a fixed, canonical prefix code defined by
//! the SAR Space Packet Protocol Data Unit specification. The tables are
//! described here by their code-length histograms and symbol lists, and the
//! decode structures are derived from those constants once at construction.

use crate::bit_io::BitReader;
use crate::constants::MAX_CODE_LENGTH;
use crate::error::BaqError;
use crate::ReconstructionMode;

/// Represents a Huffman codeword with its bit value and length.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCode {
    pub value: u16,
    pub length: u8,
}

/// Number of codewords per code length (1..=10 bits), one histogram per
/// bit rate code, followed by the magnitude codes in canonical order.
pub const BRC0_LENGTHS: [u8; MAX_CODE_LENGTH] = [1, 1, 2, 0, 0, 0, 0, 0, 0, 0];
pub const BRC0_SYMBOLS: [u8; 4] = [0, 1, 2, 3];

pub const BRC1_LENGTHS: [u8; MAX_CODE_LENGTH] = [1, 1, 1, 2, 0, 0, 0, 0, 0, 0];
pub const BRC1_SYMBOLS: [u8; 5] = [0, 1, 2, 3, 4];

pub const BRC2_LENGTHS: [u8; MAX_CODE_LENGTH] = [1, 1, 1, 1, 1, 2, 0, 0, 0, 0];
pub const BRC2_SYMBOLS: [u8; 7] = [0, 1, 2, 3, 4, 5, 6];

pub const BRC3_LENGTHS: [u8; MAX_CODE_LENGTH] = [0, 3, 1, 1, 1, 1, 1, 2, 0, 0];
pub const BRC3_SYMBOLS: [u8; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];

pub const BRC4_LENGTHS: [u8; MAX_CODE_LENGTH] = [0, 2, 2, 3, 1, 1, 1, 0, 2, 4];
pub const BRC4_SYMBOLS: [u8; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

/// Canonical Huffman table for one bit rate code.
///
/// Stores the decode structures (`min_code`/`max_code`/`val_ptr` per code
/// length) and the per-symbol codewords for the encode direction.
#[derive(Clone)]
pub struct HuffmanTable {
    codes: [HuffmanCode; 16],
    values: Vec<u8>,

    // Decoding fields
    min_code: [i32; MAX_CODE_LENGTH],
    max_code: [i32; MAX_CODE_LENGTH],
    val_ptr: [i32; MAX_CODE_LENGTH],
}

impl HuffmanTable {
    /// Builds a table from a code-length histogram and canonical symbol list.
    pub fn build(lengths: &[u8; MAX_CODE_LENGTH], symbols: &[u8]) -> Self {
        let mut table = Self {
            codes: [HuffmanCode::default(); 16],
            values: symbols.to_vec(),
            min_code: [0; MAX_CODE_LENGTH],
            max_code: [-1; MAX_CODE_LENGTH],
            val_ptr: [0; MAX_CODE_LENGTH],
        };

        let mut code = 0u16;
        let mut val_idx = 0;

        for i in 0..MAX_CODE_LENGTH {
            let n_codes = lengths[i] as usize;
            if n_codes == 0 {
                table.max_code[i] = -1;
            } else {
                table.val_ptr[i] = val_idx as i32;
                table.min_code[i] = code as i32;
                for _ in 0..n_codes {
                    let symbol = symbols[val_idx] as usize;
                    table.codes[symbol] = HuffmanCode {
                        value: code,
                        length: (i + 1) as u8,
                    };
                    code += 1;
                    val_idx += 1;
                }
                table.max_code[i] = (code - 1) as i32;
            }
            code <<= 1;
        }
        table
    }

    /// Number of magnitude codes the table maps.
    pub fn symbol_count(&self) -> usize {
        self.values.len()
    }

    /// Codeword assigned to `symbol`, for the encode direction.
    pub fn code(&self, symbol: u8) -> HuffmanCode {
        self.codes[symbol as usize]
    }

    /// Decodes the next magnitude code from the reader.
    ///
    /// Walks the prefix code bit by bit. Fails with `InvalidCode` once the
    /// bits read exceed the longest codeword without matching an entry.
    pub fn decode(&self, reader: &mut BitReader) -> Result<u8, BaqError> {
        let mut code = 0i32;
        for i in 0..MAX_CODE_LENGTH {
            let bit = reader.read_bit()? as i32;
            code = (code << 1) | bit;
            if code <= self.max_code[i] {
                let idx = self.val_ptr[i] + (code - self.min_code[i]);
                return Ok(self.values[idx as usize]);
            }
        }
        Err(BaqError::InvalidCode)
    }
}

/// The five Huffman tables, one per bit rate code, built once and shared
/// read-only across all decoding calls.
pub struct CodeTables {
    tables: [HuffmanTable; 5],
}

impl CodeTables {
    pub fn new() -> Self {
        Self {
            tables: [
                HuffmanTable::build(&BRC0_LENGTHS, &BRC0_SYMBOLS),
                HuffmanTable::build(&BRC1_LENGTHS, &BRC1_SYMBOLS),
                HuffmanTable::build(&BRC2_LENGTHS, &BRC2_SYMBOLS),
                HuffmanTable::build(&BRC3_LENGTHS, &BRC3_SYMBOLS),
                HuffmanTable::build(&BRC4_LENGTHS, &BRC4_SYMBOLS),
            ],
        }
    }

    /// Table for a Huffman-coded mode; `None` for bypass.
    pub fn table(&self, mode: ReconstructionMode) -> Option<&HuffmanTable> {
        mode.table_index().map(|i| &self.tables[i])
    }

    /// Decodes one magnitude code using the prefix code of `mode`.
    pub fn decode_symbol(
        &self,
        mode: ReconstructionMode,
        reader: &mut BitReader,
    ) -> Result<u8, BaqError> {
        match self.table(mode) {
            Some(table) => table.decode(reader),
            None => Err(BaqError::InvalidMode),
        }
    }
}

impl Default for CodeTables {
    fn default() -> Self {
        Self::new()
    }
}
