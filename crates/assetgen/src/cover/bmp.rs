use thiserror::Error;

/// 14-byte file header followed by a 40-byte BITMAPINFOHEADER.
pub const BMP_HEADER_SIZE: usize = 54;
pub const BMP_DATA_OFFSET_INDEX: usize = 10;
pub const BMP_DIB_SIZE_INDEX: usize = 14;
pub const BMP_WIDTH_INDEX: usize = 18;
pub const BMP_HEIGHT_INDEX: usize = 22;
pub const BMP_BIT_COUNT_INDEX: usize = 28;

const BITMAPINFOHEADER_SIZE: u32 = 40;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BmpError {
    #[error("BMP is too short: {0} bytes")]
    TooShort(usize),
    #[error("Missing BM signature")]
    BadSignature,
    #[error("Expected {expected_width}x{expected_height} 24-bit BMP, got {width}x{height} {bit_count}-bit")]
    Incompatible {
        expected_width: u32,
        expected_height: u32,
        width: i32,
        height: i32,
        bit_count: u16,
    },
    #[error("Unexpected BMP layout: DIB header {dib_size} bytes, pixel data at {data_offset}")]
    UnexpectedLayout { dib_size: u32, data_offset: u32 },
}

/// The header fields the firmware reads before streaming pixel rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpInfo {
    pub data_offset: u32,
    pub dib_size: u32,
    pub width: i32,
    /// Positive for bottom-up row order.
    pub height: i32,
    pub bit_count: u16,
}

fn u32_at(bytes: &[u8], index: usize) -> u32 {
    u32::from_le_bytes([
        bytes[index],
        bytes[index + 1],
        bytes[index + 2],
        bytes[index + 3],
    ])
}

impl BmpInfo {
    pub fn parse(bytes: &[u8]) -> Result<Self, BmpError> {
        if bytes.len() < BMP_HEADER_SIZE {
            return Err(BmpError::TooShort(bytes.len()));
        }
        if &bytes[0..2] != b"BM" {
            return Err(BmpError::BadSignature);
        }

        Ok(BmpInfo {
            data_offset: u32_at(bytes, BMP_DATA_OFFSET_INDEX),
            dib_size: u32_at(bytes, BMP_DIB_SIZE_INDEX),
            width: u32_at(bytes, BMP_WIDTH_INDEX) as i32,
            height: u32_at(bytes, BMP_HEIGHT_INDEX) as i32,
            bit_count: u16::from_le_bytes([
                bytes[BMP_BIT_COUNT_INDEX],
                bytes[BMP_BIT_COUNT_INDEX + 1],
            ]),
        })
    }

    /// Checks the file can be drawn by the firmware: exact cover size,
    /// bottom-up 24-bit pixels right after a 54-byte header.
    pub fn check_compatible(&self, width: u32, height: u32) -> Result<(), BmpError> {
        if self.width != width as i32 || self.height != height as i32 || self.bit_count != 24 {
            return Err(BmpError::Incompatible {
                expected_width: width,
                expected_height: height,
                width: self.width,
                height: self.height,
                bit_count: self.bit_count,
            });
        }
        if self.dib_size != BITMAPINFOHEADER_SIZE || self.data_offset != BMP_HEADER_SIZE as u32 {
            return Err(BmpError::UnexpectedLayout {
                dib_size: self.dib_size,
                data_offset: self.data_offset,
            });
        }
        Ok(())
    }
}
