use std::fmt::Write as _;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

/// Order of bytes in multi-byte values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ByteOrder {
    /// Most significant byte first (XDR).
    #[default]
    BigEndian,
    /// Least significant byte first (NDR).
    LittleEndian,
}

impl ByteOrder {
    /// Order marker byte used by the well-known binary formats.
    pub fn wkb_marker(&self) -> u8 {
        match self {
            Self::BigEndian => 0,
            Self::LittleEndian => 1,
        }
    }

    /// Byte order for a well-known binary order marker.
    pub fn from_wkb_marker(marker: u8) -> Result<Self> {
        match marker {
            0 => Ok(Self::BigEndian),
            1 => Ok(Self::LittleEndian),
            other => Err(GeometryError::InvalidArgument(format!(
                "unknown byte order marker {other}"
            ))),
        }
    }
}

/// Fixed capacity byte container with a read/write cursor.
///
/// Relative reads and writes happen at the current position and advance it. They may not cross the limit:
/// writes past it fail with [`GeometryError::BufferOverflow`], reads with [`GeometryError::BufferUnderflow`].
/// A typical writer fills the buffer, calls [`ByteBuffer::flip`] and hands it over to a reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteBuffer {
    data: BytesMut,
    position: usize,
    limit: usize,
    order: ByteOrder,
}

macro_rules! multi_byte_accessors {
    ($($ty:ty => $get:ident, $put:ident, $get_be:ident, $get_le:ident, $put_be:ident, $put_le:ident;)*) => {
        $(
            #[doc = concat!("Reads a `", stringify!($ty), "` in the buffer byte order.")]
            pub fn $get(&mut self) -> Result<$ty> {
                let order = self.order;
                let mut src = self.take(std::mem::size_of::<$ty>())?;
                Ok(match order {
                    ByteOrder::BigEndian => src.$get_be(),
                    ByteOrder::LittleEndian => src.$get_le(),
                })
            }

            #[doc = concat!("Writes a `", stringify!($ty), "` in the buffer byte order.")]
            pub fn $put(&mut self, value: $ty) -> Result<()> {
                let order = self.order;
                let mut dst = self.reserve(std::mem::size_of::<$ty>())?;
                match order {
                    ByteOrder::BigEndian => dst.$put_be(value),
                    ByteOrder::LittleEndian => dst.$put_le(value),
                }
                Ok(())
            }
        )*
    };
}

impl ByteBuffer {
    /// Creates a zero-filled buffer with the given capacity. The limit is set to the capacity.
    pub fn allocate(capacity: usize) -> Self {
        Self {
            data: BytesMut::zeroed(capacity),
            position: 0,
            limit: capacity,
            order: ByteOrder::default(),
        }
    }

    /// Creates a buffer holding a copy of the given bytes, ready to be read.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: BytesMut::from(bytes),
            position: 0,
            limit: bytes.len(),
            order: ByteOrder::default(),
        }
    }

    /// Creates a buffer from a hexadecimal string, ready to be read. Both letter cases are accepted.
    ///
    /// # Errors
    ///
    /// - if the string has an odd length or contains non-hexadecimal characters
    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() % 2 != 0 {
            return Err(GeometryError::invalid(
                "hex string must have an even number of digits",
            ));
        }

        let bytes = hex
            .as_bytes()
            .chunks_exact(2)
            .map(|pair| {
                let digits = std::str::from_utf8(pair).ok();
                digits
                    .and_then(|d| u8::from_str_radix(d, 16).ok())
                    .ok_or_else(|| {
                        GeometryError::InvalidArgument(format!(
                            "invalid hex digits {:?}",
                            String::from_utf8_lossy(pair)
                        ))
                    })
            })
            .collect::<Result<Vec<u8>>>()?;

        Ok(Self::from_bytes(&bytes))
    }

    /// Hexadecimal representation (upper case) of the bytes before the limit.
    pub fn to_hex(&self) -> String {
        let mut hex = String::with_capacity(self.limit * 2);
        for byte in &self.data[..self.limit] {
            let _ = write!(hex, "{byte:02X}");
        }
        hex
    }

    /// Copy of the bytes before the limit.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.data[..self.limit])
    }

    /// Total size of the buffer.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Index of the first byte that may not be read or written.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Sets the limit. If the position is beyond the new limit it is moved to the limit.
    pub fn set_limit(&mut self, limit: usize) -> Result<()> {
        if limit > self.capacity() {
            return Err(GeometryError::InvalidArgument(format!(
                "limit {limit} is beyond capacity {}",
                self.capacity()
            )));
        }

        self.limit = limit;
        self.position = self.position.min(limit);
        Ok(())
    }

    /// Index of the next byte to be read or written.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor.
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.limit {
            return Err(GeometryError::InvalidArgument(format!(
                "position {position} is beyond limit {}",
                self.limit
            )));
        }

        self.position = position;
        Ok(())
    }

    /// Number of bytes between the position and the limit.
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Returns true if there are bytes between the position and the limit.
    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// Byte order used by the multi-byte accessors.
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Changes the byte order used by the multi-byte accessors.
    pub fn set_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// Sets the limit to the current position and the position to zero.
    pub fn flip(&mut self) {
        self.limit = self.position;
        self.position = 0;
    }

    /// Sets the position to zero, keeping the limit.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Sets the position to zero and the limit to the capacity.
    pub fn clear(&mut self) {
        self.position = 0;
        self.limit = self.capacity();
    }

    fn take(&mut self, size: usize) -> Result<&[u8]> {
        let remaining = self.remaining();
        if size > remaining {
            return Err(GeometryError::BufferUnderflow {
                requested: size,
                remaining,
            });
        }

        let start = self.position;
        self.position += size;
        Ok(&self.data[start..start + size])
    }

    fn reserve(&mut self, size: usize) -> Result<&mut [u8]> {
        let remaining = self.remaining();
        if size > remaining {
            return Err(GeometryError::BufferOverflow {
                requested: size,
                remaining,
            });
        }

        let start = self.position;
        self.position += size;
        Ok(&mut self.data[start..start + size])
    }

    /// Reads an unsigned byte.
    pub fn get_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?.get_u8())
    }

    /// Writes an unsigned byte.
    pub fn put_u8(&mut self, value: u8) -> Result<()> {
        self.reserve(1)?.put_u8(value);
        Ok(())
    }

    /// Reads a signed byte.
    pub fn get_i8(&mut self) -> Result<i8> {
        Ok(self.take(1)?.get_i8())
    }

    /// Writes a signed byte.
    pub fn put_i8(&mut self, value: i8) -> Result<()> {
        self.reserve(1)?.put_i8(value);
        Ok(())
    }

    multi_byte_accessors! {
        u32 => get_u32, put_u32, get_u32, get_u32_le, put_u32, put_u32_le;
        i32 => get_i32, put_i32, get_i32, get_i32_le, put_i32, put_i32_le;
        u64 => get_u64, put_u64, get_u64, get_u64_le, put_u64, put_u64_le;
        i64 => get_i64, put_i64, get_i64, get_i64_le, put_i64, put_i64_le;
        f64 => get_f64, put_f64, get_f64, get_f64_le, put_f64, put_f64_le;
    }
}
