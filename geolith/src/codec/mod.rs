//! Binary primitives for geometry encoders and decoders.

mod byte_buffer;

pub use byte_buffer::{ByteBuffer, ByteOrder};
