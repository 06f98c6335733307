mod decoder;
mod encoder;

pub use decoder::{Payload, TokenDecoder};
pub use encoder::TokenEncoder;

/// Separator between the three token segments
pub(crate) const SEGMENT_SEPARATOR: char = '.';
