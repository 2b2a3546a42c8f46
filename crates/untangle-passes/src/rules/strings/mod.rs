//! String decoding rules.

mod decode_escapes;
mod encoded_calls;

pub use decode_escapes::DecodeEscapes;
pub use encoded_calls::EncodedCalls;
