//! ABI infrastructure - selector extraction, decoding and normalization

mod decoder;
mod normalizer;
mod selector;

pub use decoder::{decode_arguments, decoded_value, parameter_types, DecodeError, DecodedArguments};
pub use normalizer::{normalize, normalize_all};
pub use selector::{extract_selector, CallData};
