//! Signature registry infrastructure - remote selector lookup

mod resolver;

pub use resolver::{
    resolve_signature, select_record, FourByteDirectory, SignatureDirectory, FOUR_BYTE_API_ENDPOINT,
};
