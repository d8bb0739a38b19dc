//! Delimited text encoding for participant tables

mod decode;
mod encode;

pub use decode::{decode_table, DecodeError};
pub use encode::{encode_cell, encode_table};
