//! Wire encoding for Rollcall
//!
//! This crate converts between a [`Table`](rollcall_core::Table) and the
//! bytes stored in the remote blob:
//!
//! - [`table`]: delimited text, header row first, one participant per row
//! - [`transport`]: base64 framing used by the remote content API
//!
//! ## Table Encoding Rules
//!
//! | Element | Encoding |
//! |---------|----------|
//! | Cell separator | `,` |
//! | Row terminator | `\n` (decoder also accepts `\r\n`) |
//! | Cell with `,` `"` CR or LF | wrapped in `"`, inner `"` doubled |
//! | Empty cell | nothing between separators |
//! | Byte order mark | stripped on decode |
//!
//! ## Examples
//!
//! ```
//! use rollcall_wire::{decode_table, encode_table};
//!
//! let table = decode_table("ID Code,Name\nA100,\"Lovelace, Ada\"\n").unwrap();
//! assert_eq!(table.cell(0, "Name"), Some("Lovelace, Ada"));
//! assert_eq!(encode_table(&table), "ID Code,Name\nA100,\"Lovelace, Ada\"\n");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod table;
pub mod transport;

pub use table::{decode_table, encode_table, DecodeError};
pub use transport::{decode_content, encode_content, TransportError};
