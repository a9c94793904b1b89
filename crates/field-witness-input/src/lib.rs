#![deny(missing_debug_implementations)]
//! `field-witness-input` reads the untyped input documents from which circuit
//! witnesses are built. It knows nothing about circuits or fields: a document
//! is turned into a [`RawRecord`], a map from names to [`RawValue`]s, and
//! interpreting those values is left to the caller.
//!
//! ```no_run
//! use field_witness_input::{load, RawValue};
//!
//! let record = load("input.json")?;
//! if let Some(RawValue::Integer(x)) = record.get("X") {
//!     println!("X = {}", x);
//! }
//! # Ok::<(), field_witness_input::LoadError>(())
//! ```

mod loader;
pub use loader::{load, LoadError};
mod value;
pub use value::{RawRecord, RawValue, ValueKind};

pub use num_bigint::BigInt;

pub const FIELD_WITNESS_INPUT_VERSION: &str = env!("CARGO_PKG_VERSION");
