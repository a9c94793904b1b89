#![deny(missing_debug_implementations)]
//! `field-witness` turns untyped circuit input, typically a JSON document,
//! into a typed witness over the scalar field of an elliptic curve.
//!
//! The pipeline has three steps:
//!
//! - [`load`] reads a document into a [`RawRecord`] (see the
//!   `field-witness-input` crate).
//! - [`WitnessBuilder`] walks a [`CircuitSchema`] in declaration order, looks
//!   every variable up in the record and converts it to a field element,
//!   producing an [`Assignment`].
//! - A [`WitnessEncoder`] turns the complete assignment into the witness a
//!   proving backend consumes, e.g. a bellpepper [`R1csWitness`] or the flat
//!   bytes of [`BinaryEncoder`].
//!
//! Every failure is reported as a value: a missing variable, a value that is
//! not an integer, or an unreadable file never abort the process and never
//! produce a partial witness.
//!
//! # Example
//!
//! ```no_run
//! use blstrs::Scalar as Fr;
//! use field_witness::{
//!     load, CircuitSchema, R1csEncoder, VariableDecl, WitnessBuilder,
//! };
//!
//! // A circuit proving knowledge of a private `X` equal to the public `Y`.
//! let schema = CircuitSchema::new(
//!     "equality",
//!     vec![VariableDecl::private("X"), VariableDecl::public("Y")],
//! )?;
//!
//! let record = load("input.json")?;
//! let witness = WitnessBuilder::new(&schema).build::<Fr, _>(&record, &R1csEncoder)?;
//!
//! // The constant one, then `Y`.
//! assert_eq!(witness.inputs.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod assignment;
pub use assignment::{AssignedVariable, Assignment};
mod builder;
pub use builder::{BuildError, WitnessBuilder};
pub mod config;
pub use config::{CircuitManifest, ConfigError, RangePolicy};
pub mod convert;
pub use convert::MismatchKind;
pub mod encoder;
pub use encoder::{BinaryEncoder, EncodingError, R1csEncoder, R1csWitness, WitnessEncoder};
mod error;
pub use error::Error;
mod field;
pub use field::{ScalarField, ScalarFieldId, UnknownFieldError};
mod schema;
pub use schema::{CircuitSchema, SchemaError, VariableDecl, Visibility};
#[cfg(test)]
pub mod test_utils;

pub use field_witness_input::{load, LoadError, RawRecord, RawValue, ValueKind};

use std::path::Path;

pub const FIELD_WITNESS_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Loads the document at `path` and builds a witness for `schema`. The range
/// policy is taken from `FIELD_WITNESS_RANGE_POLICY` (see [`RangePolicy::from_env`]).
pub fn witness_from_file<F, E, P>(
    path: P,
    schema: &CircuitSchema,
    encoder: &E,
) -> Result<E::Witness, Error>
where
    F: ScalarField,
    E: WitnessEncoder<F>,
    P: AsRef<Path>,
{
    let record = load(path)?;
    Ok(WitnessBuilder::new(schema).build::<F, E>(&record, encoder)?)
}
