//! Witness encoders: the boundary between a validated [`Assignment`] and
//! whatever representation a proving backend consumes.

use std::io::{self, Write};

use bellpepper::util_cs::witness_cs::WitnessCS;
use bellpepper_core::SynthesisError;
use byteorder::{BigEndian, WriteBytesExt};
use ff::PrimeField;

use crate::{Assignment, ScalarField, ScalarFieldId};

#[derive(thiserror::Error, Debug)]
pub enum EncodingError {
    #[error("constraint system rejected the assignment: {0}")]
    Synthesis(#[from] SynthesisError),
    #[error("failed to write witness: {0}")]
    Io(#[from] io::Error),
    #[error("{0} variables do not fit in the witness header")]
    TooManyVariables(usize),
    #[error("encoder for {expected} was given an assignment over {found}")]
    FieldMismatch {
        expected: ScalarFieldId,
        found: ScalarFieldId,
    },
}

/// Turns a complete assignment into a witness.
///
/// Encoders are only ever handed complete assignments; a failed build never
/// reaches them.
pub trait WitnessEncoder<F: ScalarField> {
    type Witness;

    fn encode(
        &self,
        assignment: &Assignment<F>,
        field: ScalarFieldId,
    ) -> Result<Self::Witness, EncodingError>;
}

impl<F: ScalarField, E: WitnessEncoder<F> + ?Sized> WitnessEncoder<F> for &E {
    type Witness = E::Witness;

    fn encode(
        &self,
        assignment: &Assignment<F>,
        field: ScalarFieldId,
    ) -> Result<Self::Witness, EncodingError> {
        (**self).encode(assignment, field)
    }
}

fn check_field<F: ScalarField>(field: ScalarFieldId) -> Result<(), EncodingError> {
    if field != F::ID {
        return Err(EncodingError::FieldMismatch {
            expected: F::ID,
            found: field,
        });
    }
    Ok(())
}

/// The input and auxiliary assignments of an R1CS instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct R1csWitness<F: PrimeField> {
    pub field: ScalarFieldId,
    /// Public inputs, starting with the constant one.
    pub inputs: Vec<F>,
    pub aux: Vec<F>,
}

/// Encodes an assignment by allocating it into a bellpepper [`WitnessCS`].
#[derive(Clone, Copy, Debug, Default)]
pub struct R1csEncoder;

impl<F: ScalarField> WitnessEncoder<F> for R1csEncoder {
    type Witness = R1csWitness<F>;

    fn encode(
        &self,
        assignment: &Assignment<F>,
        field: ScalarFieldId,
    ) -> Result<Self::Witness, EncodingError> {
        check_field::<F>(field)?;

        let mut cs =
            WitnessCS::<F>::with_capacity(assignment.num_public() + 1, assignment.num_private());
        assignment.allocate(&mut cs)?;
        let (inputs, aux) = cs.to_assignments();

        Ok(R1csWitness { field, inputs, aux })
    }
}

/// Encodes an assignment into a flat byte string:
///
/// ```text
/// u32 BE  number of public variables
/// u32 BE  number of private variables
/// u32 BE  total number of variables
/// public values, then private values, each in declaration order and each
/// as the field's canonical representation (`PrimeField::to_repr`)
/// ```
///
/// The output depends only on the assignment, so equal assignments always
/// encode to equal bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinaryEncoder;

impl BinaryEncoder {
    pub const HEADER_LEN: usize = 12;

    pub fn write<F: ScalarField, W: Write>(
        &self,
        assignment: &Assignment<F>,
        mut writer: W,
    ) -> Result<(), EncodingError> {
        let header_count =
            |n: usize| u32::try_from(n).map_err(|_| EncodingError::TooManyVariables(n));

        writer.write_u32::<BigEndian>(header_count(assignment.num_public())?)?;
        writer.write_u32::<BigEndian>(header_count(assignment.num_private())?)?;
        writer.write_u32::<BigEndian>(header_count(assignment.len())?)?;

        for entry in assignment.public().chain(assignment.private()) {
            writer.write_all(entry.value.to_repr().as_ref())?;
        }

        Ok(())
    }

    /// Length in bytes of the encoding of `n` variables over `F`.
    pub fn encoded_len<F: PrimeField>(n: usize) -> usize {
        Self::HEADER_LEN + n * F::Repr::default().as_ref().len()
    }
}

impl<F: ScalarField> WitnessEncoder<F> for BinaryEncoder {
    type Witness = Vec<u8>;

    fn encode(
        &self,
        assignment: &Assignment<F>,
        field: ScalarFieldId,
    ) -> Result<Self::Witness, EncodingError> {
        check_field::<F>(field)?;

        let mut out = Vec::with_capacity(Self::encoded_len::<F>(assignment.len()));
        self.write(assignment, &mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use blstrs::Scalar as Fr;
    use ff::Field;

    use crate::{AssignedVariable, Visibility};

    fn assignment() -> Assignment<Fr> {
        let entry = |name: &str, visibility, value: u64| AssignedVariable {
            name: name.to_string(),
            visibility,
            value: Fr::from(value),
        };
        Assignment::new(
            "enc".to_string(),
            vec![
                entry("A", Visibility::Private, 1),
                entry("B", Visibility::Public, 2),
                entry("C", Visibility::Private, 3),
            ],
        )
    }

    #[test]
    fn test_r1cs_encoder() {
        let w = R1csEncoder
            .encode(&assignment(), ScalarFieldId::Bls12_381)
            .unwrap();

        assert_eq!(w.field, ScalarFieldId::Bls12_381);
        assert_eq!(w.inputs, vec![Fr::ONE, Fr::from(2u64)]);
        assert_eq!(w.aux, vec![Fr::from(1u64), Fr::from(3u64)]);
    }

    #[test]
    fn test_binary_layout() {
        let bytes = BinaryEncoder
            .encode(&assignment(), ScalarFieldId::Bls12_381)
            .unwrap();

        assert_eq!(bytes.len(), BinaryEncoder::encoded_len::<Fr>(3));
        assert_eq!(&bytes[..12], &[0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3]);

        let values: Vec<&[u8]> = bytes[12..].chunks(32).collect();
        assert_eq!(values[0], Fr::from(2u64).to_repr().as_ref());
        assert_eq!(values[1], Fr::from(1u64).to_repr().as_ref());
        assert_eq!(values[2], Fr::from(3u64).to_repr().as_ref());
    }

    #[test]
    fn test_field_mismatch() {
        match BinaryEncoder.encode(&assignment(), ScalarFieldId::Bn254) {
            Err(EncodingError::FieldMismatch { expected, found }) => {
                assert_eq!(expected, ScalarFieldId::Bls12_381);
                assert_eq!(found, ScalarFieldId::Bn254);
            }
            other => panic!("expected a field mismatch, got {:?}", other),
        }
        assert!(R1csEncoder
            .encode(&assignment(), ScalarFieldId::Pallas)
            .is_err());
    }

    #[test]
    fn test_write_error_is_forwarded() {
        struct Full;
        impl Write for Full {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        assert!(matches!(
            BinaryEncoder.write(&assignment(), Full),
            Err(EncodingError::Io(_))
        ));
    }
}
