use field_witness_input::RawRecord;
use log::{debug, trace};

use crate::config::{CircuitManifest, RangePolicy};
use crate::convert::{integral_value, is_canonical, to_field, MismatchKind};
use crate::encoder::{BinaryEncoder, EncodingError, WitnessEncoder};
use crate::{AssignedVariable, Assignment, CircuitSchema, ScalarField, ScalarFieldId};

/// An error that aborts a build. No witness is produced when one is returned.
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    /// A declared variable has no value in the input record.
    #[error("variable `{0}` is missing from the input record")]
    MissingField(String),
    /// A declared variable holds a value that is not an integer.
    #[error("variable `{name}` holds an unsupported value ({kind})")]
    TypeMismatch { name: String, kind: MismatchKind },
    /// A declared variable is negative or not below the field modulus, and
    /// the builder was configured with [`RangePolicy::Reject`].
    #[error("variable `{name}` is outside the {field} scalar field")]
    OutOfRange { name: String, field: ScalarFieldId },
    /// The encoder failed on a complete assignment.
    #[error("failed to encode witness for circuit `{circuit}` over {field}: {source}")]
    Encoding {
        circuit: String,
        field: ScalarFieldId,
        #[source]
        source: EncodingError,
    },
}

impl BuildError {
    /// The variable the error is about, if it concerns a single variable.
    pub fn variable(&self) -> Option<&str> {
        match self {
            BuildError::MissingField(name)
            | BuildError::TypeMismatch { name, .. }
            | BuildError::OutOfRange { name, .. } => Some(name),
            BuildError::Encoding { .. } => None,
        }
    }
}

/// Builds witnesses for one circuit schema.
///
/// The builder walks the schema in declaration order, looks each variable up
/// in the input record, and converts it to a field element. Keys of the
/// record that the schema does not declare are ignored. The first failure
/// aborts the build; the encoder only ever sees complete assignments.
///
/// A builder borrows its schema and holds no other state, so any number of
/// builds may run concurrently over the same schema.
#[derive(Clone, Copy, Debug)]
pub struct WitnessBuilder<'a> {
    schema: &'a CircuitSchema,
    range_policy: RangePolicy,
}

impl<'a> WitnessBuilder<'a> {
    /// A builder whose range policy comes from `FIELD_WITNESS_RANGE_POLICY`,
    /// or [`RangePolicy::Reduce`] when it is unset.
    pub fn new(schema: &'a CircuitSchema) -> Self {
        WitnessBuilder {
            schema,
            range_policy: RangePolicy::from_env(),
        }
    }

    /// A builder using the range policy the manifest selects.
    pub fn from_manifest(manifest: &CircuitManifest, schema: &'a CircuitSchema) -> Self {
        WitnessBuilder {
            schema,
            range_policy: manifest.effective_range_policy(),
        }
    }

    pub fn range_policy(mut self, policy: RangePolicy) -> Self {
        self.range_policy = policy;
        self
    }

    pub fn schema(&self) -> &'a CircuitSchema {
        self.schema
    }

    /// Converts `record` into an assignment over `F` without encoding it.
    pub fn assign<F: ScalarField>(&self, record: &RawRecord) -> Result<Assignment<F>, BuildError> {
        let modulus = match self.range_policy {
            RangePolicy::Reject => Some(F::modulus()),
            RangePolicy::Reduce => None,
        };

        let mut entries = Vec::with_capacity(self.schema.len());
        for decl in self.schema.variables() {
            let raw = record
                .get(&decl.name)
                .ok_or_else(|| BuildError::MissingField(decl.name.clone()))?;

            let n = integral_value(raw).map_err(|kind| BuildError::TypeMismatch {
                name: decl.name.clone(),
                kind,
            })?;

            if let Some(modulus) = &modulus {
                if !is_canonical(&n, modulus) {
                    return Err(BuildError::OutOfRange {
                        name: decl.name.clone(),
                        field: F::ID,
                    });
                }
            }

            trace!("assigned {} variable `{}`", decl.visibility, decl.name);
            entries.push(AssignedVariable {
                name: decl.name.clone(),
                visibility: decl.visibility,
                value: to_field::<F>(&n),
            });
        }

        Ok(Assignment::new(self.schema.name().to_string(), entries))
    }

    /// Converts `record` and hands the complete assignment to `encoder`,
    /// returning the encoder's witness unchanged.
    pub fn build<F, E>(&self, record: &RawRecord, encoder: &E) -> Result<E::Witness, BuildError>
    where
        F: ScalarField,
        E: WitnessEncoder<F>,
    {
        debug!(
            "building witness for circuit `{}` over {} ({} variables, {} record fields)",
            self.schema.name(),
            F::ID,
            self.schema.len(),
            record.len()
        );

        let assignment = self.assign::<F>(record)?;
        encoder
            .encode(&assignment, F::ID)
            .map_err(|source| BuildError::Encoding {
                circuit: self.schema.name().to_string(),
                field: F::ID,
                source,
            })
    }

    /// Builds over a field chosen at runtime, encoding with [`BinaryEncoder`].
    pub fn build_bytes(
        &self,
        record: &RawRecord,
        field: ScalarFieldId,
    ) -> Result<Vec<u8>, BuildError> {
        match field {
            ScalarFieldId::Bn254 => self.build::<halo2curves::bn256::Fr, _>(record, &BinaryEncoder),
            ScalarFieldId::Bls12_381 => self.build::<blstrs::Scalar, _>(record, &BinaryEncoder),
            ScalarFieldId::Pallas => self.build::<halo2curves::pasta::Fq, _>(record, &BinaryEncoder),
            ScalarFieldId::Vesta => self.build::<halo2curves::pasta::Fp, _>(record, &BinaryEncoder),
        }
    }
}
