//! The scalar fields witnesses can be built over.

use std::fmt;
use std::str::FromStr;

use ff::PrimeField;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Identifies the scalar field of a supported curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScalarFieldId {
    /// BN254 (alt_bn128), the default curve of most Ethereum-facing circuits.
    Bn254,
    /// BLS12-381.
    Bls12_381,
    /// The Pallas curve's scalar field (Vesta's base field).
    Pallas,
    /// The Vesta curve's scalar field (Pallas' base field).
    Vesta,
}

impl ScalarFieldId {
    pub const ALL: [ScalarFieldId; 4] = [
        ScalarFieldId::Bn254,
        ScalarFieldId::Bls12_381,
        ScalarFieldId::Pallas,
        ScalarFieldId::Vesta,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScalarFieldId::Bn254 => "bn254",
            ScalarFieldId::Bls12_381 => "bls12-381",
            ScalarFieldId::Pallas => "pallas",
            ScalarFieldId::Vesta => "vesta",
        }
    }

    /// The field's prime as the hex literal published by its implementation.
    pub fn modulus_hex(&self) -> &'static str {
        match self {
            ScalarFieldId::Bn254 => <halo2curves::bn256::Fr as PrimeField>::MODULUS,
            ScalarFieldId::Bls12_381 => <blstrs::Scalar as PrimeField>::MODULUS,
            ScalarFieldId::Pallas => <halo2curves::pasta::Fq as PrimeField>::MODULUS,
            ScalarFieldId::Vesta => <halo2curves::pasta::Fp as PrimeField>::MODULUS,
        }
    }

    pub fn modulus(&self) -> BigUint {
        match self {
            ScalarFieldId::Bn254 => <halo2curves::bn256::Fr as ScalarField>::modulus(),
            ScalarFieldId::Bls12_381 => <blstrs::Scalar as ScalarField>::modulus(),
            ScalarFieldId::Pallas => <halo2curves::pasta::Fq as ScalarField>::modulus(),
            ScalarFieldId::Vesta => <halo2curves::pasta::Fp as ScalarField>::modulus(),
        }
    }

    pub fn num_bits(&self) -> u32 {
        match self {
            ScalarFieldId::Bn254 => <halo2curves::bn256::Fr as PrimeField>::NUM_BITS,
            ScalarFieldId::Bls12_381 => <blstrs::Scalar as PrimeField>::NUM_BITS,
            ScalarFieldId::Pallas => <halo2curves::pasta::Fq as PrimeField>::NUM_BITS,
            ScalarFieldId::Vesta => <halo2curves::pasta::Fp as PrimeField>::NUM_BITS,
        }
    }
}

impl fmt::Display for ScalarFieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown scalar field `{0}` (expected one of bn254, bls12-381, pallas, vesta)")]
pub struct UnknownFieldError(pub String);

impl FromStr for ScalarFieldId {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bn254" | "bn256" | "alt_bn128" => Ok(ScalarFieldId::Bn254),
            "bls12-381" | "bls12_381" | "bls12381" => Ok(ScalarFieldId::Bls12_381),
            "pallas" => Ok(ScalarFieldId::Pallas),
            "vesta" => Ok(ScalarFieldId::Vesta),
            _ => Err(UnknownFieldError(s.to_string())),
        }
    }
}

impl TryFrom<String> for ScalarFieldId {
    type Error = UnknownFieldError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ScalarFieldId> for String {
    fn from(id: ScalarFieldId) -> Self {
        id.name().to_string()
    }
}

/// A prime field that witnesses can be built over. The conversion code only
/// relies on the `ff` arithmetic; the identifier travels with the witness so
/// encoders can check what they were given.
pub trait ScalarField: PrimeField {
    const ID: ScalarFieldId;

    /// The field's prime, computed as `(p - 1) + 1` from the canonical
    /// little-endian representation of `-1`.
    fn modulus() -> BigUint {
        BigUint::from_bytes_le((-Self::ONE).to_repr().as_ref()) + 1u32
    }
}

impl ScalarField for halo2curves::bn256::Fr {
    const ID: ScalarFieldId = ScalarFieldId::Bn254;
}

impl ScalarField for blstrs::Scalar {
    const ID: ScalarFieldId = ScalarFieldId::Bls12_381;
}

impl ScalarField for halo2curves::pasta::Fq {
    const ID: ScalarFieldId = ScalarFieldId::Pallas;
}

impl ScalarField for halo2curves::pasta::Fp {
    const ID: ScalarFieldId = ScalarFieldId::Vesta;
}

#[cfg(test)]
mod tests {
    use super::*;

    use ff::Field;
    use num_bigint::BigInt;

    use crate::convert::to_field;

    fn hex(digits: &str) -> BigUint {
        BigUint::parse_bytes(digits.as_bytes(), 16).unwrap()
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("bn254".parse(), Ok(ScalarFieldId::Bn254));
        assert_eq!("BLS12-381".parse(), Ok(ScalarFieldId::Bls12_381));
        assert_eq!("bls12_381".parse(), Ok(ScalarFieldId::Bls12_381));
        assert_eq!("Pallas".parse(), Ok(ScalarFieldId::Pallas));
        assert_eq!(
            "bw6-761".parse::<ScalarFieldId>(),
            Err(UnknownFieldError("bw6-761".to_string()))
        );

        for id in ScalarFieldId::ALL {
            assert_eq!(id.to_string().parse(), Ok(id));
        }
    }

    #[test]
    fn test_moduli() {
        let bn254: BigUint =
            "21888242871839275222246405745257275088548364400416034343698204186575808495617"
                .parse()
                .unwrap();
        assert_eq!(ScalarFieldId::Bn254.modulus(), bn254);
        assert_eq!(<halo2curves::bn256::Fr as ScalarField>::modulus(), bn254);

        let bls: BigUint =
            "52435875175126190479447740508185965837690552500527637822603658699938581184513"
                .parse()
                .unwrap();
        assert_eq!(ScalarFieldId::Bls12_381.modulus(), bls);
        assert_eq!(ScalarFieldId::Bls12_381.num_bits(), 255);

        let pallas = hex("40000000000000000000000000000000224698fc0994a8dd8c46eb2100000001");
        assert_eq!(ScalarFieldId::Pallas.modulus(), pallas);
        assert_eq!(<halo2curves::pasta::Fq as ScalarField>::ID, ScalarFieldId::Pallas);

        let vesta = hex("40000000000000000000000000000000224698fc094cf91b992d30ed00000001");
        assert_eq!(ScalarFieldId::Vesta.modulus(), vesta);
        assert_eq!(<halo2curves::pasta::Fp as ScalarField>::ID, ScalarFieldId::Vesta);

        for id in ScalarFieldId::ALL {
            let published = hex(id.modulus_hex().trim_start_matches("0x"));
            assert_eq!(id.modulus(), published, "{}", id);
            assert_eq!(id.modulus().bits(), u64::from(id.num_bits()), "{}", id);
        }
    }

    #[test]
    fn test_pasta_reduction() {
        use halo2curves::pasta::{Fp, Fq};

        let p = BigInt::from(ScalarFieldId::Pallas.modulus());
        assert_eq!(to_field::<Fq>(&(&p + 5)), Fq::from(5u64));
        assert_eq!(to_field::<Fq>(&(&p - 1)), -Fq::ONE);
        // Pallas' prime is above Vesta's, so it does not vanish in Vesta's field.
        assert_ne!(to_field::<Fp>(&p), Fp::ZERO);

        let q = BigInt::from(ScalarFieldId::Vesta.modulus());
        assert_eq!(to_field::<Fp>(&(&q + 5)), Fp::from(5u64));
    }

    #[test]
    fn test_serde_names() {
        let id: ScalarFieldId = serde_json::from_str("\"bls12-381\"").unwrap();
        assert_eq!(id, ScalarFieldId::Bls12_381);
        assert_eq!(serde_json::to_string(&ScalarFieldId::Vesta).unwrap(), "\"vesta\"");
        assert!(serde_json::from_str::<ScalarFieldId>("\"secp256k1\"").is_err());
    }
}
