//! Circuit manifests and environment settings.
//!
//! A manifest describes a circuit to the pipeline:
//!
//! ```json
//! {
//!   "name": "equality",
//!   "curve": "bn254",
//!   "variables": [
//!     { "name": "X", "visibility": "private" },
//!     { "name": "Y", "visibility": "public" }
//!   ],
//!   "range_policy": "reduce"
//! }
//! ```
//!
//! `range_policy` is optional. When it is absent the policy is read from the
//! `FIELD_WITNESS_RANGE_POLICY` environment variable, and defaults to
//! [`RangePolicy::Reduce`].

use std::env;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{CircuitSchema, ScalarFieldId, SchemaError, VariableDecl};

pub const RANGE_POLICY_ENV: &str = "FIELD_WITNESS_RANGE_POLICY";

/// What to do with integers outside `[0, modulus)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// Reduce modulo the field's prime; negative values become their additive inverse.
    #[default]
    Reduce,
    /// Fail the build with `BuildError::OutOfRange`.
    Reject,
}

impl RangePolicy {
    /// Reads the policy from `FIELD_WITNESS_RANGE_POLICY`. Unset means the
    /// default; an unrecognized value is logged and also means the default.
    pub fn from_env() -> Self {
        match env::var(RANGE_POLICY_ENV) {
            Ok(value) => value.parse().unwrap_or_else(|_| {
                warn!(
                    "ignoring unrecognized {}={:?}, using {}",
                    RANGE_POLICY_ENV,
                    value,
                    RangePolicy::default()
                );
                RangePolicy::default()
            }),
            Err(_) => RangePolicy::default(),
        }
    }
}

impl fmt::Display for RangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangePolicy::Reduce => f.write_str("reduce"),
            RangePolicy::Reject => f.write_str("reject"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown range policy `{0}` (expected `reduce` or `reject`)")]
pub struct UnknownRangePolicy(pub String);

impl FromStr for RangePolicy {
    type Err = UnknownRangePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reduce" => Ok(RangePolicy::Reduce),
            "reject" => Ok(RangePolicy::Reject),
            _ => Err(UnknownRangePolicy(s.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read manifest {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed manifest {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid circuit schema: {0}")]
    Schema(#[from] SchemaError),
}

/// The description of a circuit: its name, curve, and variables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitManifest {
    pub name: String,
    pub curve: ScalarFieldId,
    pub variables: Vec<VariableDecl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_policy: Option<RangePolicy>,
}

impl CircuitManifest {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Validates the declared variables and returns them as a schema.
    pub fn schema(&self) -> Result<CircuitSchema, ConfigError> {
        Ok(CircuitSchema::new(
            self.name.clone(),
            self.variables.iter().cloned(),
        )?)
    }

    /// The manifest's own policy if it names one, otherwise the environment's.
    pub fn effective_range_policy(&self) -> RangePolicy {
        self.range_policy.unwrap_or_else(RangePolicy::from_env)
    }
}
