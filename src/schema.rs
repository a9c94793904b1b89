//! Circuit variable declarations.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Whether a variable is a public input of the circuit or private witness data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

impl Visibility {
    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => f.write_str("public"),
            Visibility::Private => f.write_str("private"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableDecl {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
}

impl VariableDecl {
    pub fn new<N: Into<String>>(name: N, visibility: Visibility) -> Self {
        VariableDecl {
            name: name.into(),
            visibility,
        }
    }

    pub fn public<N: Into<String>>(name: N) -> Self {
        Self::new(name, Visibility::Public)
    }

    pub fn private<N: Into<String>>(name: N) -> Self {
        Self::new(name, Visibility::Private)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("variable #{0} has an empty name")]
    EmptyName(usize),
    #[error("variable `{0}` is declared more than once")]
    DuplicateVariable(String),
}

/// The ordered variable declarations of a circuit.
///
/// Declaration order is significant: witnesses are assembled in this order.
/// The declarations are immutable once built and shared between clones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CircuitSchema {
    name: Arc<str>,
    variables: Arc<[VariableDecl]>,
}

impl CircuitSchema {
    pub fn new<N, I>(name: N, variables: I) -> Result<Self, SchemaError>
    where
        N: Into<String>,
        I: IntoIterator<Item = VariableDecl>,
    {
        let variables: Vec<VariableDecl> = variables.into_iter().collect();

        let mut seen = HashSet::with_capacity(variables.len());
        for (i, decl) in variables.iter().enumerate() {
            if decl.name.is_empty() {
                return Err(SchemaError::EmptyName(i));
            }
            if !seen.insert(decl.name.as_str()) {
                return Err(SchemaError::DuplicateVariable(decl.name.clone()));
            }
        }

        Ok(CircuitSchema {
            name: name.into().into(),
            variables: variables.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[VariableDecl] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|v| v.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&VariableDecl> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn num_public(&self) -> usize {
        self.variables
            .iter()
            .filter(|v| v.visibility.is_public())
            .count()
    }

    pub fn num_private(&self) -> usize {
        self.len() - self.num_public()
    }
}
