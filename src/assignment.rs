use bellpepper_core::num::AllocatedNum;
use bellpepper_core::{ConstraintSystem, SynthesisError};

use crate::{ScalarField, ScalarFieldId, Visibility};

/// A schema variable together with its value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignedVariable<F> {
    pub name: String,
    pub visibility: Visibility,
    pub value: F,
}

/// Values for every variable of a circuit schema, in declaration order.
///
/// An `Assignment` can only be produced by [`WitnessBuilder`], which
/// guarantees that it holds exactly one entry per declared variable.
///
/// [`WitnessBuilder`]: crate::WitnessBuilder
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment<F> {
    circuit: String,
    entries: Vec<AssignedVariable<F>>,
}

impl<F: ScalarField> Assignment<F> {
    pub(crate) fn new(circuit: String, entries: Vec<AssignedVariable<F>>) -> Self {
        Assignment { circuit, entries }
    }

    /// Name of the circuit this assignment was built for.
    pub fn circuit(&self) -> &str {
        &self.circuit
    }

    pub fn field(&self) -> ScalarFieldId {
        F::ID
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssignedVariable<F>> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&AssignedVariable<F>> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn value(&self, name: &str) -> Option<F> {
        self.get(name).map(|e| e.value)
    }

    pub fn public(&self) -> impl Iterator<Item = &AssignedVariable<F>> {
        self.entries.iter().filter(|e| e.visibility.is_public())
    }

    pub fn private(&self) -> impl Iterator<Item = &AssignedVariable<F>> {
        self.entries.iter().filter(|e| !e.visibility.is_public())
    }

    pub fn num_public(&self) -> usize {
        self.public().count()
    }

    pub fn num_private(&self) -> usize {
        self.len() - self.num_public()
    }

    /// Public values in declaration order, as a verifier expects them.
    pub fn public_inputs(&self) -> Vec<F> {
        self.public().map(|e| e.value).collect()
    }

    /// Allocates every variable in `cs`: public ones as inputs, private ones
    /// as auxiliary variables. Each allocation is namespaced by the variable
    /// name. Returns the allocated numbers in declaration order.
    pub fn allocate<CS: ConstraintSystem<F>>(
        &self,
        cs: &mut CS,
    ) -> Result<Vec<AllocatedNum<F>>, SynthesisError> {
        self.entries
            .iter()
            .map(|entry| {
                let value = entry.value;
                let cs = cs.namespace(|| entry.name.clone());
                match entry.visibility {
                    Visibility::Public => AllocatedNum::alloc_input(cs, || Ok(value)),
                    Visibility::Private => AllocatedNum::alloc(cs, || Ok(value)),
                }
            })
            .collect()
    }
}

impl<'a, F> IntoIterator for &'a Assignment<F> {
    type Item = &'a AssignedVariable<F>;
    type IntoIter = std::slice::Iter<'a, AssignedVariable<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use bellpepper_core::test_cs::TestConstraintSystem;
    use blstrs::Scalar as Fr;

    fn sample() -> Assignment<Fr> {
        Assignment::new(
            "sample".to_string(),
            vec![
                AssignedVariable {
                    name: "X".to_string(),
                    visibility: Visibility::Private,
                    value: Fr::from(3u64),
                },
                AssignedVariable {
                    name: "Y".to_string(),
                    visibility: Visibility::Public,
                    value: Fr::from(4u64),
                },
                AssignedVariable {
                    name: "Z".to_string(),
                    visibility: Visibility::Public,
                    value: Fr::from(5u64),
                },
            ],
        )
    }

    #[test]
    fn test_accessors() {
        let a = sample();

        assert_eq!(a.circuit(), "sample");
        assert_eq!(a.field(), ScalarFieldId::Bls12_381);
        assert_eq!(a.names().collect::<Vec<_>>(), vec!["X", "Y", "Z"]);
        assert_eq!(a.num_public(), 2);
        assert_eq!(a.num_private(), 1);
        assert_eq!(a.value("Y"), Some(Fr::from(4u64)));
        assert_eq!(a.value("W"), None);
        assert_eq!(a.public_inputs(), vec![Fr::from(4u64), Fr::from(5u64)]);
    }

    #[test]
    fn test_allocate() {
        let a = sample();
        let mut cs = TestConstraintSystem::<Fr>::new();

        let nums = a.allocate(&mut cs).unwrap();
        let values: Vec<_> = nums.iter().map(|n| n.get_value().unwrap()).collect();

        assert_eq!(values, vec![Fr::from(3u64), Fr::from(4u64), Fr::from(5u64)]);
        // The constant ONE plus the two public variables.
        assert_eq!(cs.num_inputs(), 3);
        assert_eq!(cs.get("X/num"), Fr::from(3u64));
        assert_eq!(cs.get_input(1, "Y/input num"), Fr::from(4u64));
        assert!(cs.is_satisfied());
    }
}
