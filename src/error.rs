use field_witness_input::LoadError;

use crate::BuildError;

/// Any error of the file-to-witness pipeline.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Build(#[from] BuildError),
}
