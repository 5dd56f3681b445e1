use handeye_core::{Real, SampleSide, TransformError};
use thiserror::Error;

/// Coarse classification of [`HandEyeError`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input: too few samples, a non-rigid transform, or a bad config.
    InputValidation,
    /// The sampled motions do not constrain the unknown rotation.
    DegenerateMotion,
    /// The least-squares result failed its post-hoc checks.
    Numerical,
}

/// Errors that can occur during hand-eye estimation.
#[derive(Debug, Error)]
pub enum HandEyeError {
    /// Fewer than two samples were provided.
    #[error("need at least 2 samples, got {0}")]
    NotEnoughSamples(usize),
    /// Robot-side and camera-side pose lists differ in length.
    #[error("inconsistent hand-eye input sizes: robot {robot} vs camera {camera}")]
    MismatchedInputs { robot: usize, camera: usize },
    /// A supplied transform is not rigid.
    #[error("sample {index}: {side} transform is not rigid: {source}")]
    InvalidSample {
        index: usize,
        side: SampleSide,
        source: TransformError,
    },
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Not enough independent rotation axes across the motion pairs.
    #[error(
        "degenerate motion: {informative_pairs} informative motion pair(s), \
         singular value ratio {singular_ratio:.3e}"
    )]
    DegenerateMotion {
        informative_pairs: usize,
        singular_ratio: Real,
    },
    /// Linear solve (SVD) failed.
    #[error("svd failed during {0}")]
    SvdFailed(&'static str),
    /// The estimate is not a valid rigid transform.
    #[error("numerical failure: {0}")]
    Numerical(String),
}

impl HandEyeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HandEyeError::NotEnoughSamples(_)
            | HandEyeError::MismatchedInputs { .. }
            | HandEyeError::InvalidSample { .. }
            | HandEyeError::InvalidConfig(_) => ErrorKind::InputValidation,
            HandEyeError::DegenerateMotion { .. } => ErrorKind::DegenerateMotion,
            HandEyeError::SvdFailed(_) | HandEyeError::Numerical(_) => ErrorKind::Numerical,
        }
    }
}
