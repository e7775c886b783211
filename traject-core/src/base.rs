//! Core abstractions.
mod env;
mod policy;
mod space;
mod step;
pub use env::Env;
pub use policy::Policy;
pub use space::ActionSpace;
pub use step::{Info, Step};

use ndarray::Array1;
use std::fmt::Debug;

/// An observation of an environment.
///
/// Observations are fixed-length real feature vectors; the trait exposes
/// enough of that vector for transitions to be stacked into rectangular
/// arrays without knowing the concrete type.
pub trait Obs: Clone + Debug {
    /// Returns the number of elements in the feature vector.
    fn len(&self) -> usize;

    /// Copies the feature vector out of the observation.
    fn to_vec(&self) -> Vec<f32>;
}

/// An action applied to an environment.
pub trait Act: Clone + Debug {
    /// Returns the number of action components.
    fn len(&self) -> usize;

    /// Copies the action components out of the action.
    fn to_vec(&self) -> Vec<f32>;
}

impl Obs for Array1<f32> {
    fn len(&self) -> usize {
        Array1::len(self)
    }

    fn to_vec(&self) -> Vec<f32> {
        Array1::to_vec(self)
    }
}

impl Act for Array1<f32> {
    fn len(&self) -> usize {
        Array1::len(self)
    }

    fn to_vec(&self) -> Vec<f32> {
        Array1::to_vec(self)
    }
}
