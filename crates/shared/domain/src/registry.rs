//! Slice registry for modular features.
//! A minimal type-erased container for pre-initialized feature state.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// Marker trait for feature state that can be shared across threads.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    /// Short, stable name used in logs.
    fn name(&self) -> &'static str;

    /// Helper to allow downcasting from the trait object.
    fn as_any(&self) -> &dyn Any;
}

/// A container for an initialized feature.
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    pub state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    /// Create a new initialized slice from a concrete state.
    pub fn new<T: FeatureSlice>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), state: Box::new(state) }
    }

    /// Name of the wrapped slice.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.state.name()
    }

    /// Borrows the concrete slice state if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: FeatureSlice>(&self) -> Option<&T> {
        self.state.as_any().downcast_ref::<T>()
    }
}

/// Finds the first slice of type `T` in a list of initialized slices.
#[must_use]
pub fn find<T: FeatureSlice>(slices: &[InitializedSlice]) -> Option<&T> {
    slices.iter().find(|s| s.id == TypeId::of::<T>()).and_then(InitializedSlice::downcast_ref)
}
