use std::any::Any;
use std::fmt;

/// Opaque per-feature state attached to a document.
///
/// Feature functions keep incremental scoring state here; the proposal engine
/// only needs to snapshot it into each search step so scoring a proposal is
/// reversible. `clone_box` is the object-safe clone contract, `as_any` lets
/// the scoring side downcast its own state back out.
pub trait FeatureState: fmt::Debug {
    fn clone_box(&self) -> Box<dyn FeatureState>;
    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn FeatureState> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
