//! Ordered collection of frame transformations.
//!
//! A [`PipelineCollector`] holds named [`Operation`]s and applies them in
//! insertion order, each step's output frame feeding the next step. The
//! collector establishes no error-handling policy of its own: the first step
//! that fails aborts the whole transform.
//!
//! # Example
//! ```
//! use titanic_ml::frame::{Frame, Value};
//! use titanic_ml::pipeline::PipelineCollector;
//! use titanic_ml::preprocessing::engineering::EngineerFamilySize;
//!
//! let mut pipeline = PipelineCollector::new();
//! pipeline.add_operation(EngineerFamilySize);
//!
//! let frame = Frame::from_columns(vec![
//!     ("SibSp".to_string(), vec![Value::Num(1.0)]),
//!     ("Parch".to_string(), vec![Value::Num(2.0)]),
//! ])
//! .unwrap();
//!
//! let out = pipeline.transform(frame).unwrap();
//! assert_eq!(out.numeric("FamilySize").unwrap(), vec![4.0]);
//! ```

use crate::error::Error;
use crate::frame::Frame;

/// A single named frame transformation.
///
/// Steps must not assume column order and must not silently drop rows. A
/// step is free to mutate its input in place or rebuild it; the collector
/// only contracts on the returned frame.
pub trait Operation {
    /// Step name for logging and debugging.
    fn name(&self) -> &str;

    /// Apply the transformation, producing the next frame.
    fn apply(&self, frame: Frame) -> Result<Frame, Error>;
}

/// Adapter turning a closure into an [`Operation`].
pub struct FnOperation<F> {
    name: String,
    func: F,
}

impl<F> FnOperation<F>
where
    F: Fn(Frame) -> Result<Frame, Error>,
{
    /// Wrap a closure under a step name.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Operation for FnOperation<F>
where
    F: Fn(Frame) -> Result<Frame, Error>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, frame: Frame) -> Result<Frame, Error> {
        (self.func)(frame)
    }
}

/// An append-only, ordered list of operations applied as one transform.
#[derive(Default)]
pub struct PipelineCollector {
    operations: Vec<Box<dyn Operation>>,
}

impl PipelineCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation. No validation happens here; a malformed step
    /// surfaces its error only at transform time.
    pub fn add_operation<O: Operation + 'static>(&mut self, operation: O) {
        self.operations.push(Box::new(operation));
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether no operations are registered.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Step names in application order.
    pub fn operation_names(&self) -> Vec<&str> {
        self.operations.iter().map(|op| op.name()).collect()
    }

    /// Fold the frame through every operation in insertion order.
    ///
    /// The collector itself is unchanged by this call.
    ///
    /// # Errors
    /// Propagates the first step error immediately; no partial result is
    /// returned.
    pub fn transform(&self, frame: Frame) -> Result<Frame, Error> {
        let mut current = frame;
        for operation in &self.operations {
            tracing::debug!(step = operation.name(), rows = current.n_rows(), "applying");
            current = operation.apply(current)?;
        }
        Ok(current)
    }
}
