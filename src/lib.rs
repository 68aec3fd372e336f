//! Feature engineering and model comparison for the Titanic dataset.
//!
//! The crate mirrors the classic Kaggle workflow in three layers:
//!
//! - [`frame`]: a small column-oriented table with explicit missing
//!   values, loaded from CSV.
//! - [`pipeline`] and [`preprocessing`]: composable frame-to-frame
//!   operations (imputation, cabin and name feature extraction,
//!   encoding, binning) collected into a [`PipelineCollector`].
//! - [`model`] and [`compare`]: a classifier battery behind a common
//!   [`Classifier`] trait, ranked by a shuffle-split comparison
//!   harness.
//!
//! The [`titanic`] module ties the layers together into the canonical
//! pipeline for the passenger manifest.
//!
//! # Quick start
//!
//! ```no_run
//! use titanic_ml::compare::ComparisonHarness;
//! use titanic_ml::frame::csv::read_frame_from_path;
//! use titanic_ml::model::registry::default_registry;
//! use titanic_ml::titanic;
//!
//! fn main() -> Result<(), titanic_ml::Error> {
//!     let raw = read_frame_from_path("train.csv")?;
//!     let features = titanic::pipeline(0).transform(raw)?;
//!     let (x, y) = titanic::feature_matrix(&features, "Survived")?;
//!
//!     let harness = ComparisonHarness::new(default_registry());
//!     for row in harness.compare(&x, &y)? {
//!         println!("{:<32} {:.4}", row.name, row.dev_accuracy_mean);
//!     }
//!     Ok(())
//! }
//! ```

pub mod compare;
pub mod error;
pub mod frame;
pub mod model;
pub mod pipeline;
pub mod preprocessing;
pub mod titanic;

pub use compare::{ComparisonHarness, ComparisonRow, ShuffleSplit};
pub use error::Error;
pub use frame::{Frame, Value};
pub use model::{Classifier, Fitted};
pub use pipeline::{Operation, PipelineCollector};
