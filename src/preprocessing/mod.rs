//! Feature engineering, imputation and encoding steps for passenger data.
//!
//! Every step here implements [`crate::pipeline::Operation`] and is
//! independently applicable; [`crate::titanic::pipeline`] assembles the
//! canonical ordered sequence.

pub mod encoding;
pub mod engineering;
pub mod imputation;

pub use encoding::{BucketEqualWidth, BucketQuantile, DropColumns, EncodeDummies, MapOrdinal};
pub use engineering::{
    CleanMasterTitle, CleanMissTitle, CleanMrTitle, CleanMrsTitle, CleanUncommonTitles,
    EngineerDeck, EngineerFamilySize, EngineerPort, EngineerTitle,
};
pub use imputation::{FillMissing, ImputeAgeKnn, ImputeFare};
