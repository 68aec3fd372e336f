//! The canonical Titanic feature pipeline.
//!
//! Assembles the full preprocessing chain for the Kaggle Titanic
//! passenger manifest: missing-value handling, cabin and name feature
//! extraction, title consolidation, categorical encoding and binning,
//! ending with a frame of purely numeric survival features.

use crate::error::Error;
use crate::frame::Frame;
use crate::pipeline::PipelineCollector;
use crate::preprocessing::encoding::{
    BucketEqualWidth, BucketQuantile, DropColumns, EncodeDummies, MapOrdinal,
};
use crate::preprocessing::engineering::{
    CleanMasterTitle, CleanMissTitle, CleanMrTitle, CleanMrsTitle, CleanUncommonTitles,
    EngineerDeck, EngineerFamilySize, EngineerPort, EngineerTitle,
};
use crate::preprocessing::imputation::{FillMissing, ImputeAgeKnn, ImputeFare};

/// Build the standard Titanic pipeline. `seed` drives the randomised
/// marital-status assignment for adult Mr passengers, so the same seed
/// reproduces the same feature frame.
pub fn pipeline(seed: u64) -> PipelineCollector {
    let mut collector = PipelineCollector::new();
    collector.add_operation(FillMissing::new("Embarked", "S"));
    collector.add_operation(FillMissing::new("Cabin", "U"));
    collector.add_operation(ImputeFare);
    collector.add_operation(ImputeAgeKnn::default());
    collector.add_operation(EngineerDeck);
    collector.add_operation(EngineerPort);
    collector.add_operation(EngineerFamilySize);
    collector.add_operation(EngineerTitle);
    collector.add_operation(CleanUncommonTitles::default());
    collector.add_operation(CleanMasterTitle);
    collector.add_operation(CleanMissTitle);
    collector.add_operation(CleanMrsTitle);
    collector.add_operation(CleanMrTitle::new(seed));
    collector.add_operation(FillMissing::new("Title", "None"));
    collector.add_operation(EncodeDummies::new(&["Sex", "Embarked"], true));
    collector.add_operation(BucketQuantile::new("Fare", 4));
    collector.add_operation(BucketEqualWidth::new("Age", 5));
    collector.add_operation(MapOrdinal::new(
        "Title",
        &[
            ("Rare", 4.0),
            ("Rank", 3.0),
            ("Married", 2.0),
            ("Single", 1.0),
            ("None", 0.0),
        ],
    ));
    collector.add_operation(MapOrdinal::new("Port", &[("P", 2.0), ("S", 1.0), ("U", 0.0)]));
    collector.add_operation(MapOrdinal::new(
        "Deck",
        &[
            ("G", 8.0),
            ("F", 7.0),
            ("E", 6.0),
            ("D", 5.0),
            ("C", 4.0),
            ("B", 3.0),
            ("A", 2.0),
            ("T", 1.0),
            ("U", 0.0),
        ],
    ));
    collector.add_operation(DropColumns::new(&["PassengerId", "Name", "Ticket", "Cabin"]));
    collector
}

/// Split a fully numeric frame into a row-major feature matrix and the
/// label vector for `label`. Fails if any remaining cell is missing or
/// non-numeric.
pub fn feature_matrix(frame: &Frame, label: &str) -> Result<(Vec<Vec<f64>>, Vec<f64>), Error> {
    let labels = frame.numeric(label)?;
    let feature_names: Vec<String> = frame
        .names()
        .into_iter()
        .filter(|&name| name != label)
        .map(String::from)
        .collect();

    let mut x = vec![Vec::with_capacity(feature_names.len()); frame.n_rows()];
    for name in &feature_names {
        for (row, value) in x.iter_mut().zip(frame.numeric(name)?) {
            row.push(value);
        }
    }
    Ok((x, labels))
}
