//! The standard classifier battery.
//!
//! The registry is an explicit configuration value handed to the
//! comparison harness, not shared process-wide state: build it, hand it
//! over, substitute freely without touching the harness.

use crate::model::adapters::{
    BernoulliNbClassifier, CategoricalNbClassifier, DecisionTreeClassifier, GaussianNbClassifier,
    KnnClassifier, LogisticRegressionClassifier, MultinomialNbClassifier, RandomForestClassifier,
};
use crate::model::boosting::AdaBoostStumps;
use crate::model::discriminant::{Lda, Qda};
use crate::model::linear::{LinearSvc, Perceptron};
use crate::model::Classifier;

/// Build the default battery, spanning ensemble, GLM, Bayesian,
/// nearest-neighbour, SVM, tree, discriminant-analysis and boosted
/// families. Table order is the tie-break order of the final ranking.
pub fn default_registry() -> Vec<Box<dyn Classifier>> {
    vec![
        // Ensemble methods
        Box::new(AdaBoostStumps::default()),
        Box::new(RandomForestClassifier),
        // GLM
        Box::new(LogisticRegressionClassifier),
        Box::new(Perceptron::default()),
        // Naive Bayes
        Box::new(BernoulliNbClassifier),
        Box::new(CategoricalNbClassifier),
        Box::new(GaussianNbClassifier),
        Box::new(MultinomialNbClassifier),
        // Nearest neighbour
        Box::new(KnnClassifier),
        // SVM
        Box::new(LinearSvc::default()),
        // Trees
        Box::new(DecisionTreeClassifier),
        // Discriminant analysis
        Box::new(Lda::default()),
        Box::new(Qda::default()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_spans_families() {
        let registry = default_registry();
        let names: Vec<&str> = registry.iter().map(|c| c.name()).collect();
        assert_eq!(registry.len(), 13);
        for expected in [
            "AdaBoostClassifier",
            "RandomForestClassifier",
            "LogisticRegression",
            "KNeighborsClassifier",
            "LinearSVC",
            "DecisionTreeClassifier",
            "LinearDiscriminantAnalysis",
            "QuadraticDiscriminantAnalysis",
        ] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_registry_names_are_unique() {
        let registry = default_registry();
        let mut names: Vec<&str> = registry.iter().map(|c| c.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), registry.len());
    }
}
