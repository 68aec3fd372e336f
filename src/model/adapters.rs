//! smartcore-backed classifier descriptors.
//!
//! Each descriptor converts the row-major feature matrix into a
//! `DenseMatrix`, fits the corresponding smartcore model with its default
//! hyperparameters and captures the fitted model in a prediction closure.

use crate::error::Error;
use crate::model::{check_training_shape, Classifier, Fitted};
use smartcore::ensemble::random_forest_classifier::RandomForestClassifier as ScRandomForest;
use smartcore::linalg::naive::dense_matrix::DenseMatrix;
use smartcore::linear::logistic_regression::LogisticRegression as ScLogisticRegression;
use smartcore::naive_bayes::bernoulli::BernoulliNB as ScBernoulliNB;
use smartcore::naive_bayes::categorical::CategoricalNB as ScCategoricalNB;
use smartcore::naive_bayes::gaussian::GaussianNB as ScGaussianNB;
use smartcore::naive_bayes::multinomial::MultinomialNB as ScMultinomialNB;
use smartcore::neighbors::knn_classifier::KNNClassifier as ScKnnClassifier;
use smartcore::tree::decision_tree_classifier::DecisionTreeClassifier as ScDecisionTree;

fn to_dense(x: &[Vec<f64>]) -> DenseMatrix<f64> {
    DenseMatrix::from_2d_vec(&x.to_vec())
}

/// A fitted model captured as a prediction closure.
struct FittedFn<F>(F);

impl<F> Fitted for FittedFn<F>
where
    F: Fn(&[Vec<f64>]) -> Result<Vec<f64>, Error>,
{
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>, Error> {
        (self.0)(x)
    }
}

fn fitted<F>(predict: F) -> Box<dyn Fitted>
where
    F: Fn(&[Vec<f64>]) -> Result<Vec<f64>, Error> + 'static,
{
    Box::new(FittedFn(predict))
}

macro_rules! smartcore_classifier {
    ($(#[$doc:meta])* $wrapper:ident, $name:literal, |$x:ident, $y:ident| $fit:expr) => {
        $(#[$doc])*
        pub struct $wrapper;

        impl Classifier for $wrapper {
            fn name(&self) -> &'static str {
                $name
            }

            fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> Result<Box<dyn Fitted>, Error> {
                check_training_shape(x, y)?;
                let $x = to_dense(x);
                let $y = y.to_vec();
                let model = $fit?;
                Ok(fitted(move |x_new: &[Vec<f64>]| {
                    model.predict(&to_dense(x_new)).map_err(Error::from)
                }))
            }
        }
    };
}

smartcore_classifier!(
    /// Logistic regression (GLM family).
    LogisticRegressionClassifier,
    "LogisticRegression",
    |x, y| ScLogisticRegression::fit(&x, &y, Default::default())
);

smartcore_classifier!(
    /// Random forest (ensemble family).
    RandomForestClassifier,
    "RandomForestClassifier",
    |x, y| ScRandomForest::fit(&x, &y, Default::default())
);

smartcore_classifier!(
    /// Single CART tree (tree family).
    DecisionTreeClassifier,
    "DecisionTreeClassifier",
    |x, y| ScDecisionTree::fit(&x, &y, Default::default())
);

smartcore_classifier!(
    /// k-nearest neighbours (nearest-neighbour family).
    KnnClassifier,
    "KNeighborsClassifier",
    |x, y| ScKnnClassifier::fit(&x, &y, Default::default())
);

smartcore_classifier!(
    /// Gaussian naive Bayes (Bayesian family).
    GaussianNbClassifier,
    "GaussianNB",
    |x, y| ScGaussianNB::fit(&x, &y, Default::default())
);

smartcore_classifier!(
    /// Bernoulli naive Bayes over binarised features.
    BernoulliNbClassifier,
    "BernoulliNB",
    |x, y| ScBernoulliNB::fit(&x, &y, Default::default())
);

smartcore_classifier!(
    /// Categorical naive Bayes; expects small non-negative integer codes.
    CategoricalNbClassifier,
    "CategoricalNB",
    |x, y| ScCategoricalNB::fit(&x, &y, Default::default())
);

smartcore_classifier!(
    /// Multinomial naive Bayes over count-like features.
    MultinomialNbClassifier,
    "MultinomialNB",
    |x, y| ScMultinomialNB::fit(&x, &y, Default::default())
);
