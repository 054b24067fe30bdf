//! Skill clustering: bag-of-words counts partitioned with fixed-seed k-means.
//!
//! Each document's skill set is joined into one string, counted against the
//! batch vocabulary (no weighting, no normalization), then split into
//! `min(MAX_CLUSTERS, n)` groups. Label numbers mean nothing outside the batch.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_clustering::{KMeans, KMeansInit};
use ndarray::{Array1, Array2};
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

pub const MAX_CLUSTERS: usize = 3;
pub const CLUSTER_SEED: u64 = 42;
const MAX_ITERATIONS: u64 = 300;
const TOLERANCE: f64 = 1e-4;

static TERM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("term pattern is valid"));

#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("empty vocabulary: no skill terms found in any document")]
    EmptyVocabulary,

    #[error("k-means failed: {0}")]
    KMeans(String),
}

/// Raw term counts, one row per document, columns in sorted vocabulary order.
#[derive(Debug)]
pub struct TermCounts {
    pub vocabulary: Vec<String>,
    pub matrix: Array2<f64>,
}

pub fn count_terms(documents: &[String]) -> TermCounts {
    let tokenized: Vec<Vec<String>> = documents
        .iter()
        .map(|doc| {
            let lower = doc.to_lowercase();
            TERM_RE
                .find_iter(&lower)
                .map(|m| m.as_str().to_string())
                .collect()
        })
        .collect();

    let vocabulary: Vec<String> = tokenized
        .iter()
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let column: BTreeMap<&str, usize> = vocabulary
        .iter()
        .enumerate()
        .map(|(i, term)| (term.as_str(), i))
        .collect();

    let mut matrix = Array2::zeros((documents.len(), vocabulary.len()));
    for (row, terms) in tokenized.iter().enumerate() {
        for term in terms {
            if let Some(&col) = column.get(term.as_str()) {
                matrix[[row, col]] += 1.0;
            }
        }
    }

    TermCounts { vocabulary, matrix }
}

/// Returns exactly one label per skill set, each in `0..min(MAX_CLUSTERS, n)`.
pub fn cluster_skill_sets<S>(skill_sets: &[S]) -> Result<Vec<usize>, ClusterError>
where
    S: AsRef<[String]>,
{
    if skill_sets.is_empty() {
        return Ok(vec![]);
    }

    let documents: Vec<String> = skill_sets.iter().map(|s| s.as_ref().join(" ")).collect();
    let counts = count_terms(&documents);
    if counts.vocabulary.is_empty() {
        return Err(ClusterError::EmptyVocabulary);
    }

    let k = MAX_CLUSTERS.min(documents.len());
    debug!(
        documents = documents.len(),
        vocabulary = counts.vocabulary.len(),
        k,
        "Clustering skill sets"
    );

    let dataset = DatasetBase::from(counts.matrix);
    let rng = Xoshiro256Plus::seed_from_u64(CLUSTER_SEED);
    let model = KMeans::params_with_rng(k, rng)
        .init_method(KMeansInit::Random)
        .n_runs(1)
        .max_n_iterations(MAX_ITERATIONS)
        .tolerance(TOLERANCE)
        .fit(&dataset)
        .map_err(|e| ClusterError::KMeans(e.to_string()))?;

    let labels: Array1<usize> = model.predict(dataset.records());
    Ok(labels.to_vec())
}

/// Number of documents per label, for the cluster-size chart.
pub fn cluster_sizes(labels: &[usize]) -> BTreeMap<usize, usize> {
    let mut sizes = BTreeMap::new();
    for &label in labels {
        *sizes.entry(label).or_insert(0) += 1;
    }
    sizes
}
