//! Pairwise audience-overlap model for the selected cohort.

use std::collections::HashSet;

use marketmuse_core::{AgeBracket, CandidateProfile, Region};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::format::round_to;

const TOPIC_WEIGHT: f64 = 0.4;
const GEO_WEIGHT: f64 = 0.3;
const DEMO_WEIGHT: f64 = 0.3;

/// Shared topics over the larger topic set. Zero when both sets are empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn topic_overlap(a: &CandidateProfile, b: &CandidateProfile) -> f64 {
    let larger = a.topics.len().max(b.topics.len());
    if larger == 0 {
        return 0.0;
    }
    let theirs: HashSet<&str> = b.topics.iter().map(String::as_str).collect();
    let common = a
        .topics
        .iter()
        .filter(|t| theirs.contains(t.as_str()))
        .count();
    common as f64 / larger as f64
}

#[must_use]
pub fn geo_overlap(a: &CandidateProfile, b: &CandidateProfile) -> f64 {
    Region::ALL
        .iter()
        .map(|&r| a.geo.share(r).min(b.geo.share(r)))
        .sum()
}

#[must_use]
pub fn demo_overlap(a: &CandidateProfile, b: &CandidateProfile) -> f64 {
    AgeBracket::ALL
        .iter()
        .map(|&br| a.audience.share(br).min(b.audience.share(br)))
        .sum()
}

/// Blended overlap coefficient `0.4·topic + 0.3·geo + 0.3·demo`.
#[must_use]
pub fn overlap_coefficient(a: &CandidateProfile, b: &CandidateProfile) -> f64 {
    let blended = TOPIC_WEIGHT * topic_overlap(a, b)
        + GEO_WEIGHT * geo_overlap(a, b)
        + DEMO_WEIGHT * demo_overlap(a, b);
    blended.clamp(0.0, 1.0)
}

/// Square overlap matrix over a cohort, indexed in cohort order.
///
/// Each unordered pair is computed once and written to both cells, so
/// `value(i, j) == value(j, i)` holds bit-for-bit. The diagonal is exactly 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapMatrix {
    ids: Vec<u32>,
    values: Vec<Vec<f64>>,
}

impl OverlapMatrix {
    #[must_use]
    pub fn build(cohort: &[&CandidateProfile]) -> Self {
        let n = cohort.len();
        let mut values = vec![vec![0.0; n]; n];
        for i in 0..n {
            values[i][i] = 1.0;
            for j in (i + 1)..n {
                let v = overlap_coefficient(cohort[i], cohort[j]);
                values[i][j] = v;
                values[j][i] = v;
            }
        }
        Self {
            ids: cohort.iter().map(|c| c.id).collect(),
            values,
        }
    }

    /// Candidate ids in cohort order.
    #[must_use]
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Value at cohort positions `(i, j)`. Panics if either index is out of range.
    #[must_use]
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

/// Serialized as `{id: {id: coefficient}}` in cohort order, rounded to 3 places.
impl Serialize for OverlapMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Row<'a> {
            ids: &'a [u32],
            values: &'a [f64],
        }

        impl Serialize for Row<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.ids.len()))?;
                for (id, v) in self.ids.iter().zip(self.values) {
                    map.serialize_entry(id, &round_to(*v, 3))?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(self.ids.len()))?;
        for (id, row) in self.ids.iter().zip(&self.values) {
            map.serialize_entry(
                id,
                &Row {
                    ids: &self.ids,
                    values: row,
                },
            )?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use marketmuse_core::ReferenceCatalog;

    use super::*;

    fn cohort(catalog: &ReferenceCatalog, ids: &[u32]) -> Vec<CandidateProfile> {
        ids.iter()
            .map(|&id| catalog.creator(id).cloned().unwrap())
            .collect()
    }

    #[test]
    fn topic_overlap_uses_larger_set() {
        let catalog = ReferenceCatalog::builtin().unwrap();
        let profiles = cohort(&catalog, &[6, 5]);
        // shared: sustainable, skincare; max(4, 3) = 4
        assert!((topic_overlap(&profiles[0], &profiles[1]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn topic_overlap_empty_sets_is_zero() {
        let catalog = ReferenceCatalog::builtin().unwrap();
        let mut profiles = cohort(&catalog, &[1, 2]);
        profiles[0].topics.clear();
        profiles[1].topics.clear();
        assert_eq!(topic_overlap(&profiles[0], &profiles[1]), 0.0);
    }

    #[test]
    fn coefficient_matches_reference_pair() {
        let catalog = ReferenceCatalog::builtin().unwrap();
        let profiles = cohort(&catalog, &[6, 5]);
        let v = overlap_coefficient(&profiles[0], &profiles[1]);
        assert!((round_to(v, 3) - 0.755).abs() < 1e-12, "got {v}");
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let catalog = ReferenceCatalog::builtin().unwrap();
        let refs: Vec<&CandidateProfile> = catalog.creators().iter().collect();
        let matrix = OverlapMatrix::build(&refs);
        assert_eq!(matrix.len(), refs.len());
        for i in 0..matrix.len() {
            assert_eq!(matrix.value(i, i), 1.0);
            for j in 0..matrix.len() {
                assert_eq!(matrix.value(i, j), matrix.value(j, i));
                assert!((0.0..=1.0).contains(&matrix.value(i, j)));
            }
        }
    }

    #[test]
    fn ids_follow_cohort_order() {
        let catalog = ReferenceCatalog::builtin().unwrap();
        let profiles = cohort(&catalog, &[6, 5, 3]);
        let refs: Vec<&CandidateProfile> = profiles.iter().collect();
        let matrix = OverlapMatrix::build(&refs);
        assert_eq!(matrix.ids(), &[6, 5, 3]);
        assert_eq!(matrix.value(1, 1), 1.0);
        assert_eq!(matrix.value(0, 2), matrix.value(2, 0));
    }

    #[test]
    fn empty_cohort_gives_empty_matrix() {
        let matrix = OverlapMatrix::build(&[]);
        assert!(matrix.is_empty());
    }

    #[test]
    fn serializes_as_nested_map() {
        let catalog = ReferenceCatalog::builtin().unwrap();
        let profiles = cohort(&catalog, &[6, 5]);
        let refs: Vec<&CandidateProfile> = profiles.iter().collect();
        let matrix = OverlapMatrix::build(&refs);
        let json = serde_json::to_value(&matrix).unwrap();
        assert_eq!(json["6"]["6"], serde_json::json!(1.0));
        assert_eq!(json["6"]["5"], serde_json::json!(0.755));
        assert_eq!(json["5"]["6"], json["6"]["5"]);
    }
}
