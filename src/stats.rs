//! Preverb usage statistics

use crate::dataset::Dataset;
use serde::{ser::SerializeMap, Serialize, Serializer};
use std::collections::BTreeMap;

/// Usage statistics of a single preverb
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PreverbStats<'dataset> {
    /// Number of occurrences of each verbal base (lemma)
    pub verbal_bases: Frequencies<&'dataset str>,

    /// Number of occurrences of each meaning gloss
    pub meanings: Frequencies<&'dataset str>,

    /// Number of records that use this preverb
    pub total_occurrences: usize,

    /// Number of occurrences of each (lemma, meaning) combination
    pub examples: Vec<Example<'dataset>>,
}
//
impl<'dataset> PreverbStats<'dataset> {
    /// Compute the statistics of a preverb
    ///
    /// An unknown preverb simply yields empty statistics.
    pub fn compute(dataset: &'dataset Dataset, preverb: &str) -> Self {
        let mut total_occurrences = 0;
        let mut lemmas = BTreeMap::<_, usize>::new();
        let mut meanings = BTreeMap::<_, usize>::new();
        let mut combinations = BTreeMap::<_, usize>::new();
        for record in dataset.records() {
            if &*record.preverb != preverb {
                continue;
            }
            total_occurrences += 1;
            *lemmas.entry(&*record.lemma).or_default() += 1;
            *meanings.entry(&*record.verb_semantics).or_default() += 1;
            *combinations
                .entry((
                    &*record.lemma,
                    &*record.meaning_id,
                    &*record.verb_semantics,
                ))
                .or_default() += 1;
        }
        log::trace!("Preverb {preverb:?} has {total_occurrences} occurrences");
        Self {
            verbal_bases: Frequencies::from(lemmas),
            meanings: Frequencies::from(meanings),
            total_occurrences,
            examples: Frequencies::from(combinations)
                .into_iter()
                .map(|((lemma, meaning_id, verb_semantics), count)| Example {
                    lemma,
                    meaning_id,
                    verb_semantics,
                    count,
                })
                .collect(),
        }
    }
}

/// Occurrence count of a (lemma, meaning) combination
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Example<'dataset> {
    pub lemma: &'dataset str,
    pub meaning_id: &'dataset str,
    pub verb_semantics: &'dataset str,
    pub count: usize,
}

/// Occurrence counts, sorted by decreasing count
///
/// Keys with equal counts are sorted in increasing key order. Serializes as a
/// map whose entries follow this order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Frequencies<K>(Vec<(K, usize)>);
//
impl<K> From<BTreeMap<K, usize>> for Frequencies<K> {
    fn from(counts: BTreeMap<K, usize>) -> Self {
        // Counts come out in increasing key order, which the stable sort
        // preserves among equal counts
        let mut counts = counts.into_iter().collect::<Vec<_>>();
        counts.sort_by(|(_, count1), (_, count2)| count2.cmp(count1));
        Self(counts)
    }
}
//
impl<K> IntoIterator for Frequencies<K> {
    type Item = (K, usize);
    type IntoIter = std::vec::IntoIter<(K, usize)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
//
impl<K: Serialize> Serialize for Frequencies<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, count) in &self.0 {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}
