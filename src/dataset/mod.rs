//! In-memory preverb dataset and the queries that it answers
//!
//! The dataset is built once at startup (see [`builder`]) and never modified
//! afterwards, so it can be shared by every request handler without locking.

pub mod builder;

use serde::Serialize;
use std::collections::BTreeSet;

/// One attested use of a preverb-verb combination in a source text
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Record {
    /// Prefix-like particle, e.g. "ad"
    pub preverb: Box<str>,

    /// Dictionary form of the verb
    pub lemma: Box<str>,

    /// Human-readable gloss of the meaning
    pub verb_semantics: Box<str>,

    /// Identifier of the meaning
    pub meaning_id: Box<str>,

    /// Verb as it is spelled in the sentence
    pub verb_token: Box<str>,

    /// Sentence in which the verb occurs
    pub sentence: Box<str>,

    /// Author of the source text
    pub author: Box<str>,

    /// Title of the source text
    pub title: Box<str>,

    /// Century in which the source text was written
    pub century: Box<str>,

    /// World Historical Gazetteer link, empty if unknown
    pub whg_url: Box<str>,

    /// Language of the source text
    pub language: Box<str>,
}

/// Immutable, ordered collection of [`Record`]s
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Dataset(Box<[Record]>);
//
impl Dataset {
    /// All records, in storage order
    pub fn records(&self) -> &[Record] {
        &self.0[..]
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Truth that there are no records
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Distinct preverbs, in ascending lexical order
    pub fn preverbs(&self) -> Vec<&str> {
        (self.0.iter())
            .map(|record| &*record.preverb)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every occurrence of a meaning, or None if the meaning is unknown
    pub fn meaning_occurrences(&self, meaning_id: &str) -> Option<MeaningOccurrences<'_>> {
        let mut matches = self
            .0
            .iter()
            .filter(|record| &*record.meaning_id == meaning_id)
            .peekable();
        let first = *matches.peek()?;
        let verb_semantics = &*first.verb_semantics;
        Some(MeaningOccurrences {
            occurrences: matches.map(Occurrence::from).collect(),
            verb_semantics,
        })
    }

    /// One page of records, in storage order
    ///
    /// Pages are numbered from 1. Pages that lie past the end of the dataset
    /// are empty, and so are pages with a non-positive number or size.
    pub fn page(&self, page: i64, per_page: i64) -> &[Record] {
        let (Ok(page), Ok(per_page)) = (usize::try_from(page), usize::try_from(per_page)) else {
            return &[];
        };
        if page == 0 || per_page == 0 {
            return &[];
        }
        let Some(start) = (page - 1).checked_mul(per_page) else {
            return &[];
        };
        if start >= self.0.len() {
            return &[];
        }
        let end = start.saturating_add(per_page).min(self.0.len());
        &self.0[start..end]
    }
}
//
impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self(records.into_boxed_slice())
    }
}

/// Occurrences of a single meaning
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MeaningOccurrences<'dataset> {
    /// Matching records, in storage order
    pub occurrences: Vec<Occurrence<'dataset>>,

    /// Gloss of the first matching record
    pub verb_semantics: &'dataset str,
}

/// Public view of a record, as listed by meaning queries
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Occurrence<'dataset> {
    pub preverb: &'dataset str,
    pub lemma: &'dataset str,
    pub sentence: &'dataset str,
    pub token: &'dataset str,
    pub location_url: &'dataset str,
    pub author: &'dataset str,
    pub title: &'dataset str,
    pub century: &'dataset str,
}
//
impl<'dataset> From<&'dataset Record> for Occurrence<'dataset> {
    fn from(record: &'dataset Record) -> Self {
        Self {
            preverb: &record.preverb,
            lemma: &record.lemma,
            sentence: &record.sentence,
            token: &record.verb_token,
            location_url: &record.whg_url,
            author: &record.author,
            title: &record.title,
            century: &record.century,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a Latin record with the given classification and placeholder text
    pub fn record(preverb: &str, lemma: &str, meaning_id: &str, verb_semantics: &str) -> Record {
        Record {
            preverb: preverb.into(),
            lemma: lemma.into(),
            verb_semantics: verb_semantics.into(),
            meaning_id: meaning_id.into(),
            verb_token: format!("{preverb}{lemma}").into(),
            sentence: format!("... {preverb}{lemma} ...").into(),
            author: "Cicero".into(),
            title: "De Oratore".into(),
            century: "-1".into(),
            whg_url: "".into(),
            language: "Latin".into(),
        }
    }

    /// Small dataset used throughout the tests
    pub fn sample() -> Dataset {
        Dataset::from(vec![
            record("ad", "facio", "ad-facio-1", "to do to"),
            record("ex", "eo", "ex-eo-1", "to go out"),
            record("ad", "ferro", "ad-fero-1", "to bring to"),
            record("ad", "facio", "ad-facio-1", "to do to"),
            record("ex", "eo", "ex-eo-2", "to come out"),
            record("in", "eo", "in-eo-1", "to go into"),
        ])
    }

    #[test]
    fn preverbs_are_sorted_and_unique() {
        let dataset = sample();
        let preverbs = dataset.preverbs();
        assert_eq!(preverbs, ["ad", "ex", "in"]);
        assert!(preverbs
            .iter()
            .all(|p| dataset.records().iter().any(|r| &*r.preverb == *p)));
        assert!(Dataset::default().preverbs().is_empty());
    }

    #[test]
    fn meaning_occurrences_keep_storage_order() {
        let dataset = sample();
        let found = dataset.meaning_occurrences("ad-facio-1").unwrap();
        assert_eq!(found.verb_semantics, "to do to");
        assert_eq!(found.occurrences.len(), 2);
        assert_eq!(found.occurrences[0], Occurrence::from(&dataset.records()[0]));
        assert_eq!(found.occurrences[1], Occurrence::from(&dataset.records()[3]));
        assert_eq!(found.occurrences[0].token, "adfacio");
    }

    #[test]
    fn unknown_meaning() {
        assert_eq!(sample().meaning_occurrences("nope"), None);
    }

    #[test]
    fn pagination() {
        let dataset = Dataset::from(
            (0..25)
                .map(|i| record("ad", &format!("lemma{i:02}"), "m", "s"))
                .collect::<Vec<_>>(),
        );
        let page = dataset.page(2, 10);
        assert_eq!(page, &dataset.records()[10..20]);
        assert_eq!(dataset.page(3, 10).len(), 5);
        assert!(dataset.page(4, 10).is_empty());
        assert_eq!(dataset.page(1, 50).len(), 25);
    }

    #[test]
    fn degenerate_pagination() {
        let dataset = sample();
        assert!(dataset.page(0, 10).is_empty());
        assert!(dataset.page(-1, 2).is_empty());
        assert!(dataset.page(1, 0).is_empty());
        assert!(dataset.page(1, -5).is_empty());
        assert!(dataset.page(i64::MAX, i64::MAX).is_empty());
        assert_eq!(dataset.page(1, i64::MAX).len(), dataset.len());
    }
}
