//! Mechanism for building a [`Dataset`] from CSV rows

use super::{Dataset, Record};
use crate::table::Entry;
use std::sync::Arc;

/// Accumulator for accepted rows of the input CSV file
///
/// Once you're done with the input, call [`finish()`](Self::finish) to get
/// the final, immutable [`Dataset`].
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    /// Records accepted so far, in input order
    records: Vec<Record>,

    /// Number of records whose location link was missing
    missing_locations: usize,
}
//
impl DatasetBuilder {
    /// Set up the accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrate a new dataset row
    ///
    /// Rows should be added in the order where they come in the input file,
    /// which is the order that queries will report them in.
    pub fn add_entry(&mut self, entry: Entry) {
        let Entry {
            preverb,
            lemma,
            verb_semantics,
            meaning_id,
            verb_token,
            sentence,
            author,
            title,
            century,
            whg_url,
            language,
        } = entry;
        let whg_url = whg_url.filter(|url| !url.is_empty()).unwrap_or_else(|| {
            self.missing_locations += 1;
            Box::default()
        });
        self.records.push(Record {
            preverb,
            lemma,
            verb_semantics,
            meaning_id,
            verb_token,
            sentence,
            author,
            title,
            century,
            whg_url,
            language,
        });
    }

    /// Convert the dataset to its final form
    pub fn finish(self) -> Arc<Dataset> {
        log::debug!(
            "Built a dataset of {} records, {} of which have no location link",
            self.records.len(),
            self.missing_locations
        );
        Arc::new(Dataset::from(self.records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(whg_url: Option<&str>) -> Entry {
        Entry {
            preverb: "ad".into(),
            lemma: "facio".into(),
            verb_semantics: "to do to".into(),
            meaning_id: "ad-facio-1".into(),
            verb_token: "adficit".into(),
            sentence: "... adficit ...".into(),
            author: "Caesar".into(),
            title: "De Bello Gallico".into(),
            century: "-1".into(),
            whg_url: whg_url.map(Into::into),
            language: "Latin".into(),
        }
    }

    #[test]
    fn missing_location_becomes_empty() {
        let mut builder = DatasetBuilder::new();
        builder.add_entry(entry(None));
        builder.add_entry(entry(Some("https://whgazetteer.org/places/1")));
        let dataset = builder.finish();
        assert_eq!(dataset.len(), 2);
        let urls = (dataset.records().iter())
            .map(|record| &*record.whg_url)
            .collect::<Vec<_>>();
        assert_eq!(urls, ["", "https://whgazetteer.org/places/1"]);
    }
}
