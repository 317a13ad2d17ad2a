//! Loading of the CSV preverb table, from disk or over HTTP

pub mod filter;

use crate::{
    config::{Config, DataSource, InputConfig},
    dataset::{builder::DatasetBuilder, Dataset},
    progress::{ProgressReport, Work},
    Result,
};
use anyhow::Context;
use async_compression::tokio::bufread::GzipDecoder;
use csv_async::AsyncReaderBuilder;
use futures::{future, StreamExt, TryStreamExt};
use reqwest::Response;
use serde::Deserialize;
use std::{
    io::{self, ErrorKind},
    sync::Arc,
};
use tokio::io::{AsyncBufRead, AsyncRead};
use tokio_util::io::{ReaderStream, StreamReader};

/// Row of the input CSV file
///
/// Columns are matched by header name. Columns that are not listed here are
/// ignored.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq)]
pub struct Entry {
    pub preverb: Box<str>,
    pub lemma: Box<str>,
    pub verb_semantics: Box<str>,
    pub meaning_id: Box<str>,
    pub verb_token: Box<str>,
    pub sentence: Box<str>,
    pub author: Box<str>,
    pub title: Box<str>,
    pub century: Box<str>,

    /// Location link, which is left blank for some rows
    #[serde(default)]
    pub whg_url: Option<Box<str>>,

    /// Language of the source text, used to filter rows
    pub language: Box<str>,
}

/// Load the dataset from the configured source
pub async fn load(config: &Config, report: &ProgressReport) -> Result<Arc<Dataset>> {
    let gzipped = config.source.is_gzipped();
    let context = || format!("loading the dataset from {}", config.source);
    match &config.source {
        DataSource::Path(path) => {
            let file = tokio::fs::File::open(path).await.with_context(context)?;
            let len = file.metadata().await.with_context(context)?.len();
            let bytes = report.add("Reading dataset", Work::Bytes(len));

            // Track how many bytes have been read so far
            let tracker = bytes.clone();
            let reader = StreamReader::new(
                ReaderStream::new(file)
                    .inspect_ok(move |block| tracker.make_progress(block.len() as u64)),
            );

            let dataset = decode(reader, gzipped, &config.input).await;
            bytes.finish();
            dataset.with_context(context)
        }
        DataSource::Url(url) => {
            // Start the download
            let response = reqwest::Client::new()
                .get(&**url)
                .send()
                .await
                .and_then(Response::error_for_status)
                .with_context(context)?;
            let work = response
                .content_length()
                .map_or(Work::UnknownBytes, Work::Bytes);
            let bytes = report.add("Downloading dataset", work);

            // Slice the download into chunks of bytes
            let tracker = bytes.clone();
            let stream = response
                .bytes_stream()
                .inspect_ok(move |block| tracker.make_progress(block.len() as u64))
                // Translate reqwest errors into I/O errors
                .map_err(|e| io::Error::new(ErrorKind::Other, e));
            let reader = StreamReader::new(Box::pin(stream));

            let dataset = decode(reader, gzipped, &config.input).await;
            log::debug!("Downloaded {} bytes from {url}", bytes.position());
            bytes.finish();
            dataset.with_context(context)
        }
    }
}

/// Apply the gzip decoder if needed, then decode the CSV rows
async fn decode(
    bytes: impl AsyncBufRead + Unpin + Send,
    gzipped: bool,
    config: &InputConfig,
) -> Result<Arc<Dataset>> {
    if gzipped {
        collect(GzipDecoder::new(bytes), config).await
    } else {
        collect(bytes, config).await
    }
}

/// Decode CSV rows, filter them and accumulate them into a dataset
pub async fn collect(
    csv_bytes: impl AsyncRead + Unpin + Send,
    config: &InputConfig,
) -> Result<Arc<Dataset>> {
    let entries = AsyncReaderBuilder::new()
        .has_headers(true)
        .create_deserializer(csv_bytes)
        .into_deserialize::<Entry>();

    // Filter out rows that don't belong to the dataset early on
    let mut early_filter = filter::make_early_filter(config);
    let entries = entries.try_filter(move |entry| future::ready(early_filter(entry)));
    futures::pin_mut!(entries);

    // Accumulate the remaining rows
    let mut dataset = DatasetBuilder::new();
    while let Some(entry) = entries.next().await {
        dataset.add_entry(entry.context("decoding the CSV table")?);
    }
    Ok(dataset.finish())
}
