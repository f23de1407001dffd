//! CSV enrichment driver
//!
//! Reads the whole input table, resolves the identifier column row by row
//! and writes the augmented table. With `concurrency > 1` several rows are
//! resolved at once, but rows are still written in input order.
//!
//! Cells are handled as raw bytes and copied unchanged, whatever their
//! encoding. Only the identifier cell has to be UTF-8; a row whose
//! identifier is not is written without a call number.

use crate::error::ClassifyResult;
use crate::services::classify_client::ClassifyTransport;
use crate::services::resolver::Resolver;
use crate::tabular::column::select_column;
use crate::tabular::{DEFAULT_COLUMN_POSITION, OUTPUT_COLUMN_LABEL};
use crate::types::KeyType;
use csv::{ByteRecord, ReaderBuilder, WriterBuilder};
use futures::stream::{self, StreamExt};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

const PROGRESS_INTERVAL: usize = 100;

/// How to read the table and query the service
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Header name of the identifier column (overrides `column_position`)
    pub column_name: Option<String>,
    /// Zero-based identifier column
    pub column_position: usize,
    /// Key type the identifiers are sent as
    pub key_type: KeyType,
    /// Field delimiter for input and output
    pub delimiter: u8,
    /// Rows resolved at once (values below 1 behave as 1)
    pub concurrency: usize,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            column_name: None,
            column_position: DEFAULT_COLUMN_POSITION,
            key_type: KeyType::Issn,
            delimiter: b',',
            concurrency: 1,
        }
    }
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentSummary {
    /// Identifier column actually used
    pub column: usize,
    /// Data rows written (header excluded)
    pub rows: usize,
    /// Data rows with a non-blank identifier
    pub queried: usize,
    /// Data rows that received a call number
    pub resolved: usize,
}

/// Enrich `input` into `output`
///
/// The input is read completely before the output file is created.
pub async fn enrich_file<T: ClassifyTransport>(
    resolver: &Resolver<T>,
    input: &Path,
    output: &Path,
    options: &EnrichOptions,
) -> ClassifyResult<EnrichmentSummary> {
    let records = read_records(File::open(input)?, options.delimiter)?;
    info!(input = %input.display(), rows = records.len(), "Input table loaded");

    let writer = File::create(output)?;
    let summary = enrich_records(resolver, records, writer, options).await?;
    info!(output = %output.display(), "Output table written");

    Ok(summary)
}

/// Enrich a table read from `reader` into `writer`
pub async fn enrich<T, R, W>(
    resolver: &Resolver<T>,
    reader: R,
    writer: W,
    options: &EnrichOptions,
) -> ClassifyResult<EnrichmentSummary>
where
    T: ClassifyTransport,
    R: Read,
    W: Write,
{
    let records = read_records(reader, options.delimiter)?;
    enrich_records(resolver, records, writer, options).await
}

fn read_records<R: Read>(reader: R, delimiter: u8) -> ClassifyResult<Vec<ByteRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let records = reader.byte_records().collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

async fn enrich_records<T, W>(
    resolver: &Resolver<T>,
    records: Vec<ByteRecord>,
    writer: W,
    options: &EnrichOptions,
) -> ClassifyResult<EnrichmentSummary>
where
    T: ClassifyTransport,
    W: Write,
{
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .delimiter(options.delimiter)
        .from_writer(writer);

    let mut records = records.into_iter();
    let Some(header) = records.next() else {
        writer.flush()?;
        return Ok(EnrichmentSummary::default());
    };

    let column = select_column(
        &header,
        options.column_name.as_deref(),
        options.column_position,
    );
    info!(column, key_type = %options.key_type, "Using identifier column {}", column);

    let mut header_out = header.clone();
    header_out.push_field(OUTPUT_COLUMN_LABEL.as_bytes());
    writer.write_byte_record(&header_out)?;

    let mut summary = EnrichmentSummary {
        column,
        ..Default::default()
    };

    let key_type = &options.key_type;
    let mut resolved_rows = stream::iter(records.enumerate())
        .map(move |(index, record)| async move {
            let identifier = identifier_cell(&record, column, index + 1);

            let value = match &identifier {
                Some(identifier) => resolver.resolve(key_type, identifier).await,
                None => None,
            };

            (record, identifier.is_some(), value)
        })
        .buffered(options.concurrency.max(1));

    while let Some((mut record, queried, value)) = resolved_rows.next().await {
        summary.rows += 1;
        if queried {
            summary.queried += 1;
        }
        if value.is_some() {
            summary.resolved += 1;
        } else if queried {
            debug!(row = summary.rows, "No call number for row");
        }

        record.push_field(value.as_deref().unwrap_or("").as_bytes());
        writer.write_byte_record(&record)?;

        if summary.rows % PROGRESS_INTERVAL == 0 {
            info!(
                rows = summary.rows,
                resolved = summary.resolved,
                "Enrichment progress"
            );
        }
    }

    writer.flush()?;

    info!(
        rows = summary.rows,
        queried = summary.queried,
        resolved = summary.resolved,
        "Enrichment complete"
    );

    Ok(summary)
}

/// Trimmed identifier of a data row, if present and valid UTF-8
fn identifier_cell(record: &ByteRecord, column: usize, row: usize) -> Option<String> {
    let cell = record.get(column)?;
    match std::str::from_utf8(cell) {
        Ok(value) => Some(value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string),
        Err(_) => {
            warn!(
                row,
                column,
                cell = %String::from_utf8_lossy(cell),
                "Identifier cell is not valid UTF-8, row left unresolved"
            );
            None
        }
    }
}
