//! The record enricher.

use crate::config::{IdentifierFields, IdentifierSelector};
use crate::destination::RecordDestination;
use crate::source::RecordSource;
use crate::stats::{EnrichStats, StatsSnapshot};
use futures::{Stream, StreamExt};
use sw_error::{classify_failure, ErrorCategory, Result};
use sw_traits::EnrichmentApi;
use sw_types::Record;
use tracing::{debug, info, warn};

/// What happened to a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Lookup succeeded and its fields were merged.
    Enriched,
    /// Lookup failed; the failure fields were merged.
    Failed(ErrorCategory),
    /// No identifier value; the record is unchanged.
    Skipped,
}

/// Enriches records one at a time through an [`EnrichmentApi`].
pub struct Enricher<A> {
    api: A,
    selector: IdentifierSelector,
    stats: EnrichStats,
}

impl<A: EnrichmentApi> Enricher<A> {
    pub fn new(api: A, selector: IdentifierSelector) -> Self {
        Self {
            api,
            selector,
            stats: EnrichStats::new(),
        }
    }

    /// Resolve `fields` and build an enricher.
    ///
    /// Fails with a configuration error, before any lookup, unless exactly
    /// one identifier field is configured.
    pub fn from_fields(api: A, fields: &IdentifierFields) -> Result<Self> {
        Ok(Self::new(api, fields.resolve()?))
    }

    pub fn stats(&self) -> &EnrichStats {
        &self.stats
    }

    /// Enrich `record` in place.
    ///
    /// Every key of the normalized output overwrites the record's key of the
    /// same name. Records without an identifier value are left untouched.
    pub async fn enrich_record(&self, record: &mut Record) -> RecordOutcome {
        self.stats.record_seen();

        let Some(identifier) = self.selector.select(record) else {
            debug!(field = %self.selector.field, "No identifier value, passing record through");
            self.stats.record_skipped();
            return RecordOutcome::Skipped;
        };

        let result = self.api.lookup(&identifier).await;
        let outcome = match &result {
            Ok(_) => {
                debug!(identifier = %identifier, "Lookup succeeded");
                self.stats.record_enriched();
                RecordOutcome::Enriched
            }
            Err(failure) => {
                let category = classify_failure(failure);
                warn!(
                    identifier = %identifier,
                    category = ?category,
                    error = %failure,
                    "Lookup failed"
                );
                self.stats.record_failed(category);
                RecordOutcome::Failed(category)
            }
        };

        let output = sw_normalize::normalize(identifier.kind(), &result, identifier.value());
        record.extend(output);
        outcome
    }

    /// Enrich an owned record and hand it back.
    pub async fn enrich(&self, mut record: Record) -> Record {
        self.enrich_record(&mut record).await;
        record
    }

    /// Enrich a stream of records lazily.
    ///
    /// Each record is looked up only when the output stream is polled for
    /// it, one at a time and in order. Dropping the output stream stops
    /// processing after the record in flight.
    pub fn enrich_stream<'a, S>(&'a self, records: S) -> impl Stream<Item = Record> + 'a
    where
        S: Stream<Item = Record> + 'a,
    {
        records.then(move |record| self.enrich(record))
    }

    /// Drain `source` into `destination`, returning the run statistics.
    ///
    /// Every record the source yields is written. Input the source itself
    /// discards (such as NDJSON lines that are not objects) never reaches
    /// the destination, so the output can be shorter than the raw input.
    pub async fn run<S, D>(&self, source: &mut S, destination: &mut D) -> Result<StatsSnapshot>
    where
        S: RecordSource + ?Sized,
        D: RecordDestination + ?Sized,
    {
        info!(
            kind = %self.selector.kind,
            field = %self.selector.field,
            "Starting enrichment"
        );

        while let Some(record) = source.next_record().await? {
            let record = self.enrich(record).await;
            destination.write(&record).await?;
        }
        destination.flush().await?;

        let snapshot = self.stats.snapshot();
        info!(
            seen = snapshot.records_seen,
            enriched = snapshot.records_enriched,
            failed = snapshot.records_failed,
            skipped = snapshot.records_skipped,
            "Enrichment complete"
        );
        Ok(snapshot)
    }
}
