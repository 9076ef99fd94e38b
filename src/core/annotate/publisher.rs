//! Filter-and-publish stage for annotation records.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::annotate::filter::FilterConfig;
use crate::core::annotate::record::AnnotationRecord;
use crate::core::annotate::sink::TopicSink;
use crate::core::error::{Result, VidsplitError};
use crate::core::types::PublishReport;

/// Publishes records that pass the filter to one topic
#[derive(Clone)]
pub struct AnnotationPublisher {
    filter: Arc<FilterConfig>,
    topic_id: String,
    sink: Arc<dyn TopicSink>,
}

impl AnnotationPublisher {
    pub fn new(
        filter: Arc<FilterConfig>,
        topic_id: impl Into<String>,
        sink: Arc<dyn TopicSink>,
    ) -> Result<Self> {
        let topic_id = topic_id.into();
        if topic_id.trim().is_empty() {
            return Err(VidsplitError::ConfigError(
                "Topic id must not be empty".to_string(),
            ));
        }

        Ok(Self {
            filter,
            topic_id,
            sink,
        })
    }

    pub fn topic_id(&self) -> &str {
        &self.topic_id
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    /// Filter one record and publish it if it passes.
    ///
    /// Returns whether the record was published.
    pub async fn publish_record(&self, record: &AnnotationRecord) -> Result<bool> {
        if !self.filter.matches(record) {
            tracing::debug!(
                entity = %record.entity,
                confidence = record.confidence,
                "Record rejected"
            );
            return Ok(false);
        }

        let message = record.to_json()?;
        tracing::debug!("Json {}", message);
        self.sink.publish(&self.topic_id, message).await?;
        Ok(true)
    }

    /// Filter and publish a stream of records in arrival order.
    ///
    /// An invalid record aborts only itself: it is logged and
    /// counted, unless `fail_fast` is set, in which case the error
    /// is returned. Publish failures always stop the run.
    pub async fn publish_all<I>(&self, records: I, fail_fast: bool) -> Result<PublishReport>
    where
        I: IntoIterator<Item = Result<AnnotationRecord>>,
    {
        let mut report = PublishReport::default();
        for record in records {
            self.count_record(&mut report, record, fail_fast).await?;
        }
        self.log_report(&report);
        Ok(report)
    }

    /// Like [`publish_all`](Self::publish_all), for records produced
    /// by another task. Runs until every sender is dropped.
    pub async fn publish_stream(
        &self,
        mut records: mpsc::Receiver<Result<AnnotationRecord>>,
        fail_fast: bool,
    ) -> Result<PublishReport> {
        let mut report = PublishReport::default();
        while let Some(record) = records.recv().await {
            self.count_record(&mut report, record, fail_fast).await?;
        }
        self.log_report(&report);
        Ok(report)
    }

    async fn count_record(
        &self,
        report: &mut PublishReport,
        record: Result<AnnotationRecord>,
        fail_fast: bool,
    ) -> Result<()> {
        report.seen += 1;

        let record = match record {
            Ok(record) => record,
            Err(e) if fail_fast => return Err(e),
            Err(e) => {
                tracing::warn!("Skipping invalid record: {}", e);
                report.invalid += 1;
                return Ok(());
            }
        };

        if self.publish_record(&record).await? {
            report.published += 1;
        } else {
            report.rejected += 1;
        }
        Ok(())
    }

    fn log_report(&self, report: &PublishReport) {
        tracing::info!(
            "Published {} of {} records to {} ({} rejected, {} invalid)",
            report.published,
            report.seen,
            self.topic_id,
            report.rejected,
            report.invalid
        );
    }
}
