//! Sequential upload driver with progress events.

use std::future::Future;

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::ServiceResult;
use crate::schedule::NormalizedEvent;

/// Destination that creates one remote event per call.
pub trait EventSink {
    /// Creates the event remotely and returns its remote id.
    fn create_event(
        &mut self,
        event: &NormalizedEvent,
    ) -> impl Future<Output = ServiceResult<String>> + Send;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportFailure {
    pub event: NormalizedEvent,
    pub error: String,
}

/// Outcome of a whole batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// No event failed.
    pub success: bool,
    pub created_count: usize,
    pub errors: Vec<ImportFailure>,
}

/// Published after every attempted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportProgress {
    /// Share of events attempted so far, 0 to 100, rounded half up.
    pub percent: u8,
    pub created_count: usize,
}

fn percent_done(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let rounded = (done * 200 + total) / (2 * total);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

/// ## Summary
/// Sends each event to `sink` in order, collecting failures instead of
/// stopping at the first one.
///
/// Progress goes to `progress` when given; a closed receiver is ignored.
pub async fn import_events<S: EventSink + Send>(
    sink: &mut S,
    events: &[NormalizedEvent],
    progress: Option<&UnboundedSender<ImportProgress>>,
) -> ImportReport {
    let total = events.len();
    let mut created_count = 0;
    let mut errors = Vec::new();

    for (idx, event) in events.iter().enumerate() {
        match sink.create_event(event).await {
            Ok(remote_id) => {
                created_count += 1;
                tracing::debug!(summary = %event.summary(), %remote_id, "Created remote event");
            }
            Err(err) => {
                tracing::warn!(summary = %event.summary(), error = %err, "Remote event creation failed");
                errors.push(ImportFailure {
                    event: event.clone(),
                    error: err.to_string(),
                });
            }
        }

        if let Some(tx) = progress {
            let update = ImportProgress {
                percent: percent_done(idx + 1, total),
                created_count,
            };
            if tx.send(update).is_err() {
                tracing::trace!("Progress receiver dropped");
            }
        }
    }

    tracing::info!(total, created_count, failed = errors.len(), "Import finished");

    ImportReport {
        success: errors.is_empty(),
        created_count,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use tokio::sync::mpsc;

    /// Fails every event whose course name is listed.
    #[derive(Default)]
    struct RecordingSink {
        reject: Vec<String>,
        created: Vec<String>,
    }

    impl EventSink for RecordingSink {
        fn create_event(
            &mut self,
            event: &NormalizedEvent,
        ) -> impl Future<Output = ServiceResult<String>> + Send {
            let result = if self.reject.contains(&event.course_name) {
                Err(ServiceError::UploadError("HTTP 400".into()))
            } else {
                self.created.push(event.course_name.clone());
                Ok(format!("remote-{}", self.created.len()))
            };
            std::future::ready(result)
        }
    }

    fn named(name: &str) -> NormalizedEvent {
        NormalizedEvent {
            course_name: name.into(),
            ..NormalizedEvent::default()
        }
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent_done(1, 3), 33);
        assert_eq!(percent_done(2, 3), 67);
        assert_eq!(percent_done(1, 8), 13);
        assert_eq!(percent_done(3, 3), 100);
    }

    #[test_log::test(tokio::test)]
    async fn empty_batch_succeeds() {
        let mut sink = RecordingSink::default();
        let report = import_events(&mut sink, &[], None).await;
        assert!(report.success);
        assert_eq!(report.created_count, 0);
        assert!(report.errors.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn failures_are_collected_and_progress_reported() {
        let mut sink = RecordingSink {
            reject: vec!["B".into()],
            ..RecordingSink::default()
        };
        let events = vec![named("A"), named("B"), named("C")];
        let (tx, mut rx) = mpsc::unbounded_channel();

        let report = import_events(&mut sink, &events, Some(&tx)).await;
        drop(tx);

        assert!(!report.success);
        assert_eq!(report.created_count, 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].event.course_name, "B");
        assert_eq!(report.errors[0].error, "Upload failed: HTTP 400");
        assert_eq!(sink.created, vec!["A", "C"]);

        let mut updates = Vec::new();
        while let Some(update) = rx.recv().await {
            updates.push((update.percent, update.created_count));
        }
        assert_eq!(updates, vec![(33, 1), (67, 1), (100, 2)]);
    }

    #[test_log::test(tokio::test)]
    async fn closed_progress_receiver_is_ignored() {
        let mut sink = RecordingSink::default();
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let report = import_events(&mut sink, &[named("A")], Some(&tx)).await;
        assert!(report.success);
        assert_eq!(report.created_count, 1);
    }
}
