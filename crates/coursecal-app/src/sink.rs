//! Writes provider event bodies as JSON lines instead of POSTing them.

use std::io::Write;

use chrono_tz::Tz;
use coursecal_service::NormalizedEvent;
use coursecal_service::error::{ServiceError, ServiceResult};
use coursecal_service::provider::import::EventSink;
use coursecal_service::provider::{google_event_payload, graph_event_payload};

use crate::cli::Provider;

pub struct PayloadFileSink<W> {
    writer: W,
    provider: Provider,
    tz: Tz,
    written: usize,
}

impl<W: Write + Send> PayloadFileSink<W> {
    pub const fn new(writer: W, provider: Provider, tz: Tz) -> Self {
        Self {
            writer,
            provider,
            tz,
            written: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, event: &NormalizedEvent) -> ServiceResult<String> {
        let payload = match self.provider {
            Provider::Google => serde_json::to_string(&google_event_payload(event, self.tz)?)?,
            Provider::Outlook => serde_json::to_string(&graph_event_payload(event, self.tz)?)?,
        };
        writeln!(self.writer, "{payload}")
            .map_err(|err| ServiceError::UploadError(err.to_string()))?;
        self.written += 1;
        Ok(format!("line-{}", self.written))
    }
}

impl<W: Write + Send> EventSink for PayloadFileSink<W> {
    fn create_event(
        &mut self,
        event: &NormalizedEvent,
    ) -> impl Future<Output = ServiceResult<String>> + Send {
        std::future::ready(self.write_line(event))
    }
}
