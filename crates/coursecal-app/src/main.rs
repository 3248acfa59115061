mod cli;
mod sink;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use coursecal_core::config::load_config;
use coursecal_service::calendar::expand_occurrences;
use coursecal_service::provider::import::{ImportProgress, import_events};
use coursecal_service::schedule::adapt_events;
use coursecal_service::{NormalizedEvent, SchedulePipeline};
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use crate::cli::{Cli, Provider};
use crate::sink::PayloadFileSink;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .init();

    let config = load_config(cli.config.as_deref())?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let pipeline = SchedulePipeline::from_settings(&config.calendar);

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", cli.input.display()))?;

    let events: Vec<NormalizedEvent> = if cli.events {
        adapt_events(&raw)?
    } else {
        pipeline.normalize(&raw, &cli.terms)?
    };
    tracing::info!(event_count = events.len(), "Loaded events");

    if let Some(limit) = cli.preview {
        return preview(&pipeline, &events, limit);
    }

    if let Some(provider) = cli.payloads {
        let tz = config.calendar.tz()?;
        let buffer = write_payloads(provider, tz, &config.calendar.name, &events).await;
        return write_output(cli.output.as_deref(), &buffer);
    }

    let output = if cli.json {
        serde_json::to_string_pretty(&events)?
    } else {
        pipeline.events_to_calendar_text(&events)
    };
    write_output(cli.output.as_deref(), output.as_bytes())
}

fn preview(pipeline: &SchedulePipeline, events: &[NormalizedEvent], limit: u16) -> anyhow::Result<()> {
    for resolved in pipeline.resolve(events) {
        let exdates = pipeline.exclusions(&resolved);
        let occurrences = expand_occurrences(&resolved, &exdates, limit)?;
        tracing::info!(
            summary = %resolved.event.summary(),
            until = %resolved.window.until,
            excluded = exdates.len(),
            occurrences = ?occurrences,
            "Preview"
        );
    }
    Ok(())
}

async fn write_payloads(
    provider: Provider,
    tz: chrono_tz::Tz,
    calendar: &str,
    events: &[NormalizedEvent],
) -> Vec<u8> {
    let (tx, mut rx) = mpsc::unbounded_channel::<ImportProgress>();
    let progress_log = tokio::spawn(async move {
        while let Some(update) = rx.recv().await {
            tracing::debug!(percent = update.percent, created = update.created_count, "Payload progress");
        }
    });

    let mut sink = PayloadFileSink::new(Vec::new(), provider, tz);
    let report = import_events(&mut sink, events, Some(&tx)).await;
    drop(tx);
    if let Err(e) = progress_log.await {
        tracing::warn!(error = %e, "Progress logger stopped");
    }

    for failure in &report.errors {
        tracing::warn!(summary = %failure.event.summary(), error = %failure.error, "Event not written");
    }
    tracing::info!(
        provider = ?provider,
        %calendar,
        created = report.created_count,
        success = report.success,
        "Payloads written"
    );
    sink.into_inner()
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "Output written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
