use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, Utc};
use spdlog::sink::{RotatingFileSink, RotationPolicy};
use spdlog::{error, info, trace, Logger};
use tokio::sync::mpsc;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

use crate::metrics::aggregator::{Event, MetricAggregator, ViewSlot};

pub mod aggregator;

/// Which page was hit. Slots are keyed on this, so per-post counts stay
/// separate while the listing page aggregates into one line.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Index,
    Post(String),
    Rss,
    Admin,
}

impl PageView {
    pub(crate) fn page_key(&self) -> String {
        match self {
            PageView::Index => "index".to_string(),
            PageView::Post(identifier) => format!("post:{}", identifier),
            PageView::Rss => "rss".to_string(),
            PageView::Admin => "admin".to_string(),
        }
    }
}

pub struct MetricEvent {
    pub view: PageView,
    pub origin: String,
}

/// Handle the request handlers talk to. Sending never blocks the response
/// path for long, the write side lives on its own task.
#[derive(Clone)]
pub struct MetricSender {
    sender_ch: Option<Sender<MetricEvent>>,
}

impl MetricSender {
    pub fn new(sender_ch: Sender<MetricEvent>) -> Self {
        Self {
            sender_ch: Some(sender_ch),
        }
    }

    pub fn no_op() -> Self {
        Self { sender_ch: None }
    }

    pub async fn record(&self, view: PageView, origin: String) {
        if let Some(ref sender) = self.sender_ch {
            if let Err(e) = sender.send(MetricEvent { view, origin }).await {
                error!("Error queueing page metric: {}", e);
            }
        }
    }
}

/// Owns the receiver task that drains the channel into the aggregator.
/// The periodic timeout makes sure finished slots reach the metrics file
/// even on a quiet site.
pub struct MetricHandler {
    _receiver_task: JoinHandle<()>,
    sender: Sender<MetricEvent>,
}

impl MetricHandler {
    pub fn new(mut writer: MetricWriter) -> Self {
        let (tx, mut rx) = mpsc::channel::<MetricEvent>(64);

        let receiver_task = tokio::spawn(async move {
            info!("Starting metrics receiver");
            loop {
                match tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv()).await {
                    Ok(Some(event)) => {
                        if let Err(e) = writer.add_event(event) {
                            error!("Error writing page metric: {}", e);
                        }
                    }
                    Ok(None) => break,
                    Err(_timeout) => {
                        if let Err(e) = writer.flush() {
                            error!("Error flushing page metrics: {}", e);
                        }
                        trace!("Timeout - flushing metrics");
                    }
                }
            }
        });

        Self {
            _receiver_task: receiver_task,
            sender: tx,
        }
    }

    pub fn new_sender(&self) -> MetricSender {
        MetricSender::new(self.sender.clone())
    }

    pub fn no_op() -> MetricSender {
        MetricSender::no_op()
    }
}

pub struct MetricWriter {
    aggregator: MetricAggregator,
    publisher: MetricPublisher,
}

impl MetricWriter {
    pub fn new(base_path: &PathBuf, time_slot: Duration) -> spdlog::Result<Self> {
        Ok(Self {
            aggregator: MetricAggregator::new(time_slot),
            publisher: MetricPublisher::new(base_path)?,
        })
    }

    pub fn add_event(&mut self, metric_event: MetricEvent) -> io::Result<()> {
        self.aggregator.add_event(Event {
            view: metric_event.view,
            origin: metric_event.origin,
            date_time: Utc::now(),
        });
        self.publish_ready()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.aggregator.flush();
        self.publish_ready()
    }

    fn publish_ready(&mut self) -> io::Result<()> {
        if let Some(history) = self.aggregator.take_events() {
            self.publisher.store_events(&history)?;
        }
        Ok(())
    }
}

/// Writes finished slots as JSON lines into a daily-rotated file.
pub struct MetricPublisher {
    logger: Arc<Logger>,
}

impl MetricPublisher {
    pub fn new(base_path: &PathBuf) -> spdlog::Result<Self> {
        let daily: Arc<RotatingFileSink> = Arc::new(
            RotatingFileSink::builder()
                .base_path(base_path)
                .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
                .rotate_on_open(false)
                .build()?,
        );

        let logger = Arc::new(Logger::builder().sink(daily).build()?);
        Ok(Self { logger })
    }

    pub fn store_events(&self, history: &[ViewSlot]) -> io::Result<()> {
        for view_slot in history {
            let json = serde_json::to_string(view_slot)?;
            info!(logger: self.logger, "{}", &json);
        }
        self.logger.flush();

        Ok(())
    }
}
