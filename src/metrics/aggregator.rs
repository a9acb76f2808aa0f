use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use spdlog::debug;

use crate::metrics::PageView;

pub struct Event {
    pub view: PageView,
    pub origin: String,
    pub date_time: DateTime<Utc>,
}

/// Visits for one page within one time slot. `total` counts every hit,
/// `unique_total` counts distinct origins.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct ViewSlot {
    pub page: String,
    pub unique_total: u64,
    pub total: u64,
    pub origins: HashSet<String>,
    pub slot_start: DateTime<Utc>,
    pub slot_end: DateTime<Utc>,
}

impl ViewSlot {
    fn from_event(page: String, event: Event, slot_size: &Duration) -> Self {
        let (slot_start, slot_end) = slot_bounds(&event.date_time, slot_size);
        let mut origins = HashSet::<String>::new();
        origins.insert(event.origin);

        ViewSlot {
            page,
            unique_total: 1,
            total: 1,
            origins,
            slot_start,
            slot_end,
        }
    }
}

pub struct MetricAggregator {
    slot_size: Duration,
    slots: HashMap<String, ViewSlot>,
    history: Vec<ViewSlot>,
}

impl MetricAggregator {
    pub fn new(slot_size: Duration) -> Self {
        Self {
            slot_size,
            slots: Default::default(),
            history: vec![],
        }
    }

    pub fn add_event(&mut self, event: Event) {
        let page = event.view.page_key();

        if let Some(view_slot) = self.slots.get_mut(&page) {
            if event.date_time < view_slot.slot_end {
                let inserted = view_slot.origins.insert(event.origin);
                if inserted {
                    view_slot.unique_total += 1;
                }
                view_slot.total += 1;
                return;
            }

            // The slot window is over, archive everything and start fresh
            let values: Vec<ViewSlot> = self.slots.drain().map(|(_, v)| v).collect();
            self.history.extend(values);
        }

        let view_slot = ViewSlot::from_event(page.clone(), event, &self.slot_size);
        self.slots.insert(page, view_slot);
    }

    /// Archives open slots once any of them has passed its end time.
    pub fn flush(&mut self) {
        let date_time = Utc::now();
        let should_drain = self
            .slots
            .values()
            .any(|view_slot| date_time >= view_slot.slot_end);

        debug!("Flush called for {}. Should_drain={}", date_time, should_drain);
        if should_drain {
            let values: Vec<ViewSlot> = self.slots.drain().map(|(_, v)| v).collect();
            self.history.extend(values);
        }
    }

    pub fn take_events(&mut self) -> Option<Vec<ViewSlot>> {
        if self.history.is_empty() {
            return None;
        }

        Some(std::mem::take(&mut self.history))
    }
}

/// Floors the timestamp to the enclosing slot and returns its bounds.
fn slot_bounds(date_time: &DateTime<Utc>, slot_size: &Duration) -> (DateTime<Utc>, DateTime<Utc>) {
    let slot_size_secs = slot_size.num_seconds();
    let timestamp_seconds = date_time.timestamp();
    let start_timestamp = timestamp_seconds - (timestamp_seconds % slot_size_secs);
    let start = DateTime::<Utc>::from_timestamp(start_timestamp, 0).unwrap();

    let end = start + *slot_size;

    (start, end)
}
