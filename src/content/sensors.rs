use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use crate::identity::Session;

use super::{display_timestamp, HistoryEntry, RenderHook, SharedHistory, ViewContent};

/// Sensor 1: train approach. Active when the train is within 100 cm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproachReading {
    pub distance_cm: u32,
}

impl ApproachReading {
    pub fn is_active(&self) -> bool { self.distance_cm < 100 }
    pub fn status(&self) -> &'static str { if self.is_active() { "Active" } else { "Inactive" } }
    pub fn badge_class(&self) -> &'static str { if self.is_active() { "badge-active" } else { "badge-inactive" } }
}

/// Sensor 2: track obstruction. Range is 0 when the track is clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstructionReading {
    pub detected: bool,
    pub range_cm: u32,
}

impl ObstructionReading {
    pub fn status(&self) -> &'static str { if self.detected { "Detected" } else { "Clear" } }
    pub fn badge_class(&self) -> &'static str { if self.detected { "badge-obstructed" } else { "badge-clear" } }
}

/// Sensor 3: train departure. Clear once the train is beyond 750 cm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartureReading {
    pub distance_cm: u32,
}

impl DepartureReading {
    pub fn is_clear(&self) -> bool { self.distance_cm > 750 }
    pub fn status(&self) -> &'static str { if self.is_clear() { "Clear" } else { "Not Clear" } }
    pub fn badge_class(&self) -> &'static str { if self.is_clear() { "badge-clear" } else { "badge-not-clear" } }
}

/// One refresh of all three crossing sensors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorSnapshot {
    pub approach: ApproachReading,
    pub obstruction: ObstructionReading,
    pub departure: DepartureReading,
    pub updated_at: String,
}

impl SensorSnapshot {
    /// The four log lines a logged refresh adds, in display order.
    pub fn history_batch(&self) -> Vec<HistoryEntry> {
        let time = self.updated_at.clone();
        let a = &self.approach;
        let o = &self.obstruction;
        let d = &self.departure;
        vec![
            HistoryEntry {
                time: time.clone(),
                sensor: "System".into(),
                event: "Sensor data refreshed".into(),
                status: "Active".into(),
                notes: "Automated data cycle.".into(),
            },
            HistoryEntry {
                time: time.clone(),
                sensor: "Sensor 1".into(),
                event: format!("Train Approach: {} cm", a.distance_cm),
                status: a.status().into(),
                notes: if a.is_active() { "Alert: Train approaching crossing!" } else { "Nominal" }.into(),
            },
            HistoryEntry {
                time: time.clone(),
                sensor: "Sensor 2".into(),
                event: format!("Track Obstruction: {}", o.status()),
                status: o.status().into(),
                notes: if o.detected { "CRITICAL: Obstruction detected!" } else { "Track clear" }.into(),
            },
            HistoryEntry {
                time,
                sensor: "Sensor 3".into(),
                event: format!("Train Departure: {}", d.status()),
                status: d.status().into(),
                notes: if d.is_clear() { "Train has cleared area" } else { "Train is still near crossing" }.into(),
            },
        ]
    }
}

/// Random reading generator.
pub struct SensorSimulator {
    rng: StdRng,
}

impl SensorSimulator {
    pub fn new(rng: StdRng) -> Self { Self { rng } }

    pub fn sample(&mut self, updated_at: String) -> SensorSnapshot {
        let approach = ApproachReading { distance_cm: self.rng.gen_range(10..510) };
        let detected = self.rng.gen_bool(0.2);
        let range_cm = if detected { self.rng.gen_range(10..60) } else { 0 };
        let departure = DepartureReading { distance_cm: self.rng.gen_range(700..800) };
        SensorSnapshot { approach, obstruction: ObstructionReading { detected, range_cm }, departure, updated_at }
    }
}

/// Latest readings plus the log they feed.
pub struct SensorBoard {
    sim: SensorSimulator,
    latest: Option<SensorSnapshot>,
    log: SharedHistory,
}

pub type SharedSensors = Arc<Mutex<SensorBoard>>;

impl SensorBoard {
    pub fn new(sim: SensorSimulator, log: SharedHistory) -> Self {
        Self { sim, latest: None, log }
    }

    pub fn shared(sim: SensorSimulator, log: SharedHistory) -> SharedSensors {
        Arc::new(Mutex::new(Self::new(sim, log)))
    }

    /// Take new readings; with `log_event` also prepend them to the history log.
    pub fn refresh(&mut self, log_event: bool) -> SensorSnapshot {
        let snap = self.sim.sample(display_timestamp());
        if log_event {
            self.log.lock().push_batch(snap.history_batch());
        }
        debug!(
            target: "rsms::sensors",
            "refresh logged={} approach={}cm obstruction={} departure={}cm",
            log_event, snap.approach.distance_cm, snap.obstruction.status(), snap.departure.distance_cm
        );
        self.latest = Some(snap.clone());
        snap
    }

    pub fn latest(&self) -> Option<&SensorSnapshot> { self.latest.as_ref() }

    pub fn history(&self) -> SharedHistory { self.log.clone() }
}

/// Refreshes (without logging) every time the sensors view is shown.
pub struct SensorsHook {
    board: SharedSensors,
}

impl SensorsHook {
    pub fn new(board: SharedSensors) -> Self { Self { board } }
}

impl RenderHook for SensorsHook {
    fn render(&mut self, _session: Option<&Session>) -> ViewContent {
        ViewContent::Sensors(self.board.lock().refresh(false))
    }
}
