// Test doubles for the remote service and the rendering engine
use crate::application::chart_controller::{ChartHandle, ChartRenderer, RenderError};
use crate::application::sensor_client::{RemoteError, RemoteResult, RemoteSensorClient};
use crate::domain::chart::ChartSpec;
use crate::domain::quantity::Quantity;
use crate::domain::reading::{ReadingSeries, SensorReading};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Reading taken on 2024-01-15 at `hour`:00 UTC
pub fn reading(temperature: f64, hour: u32) -> SensorReading {
    SensorReading {
        sensor_id: 1,
        temperature,
        humidity: 40.0,
        vibration: 2.0,
        voltage: 110.0,
        timestamp: Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap(),
    }
}

/// In-memory ingestion service with call counters and failure injection.
#[derive(Default)]
pub struct MockSensorClient {
    store: Mutex<Vec<SensorReading>>,
    failing: AtomicBool,
    fetch_failing: AtomicBool,
    fetch_calls: AtomicUsize,
    append_calls: AtomicUsize,
    clear_calls: AtomicUsize,
}

impl MockSensorClient {
    pub fn with_readings(readings: Vec<SensorReading>) -> Self {
        Self {
            store: Mutex::new(readings),
            ..Default::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Fail only `fetch_all`; writes still succeed
    pub fn set_fetch_failing(&self, failing: bool) {
        self.fetch_failing.store(failing, Ordering::SeqCst);
    }

    pub fn stored(&self) -> Vec<SensorReading> {
        self.store.lock().unwrap().clone()
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn append_calls(&self) -> usize {
        self.append_calls.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> RemoteResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RemoteError::Unavailable("mock service offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RemoteSensorClient for MockSensorClient {
    async fn fetch_all(&self) -> RemoteResult<ReadingSeries> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if self.fetch_failing.load(Ordering::SeqCst) {
            return Err(RemoteError::Rejected {
                status: 500,
                message: "mock fetch failure".to_string(),
            });
        }
        Ok(ReadingSeries::new(self.stored()))
    }

    async fn append(&self, reading: &SensorReading) -> RemoteResult<()> {
        self.append_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.store.lock().unwrap().push(reading.clone());
        Ok(())
    }

    async fn clear_all(&self) -> RemoteResult<()> {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.store.lock().unwrap().clear();
        Ok(())
    }
}

#[derive(Default)]
struct RenderLog {
    next_id: u64,
    live: BTreeMap<u64, ChartSpec>,
    released: BTreeSet<u64>,
    rendered: usize,
    peak_live: usize,
}

/// Renderer that records every chart it creates and releases.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    log: Arc<Mutex<RenderLog>>,
    missing: BTreeSet<Quantity>,
}

impl RecordingRenderer {
    pub fn without_targets(missing: &[Quantity]) -> Self {
        Self {
            missing: missing.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn live_count(&self) -> usize {
        self.log.lock().unwrap().live.len()
    }

    pub fn live_ids(&self) -> Vec<u64> {
        self.log.lock().unwrap().live.keys().copied().collect()
    }

    pub fn live_spec(&self, quantity: Quantity) -> Option<ChartSpec> {
        self.log
            .lock()
            .unwrap()
            .live
            .values()
            .find(|spec| spec.quantity == quantity)
            .cloned()
    }

    pub fn rendered_count(&self) -> usize {
        self.log.lock().unwrap().rendered
    }

    pub fn peak_live(&self) -> usize {
        self.log.lock().unwrap().peak_live
    }

    pub fn is_released(&self, id: u64) -> bool {
        self.log.lock().unwrap().released.contains(&id)
    }
}

impl ChartRenderer for RecordingRenderer {
    fn render(&mut self, spec: ChartSpec) -> Result<Box<dyn ChartHandle>, RenderError> {
        if self.missing.contains(&spec.quantity) {
            return Err(RenderError::TargetMissing(spec.quantity));
        }

        let mut log = self.log.lock().unwrap();
        let id = log.next_id;
        log.next_id += 1;
        log.rendered += 1;
        log.live.insert(id, spec);
        log.peak_live = log.peak_live.max(log.live.len());

        Ok(Box::new(RecordingHandle {
            id,
            log: self.log.clone(),
        }))
    }
}

struct RecordingHandle {
    id: u64,
    log: Arc<Mutex<RenderLog>>,
}

impl ChartHandle for RecordingHandle {
    fn release(self: Box<Self>) {
        let mut log = self.log.lock().unwrap();
        assert!(log.live.remove(&self.id).is_some(), "handle {} released twice", self.id);
        log.released.insert(self.id);
    }
}
