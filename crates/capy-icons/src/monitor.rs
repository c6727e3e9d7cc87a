//! Time change detection.
//!
//! Linux has no broadcast for "date changed" or "time set", so the monitor
//! samples the clock on a fixed interval and compares consecutive samples.
//! Timezone changes are also picked up immediately by watching the zone file.

use crate::config::MonitorConfig;
use crate::error::Result;
use crate::events::TimeEvents;
use crate::types::TimeChangeEvent;
use chrono::{DateTime, Local, NaiveDate, Utc};
use log::{debug, info, warn};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// One reading of the wall and monotonic clocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockSample {
    pub wall: DateTime<Utc>,
    pub monotonic: Instant,
    pub date: NaiveDate,
    pub utc_offset_secs: i32,
}

impl ClockSample {
    pub fn now() -> Self {
        let local = Local::now();
        Self {
            wall: local.with_timezone(&Utc),
            monotonic: Instant::now(),
            date: local.date_naive(),
            utc_offset_secs: local.offset().local_minus_utc(),
        }
    }
}

/// Events implied by going from `prev` to `next`.
pub fn detect_changes(
    prev: &ClockSample,
    next: &ClockSample,
    tolerance: Duration,
) -> Vec<TimeChangeEvent> {
    let mut events = Vec::new();

    let monotonic_ms = next
        .monotonic
        .saturating_duration_since(prev.monotonic)
        .as_millis() as i64;
    let wall_ms = (next.wall - prev.wall).num_milliseconds();
    if (wall_ms - monotonic_ms).unsigned_abs() > tolerance.as_millis() as u64 {
        events.push(TimeChangeEvent::TimeSet);
    }

    if next.utc_offset_secs != prev.utc_offset_secs {
        events.push(TimeChangeEvent::TimezoneChanged);
    }

    if next.date != prev.date {
        events.push(TimeChangeEvent::DateChanged);
    }

    events
}

/// Publishes time change events onto a [`TimeEvents`] bus.
pub struct TimeChangeMonitor {
    events: TimeEvents,
    config: MonitorConfig,
}

/// Keeps the monitor alive. Dropping it stops the zone file watcher; call
/// [`MonitorHandle::stop`] to also end the polling thread.
pub struct MonitorHandle {
    running: Arc<AtomicBool>,
    poller: Option<JoinHandle<()>>,
    _watcher: Option<RecommendedWatcher>,
}

impl MonitorHandle {
    pub fn stop(mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(poller) = self.poller.take() {
            let _ = poller.join();
        }
    }
}

impl TimeChangeMonitor {
    pub fn new(events: TimeEvents, config: MonitorConfig) -> Self {
        Self { events, config }
    }

    pub fn start(self) -> Result<MonitorHandle> {
        info!(
            "Starting time change monitor (every {:?})...",
            self.config.poll_interval()
        );

        let watcher = if self.config.watch_timezone {
            match watch_zone_file(&self.config.timezone_path, self.events.clone()) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    warn!(
                        "Cannot watch {}: {}. Relying on polling.",
                        self.config.timezone_path.display(),
                        e
                    );
                    None
                }
            }
        } else {
            None
        };

        let running = Arc::new(AtomicBool::new(true));
        let poller = {
            let running = running.clone();
            let events = self.events;
            let interval = self.config.poll_interval();
            let tolerance = self.config.clock_jump_tolerance();
            thread::Builder::new()
                .name("capy-icons-clock".to_string())
                .spawn(move || poll_clock(events, interval, tolerance, running))?
        };

        Ok(MonitorHandle {
            running,
            poller: Some(poller),
            _watcher: watcher,
        })
    }
}

const STOP_CHECK: Duration = Duration::from_millis(250);

fn poll_clock(events: TimeEvents, interval: Duration, tolerance: Duration, running: Arc<AtomicBool>) {
    let mut prev = ClockSample::now();

    while running.load(Ordering::Acquire) {
        // Sleep in short slices so `stop` does not wait a full interval.
        let started = Instant::now();
        while started.elapsed() < interval && running.load(Ordering::Acquire) {
            thread::sleep(STOP_CHECK.min(interval));
        }

        let next = ClockSample::now();
        for event in detect_changes(&prev, &next, tolerance) {
            info!("Detected {:?}", event);
            events.send(event);
        }
        prev = next;
    }
}

fn watch_zone_file(path: &Path, events: TimeEvents) -> Result<RecommendedWatcher> {
    // Tools replace the zone file (unlink + symlink), so watch its directory.
    let target: PathBuf = path.to_path_buf();
    let dir = path.parent().unwrap_or(Path::new("/")).to_path_buf();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            if !event.kind.is_access() && event.paths.iter().any(|p| p == &target) {
                debug!("Zone file event: {:?}", event.kind);
                events.send(TimeChangeEvent::TimezoneChanged);
            }
        }
        Err(e) => warn!("Zone file watch error: {}", e),
    })?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}
