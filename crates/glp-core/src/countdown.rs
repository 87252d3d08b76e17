//! Dose countdown.
//!
//! `format_countdown` buckets the time until a scheduled dose into a short
//! display string. `CountdownTicker` recomputes it on a fixed interval for as
//! long as the owning view holds the ticker; dropping it stops the task.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Datelike, NaiveTime, TimeDelta, Utc, Weekday};
use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};
use tracing::debug;

use crate::traits::Clock;

/// How far past its scheduled instant a dose may be and still read
/// "Due now". Matches the default refresh period, so a dose never flips to
/// "Overdue" between two refreshes without first showing "Due now".
pub const OVERDUE_GRACE_SECS: i64 = 60;

/// Default refresh period for [`CountdownTicker`].
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(60);

/// Format the time from `now` until `target`.
///
/// - `"Overdue"` once `target` is more than [`OVERDUE_GRACE_SECS`] in the past
/// - `"N days"` when at least one whole day remains
/// - `"N hours"` when at least one whole hour remains
/// - `"Due now"` otherwise
pub fn format_countdown(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = target - now;

    if delta < -TimeDelta::seconds(OVERDUE_GRACE_SECS) {
        return "Overdue".to_string();
    }

    let days = delta.num_days();
    if days > 0 {
        return plural(days, "day");
    }

    let hours = delta.num_hours();
    if hours > 0 {
        return plural(hours, "hour");
    }

    "Due now".to_string()
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// The next weekly injection instant on `day` at `time` (UTC), relative to
/// `now`.
///
/// A dose scheduled for today stays "next" until it falls outside the
/// overdue grace window; after that the following week's slot is returned.
pub fn next_dose_after(day: Weekday, time: NaiveTime, now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive();
    let ahead = (7 + day.num_days_from_monday() as i64
        - today.weekday().num_days_from_monday() as i64)
        % 7;

    let candidate = (today + TimeDelta::days(ahead)).and_time(time).and_utc();
    if candidate + TimeDelta::seconds(OVERDUE_GRACE_SECS) < now {
        candidate + TimeDelta::days(7)
    } else {
        candidate
    }
}

/// Periodically recomputed countdown label.
///
/// The label is published through a `watch` channel; views either read the
/// latest value with [`label`](Self::label) or await changes on a
/// [`subscribe`](Self::subscribe)d receiver.
pub struct CountdownTicker {
    labels: watch::Receiver<String>,
    task: JoinHandle<()>,
}

impl CountdownTicker {
    /// Start a ticker for `target`, refreshing every `period`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(target: DateTime<Utc>, clock: Arc<dyn Clock>, period: Duration) -> Self {
        let initial = format_countdown(target, clock.now());
        let (tx, labels) = watch::channel(initial);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if tx.is_closed() {
                    break;
                }
                let label = format_countdown(target, clock.now());
                tx.send_if_modified(|current| {
                    if *current == label {
                        false
                    } else {
                        debug!(target_at = %target, label = %label, "countdown label changed");
                        *current = label;
                        true
                    }
                });
            }
        });

        Self { labels, task }
    }

    /// The most recently computed label.
    pub fn label(&self) -> String {
        self.labels.borrow().clone()
    }

    /// A receiver that is notified whenever the label changes.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.labels.clone()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
