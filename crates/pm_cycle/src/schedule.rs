use chrono::{DateTime, Local, NaiveTime, TimeZone};
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use crate::logging::Logger;

const ONE_DAY: Duration = Duration::from_secs(86_400);

/// A duration written like `1d`, `6h`, `30m` or `1h15m30s`. A bare number is seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

fn unit_seconds(unit: char) -> Option<u64> {
    match unit {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(3_600),
        'd' => Some(86_400),
        _ => None,
    }
}

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let too_large = || "Duration is too large".to_string();
        let mut total: u64 = 0;
        let mut pending: Option<u64> = None;

        for c in s.chars().filter(|c| !c.is_whitespace()) {
            if let Some(digit) = c.to_digit(10) {
                let value = pending
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(u64::from(digit)))
                    .ok_or_else(too_large)?;
                pending = Some(value);
                continue;
            }
            let scale = unit_seconds(c).ok_or_else(|| format!("Invalid duration unit: {}", c))?;
            let amount = pending
                .take()
                .ok_or_else(|| format!("Unit {} has no number before it", c))?;
            total = amount
                .checked_mul(scale)
                .and_then(|secs| total.checked_add(secs))
                .ok_or_else(too_large)?;
        }

        // A trailing bare number counts as seconds.
        if let Some(secs) = pending {
            total = total.checked_add(secs).ok_or_else(too_large)?;
        }

        if total == 0 {
            return Err("Duration must be longer than zero".to_string());
        }
        Ok(HumanDuration(Duration::from_secs(total)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// A single cycle, then exit.
    Once,
    /// Run now, then again after every interval.
    Every(Duration),
    /// Run every day at a local wall-clock time. The first run waits for the next occurrence.
    DailyAt(NaiveTime),
}

impl Schedule {
    pub fn initial_delay<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Duration {
        match self {
            Schedule::Once | Schedule::Every(_) => Duration::ZERO,
            Schedule::DailyAt(at) => until_next(now, *at),
        }
    }

    /// Delay after a finished cycle, or `None` when no further cycle is due.
    pub fn next_delay<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<Duration> {
        match self {
            Schedule::Once => None,
            Schedule::Every(interval) => Some(*interval),
            Schedule::DailyAt(at) => Some(until_next(now, *at)),
        }
    }
}

/// Time until the next `at` strictly after `now`, in `now`'s time zone.
/// Local times skipped by a DST jump move on to the following day.
pub fn until_next<Tz: TimeZone>(now: &DateTime<Tz>, at: NaiveTime) -> Duration {
    let tz = now.timezone();
    let mut day = now.date_naive();

    for _ in 0..3 {
        if let Some(target) = tz.from_local_datetime(&day.and_time(at)).earliest() {
            if target > *now {
                return (target - now.clone()).to_std().unwrap_or(Duration::ZERO);
            }
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    ONE_DAY
}

/// Drive `cycle` according to `schedule` until it is exhausted or `shutdown` resolves.
/// Shutdown is only observed between cycles; a running cycle is never interrupted.
pub async fn run_scheduled<F, Fut, S>(schedule: Schedule, shutdown: S, mut cycle: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
    S: Future<Output = ()>,
{
    let logger = Logger::new().with_prefix("[schedule]");
    tokio::pin!(shutdown);

    let mut delay = schedule.initial_delay(&Local::now());
    loop {
        if !delay.is_zero() {
            logger.info(&format!("⏳ Next cycle in {}s", delay.as_secs()));
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = &mut shutdown => {
                    logger.info("🛑 Shutdown requested, stopping scheduler");
                    return;
                }
            }
        }

        cycle().await;

        match schedule.next_delay(&Local::now()) {
            Some(next) => delay = next,
            None => return,
        }
    }
}
