//! Threshold filters over measurement records.
//!
//! Both filters leave their input untouched and return the records that
//! pass. Each one checks every record, so neither depends on the input
//! being sorted first; on a ranked collection the result is the same as
//! stopping at the first record past the threshold.

use crate::config::FilterSettings;
use crate::measurement::Measurement;
use log::debug;
use std::time::Duration;

/// Keeps records whose average delay lies in an inclusive window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayFilter {
    min_ms: i64,
    max_ms: i64,
}

impl DelayFilter {
    pub fn new(min_ms: i64, max_ms: i64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Returns true if the window actually filters anything.
    ///
    /// The default window, and any window reaching outside
    /// `0..=DEFAULT_MAX_DELAY_MS`, leaves the records as they are.
    pub fn is_active(&self) -> bool {
        let is_default = self.min_ms == FilterSettings::DEFAULT_MIN_DELAY_MS
            && self.max_ms == FilterSettings::DEFAULT_MAX_DELAY_MS;
        let out_of_range = self.max_ms > FilterSettings::DEFAULT_MAX_DELAY_MS
            || self.min_ms < FilterSettings::DEFAULT_MIN_DELAY_MS;

        !is_default && !out_of_range
    }

    /// Returns true if `delay` falls inside the window.
    pub fn accepts(&self, delay: Duration) -> bool {
        let (Ok(min_ms), Ok(max_ms)) =
            (u64::try_from(self.min_ms), u64::try_from(self.max_ms))
        else {
            return false;
        };

        delay >= Duration::from_millis(min_ms)
            && delay <= Duration::from_millis(max_ms)
    }

    pub fn apply(&self, records: &[Measurement]) -> Vec<Measurement> {
        if !self.is_active() {
            return records.to_vec();
        }

        let kept: Vec<Measurement> = records
            .iter()
            .filter(|m| self.accepts(m.average_delay()))
            .cloned()
            .collect();

        debug!(
            "delay filter {}..={} ms kept {} of {} addresses",
            self.min_ms,
            self.max_ms,
            kept.len(),
            records.len()
        );

        kept
    }
}

/// Keeps records whose loss rate does not exceed a ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossRateFilter {
    max: f64,
}

impl LossRateFilter {
    pub fn new(max: f64) -> Self {
        Self { max }
    }

    /// A ceiling of 1.0 or more lets everything through.
    pub fn is_active(&self) -> bool {
        self.max < FilterSettings::DEFAULT_MAX_LOSS_RATE
    }

    pub fn apply(&self, records: &[Measurement]) -> Vec<Measurement> {
        if !self.is_active() {
            return records.to_vec();
        }

        let kept: Vec<Measurement> = records
            .iter()
            .filter(|m| m.loss_rate() <= self.max)
            .cloned()
            .collect();

        debug!(
            "loss-rate filter <= {:.2} kept {} of {} addresses",
            self.max,
            kept.len(),
            records.len()
        );

        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::net::{IpAddr, Ipv4Addr};

    fn with_delay(last: u8, delay_ms: u64) -> Measurement {
        Measurement::new(
            IpAddr::V4(Ipv4Addr::new(172, 64, 0, last)),
            4,
            4,
            Duration::from_millis(delay_ms),
        )
    }

    fn with_loss(last: u8, sent: u32, received: u32) -> Measurement {
        Measurement::new(
            IpAddr::V4(Ipv4Addr::new(172, 64, 0, last)),
            sent,
            received,
            Duration::from_millis(100),
        )
    }

    fn delays(records: &[Measurement]) -> Vec<u128> {
        records.iter().map(|m| m.average_delay().as_millis()).collect()
    }

    #[test]
    fn test_default_delay_window_is_noop() {
        let records = vec![with_delay(1, 300), with_delay(2, 10)];
        let filter = FilterSettings::default().delay_filter();

        assert!(!filter.is_active());
        assert_eq!(filter.apply(&records), records);
    }

    #[test]
    fn test_out_of_range_delay_window_is_noop() {
        let records = vec![with_delay(1, 10), with_delay(2, 20_000)];

        assert_eq!(DelayFilter::new(50, 10_000).apply(&records), records);
        assert_eq!(DelayFilter::new(-1, 200).apply(&records), records);
    }

    #[test]
    fn test_delay_window() {
        let records = vec![
            with_delay(1, 10),
            with_delay(2, 60),
            with_delay(3, 150),
            with_delay(4, 300),
        ];

        let kept = DelayFilter::new(50, 200).apply(&records);
        assert_eq!(delays(&kept), vec![60, 150]);
        // Input is left alone.
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn test_delay_window_bounds_are_inclusive() {
        let records = vec![with_delay(1, 50), with_delay(2, 200)];
        let kept = DelayFilter::new(50, 200).apply(&records);
        assert_eq!(delays(&kept), vec![50, 200]);
    }

    #[test]
    fn test_delay_window_on_unsorted_input() {
        let records = vec![
            with_delay(1, 300),
            with_delay(2, 60),
            with_delay(3, 10),
            with_delay(4, 150),
        ];

        let kept = DelayFilter::new(50, 200).apply(&records);
        assert_eq!(delays(&kept), vec![60, 150]);
    }

    #[test]
    fn test_default_loss_ceiling_is_noop() {
        let records = vec![with_loss(1, 4, 0), with_loss(2, 0, 0)];
        let filter = FilterSettings::default().loss_rate_filter();

        assert!(!filter.is_active());
        assert_eq!(filter.apply(&records), records);
        assert_eq!(LossRateFilter::new(1.5).apply(&records), records);
    }

    #[test]
    fn test_loss_ceiling() {
        // Loss rates 0.0, 0.05, 0.2, 0.3
        let records = vec![
            with_loss(1, 20, 20),
            with_loss(2, 20, 19),
            with_loss(3, 10, 8),
            with_loss(4, 10, 7),
        ];

        let kept = LossRateFilter::new(0.1).apply(&records);
        assert_eq!(kept, records[..2].to_vec());
    }

    #[test]
    fn test_zero_loss_ceiling_keeps_perfect_records() {
        let records = vec![with_loss(1, 4, 4), with_loss(2, 4, 3)];
        let kept = LossRateFilter::new(0.0).apply(&records);
        assert_eq!(kept, records[..1].to_vec());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: every record the delay filter keeps lies in the window,
        /// and every record it drops lies outside it.
        #[test]
        fn delay_filter_partitions_records(
            delays_ms in proptest::collection::vec(0u64..12_000, 0..40),
            min_ms in 0i64..5_000,
            span_ms in 0i64..5_000,
        ) {
            let records: Vec<Measurement> = delays_ms
                .iter()
                .enumerate()
                .map(|(i, &d)| with_delay(i as u8, d))
                .collect();
            let filter = DelayFilter::new(min_ms, min_ms + span_ms);
            prop_assume!(filter.is_active());

            let kept = filter.apply(&records);
            let expected: Vec<Measurement> = records
                .iter()
                .filter(|m| {
                    let d = m.average_delay().as_millis() as i64;
                    d >= min_ms && d <= min_ms + span_ms
                })
                .cloned()
                .collect();

            prop_assert_eq!(kept, expected);
        }

        /// Property: the loss-rate filter never keeps a record above the
        /// ceiling and never grows the collection.
        #[test]
        fn loss_filter_respects_ceiling(
            counts in proptest::collection::vec((0u32..50, 0u32..50), 0..40),
            max in 0.0f64..1.0,
        ) {
            let records: Vec<Measurement> = counts
                .iter()
                .enumerate()
                .map(|(i, &(sent, received))| {
                    with_loss(i as u8, sent, received.min(sent))
                })
                .collect();

            let kept = LossRateFilter::new(max).apply(&records);
            prop_assert!(kept.len() <= records.len());
            prop_assert!(kept.iter().all(|m| m.loss_rate() <= max));
        }
    }
}
