//! Ranking orders over measurement records.
//!
//! There are two orders over the same collection: loss rate then delay,
//! used before filtering and to pick throughput candidates, and download
//! speed, used for the final best-first view. Both sorts are stable, so
//! records with equal keys keep their input order.

use crate::measurement::Measurement;
use std::cmp::Ordering;

/// Lower loss rate first; ties go to the lower average delay.
pub fn cmp_loss_then_delay(a: &Measurement, b: &Measurement) -> Ordering {
    a.loss_rate()
        .total_cmp(&b.loss_rate())
        .then_with(|| a.average_delay().cmp(&b.average_delay()))
}

/// Higher download speed first.
pub fn cmp_download_speed(a: &Measurement, b: &Measurement) -> Ordering {
    b.download_speed.total_cmp(&a.download_speed)
}

pub fn sort_by_loss_then_delay(records: &mut [Measurement]) {
    records.sort_by(cmp_loss_then_delay);
}

pub fn sort_by_download_speed(records: &mut [Measurement]) {
    records.sort_by(cmp_download_speed);
}

/// The first `count` records of an already ranked collection.
pub fn take_best(records: &[Measurement], count: usize) -> Vec<Measurement> {
    records[..count.min(records.len())].to_vec()
}
