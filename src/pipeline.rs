//! The ranking pipeline.
//!
//! Records are ranked by loss rate and delay, narrowed by the configured
//! thresholds, and the best few are handed to a [`ThroughputProbe`]. The
//! probed candidates are then re-ranked by download speed.

use crate::config::{FilterSettings, Settings};
use crate::measurement::Measurement;
use crate::ranking::{
    sort_by_download_speed, sort_by_loss_then_delay, take_best,
};
use log::{debug, info};

/// Measures download speed for the addresses picked by the pipeline.
///
/// Implementations set `download_speed` on each candidate they manage to
/// measure and leave the others at zero.
pub trait ThroughputProbe {
    fn measure(&mut self, candidates: &mut [Measurement]);
}

impl<F> ThroughputProbe for F
where
    F: FnMut(&mut [Measurement]),
{
    fn measure(&mut self, candidates: &mut [Measurement]) {
        self(candidates)
    }
}

/// Probe for input that already carries download speeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordedThroughput;

impl ThroughputProbe for RecordedThroughput {
    fn measure(&mut self, candidates: &mut [Measurement]) {
        let measured =
            candidates.iter().filter(|m| m.download_speed > 0.0).count();
        debug!(
            "Using recorded download speeds for {} of {} candidates",
            measured,
            candidates.len()
        );
    }
}

/// Rank `records` by loss rate then delay and keep the clean ones.
pub fn clean(
    records: &[Measurement],
    filter: &FilterSettings,
) -> Vec<Measurement> {
    let mut ranked = records.to_vec();
    sort_by_loss_then_delay(&mut ranked);

    let within_delay = filter.delay_filter().apply(&ranked);
    let clean = filter.loss_rate_filter().apply(&within_delay);

    info!(
        "{} of {} addresses passed the filters",
        clean.len(),
        records.len()
    );

    clean
}

/// Run the full pipeline and return the final best-first ranking.
///
/// With the download stage disabled the clean set is returned in its
/// loss/delay order, untruncated.
pub fn run<P: ThroughputProbe + ?Sized>(
    records: &[Measurement],
    settings: &Settings,
    probe: &mut P,
) -> Vec<Measurement> {
    let clean = clean(records, &settings.filter);

    if settings.disable_download {
        debug!("Download stage disabled, keeping loss/delay order");
        return clean;
    }

    let mut candidates = take_best(&clean, settings.download_count);
    probe.measure(&mut candidates);
    sort_by_download_speed(&mut candidates);

    candidates
}
