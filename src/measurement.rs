//! Per-address measurement records.
//!
//! A [`Measurement`] holds what the prober observed for a single address:
//! how many probes were sent, how many came back, the average delay of the
//! ones that did, and (after the throughput stage) the download speed.
//! The loss rate is derived once, when the record is built.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

/// Loss rate of `sent` probes of which `received` came back.
///
/// No probes sent counts as total loss. A `received` larger than `sent`
/// saturates to zero loss so the result always stays in `0.0..=1.0`.
pub fn loss_rate(sent: u32, received: u32) -> f64 {
    if sent == 0 {
        return 1.0;
    }

    let lost = sent.saturating_sub(received);
    lost as f64 / sent as f64
}

/// Measurement results for a single probed address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMeasurement", into = "RawMeasurement")]
pub struct Measurement {
    address: IpAddr,
    sent: u32,
    received: u32,
    average_delay: Duration,
    loss_rate: f64,
    /// Download speed in bytes per second, zero until measured.
    pub download_speed: f64,
}

impl Measurement {
    /// Create a record from probe results, deriving its loss rate.
    pub fn new(
        address: IpAddr,
        sent: u32,
        received: u32,
        average_delay: Duration,
    ) -> Self {
        Self {
            address,
            sent,
            received,
            average_delay,
            loss_rate: loss_rate(sent, received),
            download_speed: 0.0,
        }
    }

    /// Sets the download speed in bytes per second.
    pub fn with_download_speed(mut self, bytes_per_sec: f64) -> Self {
        self.download_speed = bytes_per_sec;
        self
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn sent(&self) -> u32 {
        self.sent
    }

    pub fn received(&self) -> u32 {
        self.received
    }

    pub fn average_delay(&self) -> Duration {
        self.average_delay
    }

    /// Fraction of sent probes that got no response (0.0 to 1.0).
    pub fn loss_rate(&self) -> f64 {
        self.loss_rate
    }

    /// Returns true if more probes came back than were sent.
    pub fn is_inconsistent(&self) -> bool {
        self.received > self.sent
    }
}

/// On-disk shape of a measurement record.
///
/// Delay is carried in milliseconds and the loss rate is never
/// serialized; it is recomputed from the counts on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMeasurement {
    pub address: IpAddr,
    pub sent: u32,
    pub received: u32,
    pub average_delay_ms: f64,
    #[serde(default)]
    pub download_speed: f64,
}

impl TryFrom<RawMeasurement> for Measurement {
    type Error = String;

    fn try_from(raw: RawMeasurement) -> Result<Self, Self::Error> {
        let average_delay =
            Duration::try_from_secs_f64(raw.average_delay_ms / 1000.0)
                .map_err(|e| {
                    format!(
                        "invalid average_delay_ms {} for {}: {}",
                        raw.average_delay_ms, raw.address, e
                    )
                })?;

        Ok(Measurement::new(raw.address, raw.sent, raw.received, average_delay)
            .with_download_speed(raw.download_speed))
    }
}

impl From<Measurement> for RawMeasurement {
    fn from(measurement: Measurement) -> Self {
        Self {
            address: measurement.address,
            sent: measurement.sent,
            received: measurement.received,
            average_delay_ms: measurement.average_delay.as_nanos() as f64 / 1e6,
            download_speed: measurement.download_speed,
        }
    }
}
