//! Thresholds and output settings for a ranking run.

use crate::errors::CleanIpError;
use crate::filter::{DelayFilter, LossRateFilter};
use std::path::{Path, PathBuf};

/// Delay window and loss-rate ceiling applied to the probed addresses.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSettings {
    /// Lower bound of the average delay, in milliseconds (inclusive).
    /// Default: 0
    pub min_delay_ms: i64,
    /// Upper bound of the average delay, in milliseconds (inclusive).
    /// Default: 9999
    pub max_delay_ms: i64,
    /// Highest loss rate an address may have and still be kept.
    /// Default: 1.0 (no filtering)
    pub max_loss_rate: f64,
}

impl FilterSettings {
    /// Default lower delay bound in milliseconds.
    pub const DEFAULT_MIN_DELAY_MS: i64 = 0;

    /// Default upper delay bound in milliseconds, also the largest accepted.
    pub const DEFAULT_MAX_DELAY_MS: i64 = 9999;

    /// Default loss-rate ceiling.
    pub const DEFAULT_MAX_LOSS_RATE: f64 = 1.0;

    pub fn delay_filter(&self) -> DelayFilter {
        DelayFilter::new(self.min_delay_ms, self.max_delay_ms)
    }

    pub fn loss_rate_filter(&self) -> LossRateFilter {
        LossRateFilter::new(self.max_loss_rate)
    }
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            min_delay_ms: Self::DEFAULT_MIN_DELAY_MS,
            max_delay_ms: Self::DEFAULT_MAX_DELAY_MS,
            max_loss_rate: Self::DEFAULT_MAX_LOSS_RATE,
        }
    }
}

/// Where results go once ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    /// Export destination. An empty path or a single space disables it.
    /// Default: result.csv
    pub path: PathBuf,
    /// Number of rows printed to the console, 0 disables printing.
    /// Default: 10
    pub print_limit: usize,
}

impl OutputSettings {
    /// Default export destination.
    pub const DEFAULT_PATH: &'static str = "result.csv";

    /// Default number of printed rows.
    pub const DEFAULT_PRINT_LIMIT: usize = 10;

    /// Returns true if `path` is one of the "no file output" sentinels.
    pub fn is_blank_path(path: &Path) -> bool {
        let path = path.as_os_str();
        path.is_empty() || path == " "
    }

    pub fn is_file_output_disabled(&self) -> bool {
        Self::is_blank_path(&self.path)
    }

    pub fn is_print_disabled(&self) -> bool {
        self.print_limit == 0
    }

    /// Returns true if the export destination is the default one.
    pub fn is_default_path(&self) -> bool {
        self.path.as_os_str() == Self::DEFAULT_PATH
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(Self::DEFAULT_PATH),
            print_limit: Self::DEFAULT_PRINT_LIMIT,
        }
    }
}

/// Complete settings for one ranking run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub filter: FilterSettings,
    pub output: OutputSettings,
    /// Number of best-ranked addresses handed to the throughput stage.
    /// Default: 10
    pub download_count: usize,
    /// Skip the throughput stage and keep the loss/delay ranking.
    /// Default: false
    pub disable_download: bool,
}

impl Settings {
    /// Default number of addresses forwarded to the throughput stage.
    pub const DEFAULT_DOWNLOAD_COUNT: usize = 10;

    /// Reject settings no run could make sense of.
    ///
    /// Out-of-range delay bounds are not rejected here: the delay filter
    /// turns itself off for them.
    pub fn validate(&self) -> Result<(), CleanIpError> {
        if self.filter.max_loss_rate.is_nan() {
            return Err(CleanIpError::config("max loss rate must be a number")
                .with_suggestion("Use a value between 0 and 1."));
        }

        if !self.disable_download && self.download_count == 0 {
            return Err(CleanIpError::config(
                "download count must be at least 1",
            )
            .with_suggestion("Use --disable-download to skip the stage."));
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            filter: FilterSettings::default(),
            output: OutputSettings::default(),
            download_count: Self::DEFAULT_DOWNLOAD_COUNT,
            disable_download: false,
        }
    }
}
