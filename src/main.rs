extern crate clap;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use clean_ip::errors::{exit_codes, format_error_for_display};
use clean_ip::{
    export, input, pipeline, report, CleanIpError, FilterSettings,
    OutputSettings, RecordedThroughput, Settings,
};
use colored::Colorize;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::LazyLock;

static LONG_VERSION: LazyLock<String> = LazyLock::new(|| {
    match option_env!("CLEANIP_BUILD_GIT_HASH") {
        Some(rev) => format!("{} (rev {})", env!("CARGO_PKG_VERSION"), rev),
        None => env!("CARGO_PKG_VERSION").to_string(),
    }
});

#[derive(Parser)]
#[command(
    author,
    version,
    long_version = LONG_VERSION.as_str(),
    about,
    long_about = None
)]
struct Cli {
    /// JSON measurement records from the prober, `-` for stdin
    #[arg(short, long, default_value = "measurements.json")]
    input: PathBuf,

    /// Lowest average delay to keep, in ms
    #[arg(
        long,
        visible_alias = "tll",
        default_value_t = FilterSettings::DEFAULT_MIN_DELAY_MS,
        allow_negative_numbers = true
    )]
    min_delay: i64,

    /// Highest average delay to keep, in ms
    #[arg(
        long,
        visible_alias = "tl",
        default_value_t = FilterSettings::DEFAULT_MAX_DELAY_MS,
        allow_negative_numbers = true
    )]
    max_delay: i64,

    /// Highest loss rate to keep, 0.0 to 1.0
    #[arg(
        long,
        visible_alias = "tlr",
        default_value_t = FilterSettings::DEFAULT_MAX_LOSS_RATE
    )]
    max_loss_rate: f64,

    /// File to write clean IPs to, one per line; "" skips the file
    #[arg(
        short,
        long,
        default_value = OutputSettings::DEFAULT_PATH,
        value_parser = clap::builder::OsStringValueParser::new()
    )]
    output: OsString,

    /// Number of results to print, 0 disables printing
    #[arg(
        short = 'p',
        long,
        default_value_t = OutputSettings::DEFAULT_PRINT_LIMIT
    )]
    print_num: usize,

    /// Number of best-ranked IPs to rank by download speed
    #[arg(
        long,
        visible_alias = "dn",
        default_value_t = Settings::DEFAULT_DOWNLOAD_COUNT
    )]
    download_count: usize,

    /// Skip the download speed stage
    #[arg(long, visible_alias = "dd")]
    disable_download: bool,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            filter: FilterSettings {
                min_delay_ms: self.min_delay,
                max_delay_ms: self.max_delay,
                max_loss_rate: self.max_loss_rate,
            },
            output: OutputSettings {
                path: PathBuf::from(&self.output),
                print_limit: self.print_num,
            },
            download_count: self.download_count,
            disable_download: self.disable_download,
        }
    }
}

fn main() {
    let cli: Cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let code = match run(&cli) {
        Ok(()) => exit_codes::SUCCESS,
        Err(error) => {
            eprintln!("{}", format_error_for_display(&error).red());
            error.exit_code()
        }
    };

    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<(), CleanIpError> {
    let settings = cli.settings();
    settings.validate()?;

    let records = input::load_measurements(&cli.input)?;
    let ranked =
        pipeline::run(&records, &settings, &mut RecordedThroughput);

    export::export(&ranked, &settings.output.path)?;
    report::report(&ranked, &settings.output);

    Ok(())
}
