use colored::{ColoredString, Colorize};
use env_logger::{Builder, Env};
use log::{Level, info};
use std::io::Write;
use std::time::Duration;

/// Log target whose records are printed as-is, without timestamp or target.
pub const RAW_TARGET: &str = "SKIP_FORMAT";

pub struct FormatElapsedTimeOptions<'a> {
    pub(crate) sec_yellow_threshold: u64,
    pub(crate) sec_red_threshold: u64,
    pub(crate) millis_yellow_threshold: Option<u128>,
    pub(crate) millis_red_threshold: Option<u128>,
    pub(crate) additional_fn: Option<&'a (dyn Fn(ColoredString) -> ColoredString + Sync)>,
}

impl Default for FormatElapsedTimeOptions<'_> {
    fn default() -> Self {
        Self {
            sec_yellow_threshold: 1,
            sec_red_threshold: 2,
            millis_yellow_threshold: Some(100),
            millis_red_threshold: Some(500),
            additional_fn: None,
        }
    }
}

impl FormatElapsedTimeOptions<'_> {
    /// Thresholds suited to whole build sections rather than single pages.
    pub fn section() -> Self {
        Self {
            sec_red_threshold: 5,
            sec_yellow_threshold: 1,
            millis_red_threshold: None,
            millis_yellow_threshold: None,
            additional_fn: None,
        }
    }
}

pub fn init_logging() {
    let logging_env = Env::default().filter_or("RUST_LOG", "info");
    let quiet = std::env::args().any(|arg| arg == "--quiet");

    // A second call (e.g. two builds in one process) keeps the first logger.
    let _ = Builder::from_env(logging_env)
        .format(move |buf, record| {
            if quiet && record.level() > Level::Warn {
                return Ok(());
            }

            if record.target() == RAW_TARGET {
                return writeln!(buf, "{}", record.args());
            }

            let target = record.target().to_ascii_lowercase();
            let target = match record.level() {
                Level::Error => target.bold().red(),
                Level::Warn => target.bold().yellow(),
                _ => target.bold().bright_yellow(),
            };

            writeln!(
                buf,
                "{} {} {}",
                chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
                target,
                record.args()
            )
        })
        .try_init();
}

pub fn format_elapsed_time(elapsed: Duration, options: &FormatElapsedTimeOptions) -> ColoredString {
    let result = match elapsed.as_secs() {
        secs if secs > options.sec_red_threshold => format!("{}m", secs / 60).red(),
        secs if secs > options.sec_yellow_threshold => format!("{}s", secs).yellow(),
        secs if secs > 0 => format!("{}s", secs).normal(),
        _ => match elapsed.as_millis() {
            millis
                if options
                    .millis_red_threshold
                    .is_some_and(|threshold| millis > threshold) =>
            {
                format!("{}ms", millis).red()
            }
            millis
                if options
                    .millis_yellow_threshold
                    .is_some_and(|threshold| millis > threshold) =>
            {
                format!("{}ms", millis).yellow()
            }
            millis if millis > 0 => format!("{}ms", millis).normal(),
            _ => format!("{}μs", elapsed.as_micros()).normal(),
        },
    };

    match options.additional_fn {
        Some(additional_fn) => additional_fn(result),
        None => result,
    }
}

pub fn print_title(title: &str) {
    info!(target: RAW_TARGET, "{}", "");
    info!(target: RAW_TARGET, "{}", format!(" {} ", title).on_green().bold());
}
