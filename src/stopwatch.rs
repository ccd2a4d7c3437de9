//! The stopwatch itself: `mark_start` and `mark_stop`.
//!
//! Timer identity is entirely caller-held: `mark_start` hands back a
//! monotonic clock reading and `mark_stop` takes it again, so any
//! number of timers can be in flight at once without a registry.

use std::io::{self, Write};
use std::time::Instant;

use crate::unit::{self, TimeUnit};

/// Options for [`Stopwatch::mark_start`].
#[derive(Debug, Clone)]
pub struct StartOptions {
    /// Message written verbatim, without a trailing newline. `None` or
    /// an empty string writes nothing.
    pub message: Option<String>,
    /// Prefix the message with the current local date-time.
    pub timestamp: bool,
}

impl Default for StartOptions {
    fn default() -> Self {
        Self {
            message: None,
            timestamp: true,
        }
    }
}

impl StartOptions {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Options for [`Stopwatch::mark_stop`].
#[derive(Debug, Clone)]
pub struct StopOptions {
    /// Message written immediately ahead of the scaled time. `None` or
    /// an empty string suppresses the measurement line.
    pub message: Option<String>,
    /// Requested reporting unit: a canonical label (`ns`, `µs`, `ms`,
    /// `s`, `min`, `hr`, `dy`, any casing) or `auto`.
    pub unit: String,
    /// Decimal places in the printed value.
    pub precision: usize,
    /// Prefix the message with the current local date-time.
    pub timestamp: bool,
}

impl Default for StopOptions {
    fn default() -> Self {
        Self {
            message: Some("done.".to_string()),
            unit: "auto".to_string(),
            precision: 1,
            timestamp: false,
        }
    }
}

impl StopOptions {
    pub fn with_unit(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            ..Self::default()
        }
    }
}

/// Elapsed time scaled to the unit it was reported in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Elapsed time in `unit`s.
    pub value: f64,
    /// The unit actually used, after auto-scaling or fallback.
    pub unit: TimeUnit,
}

impl Measurement {
    /// Undo the scaling and return the elapsed time in seconds.
    pub fn as_secs(&self) -> f64 {
        self.value / self.unit.scale()
    }
}

/// Stopwatch bound to an output sink.
///
/// All measurement and diagnostic text goes to the sink; construction
/// is the only place the sink is chosen. Write failures are discarded,
/// so neither operation can fail or panic.
pub struct Stopwatch<W = io::Stdout> {
    out: W,
}

impl Stopwatch<io::Stdout> {
    /// Stopwatch writing to standard output.
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for Stopwatch<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Stopwatch<W> {
    /// Stopwatch writing to an arbitrary sink.
    pub fn with_output(out: W) -> Self {
        Self { out }
    }

    /// Consume the stopwatch and return its sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Optionally print a message and start a timer.
    ///
    /// The message, if any, is written without a trailing newline and
    /// the sink is flushed immediately, so the partial line is visible
    /// while the timed work runs. The returned clock reading is taken
    /// after the write, keeping print latency out of the measured
    /// interval.
    pub fn mark_start(&mut self, opts: StartOptions) -> Instant {
        if let Some(message) = opts.message.as_deref().filter(|m| !m.is_empty()) {
            let prefix = if opts.timestamp {
                timestamp_prefix()
            } else {
                String::new()
            };
            let _ = write!(self.out, "{prefix}{message}");
            let _ = self.out.flush();
        }
        Instant::now()
    }

    /// Stop a timer, report the elapsed time, and return it.
    ///
    /// The clock is read on entry; the elapsed time is then scaled to
    /// the requested unit (or auto-scaled), printed after the message
    /// with `opts.precision` decimal places, and returned. An
    /// unrecognized unit spec degrades to auto-scaling with a printed
    /// diagnostic; it is never an error.
    pub fn mark_stop(&mut self, start: Instant, opts: StopOptions) -> Measurement {
        let elapsed_secs = Instant::now().duration_since(start).as_secs_f64();
        self.report(elapsed_secs, opts)
    }

    fn report(&mut self, elapsed_secs: f64, opts: StopOptions) -> Measurement {
        let resolution = unit::resolve(&opts.unit, elapsed_secs);
        for line in &resolution.diagnostics {
            let _ = writeln!(self.out, "{line}");
        }

        let value = resolution.scale * elapsed_secs;
        if let Some(message) = opts.message.as_deref().filter(|m| !m.is_empty()) {
            let prefix = if opts.timestamp {
                timestamp_prefix()
            } else {
                String::new()
            };
            let precision = opts.precision;
            let _ = writeln!(
                self.out,
                "{prefix}{message} {value:.precision$} {}",
                resolution.unit
            );
        }
        let _ = self.out.flush();

        Measurement {
            value,
            unit: resolution.unit,
        }
    }
}

fn timestamp_prefix() -> String {
    chrono::Local::now().format("[%Y-%m-%dT%H:%M:%S] ").to_string()
}
