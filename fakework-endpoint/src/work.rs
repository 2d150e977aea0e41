//! The simulated work itself: filler construction, CPU burn and blocking wait
//!
//! Everything here is synchronous and touches only request-local data. The
//! HTTP handler runs [`simulate`] on the blocking thread pool.

use std::fmt::Write;
use std::time::{Duration, Instant};

use crate::params::WorkParams;

/// Character repeated to build the filler payload
pub const FILLER_CHAR: char = 'a';

/// Result of one simulation
#[derive(Debug, Clone)]
pub struct WorkOutcome {
    /// Rendered plain-text response body
    pub body: String,
    /// Time spent building the filler
    pub filler_elapsed: Duration,
    /// Elapsed time (from the start timestamp) when the CPU burn stopped
    pub cpu_elapsed: Duration,
    /// Time actually spent blocked
    pub iowait_elapsed: Duration,
    /// Total wall-clock time of the simulation
    pub total_elapsed: Duration,
}

/// Run the work described by `params`.
///
/// The start timestamp is taken before the filler is built, so filler
/// construction counts towards the CPU budget's elapsed time but never
/// extends it.
pub fn simulate(params: &WorkParams) -> WorkOutcome {
    let start = Instant::now();

    let filler = build_filler(params.response_chars);
    let filler_elapsed = start.elapsed();

    let cpu_elapsed = burn_cpu_since(start, Duration::from_millis(params.cpu_ms));

    let iowait_start = Instant::now();
    block_for(Duration::from_millis(params.iowait_ms));
    let iowait_elapsed = iowait_start.elapsed();

    let body = render_body(params, &filler);

    WorkOutcome {
        body,
        filler_elapsed,
        cpu_elapsed,
        iowait_elapsed,
        total_elapsed: start.elapsed(),
    }
}

/// `len` copies of [`FILLER_CHAR`] in one pre-sized allocation
pub fn build_filler(len: u64) -> String {
    let len = usize::try_from(len).unwrap_or(usize::MAX);
    FILLER_CHAR.to_string().repeat(len)
}

/// Spin on the monotonic clock until more than `budget` has elapsed since
/// `start`. Returns the elapsed time observed on exit.
///
/// Must stay a pure spin: no sleeping or yielding inside the loop.
pub fn burn_cpu_since(start: Instant, budget: Duration) -> Duration {
    loop {
        let elapsed = start.elapsed();
        if elapsed > budget {
            return elapsed;
        }
    }
}

/// Block the current thread for `duration`
pub fn block_for(duration: Duration) {
    if !duration.is_zero() {
        std::thread::sleep(duration);
    }
}

/// Render the response body around an already built filler
pub fn render_body(params: &WorkParams, filler: &str) -> String {
    let mut body = String::with_capacity(filler.len() + 128);
    // Writing into a String cannot fail
    let _ = write!(
        body,
        "Mocked up response with {}ms cpu using, {}ms iowait, and roughly {} bytes response. \n\n",
        params.cpu_ms, params.iowait_ms, params.response_chars
    );
    body.push_str(filler);
    body.push('\n');
    body
}
