use std::hint::black_box;
use std::time::Instant;

use crate::{Timing, ToolOptions, ToolOutput, Workload};

/// Times a loop of maximum scans over the workload. `black_box` keeps the
/// scan and its discarded result from being optimized out.
pub fn run_wall_clock(workload: Workload<'_>, options: &ToolOptions) -> ToolOutput {
    let start = Instant::now();
    for _ in 0..options.iterations {
        black_box(crate::find_max(black_box(workload.values)));
    }
    let elapsed = start.elapsed();

    ToolOutput::WallClockTiming {
        timing: Timing { iterations: options.iterations, elapsed },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_workload() -> Workload<'static> {
        Workload { values: &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10] }
    }

    #[test]
    fn check_reports_requested_iterations() {
        let options = ToolOptions { iterations: 1000 };
        let ToolOutput::WallClockTiming { timing } = run_wall_clock(fixed_workload(), &options);
        assert_eq!(timing.iterations, 1000);
    }

    #[test]
    fn check_zero_iterations() {
        let options = ToolOptions { iterations: 0 };
        let ToolOutput::WallClockTiming { timing } = run_wall_clock(fixed_workload(), &options);
        assert_eq!(timing.iterations, 0);
    }
}
