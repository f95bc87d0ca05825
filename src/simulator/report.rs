//! Simulation report generation.

use serde::Serialize;

/// Outcome of one simulated game.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    /// Score shown on the meter when the run ended
    pub distance: u32,
    pub frames: u64,
    /// Landed jumps
    pub jumps: u32,
    pub achievements: u32,
    pub crashed: bool,
    pub crashed_small: bool,
    pub crashed_large: bool,
    pub top_speed: f64,
    /// Sound cues the run asked for
    pub sounds_played: usize,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_crashed: u32,
    pub runs_timed_out: u32,

    pub avg_distance: f64,
    pub median_distance: u32,
    pub best_distance: u32,
    pub worst_distance: u32,
    pub avg_jumps: f64,
    pub avg_frames: f64,
    pub avg_top_speed: f64,

    pub small_cactus_crashes: u32,
    pub large_cactus_crashes: u32,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn average(runs: &[RunStats], value: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(value).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let runs_crashed = runs.iter().filter(|r| r.crashed).count() as u32;

        let mut distances: Vec<u32> = runs.iter().map(|r| r.distance).collect();
        distances.sort_unstable();

        Self {
            num_runs,
            runs_crashed,
            runs_timed_out: num_runs - runs_crashed,
            avg_distance: average(&runs, |r| r.distance as f64),
            median_distance: distances.get(distances.len() / 2).copied().unwrap_or(0),
            best_distance: distances.last().copied().unwrap_or(0),
            worst_distance: distances.first().copied().unwrap_or(0),
            avg_jumps: average(&runs, |r| r.jumps as f64),
            avg_frames: average(&runs, |r| r.frames as f64),
            avg_top_speed: average(&runs, |r| r.top_speed),
            small_cactus_crashes: runs.iter().filter(|r| r.crashed_small).count() as u32,
            large_cactus_crashes: runs.iter().filter(|r| r.crashed_large).count() as u32,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} crashed, {} timed out\n\n",
            self.num_runs, self.runs_crashed, self.runs_timed_out
        ));

        report.push_str("── DISTANCE ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Average:   {:.1}\n", self.avg_distance));
        report.push_str(&format!("  Median:    {}\n", self.median_distance));
        report.push_str(&format!("  Best:      {}\n", self.best_distance));
        report.push_str(&format!("  Worst:     {}\n\n", self.worst_distance));

        report.push_str("── RUNS ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Jumps:     {:.1}\n", self.avg_jumps));
        report.push_str(&format!("  Avg Frames:    {:.0}\n", self.avg_frames));
        report.push_str(&format!("  Avg Top Speed: {:.2}\n\n", self.avg_top_speed));

        report.push_str("── CRASHES ──────────────────────────────────────────────────────\n");
        for (label, count) in [
            ("Small cactus", self.small_cactus_crashes),
            ("Large cactus", self.large_cactus_crashes),
        ] {
            let pct = if self.num_runs > 0 {
                count as f64 / self.num_runs as f64 * 100.0
            } else {
                0.0
            };
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {:13} {:>5.1}% {}\n", label, pct, bar));
        }

        if self.num_runs > 0 && self.runs_timed_out == self.num_runs {
            report.push_str("  ⚠️  No run crashed - raise the frame limit?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(distance: u32, crashed: bool) -> RunStats {
        RunStats {
            distance,
            frames: 1000,
            jumps: 10,
            crashed,
            crashed_small: crashed,
            top_speed: 7.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_report_generation() {
        let report = SimReport::from_runs(vec![run(100, true), run(300, true), run(200, false)]);
        assert_eq!(report.num_runs, 3);
        assert_eq!(report.runs_crashed, 2);
        assert_eq!(report.runs_timed_out, 1);
        assert_eq!(report.median_distance, 200);
        assert_eq!(report.best_distance, 300);
        assert_eq!(report.worst_distance, 100);
        assert!((report.avg_distance - 200.0).abs() < 1e-9);
        assert_eq!(report.small_cactus_crashes, 2);
        assert!(report.to_text().contains("Median:    200"));
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new());
        assert_eq!(report.avg_distance, 0.0);
        assert_eq!(report.best_distance, 0);
    }

    #[test]
    fn test_json_omits_run_list() {
        let report = SimReport::from_runs(vec![run(50, true)]);
        let json = report.to_json();
        assert!(json.contains("\"best_distance\": 50"));
        assert!(!json.contains("run_stats"));
    }
}
