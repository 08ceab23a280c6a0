//! Simulation report generation.

use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of one simulated session.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub seed: u64,
    pub score: u32,
    pub level: u32,
    pub final_speed: f64,
    pub coins: u32,
    pub ticks: u64,
    pub obstacles_spawned: u64,
    pub timed_out: bool,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_timed_out: u32,

    pub avg_score: f64,
    pub max_score: u32,
    pub avg_level: f64,
    pub max_level: u32,
    pub avg_ticks: f64,
    pub avg_coins: f64,

    /// Final level -> number of runs that ended there
    pub level_distribution: BTreeMap<u32, u32>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let denom = num_runs.max(1) as f64;
        let avg = |f: &dyn Fn(&RunStats) -> f64| runs.iter().map(f).sum::<f64>() / denom;

        let mut level_distribution = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.level).or_insert(0) += 1;
        }

        Self {
            num_runs,
            runs_timed_out: runs.iter().filter(|r| r.timed_out).count() as u32,
            avg_score: avg(&|r| r.score as f64),
            max_score: runs.iter().map(|r| r.score).max().unwrap_or(0),
            avg_level: avg(&|r| r.level as f64),
            max_level: runs.iter().map(|r| r.level).max().unwrap_or(0),
            avg_ticks: avg(&|r| r.ticks as f64),
            avg_coins: avg(&|r| r.coins as f64),
            level_distribution,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("═══ RESULTS ═══\n");
        out.push_str(&format!("  Runs:            {}\n", self.num_runs));
        out.push_str(&format!("  Timed out:       {}\n", self.runs_timed_out));
        out.push_str(&format!(
            "  Score:           avg {:.1}, max {}\n",
            self.avg_score, self.max_score
        ));
        out.push_str(&format!(
            "  Level:           avg {:.2}, max {}\n",
            self.avg_level, self.max_level
        ));
        out.push_str(&format!(
            "  Survival:        avg {:.0} ticks ({:.1}s at 60fps)\n",
            self.avg_ticks,
            self.avg_ticks / 60.0
        ));
        out.push_str(&format!("  Coins:           avg {:.1}\n", self.avg_coins));

        if !self.level_distribution.is_empty() {
            out.push_str("\n═══ FINAL LEVEL DISTRIBUTION ═══\n");
            let widest = self.level_distribution.values().copied().max().unwrap_or(1);
            for (level, count) in &self.level_distribution {
                let bar = "█".repeat(((*count as f64 / widest as f64) * 40.0).ceil() as usize);
                out.push_str(&format!("  L{:<3} {:>5}  {}\n", level, count, bar));
            }
        }
        out
    }

    /// Detailed per-run lines (verbose mode).
    pub fn runs_text(&self) -> String {
        self.run_stats
            .iter()
            .map(|r| {
                format!(
                    "  seed {:>20}  score {:>5}  level {:>3}  ticks {:>7}{}\n",
                    r.seed,
                    r.score,
                    r.level,
                    r.ticks,
                    if r.timed_out { "  (timeout)" } else { "" }
                )
            })
            .collect()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
