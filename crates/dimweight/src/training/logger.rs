//! Training progress reporting through `tracing`.

use tracing::{debug, info, warn};

/// How much the trainer reports.
///
/// Levels are ordered, so `verbosity >= Verbosity::Info` enables everything
/// at `Info` and below.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// No output.
    #[default]
    Silent,
    /// Warnings only.
    Warning,
    /// Start, finish and every 10th round.
    Info,
    /// Every round.
    Debug,
}

/// Emits training events gated by a [`Verbosity`].
#[derive(Debug, Clone)]
pub struct TrainingLogger {
    verbosity: Verbosity,
    n_rounds: usize,
}

impl TrainingLogger {
    /// Rounds reported at `Info` verbosity.
    const INFO_EVERY: usize = 10;

    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            n_rounds: 0,
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Whether [`log_round`](Self::log_round) would emit for `round`.
    ///
    /// Lets the trainer skip computing the metric on silent rounds.
    pub fn wants_round(&self, round: usize) -> bool {
        match self.verbosity {
            Verbosity::Debug => true,
            Verbosity::Info => (round + 1) % Self::INFO_EVERY == 0 || round + 1 == self.n_rounds,
            Verbosity::Silent | Verbosity::Warning => false,
        }
    }

    pub fn start_training(&mut self, n_rounds: usize, n_rows: usize, n_features: usize) {
        self.n_rounds = n_rounds;
        if self.verbosity >= Verbosity::Info {
            info!(n_rounds, n_rows, n_features, "training started");
        }
    }

    pub fn log_round(&self, round: usize, metric: &str, value: f64) {
        if !self.wants_round(round) {
            return;
        }
        if self.verbosity >= Verbosity::Debug {
            debug!(round, metric, value, "round finished");
        } else {
            info!(round, metric, value, "round finished");
        }
    }

    pub fn warn(&self, message: &str) {
        if self.verbosity >= Verbosity::Warning {
            warn!("{message}");
        }
    }

    pub fn finish_training(&self, n_trees: usize) {
        if self.verbosity >= Verbosity::Info {
            info!(n_trees, "training finished");
        }
    }
}
