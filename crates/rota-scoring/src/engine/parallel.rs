//! Parallel evaluation of candidate moves.

use rayon::prelude::*;
use rota_core::{HardSoftScore, Result};

use super::{ChangeMove, ScoreEngine};

impl ScoreEngine {
    /// Scores each candidate move as if it were applied alone to the current
    /// state.
    ///
    /// Every rayon worker gets its own clone of the engine and undoes each
    /// candidate after scoring it. `self` is not changed. Results are in the
    /// order of `moves`.
    pub fn score_candidates(&self, moves: &[ChangeMove]) -> Vec<Result<HardSoftScore>> {
        moves
            .par_iter()
            .map_init(
                || self.clone(),
                |worker, &candidate| self.score_on_worker(worker, candidate),
            )
            .collect()
    }

    /// Applies and undoes `candidate` on `worker`, a clone of `self`.
    ///
    /// An error can surface after the move was applied, so a failed candidate
    /// resets `worker` to `self` before the next one runs.
    pub(super) fn score_on_worker(
        &self,
        worker: &mut ScoreEngine,
        candidate: ChangeMove,
    ) -> Result<HardSoftScore> {
        let scored = worker
            .do_move(candidate)
            .and_then(|outcome| worker.do_move(outcome.undo).map(|_| outcome.score));
        if scored.is_err() {
            worker.clone_from(self);
        }
        scored
    }
}
