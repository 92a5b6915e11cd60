use crate::movegen::{self, Move};
use crate::position::GamePosition;
use crate::stats::Stats;
use crate::Error;
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A move-selection policy for lookahead turns.
///
/// The evaluator is polymorphic over this single capability, so the
/// modeled opponent (and the mover's own future self) can be swapped out.
pub trait Policy: Sync {
    /// Pick an index into `moves` (ordered best immediate score first),
    /// or None to pass.
    fn choose(&self, position: &GamePosition, moves: &[Move]) -> Option<usize>;
}

/// The baseline policy: the highest-immediate-score move, first in the
/// generator's deterministic order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl Policy for Greedy {
    fn choose(&self, _position: &GamePosition, moves: &[Move]) -> Option<usize> {
        if moves.is_empty() {
            None
        } else {
            Some(0)
        }
    }
}

/// Simulation parameters.
#[derive(Debug, Clone)]
pub struct SimParams {
    /// How many of the best immediate-score candidates to simulate.
    pub shortlist: usize,
    /// Trials per candidate.
    pub trials: usize,
    /// Alternating lookahead turns per trial, after the candidate itself.
    pub plies: usize,
    /// Base seed; every (candidate, trial) pair derives its own stream,
    /// so rankings reproduce exactly.
    pub seed: u64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            shortlist: 20,
            trials: 50,
            plies: 2,
            seed: 123,
        }
    }
}

/// Cooperative early-abort for a running evaluation: in-flight trials
/// finish, no new ones start, and the ranking reports what completed.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The simulated outlook of one candidate move.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// The candidate, immediate score included.
    pub mov: Move,
    /// Mean score differential (own minus opponent) over the trials.
    pub mean: f64,
    /// Sample variance of the differential, for confidence reporting;
    /// ranking ignores it.
    pub variance: f64,
    /// Trials that actually ran (fewer than requested after a cancel).
    pub trials: usize,
}

/// Candidates ordered by mean differential descending. `complete` is
/// false when a cancel cut the requested trial count short.
#[derive(Debug, Clone)]
pub struct Ranking {
    pub candidates: Vec<SimulationResult>,
    pub complete: bool,
}

/// The simulation evaluator: re-ranks the best immediate-score moves by
/// playing out sampled futures, because the top immediate score is not
/// always the best long-term move.
///
/// Per trial the opponent's hidden rack is pooled into the bag and a
/// fresh one sampled, the candidate is committed, and both sides play
/// `plies` further turns under `P`. Trials run in parallel under the
/// `rayon` feature; every trial owns its cloned position and its own
/// seeded rng, and outcomes are folded in trial order, so the ranking is
/// reproducible whatever the thread scheduling.
pub struct Simmer<P: Policy = Greedy> {
    params: SimParams,
    policy: P,
}

impl Simmer<Greedy> {
    pub fn new(params: SimParams) -> Simmer<Greedy> {
        Simmer::with_policy(params, Greedy)
    }
}

impl<P: Policy> Simmer<P> {
    pub fn with_policy(params: SimParams, policy: P) -> Simmer<P> {
        Simmer { params, policy }
    }

    /// Recommend moves for the player to move: generate, shortlist,
    /// simulate, rank. A rack with no legal moves yields an empty,
    /// complete ranking.
    /// ## Errors
    /// Only on positions whose racks are inconsistent with the board
    /// (a malformed caller-built position); see
    /// [`GamePosition::commit_move`].
    pub fn kibitz(&self, position: &GamePosition) -> Result<Ranking, Error> {
        self.kibitz_cancellable(position, &CancelToken::new())
    }

    /// [`kibitz`](Simmer::kibitz) with an early-abort token.
    pub fn kibitz_cancellable(
        &self,
        position: &GamePosition,
        cancel: &CancelToken,
    ) -> Result<Ranking, Error> {
        let moves = movegen::generate(position.board(), position.rack_to_move());
        let shortlist: Vec<Move> = moves.into_iter().take(self.params.shortlist).collect();
        if shortlist.is_empty() {
            return Ok(Ranking {
                candidates: Vec::new(),
                complete: true,
            });
        }
        let trials = self.params.trials;
        let jobs: Vec<(usize, usize)> = (0..shortlist.len())
            .flat_map(|c| (0..trials).map(move |t| (c, t)))
            .collect();
        let run = |&(c, t): &(usize, usize)| -> Option<Result<f64, Error>> {
            if cancel.is_cancelled() {
                return None;
            }
            Some(self.run_trial(position, &shortlist[c], c, t))
        };
        #[cfg(feature = "rayon")]
        let outcomes: Vec<Option<Result<f64, Error>>> = jobs.par_iter().map(run).collect();
        #[cfg(not(feature = "rayon"))]
        let outcomes: Vec<Option<Result<f64, Error>>> = jobs.iter().map(run).collect();

        let mut complete = true;
        let mut candidates = Vec::with_capacity(shortlist.len());
        let mut outcomes = outcomes.into_iter();
        for mov in shortlist {
            let mut stats = Stats::new();
            for _ in 0..trials {
                match outcomes.next() {
                    Some(Some(Ok(differential))) => stats.update(differential),
                    Some(Some(Err(e))) => return Err(e),
                    _ => complete = false,
                }
            }
            candidates.push(SimulationResult {
                mov,
                mean: stats.mean(),
                variance: stats.variance(),
                trials: stats.count() as usize,
            });
        }
        // stable: equal means keep the immediate-score order
        candidates.sort_by(|a, b| {
            b.mean
                .partial_cmp(&a.mean)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(Ranking {
            candidates,
            complete,
        })
    }

    /// One lookahead trial: candidate committed at ply 0, then `plies`
    /// alternating turns. An exhausted bag means no draw, a turn without
    /// moves means a pass; neither is a fault.
    fn run_trial(
        &self,
        position: &GamePosition,
        candidate: &Move,
        c: usize,
        t: usize,
    ) -> Result<f64, Error> {
        let mut rng = StdRng::seed_from_u64(trial_seed(self.params.seed, c, t));
        let me = position.turn();
        let opponent = 1 - me;
        // the opponent's real rack is hidden information: pool it, then
        // sample a fresh one from the bag
        let mut pos = position.pool_rack(opponent);
        pos = pos.commit_move(candidate)?;
        pos = pos.draw_to_rack(me, &mut rng);
        pos = pos.draw_to_rack(opponent, &mut rng);
        for _ in 0..self.params.plies {
            let mover = pos.turn();
            let moves = movegen::generate(pos.board(), pos.rack_to_move());
            match self.policy.choose(&pos, &moves) {
                Some(i) => {
                    pos = pos.commit_move(&moves[i])?;
                    pos = pos.draw_to_rack(mover, &mut rng);
                }
                None => pos = pos.pass(),
            }
        }
        Ok((pos.score(me) - pos.score(opponent)) as f64)
    }
}

/// splitmix-style mixing keeps per-(candidate, trial) streams independent
/// of each other and of the thread that runs them.
fn trial_seed(seed: u64, candidate: usize, trial: usize) -> u64 {
    let mut z = seed ^ ((candidate as u64) << 32 | trial as u64)
        .wrapping_mul(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Rack, TileSet};

    type Result<T> = std::result::Result<T, Error>;

    const WORDS: &[&str] = &["be", "bel", "belt", "bo", "ob", "te", "to", "toe"];

    fn position(rack0: &str, rack1: &str) -> GamePosition {
        let board = Board::default().with_lexicon_from_words(WORDS).unwrap();
        let racks: [Rack; 2] = [
            board.encode(rack0).unwrap(),
            board.encode(rack1).unwrap(),
        ];
        GamePosition::new(board, racks)
    }

    fn params(trials: usize) -> SimParams {
        SimParams {
            shortlist: 5,
            trials,
            plies: 2,
            seed: 42,
        }
    }

    #[test]
    fn test_ranking_deterministic() -> Result<()> {
        let position = position("belto", "oetbl");
        let simmer = Simmer::new(params(8));
        let first = simmer.kibitz(&position)?;
        let second = simmer.kibitz(&position)?;
        assert!(first.complete && second.complete);
        assert_eq!(first.candidates.len(), second.candidates.len());
        for (a, b) in first.candidates.iter().zip(second.candidates.iter()) {
            assert_eq!(a.mov, b.mov);
            assert_eq!(a.mean, b.mean);
            assert_eq!(a.variance, b.variance);
            assert_eq!(a.trials, 8);
        }
        // ranked by mean differential, descending
        for pair in first.candidates.windows(2) {
            assert!(pair[0].mean >= pair[1].mean);
        }
        Ok(())
    }

    #[test]
    fn test_no_moves_is_empty_ranking() -> Result<()> {
        let position = position("xxxxxxx", "oetbl");
        let ranking = Simmer::new(params(4)).kibitz(&position)?;
        assert!(ranking.candidates.is_empty());
        assert!(ranking.complete);
        Ok(())
    }

    #[test]
    fn test_empty_bag_lookahead() -> Result<()> {
        // a tileset whose every tile starts on a rack: the bag is empty
        let tiles: &[(&str, u32, u32)] = &[
            ("", 0, 0),
            ("b", 1, 4),
            ("e", 2, 1),
            ("l", 1, 1),
            ("t", 1, 1),
            ("o", 1, 1),
        ];
        let tileset = TileSet::custom(tiles, 0, 3, 40)?;
        let board = Board::new(tileset).with_lexicon_from_words(&["bel", "be", "to", "toe"])?;
        let racks: [Rack; 2] = [board.encode("bel").unwrap(), board.encode("teo").unwrap()];
        let position = GamePosition::new(board, racks);
        assert!(position.bag().is_empty());
        let ranking = Simmer::new(SimParams {
            shortlist: 3,
            trials: 4,
            plies: 3,
            seed: 7,
        })
        .kibitz(&position)?;
        assert!(ranking.complete);
        assert!(!ranking.candidates.is_empty());
        for candidate in &ranking.candidates {
            assert!(candidate.mean.is_finite());
            assert_eq!(candidate.trials, 4);
        }
        Ok(())
    }

    #[test]
    fn test_cancelled_before_start() -> Result<()> {
        let position = position("belto", "oetbl");
        let cancel = CancelToken::new();
        cancel.cancel();
        let ranking = Simmer::new(params(8)).kibitz_cancellable(&position, &cancel)?;
        assert!(!ranking.complete);
        for candidate in &ranking.candidates {
            assert_eq!(candidate.trials, 0);
        }
        Ok(())
    }

    #[test]
    fn test_standard_error_shrinks_with_trials() -> Result<()> {
        // the trial mean's standard error is variance/trials: more trials
        // must not leave it meaningfully larger (tolerance: 2 points, to
        // absorb small-sample noise in the low-trial estimate)
        let position = position("belto", "oetbl");
        let low = Simmer::new(params(4)).kibitz(&position)?;
        let high = Simmer::new(params(64)).kibitz(&position)?;
        let se = |r: &Ranking| {
            let c = &r.candidates[0];
            (c.variance / c.trials as f64).sqrt()
        };
        assert!(se(&high) <= se(&low) + 2.0);
        Ok(())
    }

    #[test]
    fn test_greedy_policy_contract() {
        let position = position("belto", "oetbl");
        let moves = movegen::generate(position.board(), position.rack_to_move());
        assert_eq!(Greedy.choose(&position, &moves), Some(0));
        assert_eq!(Greedy.choose(&position, &[]), None);
    }
}
