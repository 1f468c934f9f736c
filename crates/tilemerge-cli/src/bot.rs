use rand::{SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;
use serde::Serialize;
use tilemerge_engine::{Board, Direction, line};

/// Move selection strategy of a bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, derive_more::Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Uniformly random among the directions that change the grid.
    #[display("random")]
    Random,
    /// One-ply lookahead: most points, then most empty cells.
    #[display("greedy")]
    Greedy,
}

#[derive(Debug, Clone)]
pub struct Bot {
    strategy: Strategy,
    rng: Pcg32,
}

impl Bot {
    pub fn new(strategy: Strategy, rng: Pcg32) -> Self {
        Self { strategy, rng }
    }

    pub fn from_entropy(strategy: Strategy) -> Self {
        Self::new(strategy, Pcg32::from_rng(&mut rand::rng()))
    }

    /// Picks the next direction, or `None` when no move changes the grid.
    pub fn choose(&mut self, board: &Board) -> Option<Direction> {
        let values = board.cell_values();
        let candidates: Vec<_> = Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                let (next, gained) = line::slide_values(&values, direction);
                (next != values).then(|| {
                    let empty = next.iter().flatten().filter(|&&v| v == 0).count();
                    (direction, gained, empty)
                })
            })
            .collect();

        match self.strategy {
            Strategy::Random => candidates.choose(&mut self.rng).map(|&(d, _, _)| d),
            Strategy::Greedy => candidates
                .iter()
                .max_by_key(|&&(_, gained, empty)| (gained, empty))
                .map(|&(d, _, _)| d),
        }
    }
}
