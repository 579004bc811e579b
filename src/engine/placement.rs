//! Choosing where a newly spawned tile lands.
//!
//! The easy and hard strategies rate every empty cell by dropping the new tile there on a
//! throwaway copy of the grid and trying all four moves. Cells that leave the player more legal
//! moves rate better, then cells that allow a bigger merge. Easy takes the best rated cell and
//! hard takes the worst.

use std::cmp::Ordering;

use rand::{Rng, RngCore};

use super::direction::Direction;
use super::grid::{Grid, Score};
use super::tile::{Card, Idx, Tile};
use crate::error::{Error, Result};

/// Picks the cell that receives a new tile of the given value.
pub type PlacementStrategy = fn(&Grid, Card, &mut dyn RngCore) -> Result<Idx>;

/// How a single empty cell would play out if the new tile landed there.
#[derive(Clone, Debug, PartialEq)]
pub struct CellRating {
    pub cell: Idx,
    /// Smallest score among legal moves, `Score::MAX` when no move is legal.
    pub lowest_score: Score,
    /// Largest score among legal moves, zero when no move is legal.
    pub highest_score: Score,
    /// Number of directions that would still move a tile.
    pub directions: usize,
    pub tiebreak: f64,
}

impl CellRating {
    fn rate<R: Rng + ?Sized>(grid: &Grid, cell: Idx, value: Card, rng: &mut R) -> Self {
        let mut lowest_score = Score::MAX;
        let mut highest_score = 0;
        let mut directions = 0;
        let tile = Tile::new(cell.clone(), value);
        for direction in Direction::ALL {
            let mut simulated = grid.clone();
            simulated.insert_tile(&tile);
            let result = simulated.shift(direction);
            if result.moved {
                directions += 1;
                lowest_score = lowest_score.min(result.score);
                highest_score = highest_score.max(result.score);
            }
        }
        Self {
            cell,
            lowest_score,
            highest_score,
            directions,
            tiebreak: rng.gen(),
        }
    }

    // best for the player first
    fn compare(&self, other: &Self) -> Ordering {
        other
            .directions
            .cmp(&self.directions)
            .then(other.highest_score.cmp(&self.highest_score))
            .then(other.tiebreak.total_cmp(&self.tiebreak))
    }
}

/// Rate every empty cell of `grid` for a new tile of `value`, best cell for the player first.
///
/// The grid itself is never modified; each simulated move runs on its own copy.
pub fn rate_cells<R: Rng + ?Sized>(grid: &Grid, value: Card, rng: &mut R) -> Vec<CellRating> {
    let mut ratings = grid
        .available_cells()
        .into_iter()
        .map(|cell| CellRating::rate(grid, cell, value, rng))
        .collect::<Vec<CellRating>>();
    ratings.sort_by(CellRating::compare);
    ratings
}

pub fn easy(grid: &Grid, value: Card, rng: &mut dyn RngCore) -> Result<Idx> {
    rate_cells(grid, value, rng)
        .into_iter()
        .next()
        .map(|rating| rating.cell)
        .ok_or(Error::NoAvailableCells(value))
}

pub fn medium(grid: &Grid, value: Card, rng: &mut dyn RngCore) -> Result<Idx> {
    grid.random_available_cell(rng)
        .ok_or(Error::NoAvailableCells(value))
}

pub fn hard(grid: &Grid, value: Card, rng: &mut dyn RngCore) -> Result<Idx> {
    rate_cells(grid, value, rng)
        .pop()
        .map(|rating| rating.cell)
        .ok_or(Error::NoAvailableCells(value))
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use rstest::*;

    use super::*;
    use crate::config::Difficulty;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn grid(rows: [[Card; 4]; 4]) -> Grid {
        Grid::from_cells(rows.iter().map(|row| row.to_vec()).collect()).expect("square grid")
    }

    // (0, 0) gives the player a merge and three moves, (3, 3) only two moves and no merge
    fn lopsided() -> Grid {
        grid([[0, 2, 4, 2], [4, 8, 16, 4], [2, 4, 2, 8], [4, 2, 4, 0]])
    }

    // both cells leave three legal moves, only (1, 0) lets the new tile merge
    fn equally_mobile() -> Grid {
        grid([[2, 0, 8, 16], [32, 64, 128, 256], [512, 4, 32, 8], [16, 8, 64, 0]])
    }

    #[test]
    fn ratings() {
        let ratings = rate_cells(&lopsided(), 2, &mut rng());
        assert_eq!(ratings.len(), 2);

        let best = &ratings[0];
        assert_eq!(best.cell, Idx(0, 0));
        assert_eq!(best.directions, 3);
        assert_eq!(best.highest_score, 4);
        assert_eq!(best.lowest_score, 0);

        let worst = &ratings[1];
        assert_eq!(worst.cell, Idx(3, 3));
        assert_eq!(worst.directions, 2);
        assert_eq!(worst.highest_score, 0);
        assert_eq!(worst.lowest_score, 0);
    }

    #[test]
    fn equal_mobility_ranks_by_highest_score() {
        for seed in 0..16 {
            let ratings = rate_cells(&equally_mobile(), 2, &mut SmallRng::seed_from_u64(seed));
            assert_eq!(ratings.len(), 2);
            assert_eq!(ratings[0].directions, 3);
            assert_eq!(ratings[1].directions, 3);

            assert_eq!(ratings[0].cell, Idx(1, 0), "seed {}", seed);
            assert_eq!(ratings[0].highest_score, 4);
            assert_eq!(ratings[1].cell, Idx(3, 3), "seed {}", seed);
            assert_eq!(ratings[1].highest_score, 0);
        }
    }

    #[rstest]
    #[case::easy_by_mobility(Difficulty::Easy, lopsided(), Idx(0, 0))]
    #[case::hard_by_mobility(Difficulty::Hard, lopsided(), Idx(3, 3))]
    #[case::easy_by_score(Difficulty::Easy, equally_mobile(), Idx(1, 0))]
    #[case::hard_by_score(Difficulty::Hard, equally_mobile(), Idx(3, 3))]
    fn strategy_picks(#[case] difficulty: Difficulty, #[case] g: Grid, #[case] expected: Idx) {
        for seed in 0..16 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let cell = (difficulty.strategy())(&g, 2, &mut rng).expect("cell");
            assert_eq!(cell, expected, "seed {}", seed);
        }
    }

    #[test]
    fn hard_prefers_corners_on_empty_grid() {
        let corners = [Idx(0, 0), Idx(3, 0), Idx(0, 3), Idx(3, 3)];
        for seed in 0..16 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let cell = hard(&Grid::new(4), 2, &mut rng).expect("cell");
            assert!(corners.contains(&cell), "seed {} picked {}", seed, cell);
        }
    }

    #[test]
    fn easy_prefers_centre_on_empty_grid() {
        let centre = [Idx(1, 1), Idx(2, 1), Idx(1, 2), Idx(2, 2)];
        for seed in 0..16 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let cell = easy(&Grid::new(4), 2, &mut rng).expect("cell");
            assert!(centre.contains(&cell), "seed {} picked {}", seed, cell);
        }
    }

    #[test]
    fn medium_picks_an_empty_cell() {
        let g = lopsided();
        let mut rng = rng();
        for _ in 0..16 {
            let cell = medium(&g, 4, &mut rng).expect("cell");
            assert_eq!(g.get(&cell), 0);
        }
    }

    #[test]
    fn ratings_are_sorted_best_first() {
        let ratings = rate_cells(&Grid::new(4), 2, &mut rng());
        assert_eq!(ratings.len(), 16);
        for pair in ratings.windows(2) {
            assert_ne!(pair[0].compare(&pair[1]), Ordering::Greater);
            assert!(pair[0].directions >= pair[1].directions);
        }
    }

    #[test]
    fn rating_leaves_grid_untouched() {
        let g = lopsided();
        let before = g.clone();
        let _ = rate_cells(&g, 2, &mut rng());
        assert_eq!(g, before);
    }

    #[rstest]
    #[case::easy(Difficulty::Easy)]
    #[case::medium(Difficulty::Medium)]
    #[case::hard(Difficulty::Hard)]
    fn full_grid_fails_fast(#[case] difficulty: Difficulty) {
        let full = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let result = (difficulty.strategy())(&full, 2, &mut rng());
        assert!(matches!(result, Err(Error::NoAvailableCells(2))));
    }
}
