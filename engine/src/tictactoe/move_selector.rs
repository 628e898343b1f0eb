use crate::session_rng::SessionRng;
use super::search::ScoredMove;
use super::types::{Player, Position};

/// Moves sharing the extreme score for `mover`: the maximum for X, the minimum for O.
pub fn best_candidates(scored: &[ScoredMove], mover: Player) -> Vec<Position> {
    let scores = scored.iter().map(|m| m.score);
    let target = match mover {
        Player::X => scores.max(),
        Player::O => scores.min(),
    };
    let Some(target) = target else {
        return Vec::new();
    };

    scored
        .iter()
        .filter(|m| m.score == target)
        .map(|m| m.position)
        .collect()
}

/// Picks the best-scoring move, breaking ties uniformly at random.
pub fn select_best_move(
    scored: &[ScoredMove],
    mover: Player,
    rng: &mut SessionRng,
) -> Option<Position> {
    let candidates = best_candidates(scored, mover);
    match candidates.as_slice() {
        [] => None,
        [only] => Some(*only),
        _ => rng.choose(&candidates).copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn scored(entries: &[((usize, usize), i32)]) -> Vec<ScoredMove> {
        entries
            .iter()
            .map(|&((row, col), score)| ScoredMove {
                position: Position::new(row, col),
                score,
            })
            .collect()
    }

    #[test]
    fn test_x_takes_maximum() {
        let moves = scored(&[((0, 0), -3), ((1, 1), 7), ((2, 2), 4)]);
        let mut rng = SessionRng::new(1);
        assert_eq!(select_best_move(&moves, Player::X, &mut rng), Some(Position::new(1, 1)));
    }

    #[test]
    fn test_o_takes_minimum() {
        let moves = scored(&[((0, 0), -3), ((1, 1), 7), ((2, 2), 4)]);
        let mut rng = SessionRng::new(1);
        assert_eq!(select_best_move(&moves, Player::O, &mut rng), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_empty_scores_yield_none() {
        let mut rng = SessionRng::new(1);
        assert_eq!(select_best_move(&[], Player::X, &mut rng), None);
        assert!(best_candidates(&[], Player::O).is_empty());
    }

    #[test]
    fn test_ties_are_broken_among_candidates_only() {
        let moves = scored(&[((0, 0), 5), ((0, 1), 2), ((1, 0), 5), ((2, 2), 5)]);
        let expected: HashSet<Position> =
            [Position::new(0, 0), Position::new(1, 0), Position::new(2, 2)].into_iter().collect();

        let mut rng = SessionRng::new(2024);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let pick = select_best_move(&moves, Player::X, &mut rng).unwrap();
            assert!(expected.contains(&pick));
            seen.insert(pick);
        }
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_same_seed_same_choice() {
        let moves = scored(&[((0, 0), 1), ((0, 1), 1), ((0, 2), 1), ((1, 0), 1)]);
        let picks = |seed| {
            let mut rng = SessionRng::new(seed);
            (0..10)
                .map(|_| select_best_move(&moves, Player::O, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(77), picks(77));
    }
}
