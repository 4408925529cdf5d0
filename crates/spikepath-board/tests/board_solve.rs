//! End-to-end board scenarios: encode, simulate, decode, and check the
//! results against replay and an independent breadth-first oracle.

use spikepath_board::{solve, solve_all, Board, BoardError};

/// 9 cells, 4-sided die, ladder 2 -> 6, snake 8 -> 3.
fn reference_board() -> Board {
    Board::from_pairs(9, 4, &[(2, 6)], &[(8, 3)]).unwrap()
}

#[test]
fn scenario_a_single_path_matches_oracle() {
    let board = reference_board();
    let solution = solve(&board, board.default_horizon(), 0).unwrap();

    // Replaying the throws lands exactly on the terminal cell.
    assert_eq!(board.replay(&solution.throws).unwrap(), 9);
    // The sequence is as short as the BFS oracle says it can be.
    assert_eq!(solution.throws.len() as u32, board.min_throws().unwrap());
    // One log line per throw.
    assert_eq!(solution.log.len(), solution.throws.len());
    // The only 2-throw history crosses the ladder.
    assert_eq!(solution.throws, vec![2, 3]);
    assert!(solution.log[0].contains("ladder up to cell 6"));
}

#[test]
fn scenario_b_all_paths_are_minimal_and_distinct() {
    let board = reference_board();
    let solutions = solve_all(&board, board.default_horizon(), 0).unwrap();
    assert!(!solutions.is_empty());

    let min = board.min_throws().unwrap() as usize;
    for solution in &solutions {
        assert_eq!(solution.throws.len(), min);
        assert_eq!(board.replay(&solution.throws).unwrap(), 9);
    }
    for (i, a) in solutions.iter().enumerate() {
        for b in &solutions[i + 1..] {
            assert_ne!(a.throws, b.throws);
        }
    }
}

#[test]
fn all_paths_enumerates_every_ambiguous_history() {
    // 6 cells with a 4-sided die: the 2-throw histories are exactly
    // (2,4), (3,3) and (4,2).
    let board = Board::from_pairs(6, 4, &[], &[]).unwrap();
    let mut solutions = solve_all(&board, board.default_horizon(), 0).unwrap();
    solutions.sort_by(|a, b| a.throws.cmp(&b.throws));

    let throws: Vec<Vec<u32>> = solutions.into_iter().map(|s| s.throws).collect();
    assert_eq!(throws, vec![vec![2, 4], vec![3, 3], vec![4, 2]]);
}

#[test]
fn first_enumerated_history_matches_single_path_decode() {
    let board = Board::from_pairs(6, 4, &[], &[]).unwrap();
    let single = solve(&board, board.default_horizon(), 0).unwrap();
    let all = solve_all(&board, board.default_horizon(), 0).unwrap();
    assert_eq!(all[0], single);
}

#[test]
fn boundary_board_without_jumps_is_dice_sum_shortest_path() {
    for (cells, dice_sides) in [(9u32, 4u32), (10, 4), (12, 5), (7, 7)] {
        let board = Board::from_pairs(cells, dice_sides, &[], &[]).unwrap();
        let solution = solve(&board, board.default_horizon(), 0).unwrap();
        let expected = (cells + dice_sides - 1) / dice_sides; // ceil
        assert_eq!(solution.throws.len() as u32, expected);
        assert_eq!(board.replay(&solution.throws).unwrap(), cells);
    }
}

#[test]
fn too_short_horizon_reports_the_terminal_cell() {
    let board = reference_board();
    let err = solve(&board, 2, 0);
    assert!(matches!(
        err,
        Err(BoardError::HorizonTooShort { cell: 9, steps: 2 })
    ));
}

#[test]
fn larger_board_with_both_jump_kinds() {
    let board = Board::from_pairs(12, 3, &[(4, 9)], &[(11, 2)]).unwrap();
    let solution = solve(&board, board.default_horizon(), 0).unwrap();
    assert_eq!(board.replay(&solution.throws).unwrap(), 12);
    assert_eq!(solution.throws.len() as u32, board.min_throws().unwrap());
}
