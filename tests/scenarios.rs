use sweeper_logic::{
    play, Board, BoardConfig, Cell, Constraint, GameOutcome, KnowledgeBase, MoveKind, ScriptedRng,
    SweeperRng,
};

fn row(cells: &[usize]) -> Vec<Cell> {
    cells.iter().map(|&col| Cell::new(0, col)).collect()
}

#[test]
fn subset_pair_frees_extra_cell() {
    let mut kb = KnowledgeBase::new(1, 3);
    kb.add_constraint(Constraint::new(row(&[0, 1, 2]), 1));
    kb.add_constraint(Constraint::new(row(&[0, 1]), 1));

    assert!(kb.is_known_safe(Cell::new(0, 2)));
    assert_eq!(kb.safe_move(), Some(Cell::new(0, 2)));
}

#[test]
fn one_two_one_pattern_is_solved_by_subsets() {
    // Row 1 is revealed with clues 1 2 1 over three hidden cells in row 0;
    // the classic answer is mine, safe, mine.
    let mut kb = KnowledgeBase::new(2, 3);
    kb.record_clue(Cell::new(1, 0), 1);
    kb.record_clue(Cell::new(1, 1), 2);
    kb.record_clue(Cell::new(1, 2), 1);

    assert!(kb.is_known_mine(Cell::new(0, 0)));
    assert!(kb.is_known_safe(Cell::new(0, 1)));
    assert!(kb.is_known_mine(Cell::new(0, 2)));
    assert!(kb.is_consistent());
}

#[test]
fn agent_clears_board_after_opening_guess() {
    // Two mines in opposite corners of a 4x4 board. Every safe cell touches
    // a zero, so one opening guess on a zero is enough.
    let mines = [Cell::new(0, 0), Cell::new(3, 3)];
    let mut board = Board::from_mines(4, 4, &mines).unwrap();
    let mut kb = KnowledgeBase::new(4, 4);
    // Index 3 in row-major order is (0, 3), which touches no mine.
    let mut rng = ScriptedRng::new(vec![3]);

    let report = play(&mut board, &mut kb, &mut rng);

    assert_eq!(report.outcome, GameOutcome::Won);
    assert_eq!(report.guesses, 1);
    assert_eq!(report.moves, board.safe_cell_count());
    assert!(board.won());
}

#[test]
fn exhausted_knowledge_offers_no_move() {
    let mut kb = KnowledgeBase::new(2, 2);
    kb.record_clue(Cell::new(0, 0), 3);
    for cell in [Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)] {
        assert!(kb.is_known_mine(cell));
    }

    let mut rng = SweeperRng::from_seed(5);
    assert_eq!(kb.safe_move(), None);
    assert_eq!(kb.random_move(2, 2, &mut rng), None);
}

#[test]
fn seeded_games_are_reproducible() {
    let run = |seed| {
        let mut rng = SweeperRng::from_seed(seed);
        let mut board = Board::random(BoardConfig::beginner(), &mut rng).unwrap();
        let mut kb = KnowledgeBase::new(board.height(), board.width());
        let report = play(&mut board, &mut kb, &mut rng);
        (report, kb.snapshot())
    };

    assert_eq!(run(2024), run(2024));
}

#[test]
fn first_move_is_a_guess() {
    let kb = KnowledgeBase::new(5, 5);
    let mv = kb.next_move(&mut SweeperRng::from_seed(1)).unwrap();
    assert_eq!(mv.kind, MoveKind::Guess);
    assert!(mv.cell.in_bounds(5, 5));
}
