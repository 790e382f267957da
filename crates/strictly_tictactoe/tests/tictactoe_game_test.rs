//! Tests for the turn state machine.

use strictly_tictactoe::{
    Board, Cell, Game, GameError, GameInvariants, GameOutcome, InvariantSet, Move, Player,
    Position, TurnState,
};

#[test]
fn test_lifecycle() {
    let mut game = Game::new();
    assert_eq!(game.to_move(), Some(Player::X));

    let state = game.apply_move(1, 1).expect("valid move");
    assert_eq!(state, TurnState::AwaitingMove(Player::O));
    assert_eq!(
        game.board().cell_at(Position::new(1, 1).unwrap()),
        Cell::Mark(Player::X)
    );
    assert_eq!(
        game.history(),
        &[Move::new(Player::X, Position::new(1, 1).unwrap())]
    );
}

#[test]
fn test_turns_alternate_by_parity() {
    // Nine-move draw; check parity before the final move.
    let moves = [
        (0, 0),
        (1, 1),
        (0, 1),
        (0, 2),
        (2, 0),
        (1, 0),
        (1, 2),
        (2, 1),
    ];
    let mut game = Game::new();
    for (n, (row, col)) in moves.into_iter().enumerate() {
        let expected = if n % 2 == 0 { Player::X } else { Player::O };
        assert_eq!(game.to_move(), Some(expected), "before move {n}");
        game.apply_move(row, col).expect("legal move");
    }
    assert_eq!(game.to_move(), Some(Player::X));
    assert!(GameInvariants::check_all(&game).is_ok());

    assert_eq!(
        game.apply_move(2, 2),
        Ok(TurnState::Terminal(GameOutcome::Draw))
    );
    assert_eq!(game.to_move(), None);
}

#[test]
fn test_out_of_range_leaves_state_unchanged() {
    let mut game = Game::new();
    game.apply_move(0, 0).unwrap();
    let before = game.clone();

    assert_eq!(
        game.apply_move(3, 0),
        Err(GameError::OutOfRange { row: 3, col: 0 })
    );
    assert_eq!(
        game.apply_move(0, 9),
        Err(GameError::OutOfRange { row: 0, col: 9 })
    );
    assert_eq!(game, before);
}

#[test]
fn test_occupied_leaves_state_unchanged() {
    let mut game = Game::new();
    game.apply_move(2, 1).unwrap();
    let before = game.clone();

    let position = Position::new(2, 1).unwrap();
    assert_eq!(
        game.apply_move(2, 1),
        Err(GameError::CellOccupied { position })
    );
    assert_eq!(game, before);
    assert_eq!(game.to_move(), Some(Player::O));
}

#[test]
fn test_replay_from_history() {
    let moves = [
        Move::new(Player::X, Position::new(1, 1).unwrap()),
        Move::new(Player::O, Position::new(0, 0).unwrap()),
        Move::new(Player::X, Position::new(2, 2).unwrap()),
        Move::new(Player::O, Position::new(0, 2).unwrap()),
        Move::new(Player::X, Position::new(2, 0).unwrap()),
    ];

    let game = Game::replay(&moves).expect("valid replay");
    assert_eq!(game.history(), &moves);
    assert_eq!(game.to_move(), Some(Player::O));
    assert_eq!(game.board().count(Player::X), 3);
}

#[test]
fn test_replay_stops_at_terminal() {
    let moves = [
        Move::new(Player::X, Position::new(0, 0).unwrap()),
        Move::new(Player::O, Position::new(1, 0).unwrap()),
        Move::new(Player::X, Position::new(0, 1).unwrap()),
        Move::new(Player::O, Position::new(1, 1).unwrap()),
        Move::new(Player::X, Position::new(0, 2).unwrap()),
        Move::new(Player::O, Position::new(1, 2).unwrap()),
    ];
    assert_eq!(Game::replay(&moves), Err(GameError::GameOver));
}

#[test]
fn test_outcome_is_derived_from_board() {
    let mut game = Game::new();
    for (row, col) in [(0, 2), (0, 0), (1, 1), (1, 0), (2, 0)] {
        game.apply_move(row, col).unwrap();
    }
    assert_eq!(game.outcome(), GameOutcome::Win(Player::X));
    assert_eq!(game.state(), TurnState::Terminal(game.outcome()));
    assert_ne!(*game.board(), Board::new());
}
