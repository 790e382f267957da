//! Console adapters: keyboard moves in, board and results out.

use crate::input::parse_coordinates;
use std::io::{self, BufRead, Write};
use strictly_tictactoe::{Board, EventSink, GameError, GameEvent, MoveSource, Player, Position};
use tracing::{debug, warn};

/// Source of input lines.
pub trait LineInput {
    /// Reads one line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

impl<R: BufRead> LineInput for R {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if BufRead::read_line(self, &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Process standard input, shared line by line with other readers.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinInput;

impl LineInput for StdinInput {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Reads `row, col` entries typed at the console.
///
/// Malformed lines are answered with a hint and a fresh prompt; only
/// well-formed pairs reach the game.
pub struct ConsoleMoveSource<I, W> {
    input: I,
    output: W,
}

impl<I: LineInput, W: Write> ConsoleMoveSource<I, W> {
    /// Creates a move source over the given input and output.
    pub fn new(input: I, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, player: Player) -> io::Result<()> {
        writeln!(self.output, "{player}'s turn.")?;
        writeln!(self.output, "Where do you want your {player} placed?")?;
        writeln!(
            self.output,
            "Please enter row number and column number separated by a comma."
        )?;
        self.output.flush()
    }

    fn read_move(&mut self, player: Player) -> io::Result<Option<(usize, usize)>> {
        loop {
            self.prompt(player)?;
            let Some(line) = self.input.read_line()? else {
                return Ok(None);
            };

            match parse_coordinates(&line) {
                Ok((row, col)) => {
                    writeln!(self.output, "You have entered row #{row}")?;
                    writeln!(self.output, "{:>20} #{col}", "and column")?;
                    return Ok(Some((row, col)));
                }
                Err(error) => {
                    debug!(%player, input = %line, "Unparseable entry");
                    writeln!(self.output, "{error}")?;
                    writeln!(self.output)?;
                }
            }
        }
    }
}

impl<I: LineInput, W: Write> MoveSource for ConsoleMoveSource<I, W> {
    fn next_move(&mut self, _board: &Board, player: Player) -> Option<(usize, usize)> {
        match self.read_move(player) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Console input failed");
                None
            }
        }
    }
}

/// Formats the board with row and column labels.
pub fn render_board(board: &Board) -> String {
    const RULE: &str = "-----------------";
    let mut result = format!("{RULE}\n|R\\C| 0 | 1 | 2 |\n{RULE}\n");
    for row in 0..3 {
        result.push_str(&format!("| {row} |"));
        for position in Position::ALL.iter().filter(|p| p.row() == row) {
            let symbol = board
                .cell_at(*position)
                .player()
                .map_or_else(|| " ".to_string(), |player| player.to_string());
            result.push_str(&format!(" {symbol} |"));
        }
        result.push('\n');
        result.push_str(RULE);
        result.push('\n');
    }
    result
}

/// Prints session events to the console.
pub struct ConsoleRenderer<W> {
    output: W,
    humans: Vec<Player>,
}

impl<W: Write> ConsoleRenderer<W> {
    /// Creates a renderer; moves by `humans` are acknowledged, others announced.
    pub fn new(output: W, humans: &[Player]) -> Self {
        Self {
            output,
            humans: humans.to_vec(),
        }
    }

    fn render(&mut self, event: &GameEvent) -> io::Result<()> {
        match event {
            GameEvent::GameStarted => {
                writeln!(self.output)?;
                writeln!(self.output, "New Game: X goes first.")?;
                writeln!(self.output)?;
                writeln!(self.output, "{}", render_board(&Board::new()))?;
            }
            GameEvent::MoveApplied {
                player,
                position,
                board,
                fallback,
            } => {
                if self.humans.contains(player) {
                    writeln!(self.output, "Thank you for your selection.")?;
                } else {
                    let verb = if *fallback {
                        "falls back and places"
                    } else {
                        "places"
                    };
                    writeln!(
                        self.output,
                        "Computer {verb} {player} at row #{} and column #{}",
                        position.row(),
                        position.col()
                    )?;
                }
                writeln!(self.output)?;
                writeln!(self.output, "{}", render_board(board))?;
            }
            GameEvent::MoveRejected { error, .. } => {
                match error {
                    GameError::CellOccupied { .. } => {
                        writeln!(self.output, "That cell is already taken.")?;
                        writeln!(self.output, "Please make another selection.")?;
                    }
                    GameError::OutOfRange { .. } => {
                        writeln!(self.output, "Invalid entry: try again.")?;
                        writeln!(self.output, "Row & column numbers must be either 0, 1, or 2.")?;
                    }
                    other => writeln!(self.output, "{other}")?,
                }
                writeln!(self.output)?;
            }
            GameEvent::OutcomeReached(outcome) => {
                if let Some(player) = outcome.winner() {
                    writeln!(self.output, "{player} IS THE WINNER!!!")?;
                } else if outcome.is_draw() {
                    writeln!(self.output, "DRAW! NOBODY WINS!")?;
                }
            }
        }
        self.output.flush()
    }
}

impl<W: Write> EventSink for ConsoleRenderer<W> {
    fn notify(&mut self, event: &GameEvent) {
        if let Err(e) = self.render(event) {
            warn!(error = %e, "Failed to render event");
        }
    }
}

/// Asks whether to play again; true only for answers starting with `y`.
pub fn ask_replay(input: &mut impl LineInput, output: &mut impl Write) -> io::Result<bool> {
    writeln!(output)?;
    writeln!(output, "Another game? Enter Y or y for yes.")?;
    output.flush()?;
    Ok(input
        .read_line()?
        .is_some_and(|answer| answer.trim().to_lowercase().starts_with('y')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use strictly_tictactoe::GameOutcome;

    #[test]
    fn test_reprompts_until_well_formed() {
        let input = Cursor::new("\n7\n1 x\n2,1\n");
        let mut source = ConsoleMoveSource::new(input, Vec::new());

        assert_eq!(source.next_move(&Board::new(), Player::X), Some((2, 1)));
        assert_eq!(source.next_move(&Board::new(), Player::X), None);

        let transcript = String::from_utf8(source.output).unwrap();
        assert_eq!(transcript.matches("X's turn.").count(), 5);
        assert!(transcript.contains("You entered only one number: 7"));
        assert!(transcript.contains("You have entered row #1\n          and column #x"));
        assert!(transcript.contains("You have entered row #2\n          and column #1"));
    }

    #[test]
    fn test_render_board() {
        let mut board = Board::new();
        board.set_cell(Position::new(0, 0).unwrap(), Player::X).unwrap();
        board.set_cell(Position::new(2, 1).unwrap(), Player::O).unwrap();

        let expected = "\
-----------------
|R\\C| 0 | 1 | 2 |
-----------------
| 0 | X |   |   |
-----------------
| 1 |   |   |   |
-----------------
| 2 |   | O |   |
-----------------
";
        assert_eq!(render_board(&board), expected);
    }

    #[test]
    fn test_renderer_messages() {
        let mut renderer = ConsoleRenderer::new(Vec::new(), &[Player::X]);
        let mut board = Board::new();
        let center = Position::new(1, 1).unwrap();
        board.set_cell(center, Player::O).unwrap();

        renderer.notify(&GameEvent::MoveApplied {
            player: Player::O,
            position: center,
            board,
            fallback: false,
        });
        renderer.notify(&GameEvent::MoveApplied {
            player: Player::O,
            position: Position::new(2, 0).unwrap(),
            board,
            fallback: true,
        });
        renderer.notify(&GameEvent::MoveRejected {
            player: Player::X,
            error: GameError::CellOccupied { position: center },
        });
        renderer.notify(&GameEvent::OutcomeReached(GameOutcome::Draw));

        let transcript = String::from_utf8(renderer.output.clone()).unwrap();
        assert!(transcript.contains("Computer places O at row #1 and column #1"));
        assert!(transcript.contains("Computer falls back and places O at row #2 and column #0"));
        assert!(transcript.contains("That cell is already taken."));
        assert!(transcript.ends_with("DRAW! NOBODY WINS!\n"));

        renderer.output.clear();
        renderer.notify(&GameEvent::OutcomeReached(GameOutcome::Win(Player::X)));
        renderer.notify(&GameEvent::OutcomeReached(GameOutcome::InProgress));
        assert_eq!(
            String::from_utf8(renderer.output).unwrap(),
            "X IS THE WINNER!!!\n"
        );
    }

    #[test]
    fn test_ask_replay() {
        let mut out = Vec::new();
        assert!(ask_replay(&mut Cursor::new("Yes please\n"), &mut out).unwrap());
        assert!(ask_replay(&mut Cursor::new("y\n"), &mut out).unwrap());
        assert!(!ask_replay(&mut Cursor::new("no\n"), &mut out).unwrap());
        assert!(!ask_replay(&mut Cursor::new(""), &mut out).unwrap());
    }
}
