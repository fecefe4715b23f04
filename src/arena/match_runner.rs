//! Turn loop between two agents.

use crate::agents::Agent;
use crate::arena::game_record::GameRecord;
use crate::game::game_state::GameState;
use crate::game::othello::OthelloBoard;
use crate::game::player::Player;
use crate::{OthelloMctsError, Result};

/// 60 placements plus room for passes.
pub const MAX_TURNS: usize = 128;

/// Plays `board` to the end with `black` and `white` choosing moves for their
/// side. Every chosen move is checked for legality. When `show_board` is set
/// the board is printed before each turn.
pub fn play_game(
    mut board: OthelloBoard,
    black: &mut dyn Agent,
    white: &mut dyn Agent,
    show_board: bool,
) -> Result<GameRecord> {
    let mut record = GameRecord::new(black.name(), white.name());

    while !board.is_terminal() && record.moves.len() < MAX_TURNS {
        let Some(player) = board.current_player() else {
            break;
        };
        if show_board {
            println!("\n{}", board);
        }

        let agent: &mut dyn Agent = match player {
            Player::Black => &mut *black,
            Player::White => &mut *white,
        };
        log::debug!("{}'s turn ({})", player, agent.name());

        match agent.choose_move(&board)? {
            Some(mv) => {
                board.play(mv)?;
                record.record_move(player, Some(mv));
            }
            None if board.legal_moves().is_empty() => {
                log::info!("{} has no valid moves. Passing to next player.", player);
                board.pass();
                record.record_move(player, None);
            }
            None => {
                return Err(OthelloMctsError::Agent(format!(
                    "{} passed while legal moves were available",
                    agent.name()
                )))
            }
        }
    }

    if show_board {
        println!("\n{}", board);
    }

    let (black_score, white_score) = board.score();
    record.black_score = black_score;
    record.white_score = white_score;
    record.finished = board.is_terminal();
    record.winner = board.winner();
    log::info!("{}", record.summary());
    Ok(record)
}
