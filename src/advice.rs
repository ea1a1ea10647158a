//! Prompt text for the coaching service. Only formatting happens here, the
//! request itself belongs to the caller.

use crate::core::engine::{board_to_string, Board, Player};

/// Name used in front of players, Red is presented as Blue.
pub fn player_display_name(player: Player) -> &'static str {
    match player {
        Player::White => "White",
        Player::Red => "Blue",
    }
}

pub fn advisory_prompt(board: &Board, player: Player) -> String {
    let name = player_display_name(player);
    let board = board_to_string(board);
    format!(
        "You are an expert Turkish Dama coach.
Analyze the following board state.

Current Player: {name}

Board Representation ([ ] is empty, [B] is Blue, [W] is White, [BK]/[WK] are Kings):
{board}
Board Orientation:
- Row 0 is top. Row 7 is bottom.
- White starts on rows 1-2 and moves DOWN (increasing row index).
- Blue starts on rows 5-6 and moves UP (decreasing row index).
- Pieces move orthogonally, never diagonally. Captures are mandatory.

Task:
Provide a very brief, strategic tip (max 2 sentences) for the {name} player.
Do not describe the board back to me. Just give the advice.
"
    )
}
