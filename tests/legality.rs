// Legal move sets cross-checked against shakmaty, both on fixed positions
// and along a deterministic walk through a game.

use std::collections::BTreeSet;

use arbitro::notation::fen;
use arbitro::{apply_move_command, find_legal_moves, is_king_in_check, GameState, MoveCommand};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position, Role};

fn shakmaty_moves(pos: &Chess) -> BTreeSet<String> {
    pos.legal_moves()
        .iter()
        // Promotion is always to a queen here
        .filter(|m| matches!(m.promotion(), None | Some(Role::Queen)))
        .map(|m| m.to_uci(CastlingMode::Standard).to_string())
        .collect()
}

fn engine_moves(state: &GameState) -> BTreeSet<String> {
    find_legal_moves(state, state.current_player())
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn position(fen_text: &str) -> (GameState, Chess) {
    let parsed: Fen = fen_text.parse().expect("fen");
    let pos: Chess = parsed.into_position(CastlingMode::Standard).expect("position");
    (fen::decode(fen_text).expect("decode"), pos)
}

#[test]
fn fixed_positions_match_oracle() {
    for fen_text in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "4k3/8/8/8/2b5/8/8/R3K2R w KQ - 0 1",
        "4k3/4r3/8/8/8/8/8/R3K2R w KQ - 0 1",
    ] {
        let (state, pos) = position(fen_text);
        assert_eq!(
            engine_moves(&state),
            shakmaty_moves(&pos),
            "move sets differ for '{}'",
            fen_text
        );
    }
}

#[test]
fn deterministic_walk_matches_oracle() {
    let (mut state, mut pos) =
        position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");

    for ply in 0..60usize {
        let ours = engine_moves(&state);
        assert_eq!(ours, shakmaty_moves(&pos), "move sets differ at ply {}", ply);
        if ours.is_empty() {
            break;
        }

        let commands = find_legal_moves(&state, state.current_player());
        let command: MoveCommand = commands[(ply * 7 + 3) % commands.len()];
        let uci = command.to_string();
        let m = pos
            .legal_moves()
            .into_iter()
            .find(|m| m.to_uci(CastlingMode::Standard).to_string() == uci)
            .expect("oracle knows the move");

        state = apply_move_command(&command, &state);
        pos.play_unchecked(&m);
    }
}

#[test]
fn no_legal_move_leaves_own_king_attacked() {
    let (state, _) = position("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1");
    let team = state.current_player();
    for command in find_legal_moves(&state, team) {
        let next = apply_move_command(&command, &state);
        assert!(!is_king_in_check(&next, team), "{} leaves the king in check", command);
        assert_eq!(next.current_player(), team.opponent());
    }
}
