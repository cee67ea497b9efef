use arbitro::notation::{fen, START_FEN};
use arbitro::perft;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position, Role};

fn perft_shakmaty(pos: &Chess, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0u64;
    for m in pos.legal_moves() {
        if !matches!(m.promotion(), None | Some(Role::Queen)) {
            continue;
        }
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += perft_shakmaty(&new_pos, depth - 1);
    }
    nodes
}

fn compare(fen_text: &str, max_depth: u32) {
    let parsed: Fen = fen_text.parse().expect("fen");
    let pos: Chess = parsed.into_position(CastlingMode::Standard).expect("position");
    let state = fen::decode(fen_text).expect("decode");

    for depth in 1..=max_depth {
        let expected = perft_shakmaty(&pos, depth);
        let got = perft(&state, depth);
        assert_eq!(
            got, expected,
            "perft mismatch for '{}' at depth {}: got {} expected {}",
            fen_text, depth, got, expected
        );
    }
}

#[test]
fn perft_regression_starting_pos() {
    compare(START_FEN, 3);
}

#[test]
fn perft_kiwipete() {
    // Castling on both wings, pins and plenty of captures
    compare("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", 2);
}

#[test]
fn perft_rook_endgame_with_en_passant_pins() {
    compare("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 3);
}

#[test]
fn perft_counts_queen_promotions_only() {
    // a8=Q and bxa8=Q are each counted once
    compare("r3k3/1P6/8/8/8/8/6p1/4K3 w - - 0 1", 3);
    let state = fen::decode("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(perft(&state, 1), 6);
}

#[test]
fn perft_known_start_counts() {
    let state = fen::decode(START_FEN).unwrap();
    assert_eq!(perft(&state, 1), 20);
    assert_eq!(perft(&state, 2), 400);
    assert_eq!(perft(&state, 3), 8902);
}
