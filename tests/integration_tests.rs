//! Integration tests for shogi-rules
//!
//! Public-API scenarios plus property checks that run over seeded random
//! self-play, so every run sees the same games.

use shogi_rules::agent::{CapturePolicy, Policy, RandomPolicy};
use shogi_rules::movegen;
use shogi_rules::rules;
use shogi_rules::selfplay::{self, Ending};
use shogi_rules::snapshot::Snapshot;
use shogi_rules::{
    Color, GameEngine, GameStatus, IllegalDrop, Move, Piece, PieceKind, Position, sfen,
};

// =============================================================================
// Helper functions
// =============================================================================

fn at(square: &str) -> Position {
    square.parse().unwrap()
}

fn game_from(text: &str) -> GameEngine {
    sfen::parse(text).unwrap()
}

/// Total pieces on the board and in both hands.
fn total_material(game: &GameEngine) -> u32 {
    game.material(Color::Black) + game.material(Color::White)
}

/// Check every invariant that must hold in any reachable position.
fn assert_position_invariants(game: &GameEngine) {
    let board = game.board();
    for color in Color::ALL {
        assert!(board.find_king(color).is_some(), "{color} king vanished");
        assert_eq!(game.hand(color).count(PieceKind::King), 0);
    }
    assert_eq!(total_material(game), 40);

    for (from, piece) in board.pieces() {
        for to in movegen::candidates(board, from, piece) {
            let own = board.get(to).is_some_and(|p| p.color == piece.color);
            assert!(!own, "{piece} on {from} targets its own piece on {to}");
        }
        if !piece.promoted {
            assert!(
                !rules::is_dead_end(piece.kind, piece.color, from.row()),
                "unpromoted {piece} stuck on {from}"
            );
        }
    }

    for color in Color::ALL {
        for col in 0..9 {
            let pawns = (0..9)
                .filter(|&row| {
                    board.get(Position::at(row, col)).is_some_and(|p| {
                        p.kind == PieceKind::Pawn && p.color == color && !p.promoted
                    })
                })
                .count();
            assert!(pawns <= 1, "{color} has {pawns} pawns on column {col}");
        }
    }
}

/// Play one random game and check invariants after every ply.
fn random_game(seed: u64, max_plies: usize) {
    let mut game = GameEngine::new();
    let mut black = RandomPolicy::with_seed(seed);
    let mut white = RandomPolicy::with_seed(seed ^ 0x5eed);

    for _ in 0..max_plies {
        if game.status().is_over() {
            break;
        }
        let mover = game.side_to_move();
        let policy: &mut dyn Policy = match mover {
            Color::Black => &mut black,
            Color::White => &mut white,
        };
        let mv = policy.choose(&game).expect("ongoing game has a legal action");
        let victim = match mv {
            Move::Board { to, .. } => game.piece_at(to),
            Move::Drop { .. } => None,
        };
        let mover_before = game.material(mover);

        assert!(game.apply(mv), "{mv} was listed as legal but rejected");
        assert!(!game.is_in_check(mover), "{mover} left in check after {mv}");
        assert_eq!(game.side_to_move(), mover.opponent());
        let expected = mover_before + u32::from(victim.is_some());
        assert_eq!(game.material(mover), expected, "capture accounting after {mv}");
        assert_position_invariants(&game);
    }
}

// =============================================================================
// Opening and basic moves
// =============================================================================

#[test]
fn test_opening_setup() {
    let game = GameEngine::new();
    assert_eq!(game.side_to_move(), Color::Black);
    assert_eq!(game.board().count(Color::Black), 20);
    assert_eq!(game.board().count(Color::White), 20);
    assert!(game.hand(Color::Black).is_empty());
    assert!(game.hand(Color::White).is_empty());
    assert_position_invariants(&game);
}

#[test]
fn test_pawn_step_from_opening() {
    let mut game = GameEngine::new();
    assert!(game.make_move(at("7g"), at("7f")));
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.piece_at(at("7g")), None);
    let pawn = game.piece_at(at("7f")).unwrap();
    assert_eq!(pawn, Piece::new(PieceKind::Pawn, Color::Black));
    assert!(!pawn.promoted);
}

#[test]
fn test_rejected_move_changes_nothing() {
    let mut game = GameEngine::new();
    let before = game.clone();
    assert!(!game.make_move(at("7g"), at("7e")));
    assert!(!game.make_move(at("3c"), at("3d")));
    assert!(!game.make_move(at("5e"), at("5d")));
    assert_eq!(game, before);
}

#[test]
fn test_legal_moves_ignore_turn() {
    let game = GameEngine::new();
    // Black lance stops below its own pawn; White pawn listed on Black's turn.
    assert_eq!(game.legal_moves(at("9i")), vec![at("9h")]);
    assert_eq!(game.legal_moves(at("1c")), vec![at("1d")]);
}

// =============================================================================
// Promotion and capture
// =============================================================================

#[test]
fn test_pawn_reaching_last_rank_promotes() {
    let mut game = game_from("4k4/2P6/9/9/9/9/9/9/4K4 b - 1");
    let before = game.piece_at(at("7b")).unwrap().symbol();
    let outcome = game.try_move(at("7b"), at("7a")).unwrap();
    assert!(outcome.promoted);
    let pawn = game.piece_at(at("7a")).unwrap();
    assert!(pawn.promoted);
    assert_ne!(pawn.symbol(), before);
    assert_eq!(pawn.symbol(), "+P");
}

#[test]
fn test_entering_the_zone_promotes() {
    let mut game = game_from("4k4/9/9/2P6/9/9/9/9/4K4 b - 1");
    assert!(game.make_move(at("7d"), at("7c")));
    let tokin = Piece::new_promoted(PieceKind::Pawn, Color::Black);
    assert_eq!(game.piece_at(at("7c")), Some(tokin));
}

#[test]
fn test_capturing_promoted_piece_returns_it_unpromoted() {
    // White tokin on 5h checks the black king, which takes it.
    let mut game = game_from("4k4/9/9/9/9/9/9/4+p4/4K4 b - 1");
    assert!(game.is_in_check(Color::Black));
    let outcome = game.try_move(at("5i"), at("5h")).unwrap();
    assert_eq!(outcome.captured, Some(PieceKind::Pawn));
    assert_eq!(game.hand(Color::Black).count(PieceKind::Pawn), 1);
    assert_eq!(game.material(Color::White), 1);
    assert_eq!(game.material(Color::Black), 2);

    // The pawn comes back as a plain black pawn.
    assert!(game.make_move(at("5a"), at("4a")));
    assert!(game.drop_piece(PieceKind::Pawn, at("5e")));
    assert_eq!(game.piece_at(at("5e")), Some(Piece::new(PieceKind::Pawn, Color::Black)));
}

// =============================================================================
// Drops
// =============================================================================

#[test]
fn test_nifu_is_rejected_without_state_change() {
    let mut game = game_from("4k4/9/9/9/9/9/4P4/9/4K4 b P 1");
    let before = game.clone();
    assert_eq!(game.try_drop(PieceKind::Pawn, at("5e")), Err(IllegalDrop::Nifu));
    assert_eq!(game, before);
    assert!(game.drop_piece(PieceKind::Pawn, at("4e")));
    assert!(game.hand(Color::Black).is_empty());
}

#[test]
fn test_pawn_drop_mate_is_rejected() {
    // White king on 1a hemmed in by its own lance and pawn; black gold on 1c
    // guards 1b.
    let mut game = game_from("7lk/7p1/8G/9/9/9/9/9/4K4 b GP 1");
    let before = game.clone();
    assert_eq!(game.try_drop(PieceKind::Pawn, at("1b")), Err(IllegalDrop::PawnDropMate));
    assert_eq!(game, before);
    assert_eq!(game.hand(Color::Black).count(PieceKind::Pawn), 1);

    // Mating with a gold drop is fine.
    assert!(game.drop_piece(PieceKind::Gold, at("1b")));
    assert!(game.is_checkmate(Color::White));
    assert!(game.is_game_over(Color::White));
    assert_eq!(game.status(), GameStatus::Checkmate { loser: Color::White });
}

#[test]
fn test_pawn_drop_check_with_escape_is_allowed() {
    // A lance on 1e guards 1b, but 2b stays open for the king.
    let mut game = game_from("7lk/9/9/9/8L/9/9/9/4K4 b P 1");
    assert!(game.drop_piece(PieceKind::Pawn, at("1b")));
    assert!(game.is_in_check(Color::White));
    assert!(!game.is_checkmate(Color::White));
}

#[test]
fn test_drop_by_name() {
    let mut game = game_from("4k4/9/9/9/9/9/9/9/4K4 b S 1");
    assert!(game.drop_piece_named("SilverGeneral", at("5e")).unwrap());
    assert!(game.drop_piece_named("Dragon", at("5f")).is_err());
}

// =============================================================================
// Game end
// =============================================================================

#[test]
fn test_impasse_declared() {
    let game = game_from("9/4K4/9/9/9/9/9/4k4/9 b 2R2B11P4g4s4n4l4p 1");
    let result = game.check_impasse();
    assert!(result.is_impasse);
    assert_eq!(result.winner, Some(Color::Black));
    assert_eq!(result.black_points, 31);
    assert_eq!(result.white_points, 20);
    assert_eq!(game.status(), GameStatus::Impasse(result));
    assert_eq!(game.status().winner(), Some(Color::Black));
}

#[test]
fn test_missing_king_is_game_over() {
    let game = game_from("9/9/9/9/9/9/9/9/4K4 w - 1");
    assert!(game.is_game_over(Color::White));
    assert!(!game.is_in_check(Color::White));
    assert_eq!(game.status(), GameStatus::KingLost { loser: Color::White });
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_snapshot_round_trip_after_play() {
    let mut game = GameEngine::new();
    let mut policy = CapturePolicy::with_seed(9);
    for _ in 0..40 {
        if game.status().is_over() {
            break;
        }
        let mv = policy.choose(&game).unwrap();
        assert!(game.apply(mv));
    }
    let json = game.snapshot().to_json().unwrap();
    let restored = GameEngine::restore(&Snapshot::from_json(&json).unwrap()).unwrap();
    assert_eq!(restored, game);
    assert_eq!(restored.to_sfen(), game.to_sfen());
    assert_eq!(sfen::parse(&game.to_sfen()).unwrap(), game);
}

// =============================================================================
// Randomized properties
// =============================================================================

#[test]
fn test_random_games_keep_invariants() {
    for seed in [1, 2, 3] {
        random_game(seed, 120);
    }
}

#[test]
fn test_every_listed_action_is_accepted() {
    let mut game = GameEngine::new();
    let mut policy = RandomPolicy::with_seed(77);
    for _ in 0..30 {
        for mv in game.legal_actions() {
            let accepted = match mv {
                Move::Board { from, to } => game.validate_move(from, to).is_ok(),
                Move::Drop { kind, to } => game.validate_drop(kind, to).is_ok(),
            };
            assert!(accepted, "{mv} listed but not valid");
            let mut copy = game.clone();
            assert!(copy.apply(mv));
        }
        match policy.choose(&game) {
            Some(mv) => assert!(game.apply(mv)),
            None => break,
        }
    }
}

#[test]
fn test_selfplay_batch() {
    let config = selfplay::Config {
        games: 2,
        seed: 3,
        max_plies: 80,
        ..selfplay::Config::default()
    };
    let summary = selfplay::run(&config);
    assert_eq!(summary.games, 2);
    assert!(summary.total_plies > 0);

    let mut black = CapturePolicy::with_seed(1);
    let mut white = CapturePolicy::with_seed(2);
    let record = selfplay::play_game(GameEngine::new(), &mut black, &mut white, 300);
    assert!(!matches!(record.ending, Ending::Rejected { .. }));
    assert_position_invariants(&record.final_position);
}
