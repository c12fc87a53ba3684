//! Klondike integration tests.
//!
//! These drive `Solitaire` only through its public entry points and check
//! the table the way a view layer would read it back.

use parlor::core::{Card, GameError, Suit, ACE, DECK_SIZE, KING};
use parlor::games::solitaire::{
    validator, Destination, Layout, MoveOutcome, PileRef, Solitaire, SolitaireAction, SolitaireSnapshot,
};
use serde_json::json;
use parlor::rules::{GameStatus, RulesEngine};

fn up(suit: Suit, rank: u8) -> Card {
    Card::face_up(suit, rank)
}

fn full_suit(suit: Suit) -> Vec<Card> {
    (ACE..=KING).map(|rank| Card::new(suit, rank)).collect()
}

fn game_with(layout: Layout) -> Solitaire {
    Solitaire::builder().seed(0).layout(layout).build()
}

// =============================================================================
// Dealing and drawing
// =============================================================================

/// Test the triangular deal for several seeds.
#[test]
fn test_new_game_layout() {
    for seed in [0, 1, 42, 9999] {
        let game = Solitaire::new(seed);

        for (i, column) in game.tableaus().iter().enumerate() {
            assert_eq!(column.len(), i + 1, "column {} size", i);
            for (j, card) in column.iter().enumerate() {
                assert_eq!(card.face_up, j == i, "column {} card {}", i, j);
            }
        }

        assert_eq!(game.stock().len(), DECK_SIZE - 28);
        assert!(game.stock().iter().all(|c| !c.face_up));
        assert!(game.waste().is_empty());
        assert!(game.foundations().iter().all(|f| f.is_empty()));
        assert_eq!(game.status(), GameStatus::InProgress);
    }
}

/// Test that each draw moves the stock top to the waste face-up.
#[test]
fn test_draw_moves_top_card() {
    let mut game = Solitaire::new(8);
    let expected = game.stock().top().copied().unwrap();

    let outcome = game.draw_stock();

    assert_eq!(outcome, MoveOutcome::Drew(expected.turned_up()));
    assert_eq!(game.waste().top(), Some(&expected.turned_up()));
    assert_eq!(game.stock().len(), 23);
}

/// Test that recycling the waste reverses it face-down into the stock.
#[test]
fn test_recycle_reverses_waste() {
    let mut game = Solitaire::new(21);
    for _ in 0..24 {
        assert!(matches!(game.draw_stock(), MoveOutcome::Drew(_)));
    }
    assert!(game.stock().is_empty());
    let waste: Vec<Card> = game.waste().cards().to_vec();

    assert_eq!(game.draw_stock(), MoveOutcome::Recycled(24));

    assert!(game.waste().is_empty());
    let expected: Vec<Card> = waste.iter().rev().map(|c| c.turned_down()).collect();
    assert_eq!(game.stock().cards(), expected.as_slice());
    assert_eq!(game.total_cards(), DECK_SIZE);
}

/// Test that a stock click through `select_or_move` draws and drops the selection.
#[test]
fn test_stock_click_draws() {
    let mut game = Solitaire::new(4);
    game.select_or_move(PileRef::tableau(6, 6)).unwrap();
    assert!(game.selection().is_some());

    let outcome = game.select_or_move(PileRef::Stock).unwrap();
    assert!(matches!(outcome, MoveOutcome::Drew(_)));
    assert_eq!(game.selection(), None);
}

// =============================================================================
// Placement rules
// =============================================================================

/// Test foundation acceptance rules.
#[test]
fn test_foundation_rules() {
    for suit in Suit::ALL {
        assert!(validator::legal_on_foundation(&up(suit, ACE), &[]));
        assert!(!validator::legal_on_foundation(&up(suit, 5), &[]));
    }

    let hearts = [up(Suit::Hearts, ACE)];
    assert!(!validator::legal_on_foundation(&up(Suit::Spades, ACE), &hearts));
    assert!(validator::legal_on_foundation(&up(Suit::Hearts, 2), &hearts));
}

/// Test tableau acceptance rules.
#[test]
fn test_tableau_rules() {
    let red_eight = [up(Suit::Diamonds, 8)];
    assert!(!validator::legal_on_tableau(&up(Suit::Hearts, 7), &red_eight));
    assert!(validator::legal_on_tableau(&up(Suit::Spades, 7), &red_eight));

    assert!(validator::legal_on_tableau(&up(Suit::Spades, KING), &[]));
    assert!(!validator::legal_on_tableau(&up(Suit::Spades, 12), &[]));
}

/// Test that a multi-card run never lands on a foundation.
#[test]
fn test_run_to_foundation_rejected() {
    let layout = Layout::builder()
        .foundation(0, [Card::new(Suit::Hearts, ACE)])
        .tableau(0, [up(Suit::Hearts, 2), up(Suit::Spades, ACE)])
        .build()
        .unwrap();
    let mut game = game_with(layout);

    // 2♥ alone would go up; with A♠ on it the run is refused
    let outcome = game.attempt_move(PileRef::tableau(0, 0), Destination::Foundation(0)).unwrap();
    assert_eq!(outcome, MoveOutcome::Rejected);
    assert_eq!(game.foundation(0).unwrap().len(), 1);
    assert_eq!(game.tableau(0).unwrap().len(), 2);
}

/// Test moving a foundation top back down onto the tableau.
#[test]
fn test_foundation_to_tableau() {
    let layout = Layout::builder()
        .foundation(2, (ACE..=5).map(|r| Card::new(Suit::Diamonds, r)))
        .tableau(4, [up(Suit::Clubs, 6)])
        .build()
        .unwrap();
    let mut game = game_with(layout);

    assert_eq!(
        game.select_or_move(PileRef::Foundation(2)).unwrap(),
        MoveOutcome::Selected(PileRef::Foundation(2))
    );
    let outcome = game.select_or_move(PileRef::tableau(4, 0)).unwrap();

    assert!(outcome.changed_table());
    assert_eq!(game.foundation(2).unwrap().len(), 4);
    assert_eq!(game.tableau(4).unwrap().top(), Some(&up(Suit::Diamonds, 5)));
}

/// Test that a tableau run moves as a unit and reveals the card beneath.
#[test]
fn test_run_moves_together() {
    let layout = Layout::builder()
        .tableau(
            0,
            [
                Card::new(Suit::Spades, 4),
                up(Suit::Spades, 9),
                up(Suit::Hearts, 8),
                up(Suit::Clubs, 7),
            ],
        )
        .tableau(3, [up(Suit::Diamonds, 10)])
        .build()
        .unwrap();
    let mut game = game_with(layout);

    let outcome = game.drop_onto(Destination::Tableau(3), PileRef::tableau(0, 1)).unwrap();

    assert_eq!(
        outcome,
        MoveOutcome::Moved {
            from: PileRef::tableau(0, 1),
            to: Destination::Tableau(3),
            cards: 3,
        }
    );
    assert_eq!(
        game.tableau(3).unwrap().cards(),
        &[up(Suit::Diamonds, 10), up(Suit::Spades, 9), up(Suit::Hearts, 8), up(Suit::Clubs, 7)]
    );
    assert_eq!(game.tableau(0).unwrap().cards(), &[up(Suit::Spades, 4)]);
}

/// Test that dragging a face-down card does nothing.
#[test]
fn test_drag_face_down_rejected() {
    let layout = Layout::builder()
        .tableau(0, [Card::new(Suit::Spades, KING), up(Suit::Hearts, 3)])
        .build()
        .unwrap();
    let mut game = game_with(layout);
    let before = game.layout().clone();

    let outcome = game.drop_onto(Destination::Tableau(1), PileRef::tableau(0, 0)).unwrap();

    assert_eq!(outcome, MoveOutcome::Rejected);
    assert_eq!(game.layout(), &before);
    assert_eq!(game.selection(), None);
}

/// Test that clicking an empty column with a King selected moves it there.
#[test]
fn test_click_empty_column() {
    let layout = Layout::builder()
        .waste([Card::new(Suit::Diamonds, KING)])
        .build()
        .unwrap();
    let mut game = game_with(layout);

    // Nothing selected: empty column is inert
    assert_eq!(game.select_or_move(PileRef::tableau(5, 0)).unwrap(), MoveOutcome::NoOp);

    game.select_or_move(PileRef::Waste).unwrap();
    let outcome = game.select_or_move(PileRef::tableau(5, 0)).unwrap();

    assert!(outcome.changed_table());
    assert_eq!(game.tableau(5).unwrap().top(), Some(&up(Suit::Diamonds, KING)));
}

/// Test that the auto-send tries foundations in index order.
#[test]
fn test_auto_send_order() {
    let layout = Layout::builder()
        .waste([Card::new(Suit::Spades, ACE)])
        .build()
        .unwrap();
    let mut game = game_with(layout);

    let outcome = game.auto_send_to_foundation(PileRef::Waste).unwrap();
    assert_eq!(
        outcome,
        MoveOutcome::Moved {
            from: PileRef::Waste,
            to: Destination::Foundation(0),
            cards: 1,
        }
    );
}

/// Test that selecting the waste replaces a tableau selection.
#[test]
fn test_waste_click_replaces_selection() {
    let mut game = Solitaire::new(77);
    game.draw_stock();
    game.select_or_move(PileRef::tableau(3, 3)).unwrap();

    let outcome = game.select_or_move(PileRef::Waste).unwrap();
    assert_eq!(outcome, MoveOutcome::Selected(PileRef::Waste));
    assert_eq!(game.selection(), Some(PileRef::Waste));
}

// =============================================================================
// Winning
// =============================================================================

fn one_move_from_win() -> Solitaire {
    let mut clubs = full_suit(Suit::Clubs);
    let king = clubs.pop().unwrap();
    let layout = Layout::builder()
        .foundation(0, full_suit(Suit::Spades))
        .foundation(1, full_suit(Suit::Hearts))
        .foundation(2, full_suit(Suit::Diamonds))
        .foundation(3, clubs)
        .waste([king])
        .build()
        .unwrap();
    game_with(layout)
}

/// Test that filling the foundations wins.
#[test]
fn test_win_detection() {
    let mut game = one_move_from_win();
    assert_eq!(game.foundation_count(), 51);
    assert_eq!(game.status(), GameStatus::InProgress);

    game.select_or_move(PileRef::Waste).unwrap();
    let outcome = game.select_or_move(PileRef::Waste).unwrap();

    assert!(outcome.changed_table());
    assert_eq!(game.foundation_count(), DECK_SIZE);
    assert_eq!(game.status(), GameStatus::Won);
    assert!(game.is_terminal());
}

/// Test that a won game ignores further input.
#[test]
fn test_won_game_is_frozen() {
    let mut game = one_move_from_win();
    game.auto_send_to_foundation(PileRef::Waste).unwrap();
    assert!(game.is_won());
    let before = game.layout().clone();

    assert_eq!(game.draw_stock(), MoveOutcome::NoOp);
    assert_eq!(game.select_or_move(PileRef::Foundation(3)).unwrap(), MoveOutcome::NoOp);
    assert_eq!(
        game.drop_onto(Destination::Tableau(0), PileRef::Foundation(3)).unwrap(),
        MoveOutcome::NoOp
    );
    assert_eq!(
        game.attempt_move(PileRef::Foundation(0), Destination::Tableau(0)).unwrap(),
        MoveOutcome::NoOp
    );

    assert_eq!(game.layout(), &before);
    assert_eq!(game.status(), GameStatus::Won);
    assert!(game.legal_actions().is_empty());
}

/// Test that a new game after a win starts over.
#[test]
fn test_new_game_after_win() {
    let mut game = one_move_from_win();
    game.auto_send_to_foundation(PileRef::Waste).unwrap();

    assert_eq!(game.new_game(), MoveOutcome::Dealt);
    assert_eq!(game.status(), GameStatus::InProgress);
    assert_eq!(game.foundation_count(), 0);
}

// =============================================================================
// Foundation clicks
// =============================================================================

/// Test moving a foundation's Ace onto an empty foundation.
#[test]
fn test_foundation_to_foundation() {
    let layout = Layout::builder().foundation(0, [up(Suit::Spades, ACE)]).build().unwrap();
    let mut game = game_with(layout);

    assert_eq!(
        game.select_or_move(PileRef::Foundation(0)).unwrap(),
        MoveOutcome::Selected(PileRef::Foundation(0))
    );
    let outcome = game.select_or_move(PileRef::Foundation(1)).unwrap();

    assert_eq!(
        outcome,
        MoveOutcome::Moved {
            from: PileRef::Foundation(0),
            to: Destination::Foundation(1),
            cards: 1,
        }
    );
    assert!(game.foundation(0).unwrap().is_empty());
    assert_eq!(game.foundation(1).unwrap().top(), Some(&up(Suit::Spades, ACE)));
    assert_eq!(game.selection(), None);
}

/// Test that clicking the selected foundation again deselects it.
#[test]
fn test_reselect_foundation_deselects() {
    let layout = Layout::builder()
        .foundation(2, [up(Suit::Hearts, ACE), up(Suit::Hearts, 2)])
        .build()
        .unwrap();
    let mut game = game_with(layout);
    let before = game.layout().clone();

    game.select_or_move(PileRef::Foundation(2)).unwrap();
    let outcome = game.select_or_move(PileRef::Foundation(2)).unwrap();

    assert_eq!(outcome, MoveOutcome::Deselected);
    assert_eq!(game.selection(), None);
    assert_eq!(game.layout(), &before);
}

// =============================================================================
// Snapshots
// =============================================================================

/// Test that a snapshot repeating a card is refused.
#[test]
fn test_restore_rejects_duplicate_cards() {
    let mut value = serde_json::to_value(Solitaire::new(17).snapshot()).unwrap();
    for card in value["layout"]["stock"].as_array_mut().unwrap() {
        *card = json!({ "suit": "Spades", "rank": 1, "face_up": false });
    }
    let snapshot: SolitaireSnapshot = serde_json::from_value(value).unwrap();

    assert_eq!(snapshot.layout.total_cards(), DECK_SIZE);
    assert!(matches!(Solitaire::restore(&snapshot), Err(GameError::Snapshot(_))));
}

/// Test that a card outside Ace..King does not decode.
#[test]
fn test_snapshot_rejects_bad_rank() {
    let mut value = serde_json::to_value(Solitaire::new(17).snapshot()).unwrap();
    value["layout"]["stock"][0]["rank"] = json!(255);

    assert!(serde_json::from_value::<SolitaireSnapshot>(value).is_err());
}

/// Test that a selection of a missing card is refused.
#[test]
fn test_restore_rejects_dangling_selection() {
    let mut snapshot = Solitaire::new(17).snapshot();
    snapshot.selection.replace(PileRef::tableau(6, 40));
    assert!(matches!(Solitaire::restore(&snapshot), Err(GameError::Snapshot(_))));

    let mut value = serde_json::to_value(Solitaire::new(17).snapshot()).unwrap();
    value["selection"]["current"] = json!({ "Foundation": 9 });
    let snapshot: SolitaireSnapshot = serde_json::from_value(value).unwrap();
    assert!(matches!(Solitaire::restore(&snapshot), Err(GameError::Snapshot(_))));
}

/// Test that a bincode round trip restores a playable game.
#[test]
fn test_snapshot_bytes_restore() {
    let mut game = Solitaire::new(23);
    game.draw_stock();
    game.select_or_move(PileRef::Waste).unwrap();

    let bytes = game.snapshot().to_bytes().unwrap();
    let restored = Solitaire::restore(&SolitaireSnapshot::from_bytes(&bytes).unwrap()).unwrap();

    assert_eq!(restored.layout(), game.layout());
    assert_eq!(restored.selection(), Some(PileRef::Waste));
}

// =============================================================================
// Rules engine
// =============================================================================

/// Test that legal actions are all accepted when applied.
#[test]
fn test_legal_actions_apply_cleanly() {
    let game = Solitaire::new(31);

    for action in game.legal_actions() {
        let mut trial = game.clone();
        let outcome = trial.apply(&action).unwrap();
        assert!(outcome.changed_table(), "{:?} should change the table", action);
    }
}

/// Test that the history replays to the same table.
#[test]
fn test_deterministic_replay() {
    let seed = 12345u64;
    let mut game = Solitaire::new(seed);

    for turn in 0..150 {
        let actions = game.legal_actions();
        if actions.is_empty() {
            break;
        }
        // Prefer moves over draws, rotating through them
        let moves: Vec<_> = actions
            .iter()
            .filter(|a| matches!(a, SolitaireAction::Drop { .. }))
            .collect();
        let action = if moves.is_empty() || turn % 3 == 0 {
            actions[0]
        } else {
            *moves[turn % moves.len()]
        };
        game.apply(&action).unwrap();
    }

    let recorded: Vec<SolitaireAction> = game.history().iter().map(|r| r.action).collect();
    let mut replayed = Solitaire::new(seed);
    replayed.replay(&recorded).unwrap();

    assert_eq!(replayed.layout(), game.layout());
    assert_eq!(replayed.selection(), game.selection());
    assert_eq!(replayed.status(), game.status());
}

/// Test that direct moves and auto-sends are recorded and replay.
#[test]
fn test_replay_through_direct_moves() {
    let seed = 5u64;
    let mut game = Solitaire::new(seed);
    let mut calls = 0;

    for turn in 0..120 {
        if turn % 4 == 0 {
            game.auto_send_to_foundation(PileRef::Waste).unwrap();
        } else if let Some(&(source, dest)) = game.legal_moves().first() {
            game.attempt_move(source, dest).unwrap();
        } else {
            game.draw_stock();
        }
        calls += 1;
    }
    assert_eq!(game.history().len(), calls);

    let recorded: Vec<SolitaireAction> = game.history().iter().map(|r| r.action).collect();
    let mut replayed = Solitaire::new(seed);
    replayed.replay(&recorded).unwrap();

    assert_eq!(replayed.layout(), game.layout());
    assert_eq!(replayed.foundation_count(), game.foundation_count());
}

/// Test that a single direct move is recorded as a drop.
#[test]
fn test_attempt_move_is_recorded() {
    let layout = Layout::builder().tableau(0, [up(Suit::Clubs, ACE)]).build().unwrap();
    let mut game = game_with(layout);

    game.attempt_move(PileRef::tableau(0, 0), Destination::Foundation(0)).unwrap();

    let recorded: Vec<SolitaireAction> = game.history().iter().map(|r| r.action).collect();
    assert_eq!(
        recorded,
        vec![SolitaireAction::Drop {
            carried: PileRef::tableau(0, 0),
            dest: Destination::Foundation(0),
        }]
    );
}
