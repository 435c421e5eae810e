//! Release lifecycle: preview, commit, undo, history.

use gridcap_core::{Money, PlayerId, PlayerStatus, TeamCode, TransactionStatus};
use gridcap_engine::EngineError;
use gridcap_roster::LeagueStore;
use gridcap_tests::{release, LeagueFixture};

#[test]
fn test_release_round_trip_restores_cap_state_exactly() {
    // GIVEN a contracted running back on ARI
    let mut fixture = LeagueFixture::new();
    fixture.add_contracted_player("ARI", 1, "James Conner", "RB", 8_000_000, 1_000_000, 2);
    let ari = TeamCode::new("ARI");
    let before = fixture.store.snapshot(&ari).unwrap();

    // WHEN the release is committed and then undone
    let record = fixture.engine().commit(&ari, &release(1, false)).unwrap();
    let undone = fixture.engine().undo(record.id).unwrap();

    // THEN the record survives with status undone
    assert_eq!(undone.id, record.id);
    assert_eq!(undone.status, TransactionStatus::Undone);

    // AND the roster and cap state match the pre-move snapshot exactly
    let after = fixture.store.snapshot(&ari).unwrap();
    assert_eq!(after.roster_count(), before.roster_count());
    assert_eq!(after.dead_money, before.dead_money);
    assert_eq!(after.dead_money_future, before.dead_money_future);
    assert_eq!(
        after.player(PlayerId::new(1)).unwrap().status,
        PlayerStatus::Active
    );
    assert_eq!(
        after.contract(PlayerId::new(1)),
        before.contract(PlayerId::new(1))
    );
}

#[test]
fn test_undo_is_not_repeatable() {
    // GIVEN an undone release
    let mut fixture = LeagueFixture::new();
    fixture.add_contracted_player("ARI", 1, "James Conner", "RB", 8_000_000, 1_000_000, 2);
    let ari = TeamCode::new("ARI");
    let record = fixture.engine().commit(&ari, &release(1, false)).unwrap();
    fixture.engine().undo(record.id).unwrap();

    // WHEN/THEN a second undo is rejected
    assert!(matches!(
        fixture.engine().undo(record.id),
        Err(EngineError::AlreadyUndone(_))
    ));
}

#[test]
fn test_released_player_cannot_be_released_again() {
    // GIVEN a player released earlier on the simulated day
    let mut fixture = LeagueFixture::new();
    fixture.add_contracted_player("ARI", 1, "James Conner", "RB", 8_000_000, 1_000_000, 2);
    let ari = TeamCode::new("ARI");
    fixture.engine().commit(&ari, &release(1, false)).unwrap();

    // WHEN the same release is committed again
    let err = fixture.engine().commit(&ari, &release(1, false)).unwrap_err();

    // THEN it is a structured eligibility rejection, not a crash
    let rejection = err.rejection().expect("structured rejection");
    assert!(!rejection.allowed);
    assert!(rejection
        .notes
        .iter()
        .any(|note| note.contains("cannot be moved again")));
}

#[test]
fn test_history_keeps_undone_rows_queryable() {
    // GIVEN a commit-undo sequence and a second live commit
    let mut fixture = LeagueFixture::new();
    fixture.add_contracted_player("ARI", 1, "James Conner", "RB", 8_000_000, 1_000_000, 2);
    fixture.add_contracted_player("ARI", 2, "Trey McBride", "TE", 6_000_000, 500_000, 3);
    let ari = TeamCode::new("ARI");

    let first = fixture.engine().commit(&ari, &release(1, false)).unwrap();
    fixture.engine().undo(first.id).unwrap();
    fixture.engine().commit(&ari, &release(2, false)).unwrap();

    // WHEN
    let history = {
        let engine = fixture.engine();
        engine.history(&ari)
    };

    // THEN both rows are present, oldest first, with their statuses
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].status, TransactionStatus::Undone);
    assert_eq!(history[1].status, TransactionStatus::Committed);
}

#[test]
fn test_post_june_1_release_defers_future_proration() {
    // GIVEN three seasons of $2M proration
    let mut fixture = LeagueFixture::new();
    fixture.add_contracted_player("ARI", 1, "Veteran Corner", "CB", 10_000_000, 2_000_000, 3);
    let ari = TeamCode::new("ARI");

    // WHEN committed as a post-June 1 release
    let record = fixture.engine().commit(&ari, &release(1, true)).unwrap();

    // THEN this year carries one season of proration, the rest defers
    let snapshot = fixture.store.snapshot(&ari).unwrap();
    assert_eq!(snapshot.dead_money, Money::from_dollars(2_000_000));
    assert_eq!(snapshot.dead_money_future, Money::from_dollars(4_000_000));
    assert_eq!(record.cap_delta, Money::from_dollars(10_000_000));
}
