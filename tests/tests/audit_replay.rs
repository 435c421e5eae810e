//! Audit-record fidelity: frozen deltas survive later data edits.

use gridcap_audit::AuditEntry;
use gridcap_core::{Contract, ContractYear, LeagueYear, Money, PlayerId, TeamCode};
use gridcap_roster::{LeagueStore, StateChange};
use gridcap_tests::{release, LeagueFixture, SEASON};

#[test]
fn test_undo_uses_frozen_deltas_not_current_rows() {
    // GIVEN a committed release whose dead money was 2M
    let mut fixture = LeagueFixture::new();
    fixture.add_contracted_player("ARI", 1, "James Conner", "RB", 8_000_000, 1_000_000, 2);
    let ari = TeamCode::new("ARI");
    let record = fixture.engine().commit(&ari, &release(1, false)).unwrap();

    let AuditEntry::Release(audit) = &record.audit else {
        panic!("release audit expected");
    };
    assert_eq!(audit.impact.dead_money, Money::from_dollars(2_000_000));

    // WHEN the underlying contract row is edited after the fact
    let version = fixture.store.snapshot(&ari).unwrap().version;
    let doctored = Contract::new(
        PlayerId::new(1),
        Money::from_dollars(99_000_000),
        Money::from_dollars(99_000_000),
        Money::ZERO,
        vec![ContractYear::base_only(
            LeagueYear::new(SEASON),
            Money::from_dollars(99_000_000),
        )],
    );
    fixture
        .store
        .apply(
            &[(ari.clone(), version)],
            &[StateChange::SetContract {
                player_id: PlayerId::new(1),
                contract: doctored,
            }],
        )
        .unwrap();

    // AND the release is undone
    fixture.engine().undo(record.id).unwrap();

    // THEN the undo reversed exactly the original 2M charge - the audit
    // record, not the doctored row, is the source of truth
    let snapshot = fixture.store.snapshot(&ari).unwrap();
    assert_eq!(snapshot.dead_money, Money::ZERO);
    assert_eq!(snapshot.dead_money_future, Money::ZERO);
}

#[test]
fn test_audit_snapshot_preserves_pre_move_contract() {
    // GIVEN
    let mut fixture = LeagueFixture::new();
    fixture.add_contracted_player("ARI", 1, "James Conner", "RB", 8_000_000, 1_000_000, 2);
    let ari = TeamCode::new("ARI");
    let original = fixture
        .store
        .snapshot(&ari)
        .unwrap()
        .contract(PlayerId::new(1))
        .cloned();

    // WHEN
    let record = fixture.engine().commit(&ari, &release(1, false)).unwrap();

    // THEN the audit carries the exact pre-move player and contract
    let AuditEntry::Release(audit) = &record.audit else {
        panic!("release audit expected");
    };
    assert_eq!(audit.undo.contract, original);
    assert_eq!(audit.undo.player.id, PlayerId::new(1));
    assert_eq!(audit.payload.player_id, PlayerId::new(1));
}

#[test]
fn test_every_committed_transaction_has_legs_and_audit() {
    // GIVEN a mix of committed moves
    let mut fixture = LeagueFixture::new();
    fixture.add_contracted_player("ARI", 1, "James Conner", "RB", 8_000_000, 1_000_000, 2);
    fixture.add_contracted_player("SEA", 2, "Jaxon Smith-Njigba", "WR", 6_000_000, 2_000_000, 2);
    let ari = TeamCode::new("ARI");
    fixture.engine().commit(&ari, &release(1, false)).unwrap();
    fixture
        .engine()
        .commit(
            &TeamCode::new("SEA"),
            &release(2, true),
        )
        .unwrap();

    // THEN the structural invariant holds across the ledger
    for record in fixture.ledger.records() {
        assert!(!record.legs.is_empty());
        assert_eq!(record.audit.kind(), record.kind);
    }
}
