//! Trade flows: partner attribution, atomicity, and race handling.

use gridcap_core::{Money, PlayerId, PlayerStatus, TeamCode};
use gridcap_roster::{LeagueStore, StateChange};
use gridcap_tests::{release, trade, LeagueFixture};

fn two_team_fixture() -> LeagueFixture {
    let mut fixture = LeagueFixture::new();
    fixture.add_contracted_player("ARI", 1, "James Conner", "RB", 8_000_000, 1_000_000, 2);
    fixture.add_contracted_player("SEA", 2, "Jaxon Smith-Njigba", "WR", 6_000_000, 2_000_000, 2);
    fixture
}

#[test]
fn test_trade_swaps_players_and_strands_proration() {
    // GIVEN
    let mut fixture = two_team_fixture();
    let ari = TeamCode::new("ARI");
    let sea = TeamCode::new("SEA");

    // WHEN ARI trades Conner for Smith-Njigba
    let record = fixture
        .engine()
        .commit(&ari, &trade(vec![1], "SEA", vec![2]))
        .unwrap();

    // THEN both legs are recorded and both rosters updated
    assert_eq!(record.legs.len(), 2);
    let ari_after = fixture.store.snapshot(&ari).unwrap();
    let sea_after = fixture.store.snapshot(&sea).unwrap();
    assert!(ari_after.player(PlayerId::new(2)).is_some());
    assert!(sea_after.player(PlayerId::new(1)).is_some());

    // AND each sender keeps its own proration as dead money while the
    // arriving contract carries none
    assert_eq!(ari_after.dead_money, Money::from_dollars(2_000_000));
    assert_eq!(sea_after.dead_money, Money::from_dollars(4_000_000));
    let acquired = ari_after.contract(PlayerId::new(2)).unwrap();
    assert!(acquired
        .years
        .iter()
        .all(|yr| yr.signing_proration == Money::ZERO));

    // AND traded players are frozen for the rest of the simulated day
    assert_eq!(
        ari_after.player(PlayerId::new(2)).unwrap().status,
        PlayerStatus::Traded
    );
}

#[test]
fn test_partner_failure_rejects_whole_trade() {
    // GIVEN SEA pinned at the 90-man limit
    let mut fixture = two_team_fixture();
    fixture.fill_roster("SEA", 100, 89);
    let ari = TeamCode::new("ARI");
    let sea = TeamCode::new("SEA");
    let sea_before = fixture.store.snapshot(&sea).unwrap();

    // WHEN ARI offers two players for one
    fixture.add_contracted_player("ARI", 3, "Trey McBride", "TE", 6_000_000, 500_000, 3);
    let err = fixture
        .engine()
        .commit(&ari, &trade(vec![1, 3], "SEA", vec![2]))
        .unwrap_err();

    // THEN the rejection is attributed to the partner side
    let rejection = err.rejection().expect("structured rejection");
    assert!(rejection.partner_rejected());
    let partner = rejection.partner.as_ref().expect("partner block");
    assert_eq!(partner.team, sea);
    assert_eq!(partner.roster_count_after, 91);

    // AND neither leg was applied: no partial trades, ever
    let ari_after = fixture.store.snapshot(&ari).unwrap();
    let sea_after = fixture.store.snapshot(&sea).unwrap();
    assert!(ari_after.player(PlayerId::new(1)).is_some());
    assert_eq!(sea_after.roster_count(), sea_before.roster_count());
    assert_eq!(fixture.ledger.len(), 0);
}

#[test]
fn test_trade_preview_mirrors_both_sides() {
    // GIVEN
    let mut fixture = two_team_fixture();
    let ari = TeamCode::new("ARI");

    // WHEN
    let preview = fixture
        .engine()
        .preview(&ari, &trade(vec![1], "SEA", vec![2]))
        .unwrap();

    // THEN the proposing side nets Conner's savings minus JSN's price
    // Conner: 9M hit - 2M dead = 7M savings; JSN arrives at 6M base
    assert_eq!(preview.cap_delta, Money::from_dollars(1_000_000));
    // SEA nets JSN's savings (8M - 4M) minus Conner at 8M base
    let partner = preview.partner.as_ref().expect("partner block");
    assert_eq!(partner.cap_delta, Money::from_dollars(-4_000_000));
    assert_eq!(partner.dead_money, Money::from_dollars(4_000_000));
}

#[test]
fn test_commit_rejects_after_state_moves_underneath() {
    // GIVEN a valid trade preview
    let mut fixture = two_team_fixture();
    let ari = TeamCode::new("ARI");
    let payload = trade(vec![1], "SEA", vec![2]);
    assert!(fixture.engine().preview(&ari, &payload).unwrap().allowed);

    // WHEN the outgoing player is released before the trade commits
    fixture.engine().commit(&ari, &release(1, false)).unwrap();

    // THEN the commit re-validates and reports the eligibility failure
    let err = fixture.engine().commit(&ari, &payload).unwrap_err();
    let rejection = err.rejection().expect("structured rejection");
    assert!(!rejection.allowed);
    assert_eq!(fixture.ledger.len(), 1);
}

#[test]
fn test_version_conflict_resolves_to_one_winner() {
    // GIVEN a snapshot-taken version that a raw write invalidates
    let mut fixture = two_team_fixture();
    let ari = TeamCode::new("ARI");
    let stale_version = fixture.store.snapshot(&ari).unwrap().version;
    fixture
        .store
        .apply(
            &[(ari.clone(), stale_version)],
            &[StateChange::SetPlayerStatus {
                player_id: PlayerId::new(1),
                status: PlayerStatus::Released,
            }],
        )
        .unwrap();

    // WHEN a commit plans against the moved state
    let err = fixture
        .engine()
        .commit(&ari, &trade(vec![1], "SEA", vec![2]))
        .unwrap_err();

    // THEN re-validation catches the released player; no corrupt state
    let rejection = err.rejection().expect("structured rejection");
    assert!(!rejection.allowed);
    assert!(fixture.ledger.is_empty());
}
