//! Signing flows: cap gating, advisory hints, batch previews.

use gridcap_capmath::SigningTerms;
use gridcap_core::{Money, TeamCode};
use gridcap_engine::ReleaseAdvisor;
use gridcap_engine::TransactionEngine;
use gridcap_roster::LeagueStore;
use gridcap_rules::ViolationKind;
use gridcap_tests::{release, sign_new, LeagueFixture};

#[test]
fn test_sign_preview_reports_exact_shortfall() {
    // GIVEN $44M of cap hits under a $45M cap
    let mut fixture = LeagueFixture::new().with_cap_limit(45_000_000);
    fixture.add_contracted_player("ARI", 1, "Kyler Murray", "QB", 30_000_000, 5_000_000, 3);
    fixture.add_contracted_player("ARI", 2, "James Conner", "RB", 8_000_000, 1_000_000, 2);
    let ari = TeamCode::new("ARI");

    // WHEN previewing a $5M signing into $1M of space
    let sign = sign_new(
        "Expensive Veteran",
        "DL",
        SigningTerms::flat(1, Money::from_dollars(5_000_000)),
    );
    let preview = fixture.engine().preview(&ari, &sign).unwrap();

    // THEN rejected with the precise $4M shortfall
    assert!(!preview.allowed);
    assert_eq!(preview.cap_space_before, Money::from_dollars(1_000_000));
    assert_eq!(preview.cap_space_after, Money::from_dollars(-4_000_000));
    assert_eq!(
        preview.violations.all()[0].kind,
        ViolationKind::CapInsufficient {
            shortfall: Money::from_dollars(4_000_000)
        }
    );
}

#[test]
fn test_sign_clears_after_release_frees_room() {
    // GIVEN the same cap-strapped roster
    let mut fixture = LeagueFixture::new().with_cap_limit(45_000_000);
    fixture.add_contracted_player("ARI", 1, "Kyler Murray", "QB", 30_000_000, 5_000_000, 3);
    fixture.add_contracted_player("ARI", 2, "James Conner", "RB", 8_000_000, 1_000_000, 2);
    let ari = TeamCode::new("ARI");
    let sign = sign_new(
        "Expensive Veteran",
        "DL",
        SigningTerms::flat(1, Money::from_dollars(5_000_000)),
    );

    // WHEN the release lands first (frees 9M hit, charges 2M dead)
    fixture.engine().commit(&ari, &release(2, false)).unwrap();
    let record = fixture.engine().commit(&ari, &sign).unwrap();

    // THEN the signing books a new contracted player
    assert_eq!(record.cap_delta, Money::from_dollars(-5_000_000));
    let snapshot = fixture.store.snapshot(&ari).unwrap();
    assert_eq!(snapshot.roster_count(), 2);
    let signed = snapshot
        .players
        .iter()
        .find(|p| p.last_name == "Veteran")
        .expect("signed player present");
    let contract = snapshot.contract(signed.id).expect("contract booked");
    assert_eq!(contract.years.len(), 1);
    assert_eq!(
        contract.years[0].cap_hit(),
        Money::from_dollars(5_000_000)
    );
}

#[test]
fn test_advisor_suggests_a_release_on_cap_rejection() {
    // GIVEN a cap-strapped roster and a wired-in advisor
    let mut fixture = LeagueFixture::new().with_cap_limit(45_000_000);
    fixture.add_contracted_player("ARI", 1, "Kyler Murray", "QB", 30_000_000, 5_000_000, 3);
    fixture.add_contracted_player("ARI", 2, "James Conner", "RB", 8_000_000, 1_000_000, 2);
    let advisor = ReleaseAdvisor::new();

    let sign = sign_new(
        "Expensive Veteran",
        "DL",
        SigningTerms::flat(1, Money::from_dollars(5_000_000)),
    );

    // WHEN
    let preview = {
        let engine = TransactionEngine::new(
            &mut fixture.store,
            &mut fixture.ledger,
            &fixture.config,
        )
        .with_advisor(&advisor);
        engine.preview(&TeamCode::new("ARI"), &sign).unwrap()
    };

    // THEN the shortfall note is followed by a concrete suggestion
    assert!(!preview.allowed);
    assert!(preview
        .notes
        .iter()
        .any(|note| note.contains("by releasing James Conner")));
}

#[test]
fn test_roster_limit_with_batch_release() {
    // GIVEN a club at the 90-man offseason limit
    let mut fixture = LeagueFixture::new();
    fixture.add_contracted_player("ARI", 1, "James Conner", "RB", 8_000_000, 1_000_000, 2);
    fixture.fill_roster("ARI", 100, 89);
    let ari = TeamCode::new("ARI");
    let sign = sign_new(
        "Street Free Agent",
        "CB",
        SigningTerms::flat(1, Money::from_dollars(1_200_000)),
    );

    // WHEN signed alone, and signed after a batched release
    let alone = fixture.engine().preview(&ari, &sign).unwrap();
    let batch = fixture
        .engine()
        .preview_batch(&ari, &[release(1, false), sign])
        .unwrap();

    // THEN the 91st player is rejected; the batch lands at exactly 90
    assert!(!alone.allowed);
    assert!(matches!(
        alone.violations.all()[0].kind,
        ViolationKind::RosterLimitExceeded { count: 91, limit: 90 }
    ));
    assert!(batch[1].allowed);
    assert_eq!(batch[1].roster_count_after, 90);
}

#[test]
fn test_signing_books_prorated_contract_years() {
    // GIVEN a four-year deal with an $8M bonus
    let mut fixture = LeagueFixture::new();
    let ari = TeamCode::new("ARI");
    let terms = SigningTerms {
        years: 4,
        apy: Money::from_dollars(10_000_000),
        signing_bonus: Money::from_dollars(8_000_000),
        roster_bonus: Money::ZERO,
        workout_bonus: Money::ZERO,
        guaranteed: Money::from_dollars(12_000_000),
    };

    // WHEN
    fixture
        .engine()
        .commit(&ari, &sign_new("Marquee Tackle", "OT", terms))
        .unwrap();

    // THEN the booked rows carry $2M proration each season
    let snapshot = fixture.store.snapshot(&ari).unwrap();
    let player = snapshot.players.first().expect("one player");
    let contract = snapshot.contract(player.id).expect("contract");
    assert_eq!(contract.years.len(), 4);
    for year in &contract.years {
        assert_eq!(year.signing_proration, Money::from_dollars(2_000_000));
        assert_eq!(year.cap_hit(), Money::from_dollars(10_000_000));
    }
}
