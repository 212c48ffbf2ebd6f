//! Faction chain combinations, driven directly against `FactionChain`.
//!
//! Each test lays cards on a `Table` by hand and threads the chain through
//! `extend` / `record_defense` the way the engine does.

mod common;

use common::*;
use faction_durak::cards::{CardCatalog, CardDefinition};
use faction_durak::core::GameError;
use faction_durak::factions::{ChainPath, FactionChain};
use faction_durak::table::Table;
use im::{ordmap, ordset};

fn lay(catalog: &CardCatalog, id: u32) -> &CardDefinition {
    catalog.get(c(id)).unwrap()
}

/// Extend along `path` and place the card, as the engine does.
fn attack_with(
    chain: &FactionChain,
    table: &mut Table,
    catalog: &CardCatalog,
    id: u32,
    path: ChainPath,
) -> Result<FactionChain, GameError> {
    let next = chain.extend(lay(catalog, id), path, table, catalog)?;
    table.place_attack(c(id))?;
    Ok(next)
}

fn defend_with(
    chain: &FactionChain,
    table: &mut Table,
    catalog: &CardCatalog,
    id: u32,
    slot: usize,
) -> FactionChain {
    let next = chain.record_defense(lay(catalog, id), table);
    table.bind_defense(slot, c(id)).unwrap();
    next
}

// ============================================================================
// Anchor path
// ============================================================================

#[test]
fn test_anchor_lineage_narrows_card_by_card() {
    let catalog = catalog(&[
        (0, 50, &[1, 2, 3]),
        (1, 60, &[2, 3]),
        (2, 70, &[3, 4]),
        (3, 80, &[1]),
    ]);
    let mut table = Table::new(6);
    let chain = FactionChain::new();

    let chain = attack_with(&chain, &mut table, &catalog, 0, ChainPath::Anchor).unwrap();
    assert_eq!(chain.active(), &ordset![f(1), f(2), f(3)]);

    let chain = attack_with(&chain, &mut table, &catalog, 1, ChainPath::Anchor).unwrap();
    assert_eq!(chain.active(), &ordset![f(2), f(3)]);
    assert_eq!(chain.counter(), &ordmap! {f(2) => 1, f(3) => 1});

    let chain = attack_with(&chain, &mut table, &catalog, 2, ChainPath::Anchor).unwrap();
    assert_eq!(chain.active(), &ordset![f(3)]);
    assert_eq!(chain.count(f(4)), 0);

    let err = attack_with(&chain, &mut table, &catalog, 3, ChainPath::Anchor).unwrap_err();
    assert!(matches!(
        &err,
        GameError::NoCommonFaction { active, offered }
            if active == &["Gamma".to_string()] && offered == &["Alpha".to_string()]
    ));
    assert_eq!(table.attack_count(), 3);
}

#[test]
fn test_defense_credit_survives_narrowing() {
    let catalog = catalog(&[(0, 50, &[1, 2]), (1, 60, &[1]), (2, 70, &[3]), (3, 80, &[3])]);
    let mut table = Table::new(6);

    let chain = attack_with(&FactionChain::new(), &mut table, &catalog, 0, ChainPath::Anchor)
        .unwrap();
    let chain = defend_with(&chain, &mut table, &catalog, 2, 0);
    assert_eq!(chain.counter(), &ordmap! {f(1) => 1, f(2) => 1, f(3) => 1});

    let chain = attack_with(&chain, &mut table, &catalog, 1, ChainPath::Anchor).unwrap();
    assert_eq!(chain.active(), &ordset![f(1)]);
    assert_eq!(chain.counter(), &ordmap! {f(1) => 1, f(3) => 1});
    assert_eq!(chain.buffer(), &ordmap! {f(3) => 1});

    // Faction 3 never joined the anchor lineage, so only the branch admits it.
    let chain = attack_with(
        &chain,
        &mut table,
        &catalog,
        3,
        ChainPath::ThroughDefense { slot: 0 },
    )
    .unwrap();
    assert_eq!(chain.count(f(3)), 1);
    assert!(chain.used_for(c(2)).is_empty());
}

// ============================================================================
// Branching through defense cards
// ============================================================================

#[test]
fn test_repeated_branching_through_one_defense_card() {
    let catalog = catalog(&[
        (0, 50, &[1]),
        (1, 60, &[2]),
        (2, 65, &[1]),
        (3, 70, &[2]),
        (10, 90, &[1, 2, 3]),
    ]);
    let mut table = Table::new(6);
    let through = ChainPath::ThroughDefense { slot: 0 };

    let chain = attack_with(&FactionChain::new(), &mut table, &catalog, 0, ChainPath::Anchor)
        .unwrap();
    let chain = defend_with(&chain, &mut table, &catalog, 10, 0);
    assert_eq!(
        chain.counter(),
        &ordmap! {f(1) => 2, f(2) => 1, f(3) => 1}
    );

    let chain = attack_with(&chain, &mut table, &catalog, 1, through).unwrap();
    assert_eq!(chain.used_for(c(10)), ordset![f(1), f(3)]);
    assert_eq!(chain.counter(), &ordmap! {f(1) => 1, f(2) => 1});
    assert_eq!(chain.buffer(), &ordmap! {f(2) => 1});

    let err = attack_with(&chain, &mut table, &catalog, 2, through).unwrap_err();
    assert_eq!(
        err.to_string(),
        "defense card Card(10) offers no unused faction of the attack card \
         (card factions: Alpha; still available: Beta; exhausted: Alpha, Gamma)"
    );

    // The shared faction stays open for further branches.
    let chain = attack_with(&chain, &mut table, &catalog, 3, through).unwrap();
    assert_eq!(chain.used_for(c(10)), ordset![f(1), f(3)]);
    assert_eq!(chain.available_for(lay(&catalog, 10)), vec![f(2)]);
    assert_eq!(chain.count(f(2)), 1);
    assert_eq!(chain.active(), &ordset![f(1)]);
    assert_eq!(table.attack_count(), 3);
}

#[test]
fn test_used_factions_are_per_defense_card() {
    let catalog = catalog(&[
        (0, 50, &[1]),
        (1, 55, &[1]),
        (2, 60, &[2]),
        (3, 62, &[1]),
        (10, 90, &[1, 2]),
        (11, 91, &[1, 2]),
    ]);
    let mut table = Table::new(6);

    let chain = attack_with(&FactionChain::new(), &mut table, &catalog, 0, ChainPath::Anchor)
        .unwrap();
    let chain = attack_with(&chain, &mut table, &catalog, 1, ChainPath::Anchor).unwrap();
    let chain = defend_with(&chain, &mut table, &catalog, 10, 0);
    let chain = defend_with(&chain, &mut table, &catalog, 11, 1);

    let chain = attack_with(
        &chain,
        &mut table,
        &catalog,
        2,
        ChainPath::ThroughDefense { slot: 0 },
    )
    .unwrap();
    assert_eq!(chain.used_for(c(10)), ordset![f(1)]);
    assert!(chain.used_for(c(11)).is_empty());

    // Faction 1 is spent on card 10 but still open on card 11.
    assert!(chain
        .extend(
            lay(&catalog, 3),
            ChainPath::ThroughDefense { slot: 0 },
            &table,
            &catalog
        )
        .is_err());
    let chain = attack_with(
        &chain,
        &mut table,
        &catalog,
        3,
        ChainPath::ThroughDefense { slot: 1 },
    )
    .unwrap();
    assert_eq!(chain.used_for(c(11)), ordset![f(2)]);
}

// ============================================================================
// Capacity
// ============================================================================

#[test]
fn test_full_row_freezes_the_chain() {
    let catalog = catalog(&[(0, 50, &[1]), (1, 60, &[1]), (2, 70, &[1]), (3, 80, &[1, 2])]);
    let mut table = Table::new(2);

    let chain = attack_with(&FactionChain::new(), &mut table, &catalog, 0, ChainPath::Anchor)
        .unwrap();
    let chain = attack_with(&chain, &mut table, &catalog, 1, ChainPath::Anchor).unwrap();
    assert!(table.is_full());

    let err = attack_with(&chain, &mut table, &catalog, 2, ChainPath::Anchor).unwrap_err();
    assert!(matches!(err, GameError::TableFull { capacity: 2 }));

    let credited = chain.record_defense(lay(&catalog, 3), &table);
    assert_eq!(credited, chain);
}

#[test]
fn test_chain_json_round_trip() {
    let catalog = catalog(&[(0, 50, &[1]), (1, 60, &[2]), (10, 90, &[1, 2, 3])]);
    let mut table = Table::new(6);

    let chain = attack_with(&FactionChain::new(), &mut table, &catalog, 0, ChainPath::Anchor)
        .unwrap();
    let chain = defend_with(&chain, &mut table, &catalog, 10, 0);
    let chain = attack_with(
        &chain,
        &mut table,
        &catalog,
        1,
        ChainPath::ThroughDefense { slot: 0 },
    )
    .unwrap();

    let json = serde_json::to_string(&chain).unwrap();
    let back: FactionChain = serde_json::from_str(&json).unwrap();
    assert_eq!(back, chain);
}
