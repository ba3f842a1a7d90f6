//! Shared test inputs.

use crate::eligibility::{EligibilityConfig, EligibilityIndex};
use crate::model::{
    Boost, CategoryWeights, Entity, Pool, Roster, Slot, SlotGroup, SlotTable, WeightProfile,
};
use crate::problem::RosterProblem;
use crate::scoring::{ScoreObjective, ScoringEngine};

pub(crate) const CATEGORIES: [&str; 4] = ["QB", "WR", "CB", "K"];

/// Four single-category slots spread across all three groups.
pub(crate) fn four_slot_table() -> SlotTable {
    SlotTable::new(vec![
        Slot::new("QB", &["QB"], SlotGroup::Offense),
        Slot::new("WR", &["WR"], SlotGroup::Offense),
        Slot::new("CB", &["CB"], SlotGroup::Defense),
        Slot::new("K", &["K"], SlotGroup::Special),
    ])
    .unwrap()
}

/// `low=50, high=99, total=10`, attributes `X` and `Y` weighted 5 each.
pub(crate) fn four_slot_weights() -> WeightProfile {
    let mut profile = WeightProfile::new();
    for c in CATEGORIES {
        profile.insert(
            c,
            CategoryWeights::new(50.0, 99.0, 10.0)
                .with_weight("X", 5.0)
                .with_weight("Y", 5.0),
        );
    }
    profile
}

fn base_entities() -> Vec<Entity> {
    let mut out = Vec::new();
    for (ci, c) in CATEGORIES.iter().enumerate() {
        for i in 0..5usize {
            let x = 60.0 + ((i * 37 + ci * 11) % 35) as f64;
            let y = 60.0 + ((i * 53 + ci * 7) % 35) as f64;
            out.push(
                Entity::new(format!("{c}{i}"), *c, if i % 2 == 0 { "A" } else { "B" })
                    .with_rank((x + y) / 2.0)
                    .with_attribute("X", x)
                    .with_attribute("Y", y),
            );
        }
    }
    out
}

/// 20 entities, five per category.
pub(crate) fn four_slot_problem() -> (Pool, SlotTable, WeightProfile) {
    (
        Pool::new(base_entities()).unwrap(),
        four_slot_table(),
        four_slot_weights(),
    )
}

/// The 20-entity pool plus two otherwise identical receivers, one of
/// which carries an `ALL +10 X` boost.
pub(crate) fn boost_problem() -> (Pool, SlotTable, WeightProfile) {
    let mut entities = base_entities();
    let twin = Entity::new("WRp", "WR", "A")
        .with_rank(70.0)
        .with_attribute("X", 70.0)
        .with_attribute("Y", 75.0);
    entities.push(twin.clone());
    let mut boosted = twin.with_boost(Boost::all("X", 10.0));
    boosted.name = "WRb".into();
    entities.push(boosted);
    (Pool::new(entities).unwrap(), four_slot_table(), four_slot_weights())
}

pub(crate) fn base_roster(pool: &Pool, table: &SlotTable) -> Roster {
    Roster::from_labels(
        &[("QB", "QB0"), ("WR", "WR0"), ("CB", "CB0"), ("K", "K0")],
        pool,
        table,
    )
    .unwrap()
}

pub(crate) fn boost_roster(pool: &Pool, table: &SlotTable, boosted: bool) -> Roster {
    let wr = if boosted { "WRb" } else { "WRp" };
    Roster::from_labels(
        &[("QB", "QB0"), ("WR", wr), ("CB", "CB0"), ("K", "K0")],
        pool,
        table,
    )
    .unwrap()
}

/// Builds an optimization problem over borrowed inputs.
pub(crate) fn problem<'a>(
    pool: &'a Pool,
    table: &'a SlotTable,
    weights: &'a WeightProfile,
) -> RosterProblem<'a, ScoreObjective> {
    let engine = ScoringEngine::new(table, weights, pool).unwrap();
    let index = EligibilityIndex::build(pool, table, &EligibilityConfig::default(), None).unwrap();
    RosterProblem::new(engine, index, ScoreObjective::default())
}

/// The 30-slot standard table with three candidates per category.
pub(crate) fn standard_problem() -> (Pool, SlotTable, WeightProfile) {
    let table = SlotTable::standard();
    let mut profile = WeightProfile::new();
    let mut entities = Vec::new();
    for (ci, c) in table.categories().into_iter().enumerate() {
        profile.insert(
            c,
            CategoryWeights::new(40.0, 99.0, 3.0)
                .with_weight("SPD", 2.0)
                .with_weight("STR", 1.0),
        );
        for i in 0..4usize {
            let spd = 55.0 + ((i * 29 + ci * 13) % 40) as f64;
            let str_ = 55.0 + ((i * 17 + ci * 23) % 40) as f64;
            let mut e = Entity::new(format!("{c}-{i}"), c, ["A", "B", "C"][i % 3])
                .with_rank(spd)
                .with_attribute("SPD", spd)
                .with_attribute("STR", str_);
            if i == 3 && ci % 4 == 0 {
                e = e.with_boost(Boost::group("A", "SPD", 2.0));
            }
            entities.push(e);
        }
    }
    (Pool::new(entities).unwrap(), table, profile)
}
