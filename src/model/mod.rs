//! Data model: entities, slots, rosters and weight profiles.
//!
//! Everything here is read-only during optimization except [`Roster`],
//! which optimizers own and clone before each speculative change.

mod entity;
mod roster;
mod slot;
mod weights;

pub use entity::{Boost, BoostScope, Entity, EntityId, Pool};
pub use roster::Roster;
pub use slot::{Slot, SlotGroup, SlotId, SlotTable};
pub use weights::{CategoryWeights, WeightProfile};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_loader_types_round_trip_through_json() {
        let pool = Pool::new(vec![
            Entity::new("qb1", "QB", "A")
                .with_rank(80.0)
                .with_attribute("ACC", 81.0)
                .with_boost(Boost::group("A", "ACC", 3.0)),
            Entity::new("wr1", "WR", "B").with_attribute("ACC", 77.0),
        ])
        .unwrap();
        let table = SlotTable::new(vec![
            Slot::new("QB", &["QB"], SlotGroup::Offense),
            Slot::new("WR", &["WR"], SlotGroup::Offense),
        ])
        .unwrap();
        let qb = CategoryWeights::new(50.0, 99.0, 1.0).with_weight("ACC", 1.0);
        let wr = CategoryWeights::new(40.0, 99.0, 2.0).with_weight("ACC", 2.0);
        let weights = WeightProfile::new()
            .with_category("QB", qb)
            .with_category("WR", wr);
        let pairs = [("QB", "qb1"), ("WR", "wr1")];
        let roster = Roster::from_labels(&pairs, &pool, &table).unwrap();

        let entity = pool.get(pool.find("qb1").unwrap()).clone();
        let json = serde_json::to_string(&entity).unwrap();
        assert_eq!(serde_json::from_str::<Entity>(&json).unwrap(), entity);

        let json = serde_json::to_string(&weights).unwrap();
        assert_eq!(serde_json::from_str::<WeightProfile>(&json).unwrap(), weights);

        let json = serde_json::to_string(&roster).unwrap();
        let back: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(back, roster);
        assert!(back.validate(&pool, &table).is_ok());
    }
}
