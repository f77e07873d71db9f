//! Stock ledger tests
//!
//! Tests for the materials availability gate including:
//! - No negative overdraw through a single create or update
//! - Normalization equivalence across unit/type spellings
//! - IN/OUT status partition correctness
//! - Update self-exclusion (a record being edited does not count against itself)
//! - Epsilon tolerance at the exact available balance

use proptest::prelude::*;

use shared::ledger::{
    available_for, check_outflow_create, check_outflow_update, direction_of, overlay_movement,
    Direction, Movement, MovementPatch, StockKey, EPSILON, IN_STATUSES, OUT_STATUSES,
};

fn movement(item: &str, unit: &str, mtype: &str, qty: f64, status: &str) -> Movement {
    Movement {
        id: 0,
        item: item.to_string(),
        unit: (!unit.is_empty()).then(|| unit.to_string()),
        mtype: (!mtype.is_empty()).then(|| mtype.to_string()),
        qty: Some(qty),
        status: Some(status.to_string()),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Inflow then oversized outflow: rejected with the real figures
    #[test]
    fn test_create_rejects_oversized_outflow() {
        let existing = vec![movement("Brick", "pcs", "materials", 100.0, "received")];
        let candidate = movement("Brick", "pcs", "materials", 150.0, "issued");

        let shortage = check_outflow_create(&existing, &candidate).unwrap_err();
        assert_eq!(shortage.available, 100.0);
        assert_eq!(shortage.requested, 150.0);
        assert_eq!(shortage.item, "Brick");
    }

    /// Draining the full balance succeeds; one gram more is rejected
    #[test]
    fn test_create_full_drain_then_reject() {
        let mut store = vec![movement("Brick", "pcs", "materials", 100.0, "received")];
        let key = StockKey::new("Brick", Some("pcs"), Some("materials"));
        assert_eq!(available_for(&store, &key), 100.0);

        let drain = movement("Brick", "pcs", "materials", 100.0, "issued");
        assert!(check_outflow_create(&store, &drain).is_ok());
        store.push(drain);
        assert_eq!(available_for(&store, &key), 0.0);

        let extra = movement("Brick", "pcs", "materials", 0.01, "issued");
        assert!(check_outflow_create(&store, &extra).is_err());
    }

    /// Inflows and neutral statuses pass the gate unconditionally
    #[test]
    fn test_create_ignores_inflows_and_neutral() {
        let existing: Vec<Movement> = Vec::new();

        let inflow = movement("Sand", "кг", "", 500.0, "received");
        assert!(check_outflow_create(&existing, &inflow).is_ok());

        let draft = movement("Sand", "кг", "", 9000.0, "draft");
        assert!(check_outflow_create(&existing, &draft).is_ok());
    }

    /// Zero or missing quantity never triggers the gate
    #[test]
    fn test_create_zero_quantity_passes() {
        let existing: Vec<Movement> = Vec::new();

        let zero = movement("Sand", "кг", "", 0.0, "issued");
        assert!(check_outflow_create(&existing, &zero).is_ok());

        let mut none = movement("Sand", "кг", "", 0.0, "issued");
        none.qty = None;
        assert!(check_outflow_create(&existing, &none).is_ok());
    }

    /// Statuses outside both vocabularies contribute zero to the balance
    #[test]
    fn test_neutral_status_contributes_zero() {
        let movements = vec![
            movement("Board", "м", "", 40.0, "received"),
            movement("Board", "м", "", 1000.0, "draft"),
            movement("Board", "м", "", 1000.0, "pending"),
            movement("Board", "м", "", 15.0, "issued"),
        ];
        let key = StockKey::new("Board", Some("м"), None);
        assert_eq!(available_for(&movements, &key), 25.0);
    }

    /// Spelling variants of unit and type land in the same bucket
    #[test]
    fn test_normalization_equivalence() {
        let movements = vec![
            movement("Cement", "шт", "", 10.0, "received"),
            movement("cement", "ШТ.", "materials", 5.0, "done"),
            movement("CEMENT", "", "Materials", 3.0, "issued"),
        ];

        let a = available_for(&movements, &StockKey::new("Cement", Some("шт"), Some("")));
        let b = available_for(
            &movements,
            &StockKey::new("cement", Some("ШТ."), Some("materials")),
        );
        let c = available_for(
            &movements,
            &StockKey::new("CEMENT", Some(""), Some("Materials")),
        );

        assert_eq!(a, 12.0);
        assert_eq!(b, 12.0);
        assert_eq!(c, 12.0);
    }

    /// A distinct unit is a distinct bucket
    #[test]
    fn test_distinct_units_do_not_mix() {
        let movements = vec![
            movement("Cement", "кг", "", 100.0, "received"),
            movement("Cement", "шт", "", 10.0, "received"),
        ];
        let kg = StockKey::new("Cement", Some("кг"), None);
        let pcs = StockKey::new("Cement", Some("шт"), None);
        assert_eq!(available_for(&movements, &kg), 100.0);
        assert_eq!(available_for(&movements, &pcs), 10.0);
    }

    /// Updating an outflow to the same quantity succeeds, upward past the
    /// inflow fails, downward frees the difference.
    #[test]
    fn test_update_self_exclusion() {
        let inflow = movement("Pipe", "м", "", 10.0, "received");
        let mut outflow = movement("Pipe", "м", "", 10.0, "issued");
        outflow.id = 2;
        let store = vec![inflow, outflow.clone()];
        let key = StockKey::new("Pipe", Some("м"), None);
        assert_eq!(available_for(&store, &key), 0.0);

        let same = movement("Pipe", "м", "", 10.0, "issued");
        assert!(check_outflow_update(&store, &outflow, &same).is_ok());

        let more = movement("Pipe", "м", "", 11.0, "issued");
        assert!(check_outflow_update(&store, &outflow, &more).is_err());

        let less = movement("Pipe", "м", "", 5.0, "issued");
        assert!(check_outflow_update(&store, &outflow, &less).is_ok());

        // After applying the smaller outflow the balance reads 5.
        let mut after = store.clone();
        after[1].qty = Some(5.0);
        assert_eq!(available_for(&after, &key), 5.0);
    }

    /// The old quantity is added back even when the update moves the record
    /// to a different stock key.
    #[test]
    fn test_update_add_back_on_key_change() {
        let inflow_a = movement("Pipe", "м", "", 10.0, "received");
        let mut outflow_a = movement("Pipe", "м", "", 10.0, "issued");
        outflow_a.id = 2;
        let inflow_b = movement("Cable", "м", "", 3.0, "received");
        let store = vec![inflow_a, outflow_a.clone(), inflow_b];

        // Retargeting the outflow at Cable: available there is 3, plus the 10
        // added back from the record being edited.
        let target = movement("Cable", "м", "", 12.0, "issued");
        assert!(check_outflow_update(&store, &outflow_a, &target).is_ok());

        let too_much = movement("Cable", "м", "", 14.0, "issued");
        assert!(check_outflow_update(&store, &outflow_a, &too_much).is_err());
    }

    /// Requests within epsilon of the available balance succeed
    #[test]
    fn test_epsilon_tolerance() {
        let existing = vec![movement("Glue", "кг", "", 7.0, "received")];

        let exact = movement("Glue", "кг", "", 7.0, "issued");
        assert!(check_outflow_create(&existing, &exact).is_ok());

        let hair_over = movement("Glue", "кг", "", 7.0 + EPSILON / 10.0, "issued");
        assert!(check_outflow_create(&existing, &hair_over).is_ok());

        let clearly_over = movement("Glue", "кг", "", 7.1, "issued");
        assert!(check_outflow_create(&existing, &clearly_over).is_err());
    }

    /// Shortage payload floors a negative available balance at zero
    #[test]
    fn test_shortage_available_floored() {
        // Out-of-band data can leave a bucket negative.
        let existing = vec![movement("Nail", "кг", "", 5.0, "issued")];
        let candidate = movement("Nail", "кг", "", 1.0, "issued");

        let shortage = check_outflow_create(&existing, &candidate).unwrap_err();
        assert_eq!(shortage.available, 0.0);
        assert_eq!(shortage.requested, 1.0);
    }

    /// Status vocabularies are disjoint and matched case-insensitively
    #[test]
    fn test_status_vocabularies() {
        for s in IN_STATUSES {
            assert_eq!(direction_of(s), Some(Direction::In));
            assert_eq!(direction_of(&s.to_uppercase()), Some(Direction::In));
        }
        for s in OUT_STATUSES {
            assert_eq!(direction_of(s), Some(Direction::Out));
            assert_eq!(direction_of(&s.to_uppercase()), Some(Direction::Out));
        }
        assert_eq!(direction_of("draft"), None);
        assert_eq!(direction_of("pending"), None);
    }

    /// Overlay: absent and empty-string fields keep their old value
    #[test]
    fn test_overlay_patch_semantics() {
        let current = movement("Brick", "pcs", "materials", 10.0, "issued");
        let patch = MovementPatch {
            item: Some(String::new()),
            unit: None,
            mtype: Some("tools".to_string()),
            qty: Some(0.0),
            status: None,
        };
        let target = overlay_movement(&current, &patch);

        assert_eq!(target.item, "Brick");
        assert_eq!(target.unit.as_deref(), Some("pcs"));
        assert_eq!(target.mtype.as_deref(), Some("tools"));
        assert_eq!(target.qty, Some(0.0));
        assert_eq!(target.status.as_deref(), Some("issued"));
    }

    /// Full scenario: stock in, overdraw rejected, drain to zero, rejected again
    #[test]
    fn test_brick_scenario() {
        let mut store = vec![movement("Brick", "pcs", "materials", 100.0, "received")];
        let key = StockKey::new("Brick", Some("pcs"), Some("materials"));
        assert_eq!(available_for(&store, &key), 100.0);

        let oversized = movement("Brick", "pcs", "materials", 150.0, "issued");
        let shortage = check_outflow_create(&store, &oversized).unwrap_err();
        assert_eq!(shortage.available, 100.0);
        assert_eq!(shortage.requested, 150.0);

        let drain = movement("Brick", "pcs", "materials", 100.0, "issued");
        assert!(check_outflow_create(&store, &drain).is_ok());
        store.push(drain);
        assert_eq!(available_for(&store, &key), 0.0);

        let trailing = movement("Brick", "pcs", "materials", 0.01, "issued");
        assert!(check_outflow_create(&store, &trailing).is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for quantities between 0.01 and 1000.0
    fn qty_strategy() -> impl Strategy<Value = f64> {
        (1u32..=100_000).prop_map(|n| n as f64 / 100.0)
    }

    /// Strategy over the full status vocabulary plus neutral noise
    fn status_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("stock_in"),
            Just("completed"),
            Just("complete"),
            Just("done"),
            Just("received"),
            Just("issued"),
            Just("writeoff"),
            Just("spent"),
            Just("draft"),
            Just("pending"),
            Just("cancelled"),
        ]
    }

    /// Strategy over spelling variants that normalize into one bucket
    fn pieces_unit_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![Just(""), Just("шт"), Just("шт."), Just("ШТ."), Just(" Шт ")]
    }

    fn materials_type_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![Just(""), Just("materials"), Just("Materials"), Just("MATERIALS")]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Balance equals sum of IN minus sum of OUT, neutral rows ignored
        #[test]
        fn prop_balance_is_signed_sum(
            rows in prop::collection::vec((status_strategy(), qty_strategy()), 1..30)
        ) {
            let movements: Vec<Movement> = rows
                .iter()
                .map(|(status, qty)| movement("Cement", "кг", "", *qty, status))
                .collect();

            let mut expected = 0.0;
            for (status, qty) in &rows {
                match direction_of(status) {
                    Some(Direction::In) => expected += qty,
                    Some(Direction::Out) => expected -= qty,
                    None => {}
                }
            }

            let key = StockKey::new("Cement", Some("кг"), None);
            let got = available_for(&movements, &key);
            prop_assert!((got - expected).abs() < 1e-6);
        }

        /// A permitted create never leaves the bucket below -epsilon
        #[test]
        fn prop_create_never_overdraws(
            inflows in prop::collection::vec(qty_strategy(), 1..10),
            request in qty_strategy()
        ) {
            let store: Vec<Movement> = inflows
                .iter()
                .map(|q| movement("Brick", "pcs", "", *q, "received"))
                .collect();
            let candidate = movement("Brick", "pcs", "", request, "issued");
            let key = StockKey::new("Brick", Some("pcs"), None);

            if check_outflow_create(&store, &candidate).is_ok() {
                let mut after = store;
                after.push(candidate);
                prop_assert!(available_for(&after, &key) >= -EPSILON);
            }
        }

        /// All spelling variants of the pieces unit and materials type read
        /// the same balance.
        #[test]
        fn prop_normalization_equivalence(
            unit_a in pieces_unit_strategy(),
            unit_b in pieces_unit_strategy(),
            type_a in materials_type_strategy(),
            type_b in materials_type_strategy(),
            qty in qty_strategy()
        ) {
            let movements = vec![movement("Cement", unit_a, type_a, qty, "received")];
            let key = StockKey::new("cement", Some(unit_b), Some(type_b));
            let got = available_for(&movements, &key);
            prop_assert!((got - qty).abs() < 1e-9);
        }

        /// Re-validating an unchanged outflow always succeeds
        #[test]
        fn prop_update_identity_always_passes(
            inflow in qty_strategy()
        ) {
            let stock_in = movement("Pipe", "м", "", inflow, "received");
            let mut outflow = movement("Pipe", "м", "", inflow, "issued");
            outflow.id = 2;
            let store = vec![stock_in, outflow.clone()];

            let target = outflow.clone();
            prop_assert!(check_outflow_update(&store, &outflow, &target).is_ok());
        }

        /// Overlaying an empty patch reproduces the current record
        #[test]
        fn prop_empty_patch_is_identity(
            qty in qty_strategy(),
            status in status_strategy()
        ) {
            let current = movement("Board", "м", "materials", qty, status);
            let target = overlay_movement(&current, &MovementPatch::default());
            prop_assert_eq!(target, current);
        }
    }
}
