//! Materials stock ledger.
//!
//! Every purchase record is a signed movement against a logical stock keyed
//! by (item, unit, type). Direction comes from a closed status vocabulary:
//! statuses in [`IN_STATUSES`] add to the available balance, statuses in
//! [`OUT_STATUSES`] subtract from it, anything else (drafts, pending,
//! cancelled) is ignored. Unit and type strings are free text in the UI, so
//! key matching collapses common spelling variants into one bucket before
//! comparing.
//!
//! The functions here are pure; the backend feeds them movement rows loaded
//! inside the same transaction that performs the write.

use serde::{Deserialize, Serialize};

/// Tolerance for quantity comparisons; absorbs float rounding so a request
/// equal to the available balance is accepted.
pub const EPSILON: f64 = 1e-9;

/// Statuses that increase available balance.
pub const IN_STATUSES: [&str; 5] = ["stock_in", "completed", "complete", "done", "received"];

/// Statuses that decrease available balance.
pub const OUT_STATUSES: [&str; 3] = ["issued", "writeoff", "spent"];

/// Direction of a movement, derived from its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

/// Resolve a raw status string to a ledger direction.
///
/// Matching is case-insensitive. Statuses outside both sets return `None`
/// and contribute nothing to balances.
pub fn direction_of(status: &str) -> Option<Direction> {
    let folded = status.to_lowercase();
    if IN_STATUSES.contains(&folded.as_str()) {
        Some(Direction::In)
    } else if OUT_STATUSES.contains(&folded.as_str()) {
        Some(Direction::Out)
    } else {
        None
    }
}

/// Normalize a unit string: lower-case, trim, strip literal dots.
pub fn normalize_unit(unit: &str) -> String {
    unit.trim().to_lowercase().replace('.', "")
}

/// Normalize a type string: lower-case, trim.
pub fn normalize_type(mtype: &str) -> String {
    mtype.trim().to_lowercase()
}

/// Canonical representative of a unit's equivalence class.
///
/// "No unit" and "pieces" ("шт", "шт.") are the same physical bucket, so the
/// whole class collapses to the empty string. Any other normalized unit is
/// its own class.
fn canonical_unit(unit: Option<&str>) -> String {
    let norm = normalize_unit(unit.unwrap_or(""));
    if norm.is_empty() || norm == "шт" {
        String::new()
    } else {
        norm
    }
}

/// Canonical representative of a type's equivalence class.
///
/// An empty type and "materials" are the same bucket.
fn canonical_type(mtype: Option<&str>) -> String {
    let norm = normalize_type(mtype.unwrap_or(""));
    if norm.is_empty() || norm == "materials" {
        String::new()
    } else {
        norm
    }
}

/// Normalized (item, unit, type) identifying one logical stock bucket.
///
/// Two keys built from differently-spelled raw text compare equal when the
/// normalization rules put them in the same equivalence class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StockKey {
    item: String,
    unit: String,
    mtype: String,
}

impl StockKey {
    pub fn new(item: &str, unit: Option<&str>, mtype: Option<&str>) -> Self {
        Self {
            item: item.to_lowercase(),
            unit: canonical_unit(unit),
            mtype: canonical_type(mtype),
        }
    }

    pub fn of_movement(movement: &Movement) -> Self {
        Self::new(
            &movement.item,
            movement.unit.as_deref(),
            movement.mtype.as_deref(),
        )
    }

    pub fn matches(&self, movement: &Movement) -> bool {
        Self::of_movement(movement) == *self
    }

    /// Stable string form of the key, used by the backend as the argument to
    /// the per-key advisory lock that serializes concurrent outflows.
    pub fn lock_tag(&self) -> String {
        format!("{}|{}|{}", self.item, self.unit, self.mtype)
    }
}

/// One recorded change to physical stock.
///
/// Quantity is stored non-negative; direction is implicit in the status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub id: i64,
    pub item: String,
    pub unit: Option<String>,
    #[serde(rename = "type")]
    pub mtype: Option<String>,
    pub qty: Option<f64>,
    pub status: Option<String>,
}

impl Movement {
    fn signed_qty(&self) -> f64 {
        let qty = self.qty.unwrap_or(0.0);
        match self.status.as_deref().and_then(direction_of) {
            Some(Direction::In) => qty,
            Some(Direction::Out) => -qty,
            None => 0.0,
        }
    }
}

/// Available balance for a stock key: sum of IN quantities minus sum of OUT
/// quantities over all movements matching the normalized key.
pub fn available_for(movements: &[Movement], key: &StockKey) -> f64 {
    movements
        .iter()
        .filter(|m| key.matches(m))
        .map(Movement::signed_qty)
        .sum()
}

/// Structured payload of a stock insufficiency rejection.
///
/// Callers need the raw figures to render a meaningful message, not just a
/// human sentence. `available` is floored at zero for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockShortage {
    pub available: f64,
    pub requested: f64,
    pub item: String,
    pub unit: Option<String>,
    #[serde(rename = "type")]
    pub mtype: Option<String>,
}

impl StockShortage {
    fn new(available: f64, requested: f64, movement: &Movement) -> Self {
        Self {
            available: available.max(0.0),
            requested,
            item: movement.item.clone(),
            unit: movement.unit.clone(),
            mtype: movement.mtype.clone(),
        }
    }
}

/// Gate for creating a movement.
///
/// Only an outflow with positive quantity is checked; inflows and neutral
/// statuses pass unconditionally. `existing` must not contain the candidate.
pub fn check_outflow_create(
    existing: &[Movement],
    candidate: &Movement,
) -> Result<(), StockShortage> {
    let qty = candidate.qty.unwrap_or(0.0);
    let is_outflow = candidate
        .status
        .as_deref()
        .and_then(direction_of)
        .map_or(false, |d| d == Direction::Out);
    if !is_outflow || qty <= 0.0 {
        return Ok(());
    }

    let key = StockKey::of_movement(candidate);
    let available = available_for(existing, &key);
    if qty > available + EPSILON {
        return Err(StockShortage::new(available, qty, candidate));
    }
    Ok(())
}

/// Gate for updating a movement in place.
///
/// `movements` is the store as it currently stands, including `current`.
/// `target` is the record after overlaying the patch. If the old record was
/// itself an outflow, its quantity is added back to the available balance:
/// that contribution is about to be replaced and must not count against the
/// new quantity.
pub fn check_outflow_update(
    movements: &[Movement],
    current: &Movement,
    target: &Movement,
) -> Result<(), StockShortage> {
    let target_qty = target.qty.unwrap_or(0.0);
    let is_outflow = target
        .status
        .as_deref()
        .and_then(direction_of)
        .map_or(false, |d| d == Direction::Out);
    if !is_outflow || target_qty <= 0.0 {
        return Ok(());
    }

    let key = StockKey::of_movement(target);
    let mut available = available_for(movements, &key);
    let old_was_outflow = current
        .status
        .as_deref()
        .and_then(direction_of)
        .map_or(false, |d| d == Direction::Out);
    if old_was_outflow {
        available += current.qty.unwrap_or(0.0);
    }

    if target_qty > available + EPSILON {
        return Err(StockShortage::new(available, target_qty, target));
    }
    Ok(())
}

/// Partial update of a movement's ledger-relevant fields.
///
/// Fields absent from the payload keep their old value. Text fields sent as
/// empty strings also keep the old value, matching the update semantics of
/// the surrounding API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovementPatch {
    pub item: Option<String>,
    pub unit: Option<String>,
    #[serde(rename = "type")]
    pub mtype: Option<String>,
    pub qty: Option<f64>,
    pub status: Option<String>,
}

/// Overlay a patch onto the current record, producing the target state the
/// update gate validates.
pub fn overlay_movement(current: &Movement, patch: &MovementPatch) -> Movement {
    let pick_text = |new: &Option<String>, old: &Option<String>| -> Option<String> {
        match new.as_deref() {
            Some(s) if !s.is_empty() => Some(s.to_string()),
            _ => old.clone(),
        }
    };
    Movement {
        id: current.id,
        item: match patch.item.as_deref() {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => current.item.clone(),
        },
        unit: pick_text(&patch.unit, &current.unit),
        mtype: pick_text(&patch.mtype, &current.mtype),
        qty: patch.qty.or(current.qty),
        status: pick_text(&patch.status, &current.status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn unit_class_collapses_pieces_and_empty() {
        for raw in ["", "шт", "шт.", " ШТ. ", "Шт"] {
            assert_eq!(canonical_unit(Some(raw)), "", "raw unit {:?}", raw);
        }
        assert_eq!(canonical_unit(None), "");
        assert_eq!(canonical_unit(Some("КГ.")), "кг");
        assert_eq!(canonical_unit(Some(" m3 ")), "m3");
    }

    #[test]
    fn type_class_collapses_materials_and_empty() {
        for raw in ["", "materials", " Materials ", "MATERIALS"] {
            assert_eq!(canonical_type(Some(raw)), "", "raw type {:?}", raw);
        }
        assert_eq!(canonical_type(Some("Tools")), "tools");
    }

    #[test]
    fn item_matching_is_case_insensitive_only() {
        let key = StockKey::new("Cement", None, None);
        assert!(key.matches(&movement("CEMENT", "", "", 1.0, "received")));
        // No trimming on item names.
        assert!(!key.matches(&movement(" Cement", "", "", 1.0, "received")));
    }

    #[test]
    fn direction_partition() {
        assert_eq!(direction_of("received"), Some(Direction::In));
        assert_eq!(direction_of("STOCK_IN"), Some(Direction::In));
        assert_eq!(direction_of("Issued"), Some(Direction::Out));
        assert_eq!(direction_of("writeoff"), Some(Direction::Out));
        assert_eq!(direction_of("pending"), None);
        assert_eq!(direction_of("cancelled"), None);
        assert_eq!(direction_of(""), None);
    }

    #[test]
    fn neutral_statuses_contribute_zero() {
        let movements = vec![
            movement("Brick", "pcs", "materials", 100.0, "received"),
            movement("Brick", "pcs", "materials", 9000.0, "pending"),
            movement("Brick", "pcs", "materials", 30.0, "issued"),
        ];
        let key = StockKey::new("Brick", Some("pcs"), Some("materials"));
        assert_eq!(available_for(&movements, &key), 70.0);
    }

    #[test]
    fn null_quantity_contributes_zero() {
        let mut m = movement("Sand", "кг", "", 0.0, "received");
        m.qty = None;
        let key = StockKey::new("Sand", Some("кг"), None);
        assert_eq!(available_for(&[m], &key), 0.0);
    }

    #[test]
    fn equivalent_spellings_share_one_bucket() {
        let movements = vec![
            movement("Cement", "шт", "", 10.0, "received"),
            movement("cement", "ШТ.", "materials", 5.0, "done"),
            movement("CEMENT", "", "Materials", 3.0, "issued"),
        ];
        for (unit, mtype) in [("шт", ""), ("ШТ.", "materials"), ("", "Materials")] {
            let key = StockKey::new("Cement", Some(unit), Some(mtype));
            assert_eq!(available_for(&movements, &key), 12.0);
        }
    }

    #[test]
    fn overlay_keeps_absent_and_empty_fields() {
        let current = movement("Brick", "pcs", "materials", 10.0, "issued");
        let patch = MovementPatch {
            unit: Some(String::new()),
            qty: Some(4.0),
            ..Default::default()
        };
        let target = overlay_movement(&current, &patch);
        assert_eq!(target.item, "Brick");
        assert_eq!(target.unit.as_deref(), Some("pcs"));
        assert_eq!(target.qty, Some(4.0));
        assert_eq!(target.status.as_deref(), Some("issued"));
    }
}
