//! Selection algebra tests for xlnav
//!
//! Tests for reference arithmetic, range normalisation, containment,
//! conversions, label resolution, anchors and ignore-kind ordering.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::collections::HashMap;

use test_case::test_case;
use xlnav::{
    Anchor, AnchoredSelection, AxisReference, CellRange, CellReference, ColumnReference, Label,
    RowReference, Selection, XlnavError,
};

fn sel(text: &str) -> Selection {
    text.parse().unwrap()
}

fn cell(text: &str) -> CellReference {
    text.parse().unwrap()
}

// ============================================================================
// Reference arithmetic
// ============================================================================

#[test_case("A")]
#[test_case("$M")]
#[test_case("XFD")]
fn test_column_saturates_at_both_ends(text: &str) {
    let column: ColumnReference = text.parse().unwrap();
    assert_eq!(column.add_saturated(-1_000_000).value(), 0);
    assert_eq!(
        column.add_saturated(1_000_000).value(),
        ColumnReference::MAX
    );
}

#[test_case("1")]
#[test_case("$500")]
#[test_case("1048576")]
fn test_row_saturates_at_both_ends(text: &str) {
    let row: RowReference = text.parse().unwrap();
    assert_eq!(row.add_saturated(-1_000_000).value(), 0);
    assert_eq!(row.add_saturated(1_000_000).value(), RowReference::MAX);
}

#[test]
fn test_zero_delta_is_identity() {
    let column: ColumnReference = "$C".parse().unwrap();
    assert_eq!(column.add_saturated(0), column);
}

#[test]
fn test_checked_add_leaves_domain() {
    let last: ColumnReference = "XFD".parse().unwrap();
    assert!(matches!(
        last.add(1),
        Err(XlnavError::OutOfDomain { max: 16_383, .. })
    ));
    assert!(matches!(
        RowReference::first().add(-1),
        Err(XlnavError::OutOfDomain { value: -1, .. })
    ));
    assert_eq!(last.add(-3).unwrap().to_string(), "XFA");
}

#[test]
fn test_add_if_relative_keeps_absolute() {
    let absolute: ColumnReference = "$B".parse().unwrap();
    let relative: ColumnReference = "B".parse().unwrap();
    assert_eq!(absolute.add_if_relative(3), absolute);
    assert_eq!(relative.add_if_relative(3).to_string(), "E");

    let mixed = sel("$A1:B$2").add_if_relative(1, 1);
    assert_eq!(mixed.to_string(), "$A2:C$2");
}

#[test]
fn test_kind_only_affects_strict_equality() {
    let relative = cell("B2");
    let absolute = cell("$B$2");
    assert_ne!(relative, absolute);
    assert!(relative.eq_ignore_kind(absolute));
    assert_eq!(absolute.to_relative(), relative);
}

// ============================================================================
// Ranges
// ============================================================================

#[test_case("A1", "C3")]
#[test_case("C3", "A1")]
#[test_case("A3", "C1")]
#[test_case("C1", "A3")]
fn test_range_is_normalised(a: &str, b: &str) {
    let range = cell(a).range(cell(b));
    assert!(range.begin().column().value() <= range.end().column().value());
    assert!(range.begin().row().value() <= range.end().row().value());
    assert_eq!(range.to_string(), "A1:C3");
}

#[test]
fn test_range_from_cells() {
    let range = CellRange::from_cells([cell("D2"), cell("B5"), cell("C1")]).unwrap();
    assert_eq!(range.to_string(), "B1:D5");
    assert!(matches!(
        CellRange::from_cells(std::iter::empty()),
        Err(XlnavError::EmptyCellSet)
    ));
}

#[test_case("A1:B2", "B2:C3", true ; "shared corner cell")]
#[test_case("A1:B2", "C3:D4", false ; "disjoint")]
#[test_case("A1:D1", "B1:B9", true ; "crossing")]
#[test_case("A1:A9", "B1:B9", false ; "adjacent columns")]
fn test_cell_range_intersection(a: &str, b: &str, expected: bool) {
    let a: CellRange = a.parse().unwrap();
    let b: CellRange = b.parse().unwrap();
    assert_eq!(a.test_cell_range(b), expected);
    assert_eq!(b.test_cell_range(a), expected);
}

#[test]
fn test_cell_range_containment() {
    let range: CellRange = "B2:D4".parse().unwrap();
    assert!(range.test_cell(cell("C3")));
    assert!(!range.test_cell(cell("A3")));
    assert!(range.test_column("D".parse().unwrap()));
    assert!(!range.test_row("5".parse().unwrap()));
    assert!(range.contains_range("C3:D4".parse().unwrap()));
    assert!(!range.contains_range("C3:E4".parse().unwrap()));
    assert_eq!(range.width(), 3);
    assert_eq!(range.height(), 3);
    assert_eq!(range.count(), 9);
}

// ============================================================================
// Selection conversions
// ============================================================================

#[test]
fn test_widening_conversions() {
    assert_eq!(sel("C").to_cell().unwrap().to_string(), "C1");
    assert_eq!(sel("5").to_cell_range().unwrap().to_string(), "A5:XFD5");
    assert_eq!(sel("B:C").to_cell_range().unwrap().to_string(), "B1:C1048576");
    assert_eq!(sel("B2:D4").to_column_range().unwrap().to_string(), "B:D");
    assert_eq!(sel("B2:D4").to_row_range().unwrap().to_string(), "2:4");
}

#[test]
fn test_conversions_fail_across_axes() {
    assert!(matches!(
        sel("5").to_column(),
        Err(XlnavError::Conversion { target: "column", .. })
    ));
    assert!(sel("B:C").to_row_range().is_err());
    assert!(sel("Total").to_cell().is_err());
    assert!(sel("Total").count().is_err());
}

#[test]
fn test_count_first_last() {
    assert_eq!(sel("A1:B3").count().unwrap(), 6);
    assert_eq!(sel("2:11").count().unwrap(), 10);
    assert!(sel("A1").is_first().unwrap());
    assert!(sel("XFD1048576").is_last().unwrap());
    assert!(!sel("B:XFD").is_first().unwrap());
}

#[test]
fn test_is_hidden() {
    let hidden_columns = |c: ColumnReference| c.value() == 1 || c.value() == 2;
    let no_rows = |_: RowReference| false;
    assert!(sel("B2:C9").is_hidden(hidden_columns, no_rows).unwrap());
    assert!(!sel("B2:D9").is_hidden(hidden_columns, no_rows).unwrap());
    assert!(sel("C7").is_hidden(hidden_columns, no_rows).unwrap());
    assert!(!sel("3:4").is_hidden(hidden_columns, no_rows).unwrap());
}

// ============================================================================
// Labels
// ============================================================================

#[test_case("Total", true)]
#[test_case("_tmp.1", true)]
#[test_case("\\path", true)]
#[test_case("A1", false ; "looks like a cell")]
#[test_case("1st", false ; "digit first")]
#[test_case("my label", false ; "space")]
fn test_label_names(name: &str, valid: bool) {
    assert_eq!(Label::new(name).is_ok(), valid);
}

#[test]
fn test_label_length_limit() {
    assert!(Label::new(&"x".repeat(255)).is_ok());
    assert!(Label::new(&"x".repeat(256)).is_err());
}

#[test]
fn test_label_case_insensitive() {
    assert_eq!(Label::new("Total").unwrap(), Label::new("TOTAL").unwrap());
}

fn store(entries: &[(&str, &str)]) -> HashMap<Label, Selection> {
    entries
        .iter()
        .map(|(name, target)| (Label::new(name).unwrap(), sel(target)))
        .collect()
}

#[test]
fn test_resolve_non_label_is_identity() {
    let labels = store(&[]);
    for text in ["A1", "$B$2:C3", "D", "4:5"] {
        assert_eq!(sel(text).resolve(&labels), Some(sel(text)));
    }
}

#[test]
fn test_resolve_follows_chains() {
    let labels = store(&[("Outer", "Inner"), ("Inner", "B2:C3")]);
    assert_eq!(sel("outer").resolve_or_fail(&labels).unwrap(), sel("B2:C3"));
}

#[test]
fn test_resolve_missing_and_cycle() {
    let labels = store(&[("Loop", "Back"), ("Back", "Loop"), ("Dangling", "Nowhere")]);
    assert!(matches!(
        sel("Dangling").resolve_or_fail(&labels),
        Err(XlnavError::LabelNotFound(label)) if label.name() == "Nowhere"
    ));
    assert!(matches!(
        sel("Loop").resolve_or_fail(&labels),
        Err(XlnavError::LabelCycle(_))
    ));
    assert_eq!(sel("Loop").resolve(&labels), None);
}

// ============================================================================
// Anchors
// ============================================================================

#[test_case("A1", Anchor::None, true)]
#[test_case("A1", Anchor::TopLeft, false)]
#[test_case("A1:B2", Anchor::BottomRight, true)]
#[test_case("A1:B2", Anchor::Left, false)]
#[test_case("B:D", Anchor::Right, true)]
#[test_case("B:D", Anchor::Top, false)]
#[test_case("2:4", Anchor::Bottom, true)]
#[test_case("2:4", Anchor::None, false)]
#[test_case("Total", Anchor::TopRight, true)]
fn test_anchor_validity(text: &str, anchor: Anchor, valid: bool) {
    let result = AnchoredSelection::new(sel(text), anchor);
    assert_eq!(result.is_ok(), valid);
    if !valid {
        assert!(matches!(result, Err(XlnavError::InvalidAnchor { .. })));
    }
}

#[test]
fn test_anchor_opposites_swap_fixed_and_moving() {
    let range: CellRange = "B2:D4".parse().unwrap();
    for anchor in [Anchor::TopLeft, Anchor::TopRight, Anchor::BottomLeft, Anchor::BottomRight] {
        assert_eq!(anchor.fixed_cell(range), anchor.opposite().moving_cell(range));
    }
    assert_eq!(Anchor::Top.opposite(), Anchor::Bottom);
    assert_eq!(Anchor::None.opposite(), Anchor::None);
}

#[test]
fn test_focus_is_moving_edge() {
    let anchored: AnchoredSelection = "B:D right".parse().unwrap();
    assert_eq!(anchored.focus(), Some(sel("B")));
    let anchored: AnchoredSelection = "A1:C3 top-right".parse().unwrap();
    assert_eq!(anchored.focus(), Some(sel("A3")));
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_mixed_ordering() {
    let mut selections: Vec<Selection> = ["total", "3", "B", "A2", "$B$1", "Alpha", "A1:C1"]
        .into_iter()
        .map(sel)
        .collect();
    selections.sort_by(Selection::cmp_ignore_kind);
    let sorted: Vec<String> = selections.iter().map(ToString::to_string).collect();
    assert_eq!(sorted, ["A1:C1", "$B$1", "A2", "B", "3", "Alpha", "total"]);
}

#[test]
fn test_ignore_kind_equality() {
    assert!(sel("$A$1").eq_ignore_kind(&sel("A1")));
    assert!(sel("A1").eq_ignore_kind(&sel("A1:A1")));
    assert!(!sel("A1").eq_ignore_kind(&sel("A")));
}

// ============================================================================
// Anchored text form
// ============================================================================

#[test_case(Selection::Cell(cell("$C$7")) ; "cell")]
#[test_case(Selection::CellRange("A1:B2".parse().unwrap()) ; "cell range")]
#[test_case(Selection::CellRange("B2".parse().unwrap()) ; "single cell range")]
#[test_case(Selection::Column("XFD".parse().unwrap()) ; "column")]
#[test_case(Selection::ColumnRange("$B:D".parse().unwrap()) ; "column range")]
#[test_case(Selection::ColumnRange("C".parse().unwrap()) ; "single column range")]
#[test_case(Selection::Row("$1048576".parse().unwrap()) ; "row")]
#[test_case(Selection::RowRange("2:4".parse().unwrap()) ; "row range")]
#[test_case(Selection::RowRange("$4".parse().unwrap()) ; "single row range")]
#[test_case(Selection::Label(Label::new("Totals").unwrap()) ; "label")]
fn test_anchored_text_every_anchor(selection: Selection) {
    for anchor in selection.anchors() {
        let anchored = AnchoredSelection::new(selection.clone(), *anchor).unwrap();
        let text = anchored.to_string();
        let reparsed: AnchoredSelection = text.parse().unwrap();
        assert_eq!(reparsed, anchored, "{text}");
        assert_eq!(reparsed.selection().type_name(), selection.type_name(), "{text}");
    }
}

#[test]
fn test_label_text_reads_back_as_label() {
    let label = Selection::Label(Label::new("Totals").unwrap());
    assert_eq!(sel(&label.to_string()), label);
    assert!(Label::new("Sum").is_err());
    assert!(Label::new("a1").is_err());
    assert!(matches!(sel("Sum"), Selection::Column(_)));
}
