//! Property tests for the render pipeline.
//!
//! Uses proptest to verify:
//! 1. Latest record: always the last row in file order
//! 2. Delta rule: up and warm exactly when the change is above zero
//! 3. Trend fidelity: plotted values equal the raw column in file order
//! 4. Table view: year-descending and a permutation of the input

use proptest::prelude::*;
use tradeloom_core::cards::{Indicator, Tone};
use tradeloom_core::chart::trend_chart;
use tradeloom_core::data::{parse_table, Table, TradeRecord};
use tradeloom_core::table_view::rows_descending;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_value() -> impl Strategy<Value = f64> {
    (-100_000.0..100_000.0_f64).prop_map(|v| (v * 10.0).round() / 10.0)
}

fn arb_table() -> impl Strategy<Value = Table> {
    (1usize..6, 1usize..20).prop_flat_map(|(width, rows)| {
        prop::collection::vec(
            (1990i32..2030, prop::collection::vec(prop::option::of(arb_value()), width)),
            rows,
        )
        .prop_map(move |rows| {
            let columns = (0..width).map(|i| format!("metric_{i}")).collect();
            let records = rows
                .into_iter()
                .map(|(year, values)| TradeRecord::new(year, values))
                .collect();
            Table::new("연도", columns, records)
        })
    })
}

fn to_csv(table: &Table) -> String {
    let mut out = String::from(table.year_column());
    for c in table.metric_columns() {
        out.push(',');
        out.push_str(c);
    }
    out.push('\n');
    for r in table.records() {
        out.push_str(&r.year.to_string());
        for v in &r.values {
            out.push(',');
            if let Some(v) = v {
                out.push_str(&v.to_string());
            }
        }
        out.push('\n');
    }
    out
}

// ── 1. Latest Record ─────────────────────────────────────────────────

proptest! {
    /// Whatever the year order, the latest record is the last parsed row.
    #[test]
    fn latest_is_last_row(table in arb_table()) {
        let parsed = parse_table(&to_csv(&table), "연도").unwrap();
        let last = table.records().last().unwrap();
        prop_assert_eq!(parsed.latest().unwrap().year, last.year);
        prop_assert_eq!(&parsed.latest().unwrap().values, &last.values);
    }
}

// ── 2. Delta Rule ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn up_and_warm_iff_positive(d in -1000.0..1000.0_f64) {
        let ind = Indicator::from_delta(Some(d), Some(1.0));
        if d > 0.0 {
            prop_assert_eq!(ind, Indicator::Up(d));
            prop_assert_eq!(ind.tone(), Tone::Warm);
            prop_assert!(ind.text().starts_with('▲'));
        } else {
            prop_assert_eq!(ind, Indicator::Down(d.abs()));
            prop_assert_eq!(ind.tone(), Tone::Cool);
            prop_assert!(ind.text().starts_with('▼'));
        }
    }
}

#[test]
fn zero_is_down() {
    let ind = Indicator::from_delta(Some(0.0), None);
    assert_eq!(ind.tone(), Tone::Cool);
    let ind = Indicator::from_delta(Some(-0.0), None);
    assert_eq!(ind.tone(), Tone::Cool);
}

// ── 3. Trend Fidelity ────────────────────────────────────────────────

proptest! {
    /// Every metric column charts without error, raw values in file order.
    #[test]
    fn trend_values_match_column(table in arb_table()) {
        for (idx, column) in table.metric_columns().iter().enumerate() {
            let chart = trend_chart(&table, column).unwrap();
            let expected: Vec<(i32, f64)> = table
                .records()
                .iter()
                .filter_map(|r| r.value(idx).map(|v| (r.year, v)))
                .collect();
            prop_assert_eq!(&chart.series[0].points, &expected);
        }
    }
}

// ── 4. Table View ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn table_view_is_descending_permutation(table in arb_table()) {
        let rows = rows_descending(&table);
        prop_assert_eq!(rows.len(), table.len());
        for pair in rows.windows(2) {
            prop_assert!(pair[0].year >= pair[1].year);
        }

        // Every input record appears exactly once, by identity.
        let mut positions: Vec<usize> = rows
            .iter()
            .filter_map(|row| table.records().iter().position(|r| std::ptr::eq(r, *row)))
            .collect();
        positions.sort_unstable();
        prop_assert_eq!(positions, (0..table.len()).collect::<Vec<_>>());
    }
}
