//! Grouping and ordering of board rows.

use std::collections::BTreeMap;

use serde::Serialize;

use super::normalize::{Category, DepartureRow};

/// Departures grouped by category.
///
/// Each section is sorted by (departure time, route, headsign) and holds at
/// most the `max_len` it was built with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DepartureBoard {
    sections: BTreeMap<Category, Vec<DepartureRow>>,
}

impl DepartureBoard {
    /// A board with no departures.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rows for a category, empty if there are none.
    pub fn section(&self, category: Category) -> &[DepartureRow] {
        self.sections
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Categories that have at least one row, in display order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.sections
            .iter()
            .filter(|(_, rows)| !rows.is_empty())
            .map(|(c, _)| *c)
    }

    /// Total number of rows across sections.
    pub fn len(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sort key: departure, then route, then headsign.
fn compare_rows(a: &DepartureRow, b: &DepartureRow) -> std::cmp::Ordering {
    (a.departure_seconds, &a.route_short_name, &a.trip_headsign).cmp(&(
        b.departure_seconds,
        &b.route_short_name,
        &b.trip_headsign,
    ))
}

/// Build a board from normalized rows.
///
/// Rows without a category are dropped. Each section keeps at most
/// `max_len` rows.
pub fn order(rows: Vec<DepartureRow>, max_len: usize) -> DepartureBoard {
    let mut sections: BTreeMap<Category, Vec<DepartureRow>> = BTreeMap::new();

    for row in rows {
        if let Some(category) = row.category {
            sections.entry(category).or_default().push(row);
        }
    }

    for rows in sections.values_mut() {
        rows.sort_by(compare_rows);
        rows.truncate(max_len);
    }

    DepartureBoard { sections }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_category() -> impl Strategy<Value = Option<Category>> {
        prop_oneof![
            Just(Some(Category::Tram)),
            Just(Some(Category::Bus)),
            Just(None),
        ]
    }

    fn arb_row() -> impl Strategy<Value = DepartureRow> {
        (0i64..1000, "[0-9]{1,3}", "[A-E]{1,3}", arb_category()).prop_map(
            |(departure, route, headsign, category)| DepartureRow {
                route_short_name: route,
                mode: String::new(),
                trip_headsign: headsign,
                stop_code: String::new(),
                realtime_glyph: "",
                label: String::new(),
                near: false,
                about_to_depart: false,
                departure_seconds: departure,
                category,
            },
        )
    }

    proptest! {
        /// Every section is sorted, bounded and holds only its own category.
        #[test]
        fn sections_sorted_and_bounded(
            rows in prop::collection::vec(arb_row(), 0..60),
            max_len in 1usize..20,
        ) {
            let board = order(rows, max_len);

            for category in Category::ALL {
                let section = board.section(category);
                prop_assert!(section.len() <= max_len);
                prop_assert!(section.iter().all(|r| r.category == Some(category)));
                for pair in section.windows(2) {
                    prop_assert!(compare_rows(&pair[0], &pair[1]).is_le());
                }
            }
        }
    }
}
