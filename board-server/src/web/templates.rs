//! Askama templates for the board pages.

use askama::Template;

use crate::board::{BoardSnapshot, Category, DepartureRow};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Board page: clock plus a container the script fills from `/departures`.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub clock: String,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Departure tables, one per category.
#[derive(Template)]
#[template(path = "departures.html")]
pub struct DeparturesTemplate {
    pub sections: Vec<SectionView>,
    pub available: bool,
    pub updated: String,
}

impl DeparturesTemplate {
    /// Build from a loaded board.
    pub fn from_snapshot(snapshot: &BoardSnapshot, updated: impl Into<String>) -> Self {
        let sections = Category::ALL
            .iter()
            .map(|&category| SectionView::new(category, snapshot.board.section(category)))
            .collect();

        Self {
            sections,
            available: snapshot.available,
            updated: updated.into(),
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One board section.
#[derive(Debug, Clone)]
pub struct SectionView {
    pub key: &'static str,
    pub title: &'static str,
    pub rows: Vec<RowView>,
}

impl SectionView {
    pub fn new(category: Category, rows: &[DepartureRow]) -> Self {
        Self {
            key: category.as_str(),
            title: category.title(),
            rows: rows.iter().map(RowView::from_row).collect(),
        }
    }
}

/// Row view model.
#[derive(Debug, Clone)]
pub struct RowView {
    pub route_short_name: String,
    pub mode: String,
    pub trip_headsign: String,
    pub stop_code: String,
    pub realtime_glyph: &'static str,
    pub label: String,
    pub near: bool,
    pub about_to_depart: bool,
}

impl RowView {
    pub fn from_row(row: &DepartureRow) -> Self {
        Self {
            route_short_name: row.route_short_name.clone(),
            mode: row.mode.clone(),
            trip_headsign: row.trip_headsign.clone(),
            stop_code: row.stop_code.clone(),
            realtime_glyph: row.realtime_glyph,
            label: row.label.clone(),
            near: row.near,
            about_to_depart: row.about_to_depart,
        }
    }

    /// CSS classes for the time cells.
    pub fn time_class(&self) -> String {
        let mut class = format!("about-to-{}", self.about_to_depart);
        if self.near {
            class.push_str(" near");
        }
        class
    }
}
