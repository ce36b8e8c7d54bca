// ── Date-range selector ──
//
// Check-in / check-out picker state. There is no availability or blackout
// logic: any date can be selected, including dates outside the visible
// month or in the past.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A possibly incomplete stay. `check_out`, when set, is after `check_in`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

impl DateRange {
    /// Apply one click.
    ///
    /// A later date completes a half-open range; anything else starts a
    /// new range at `day`.
    pub fn select(self, day: NaiveDate) -> Self {
        match (self.check_in, self.check_out) {
            (Some(check_in), None) if day > check_in => Self {
                check_in: Some(check_in),
                check_out: Some(day),
            },
            _ => Self {
                check_in: Some(day),
                check_out: None,
            },
        }
    }

    pub fn is_complete(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_some()
    }

    /// Nights between check-in and check-out, once both are set.
    pub fn nights(&self) -> Option<i64> {
        Some((self.check_out? - self.check_in?).num_days())
    }

    /// Highlight for `day` in a calendar cell.
    pub fn marker(&self, day: NaiveDate) -> DayMarker {
        match (self.check_in, self.check_out) {
            (Some(ci), _) if day == ci => DayMarker::CheckIn,
            (_, Some(co)) if day == co => DayMarker::CheckOut,
            (Some(ci), Some(co)) if day > ci && day < co => DayMarker::InRange,
            _ => DayMarker::None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayMarker {
    #[default]
    None,
    CheckIn,
    CheckOut,
    /// Strictly between check-in and check-out.
    InRange,
}

// ── Selector ─────────────────────────────────────────────────────────

/// Picker state: the range, the month on screen, and whether the traveler
/// said they know their dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeSelector {
    range: DateRange,
    /// Always the first of a month.
    visible_month: NaiveDate,
    enabled: bool,
}

impl DateRangeSelector {
    /// Empty range, showing the month containing `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            range: DateRange::default(),
            visible_month: first_of_month(today),
            enabled: true,
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn visible_month(&self) -> NaiveDate {
        self.visible_month
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn select_day(&mut self, day: NaiveDate) {
        self.range = self.range.select(day);
        debug!(?self.range, "date range updated");
    }

    /// Move the visible month by `delta` whole months.
    ///
    /// Leaving chrono's representable range keeps the current month.
    pub fn change_month(&mut self, delta: i32) {
        let months = Months::new(delta.unsigned_abs());
        let moved = if delta >= 0 {
            self.visible_month.checked_add_months(months)
        } else {
            self.visible_month.checked_sub_months(months)
        };

        match moved {
            Some(month) => self.visible_month = month,
            None => debug!(delta, month = %self.visible_month, "month navigation out of range"),
        }
    }

    /// Hide or show the picker. The range is kept either way.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Flip visibility and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Dates submitted with the booking form: whatever was last selected,
    /// even when the picker is hidden.
    pub fn form_dates(&self) -> DateRange {
        self.range
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::new(self.visible_month, self.range)
    }
}

fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

// ── Month grid ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub marker: DayMarker,
}

/// Monday-first calendar page. Blank cells pad the first and last week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    month: NaiveDate,
    cells: Vec<Option<DayCell>>,
}

impl MonthGrid {
    pub fn new(month: NaiveDate, range: DateRange) -> Self {
        let first = first_of_month(month);
        let leading = first.weekday().num_days_from_monday();

        let mut cells: Vec<Option<DayCell>> = (0..leading).map(|_| None).collect();
        cells.extend(
            first
                .iter_days()
                .take_while(|d| d.month() == first.month())
                .map(|date| {
                    Some(DayCell {
                        date,
                        marker: range.marker(date),
                    })
                }),
        );
        while cells.len() % 7 != 0 {
            cells.push(None);
        }

        Self {
            month: first,
            cells,
        }
    }

    /// `"January 2026"`.
    pub fn label(&self) -> String {
        self.month.format("%B %Y").to_string()
    }

    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn cells(&self) -> &[Option<DayCell>] {
        &self.cells
    }

    /// Blank cells before the 1st.
    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_none()).count()
    }

    /// Rows of seven cells, Monday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<DayCell>]> {
        self.cells.chunks(7)
    }
}
