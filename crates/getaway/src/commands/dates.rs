//! Date picker: replays day clicks on a month calendar and prints the
//! resulting stay. Runs locally, no storefront needed.

use std::fmt::Write;

use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;
use serde::Serialize;

use getaway_core::{DateRange, DateRangeSelector, DayCell, DayMarker, MonthGrid};

use crate::cli::{DatesArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct DatesView {
    month: String,
    #[serde(flatten)]
    range: DateRange,
    nights: Option<i64>,
    grid: MonthGrid,
}

fn cell(cell: Option<&DayCell>, color: bool) -> String {
    let Some(cell) = cell else {
        return "    ".into();
    };
    let day = cell.date.format("%e").to_string();
    let text = match cell.marker {
        DayMarker::None => format!(" {day} "),
        DayMarker::CheckIn | DayMarker::CheckOut => format!("[{day}]"),
        DayMarker::InRange => format!("~{day}~"),
    };
    match (color, cell.marker) {
        (false, _) | (true, DayMarker::None) => text,
        (true, DayMarker::InRange) => text.cyan().to_string(),
        (true, _) => text.black().on_cyan().to_string(),
    }
}

fn calendar(view: &DatesView, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", output::heading(&view.month, color));
    let _ = writeln!(out, " Mo  Tu  We  Th  Fr  Sa  Su");
    for week in view.grid.weeks() {
        let row: String = week.iter().map(|c| cell(c.as_ref(), color)).collect();
        let _ = writeln!(out, "{}", row.trim_end());
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Check in:  {}", show_date(view.range.check_in));
    let _ = write!(out, "Check out: {}", show_date(view.range.check_out));
    if let Some(nights) = view.nights {
        let _ = write!(out, " ({nights} nights)");
    }
    out
}

fn show_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "--".into(), |d| d.format("%a %b %-d, %Y").to_string())
}

/// Picker state after opening on `today`, paging `months` and clicking
/// each of `days` in order.
fn replay(today: NaiveDate, months: i32, days: &[NaiveDate]) -> DateRangeSelector {
    let mut selector = DateRangeSelector::new(today);
    selector.change_month(months);
    for day in days {
        selector.select_day(*day);
    }
    selector
}

pub fn handle(args: &DatesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let selector = replay(today, args.months, &args.days);

    let grid = selector.grid();
    let range = selector.form_dates();
    let view = DatesView {
        month: grid.label(),
        range,
        nights: range.nights(),
        grid,
    };

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &view,
        |v| calendar(v, color),
        |v| {
            [v.range.check_in, v.range.check_out]
                .iter()
                .map(|d| d.map(|d| d.to_string()).unwrap_or_default())
                .collect::<Vec<_>>()
                .join("\t")
        },
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
