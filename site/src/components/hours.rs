use maud::{Markup, html};

use crate::record::{DayHours, Hours, Interval};

fn intervals_summary(is_closed: bool, intervals: &[Interval]) -> String {
    if is_closed || intervals.is_empty() {
        return "Closed".to_string();
    }

    intervals
        .iter()
        .map(|interval| format!("{} – {}", interval.start, interval.end))
        .collect::<Vec<_>>()
        .join(", ")
}

fn day_summary(day: Option<&DayHours>) -> String {
    day.map_or_else(
        || "Closed".to_string(),
        |day| intervals_summary(day.is_closed, &day.open_intervals),
    )
}

pub fn hours(title: &str, hours: &Hours) -> Markup {
    html! {
        section.rounded-card.bg-white.p-6.shadow data-section="hours" {
            h2.text-xl.font-semibold.mb-4 { (title) }
            table.w-full {
                tbody {
                    @for (day, day_hours) in hours.days() {
                        tr {
                            th.text-left.font-medium.pr-4 { (day) }
                            td { (day_summary(day_hours)) }
                        }
                    }
                }
            }
            @if !hours.holiday_hours.is_empty() {
                h3.font-medium.mt-4.mb-2 { "Holiday hours" }
                ul {
                    @for holiday in &hours.holiday_hours {
                        li { (holiday.date) ": " (intervals_summary(holiday.is_closed, &holiday.open_intervals)) }
                    }
                }
            }
            @if let Some(reopen_date) = &hours.reopen_date {
                p.mt-4.text-sm { "Reopening on " (reopen_date) }
            }
        }
    }
}
