use anyhow::Error;
use chrono::{DateTime, Local, Utc};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::models::Department;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1])[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Step through "all departments" followed by each department, wrapping
/// around in either direction.
pub(crate) fn cycle_department(current: Option<Department>, forward: bool) -> Option<Department> {
    let mut options = vec![None];
    options.extend(Department::ALL.iter().copied().map(Some));

    let position = options
        .iter()
        .position(|option| *option == current)
        .unwrap_or(0);
    let len = options.len();
    let next = if forward {
        (position + 1) % len
    } else {
        (position + len - 1) % len
    };
    options[next]
}

pub(crate) fn department_filter_label(department: Option<Department>) -> &'static str {
    department.map(Department::label).unwrap_or("All departments")
}

/// Long local timestamp used in tables, e.g. `Mar 5, 2024 09:30`.
pub(crate) fn format_draw_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local)
        .format("%b %-d, %Y %H:%M")
        .to_string()
}

/// Move `selected` by `offset` within `len` items, clamping at both ends.
pub(crate) fn step_selection(selected: usize, offset: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let target = selected as isize + offset;
    target.clamp(0, len as isize - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_cycle_wraps_both_ways() {
        assert_eq!(
            cycle_department(None, true),
            Some(Department::InternationalMessaging)
        );
        assert_eq!(cycle_department(Some(Department::Apac), true), None);
        assert_eq!(cycle_department(None, false), Some(Department::Apac));
        assert_eq!(
            cycle_department(Some(Department::IndiaMessaging), false),
            Some(Department::InternationalMessaging)
        );
    }

    #[test]
    fn selection_clamps_to_bounds() {
        assert_eq!(step_selection(0, -1, 5), 0);
        assert_eq!(step_selection(3, 5, 5), 4);
        assert_eq!(step_selection(2, 1, 5), 3);
        assert_eq!(step_selection(4, 1, 0), 0);
    }
}
