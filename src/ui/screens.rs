use crate::models::{Contestant, Department, Winner};
use crate::report::{filter_winners, WinnerFilter};

use super::forms::{CountInput, LoginForm};
use super::helpers::step_selection;

/// High-level navigation states.
pub(crate) enum Screen {
    Login(LoginForm),
    Dashboard,
    Draw(DrawScreen),
    Winners(WinnersScreen),
    Analytics,
}

pub(crate) struct DrawScreen {
    pub(crate) department: Option<Department>,
    pub(crate) count: CountInput,
    pub(crate) eligible: Vec<Contestant>,
    pub(crate) selected: usize,
    /// Result of the most recent draw on this screen.
    pub(crate) last_draw: Vec<Winner>,
}

impl DrawScreen {
    pub(crate) fn new(eligible: Vec<Contestant>) -> Self {
        Self {
            department: None,
            count: CountInput::default(),
            eligible,
            selected: 0,
            last_draw: Vec::new(),
        }
    }

    pub(crate) fn set_eligible(&mut self, eligible: Vec<Contestant>) {
        self.eligible = eligible;
        self.selected = step_selection(self.selected, 0, self.eligible.len());
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step_selection(self.selected, offset, self.eligible.len());
    }
}

/// Winners list with an active search and department filter.
pub(crate) struct WinnersScreen {
    pub(crate) winners: Vec<Winner>,
    pub(crate) filter: WinnerFilter,
    pub(crate) filtered: Vec<Winner>,
    pub(crate) selected: usize,
}

impl WinnersScreen {
    pub(crate) fn new(winners: Vec<Winner>) -> Self {
        let mut screen = Self {
            winners,
            filter: WinnerFilter::default(),
            filtered: Vec::new(),
            selected: 0,
        };
        screen.apply_filter();
        screen
    }

    pub(crate) fn apply_filter(&mut self) {
        self.filtered = filter_winners(&self.winners, &self.filter);
        self.selected = step_selection(self.selected, 0, self.filtered.len());
    }

    pub(crate) fn set_query(&mut self, query: String) {
        self.filter.query = query;
        self.apply_filter();
    }

    pub(crate) fn set_department(&mut self, department: Option<Department>) {
        self.filter.department = department;
        self.apply_filter();
    }

    pub(crate) fn set_winners(&mut self, winners: Vec<Winner>) {
        self.winners = winners;
        self.apply_filter();
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step_selection(self.selected, offset, self.filtered.len());
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.filtered.len().saturating_sub(1);
    }

    /// List heading; shows the unfiltered total while a search or department
    /// filter is narrowing the view.
    pub(crate) fn title(&self) -> String {
        if self.filter.is_active() {
            format!(
                "Winners List ({} of {}, filtered)",
                self.filtered.len(),
                self.winners.len()
            )
        } else {
            format!("Winners List ({})", self.filtered.len())
        }
    }
}
