//! The planner: the selected day, the input buffer, and the actions on them.
//!
//! Every action follows the same path: read the selected day's list, change
//! it, save the whole list, then rebuild the view. Actions that would not
//! change anything (blank text, an index past the end) write nothing and
//! leave the view alone.

use crate::action_log::ActionLog;
use crate::day::DayKey;
use crate::error::Result;
use crate::render::{self, DaySummary, DayView};
use crate::tasks::{Task, TaskStore};
use crate::traits::Clock;
use serde_json::json;

/// Notice shown when asked to add a blank task.
pub const EMPTY_TASK_NOTICE: &str = "Please enter a task!";

/// What an action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The list was changed, saved, and re-rendered.
    Applied,
    /// The action was refused; the notice explains why.
    Rejected(&'static str),
    /// Nothing at that index; nothing was changed.
    Ignored,
}

impl Outcome {
    /// Short name for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Rejected(_) => "rejected",
            Self::Ignored => "ignored",
        }
    }
}

/// Holds the selected day and applies actions to its task list.
pub struct Planner<'a> {
    store: &'a dyn TaskStore,
    clock: &'a dyn Clock,
    selected: DayKey,
    input: String,
    view: DayView,
    action_log: Option<ActionLog>,
}

impl<'a> Planner<'a> {
    /// Start on today's list.
    #[must_use]
    pub fn new(store: &'a dyn TaskStore, clock: &'a dyn Clock) -> Self {
        let today = DayKey::today(clock);
        Self::starting_on(store, clock, today)
    }

    /// Start on a specific day's list.
    #[must_use]
    pub fn starting_on(store: &'a dyn TaskStore, clock: &'a dyn Clock, day: DayKey) -> Self {
        let view = render::render(store, day, DayKey::today(clock));
        Self { store, clock, selected: day, input: String::new(), view, action_log: None }
    }

    /// Record every action to the given log.
    #[must_use]
    pub fn with_action_log(mut self, log: Option<ActionLog>) -> Self {
        self.action_log = log;
        self
    }

    /// The selected day.
    #[must_use]
    pub const fn selected(&self) -> DayKey {
        self.selected
    }

    /// Today's key according to the planner's clock.
    #[must_use]
    pub fn today(&self) -> DayKey {
        DayKey::today(self.clock)
    }

    /// Read a date-like string (`2026-10-19`, `tomorrow`, ...) against the
    /// planner's clock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDayKey`](crate::error::Error::InvalidDayKey)
    /// if the string is not a date.
    pub fn resolve_day(&self, input: &str) -> Result<DayKey> {
        Ok(DayKey::resolve(input, self.clock)?)
    }

    /// The view from the last render.
    #[must_use]
    pub const fn view(&self) -> &DayView {
        &self.view
    }

    /// The selected day's tasks as currently stored.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.store.list(self.selected)
    }

    /// Summaries of every stored day that has tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot enumerate its days.
    pub fn day_summaries(&self) -> Result<Vec<DaySummary>> {
        render::summarize_days(self.store, self.today())
    }

    /// The pending input text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the pending input text.
    pub fn set_input(&mut self, text: &str) {
        text.clone_into(&mut self.input);
    }

    /// Switch to another day and re-render.
    pub fn select(&mut self, day: DayKey) {
        self.selected = day;
        self.refresh();
    }

    /// Rebuild the view from the store.
    pub fn refresh(&mut self) -> &DayView {
        self.view = render::render(self.store, self.selected, self.today());
        &self.view
    }

    /// Add the pending input as a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be saved.
    pub fn submit_input(&mut self) -> Result<Outcome> {
        let text = self.input.clone();
        self.add_task(&text)
    }

    /// Append a task to the selected day.
    ///
    /// Blank text is rejected with [`EMPTY_TASK_NOTICE`]. On success the input
    /// buffer is cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be saved.
    pub fn add_task(&mut self, text: &str) -> Result<Outcome> {
        let outcome = match Task::new(text) {
            None => Outcome::Rejected(EMPTY_TASK_NOTICE),
            Some(task) => {
                let mut tasks = self.tasks();
                tasks.push(task);
                self.store.save(self.selected, &tasks)?;
                self.input.clear();
                self.refresh();
                Outcome::Applied
            }
        };
        self.log("add", &outcome, &json!({ "text": text.trim() }));
        Ok(outcome)
    }

    /// Flip the completed flag of the task at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be saved.
    pub fn toggle(&mut self, index: usize) -> Result<Outcome> {
        let mut tasks = self.tasks();
        let outcome = match tasks.get_mut(index) {
            None => Outcome::Ignored,
            Some(task) => {
                task.toggle();
                self.store.save(self.selected, &tasks)?;
                self.refresh();
                Outcome::Applied
            }
        };
        self.log("toggle", &outcome, &json!({ "index": index }));
        Ok(outcome)
    }

    /// Remove the task at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be saved.
    pub fn delete_task(&mut self, index: usize) -> Result<Outcome> {
        let mut tasks = self.tasks();
        let outcome = if index < tasks.len() {
            tasks.remove(index);
            self.store.save(self.selected, &tasks)?;
            self.refresh();
            Outcome::Applied
        } else {
            Outcome::Ignored
        };
        self.log("delete", &outcome, &json!({ "index": index }));
        Ok(outcome)
    }

    fn log(&self, action: &str, outcome: &Outcome, detail: &serde_json::Value) {
        let Some(log) = &self.action_log else {
            return;
        };
        let mut detail = detail.clone();
        detail["outcome"] = json!(outcome.as_str());
        log.record(action, self.selected, &detail);
    }
}
