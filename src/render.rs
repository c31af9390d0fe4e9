//! Turning a day's task list into something to show.
//!
//! [`build_view`] produces a [`DayView`]: the label for the day and one row
//! per task, or a placeholder when there are none. [`to_text`] lays a view
//! out as terminal text through the [`templates::DAY_VIEW`] template.
//! Both are pure, so rendering the same data twice gives the same output.

use crate::day::DayKey;
use crate::error::Result;
use crate::tasks::{completed_count, Task, TaskStore};
use crate::templates;
use serde::Serialize;
use tera::Context;

/// One task as shown on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// 1-based position shown to the user.
    pub number: usize,
    /// The task text.
    pub text: String,
    /// Whether the completed marker is shown.
    pub completed: bool,
}

/// Everything needed to draw one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    /// The day being shown.
    pub day: DayKey,
    /// `Today` or the formatted date.
    pub label: String,
    /// One row per task, in list order.
    pub rows: Vec<Row>,
}

impl DayView {
    /// Whether the day has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The line shown in place of rows for an empty day.
    #[must_use]
    pub fn placeholder(&self) -> String {
        format!("No tasks for {}.", self.label)
    }

    /// Number of completed rows.
    #[must_use]
    pub fn done(&self) -> usize {
        self.rows.iter().filter(|r| r.completed).count()
    }
}

/// Build the view of a day from its tasks.
#[must_use]
pub fn build_view(day: DayKey, today: DayKey, tasks: &[Task]) -> DayView {
    let rows = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| Row { number: i + 1, text: task.text.clone(), completed: task.completed })
        .collect();
    DayView { day, label: day.label(today), rows }
}

/// Read a day from the store and build its view.
#[must_use]
pub fn render(store: &dyn TaskStore, day: DayKey, today: DayKey) -> DayView {
    build_view(day, today, &store.list(day))
}

/// Lay out a view as terminal text.
///
/// # Errors
///
/// Returns an error if the day template fails to render.
pub fn to_text(view: &DayView) -> Result<String> {
    let mut ctx = Context::new();
    ctx.insert("label", &view.label);
    ctx.insert("is_empty", &view.is_empty());
    ctx.insert("placeholder", &view.placeholder());
    ctx.insert("rows", &view.rows);
    ctx.insert("done", &view.done());
    ctx.insert("total", &view.rows.len());
    templates::render(templates::DAY_VIEW, &ctx)
}

/// Summary of one day for the overview listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    /// `YYYY-MM-DD`.
    pub key: String,
    /// `Today` or the formatted date.
    pub label: String,
    /// Completed tasks.
    pub done: usize,
    /// All tasks.
    pub total: usize,
}

/// Summarize every stored day that has at least one task.
///
/// # Errors
///
/// Returns an error if the store cannot enumerate its days.
pub fn summarize_days(store: &dyn TaskStore, today: DayKey) -> Result<Vec<DaySummary>> {
    let summaries = store
        .days()?
        .into_iter()
        .filter_map(|day| {
            let tasks = store.list(day);
            (!tasks.is_empty()).then(|| DaySummary {
                key: day.to_string(),
                label: day.label(today),
                done: completed_count(&tasks),
                total: tasks.len(),
            })
        })
        .collect();
    Ok(summaries)
}

/// Lay out day summaries as terminal text.
///
/// # Errors
///
/// Returns an error if the overview template fails to render.
pub fn days_to_text(summaries: &[DaySummary]) -> Result<String> {
    let mut ctx = Context::new();
    ctx.insert("is_empty", &summaries.is_empty());
    ctx.insert("days", summaries);
    templates::render(templates::DAYS_VIEW, &ctx)
}
