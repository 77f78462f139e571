//! Visible subset of profiles for the active category, plus the swipe policy

use crate::store::{DecisionStore, StoreError};
use tidyli_core::{Category, Decision, Profile};

/// Swipe (or arrow) direction on the current card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Left,
    Right,
}

/// Where the cursor ended up after the visible list changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Showing(usize),
    Empty,
}

/// Profiles whose current decision matches `category`, in source order
pub fn filter_profiles<'a>(
    profiles: &'a [Profile],
    store: &DecisionStore,
    category: Category,
) -> Vec<&'a Profile> {
    profiles
        .iter()
        .filter(|p| category.matches(store.get(&p.url)))
        .collect()
}

/// Decision a swipe applies in `category`; `None` when the swipe does nothing there
pub fn swipe_decision(category: Category, swipe: Swipe) -> Option<Decision> {
    match (category, swipe) {
        (Category::All | Category::Pending, Swipe::Left) => Some(Decision::Remove),
        (Category::All | Category::Pending, Swipe::Right) => Some(Decision::Keep),
        (Category::Keep, Swipe::Left) => Some(Decision::Pending),
        (Category::Keep, Swipe::Right) => None,
        (Category::Remove, Swipe::Right) => Some(Decision::Pending),
        (Category::Remove, Swipe::Left) => None,
    }
}

/// Active category plus a cursor into its visible list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterView {
    category: Category,
    cursor: usize,
}

impl FilterView {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            cursor: 0,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Switch category; the cursor always goes back to the first card
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.cursor = 0;
    }

    pub fn visible<'a>(&self, profiles: &'a [Profile], store: &DecisionStore) -> Vec<&'a Profile> {
        filter_profiles(profiles, store, self.category)
    }

    /// Clamp the cursor to a visible list of `len` profiles
    pub fn reconcile(&mut self, len: usize) -> ViewState {
        if len == 0 {
            self.cursor = 0;
            return ViewState::Empty;
        }
        if self.cursor >= len {
            self.cursor = len - 1;
        }
        ViewState::Showing(self.cursor)
    }

    /// Profile under the cursor, after clamping
    pub fn current<'a>(
        &mut self,
        profiles: &'a [Profile],
        store: &DecisionStore,
    ) -> Option<&'a Profile> {
        let visible = self.visible(profiles, store);
        match self.reconcile(visible.len()) {
            ViewState::Showing(i) => Some(visible[i]),
            ViewState::Empty => None,
        }
    }

    pub fn next(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn left_available(&self) -> bool {
        swipe_decision(self.category, Swipe::Left).is_some()
    }

    pub fn right_available(&self) -> bool {
        swipe_decision(self.category, Swipe::Right).is_some()
    }

    /// Apply `swipe` to the current card.
    ///
    /// Records the resulting decision with `now` and re-derives the view. Returns the
    /// decision applied, or `None` when the view is empty or the swipe is a no-op in
    /// this category.
    pub fn swipe(
        &mut self,
        swipe: Swipe,
        profiles: &[Profile],
        store: &mut DecisionStore,
        now: i64,
    ) -> Result<Option<Decision>, StoreError> {
        let Some(decision) = swipe_decision(self.category, swipe) else {
            return Ok(None);
        };
        let Some(profile) = self.current(profiles, store) else {
            return Ok(None);
        };

        store.set(&profile.url, decision, now)?;
        let remaining = self.visible(profiles, store).len();
        self.reconcile(remaining);
        Ok(Some(decision))
    }
}
