// SPDX-License-Identifier: MPL-2.0
//! Product detail viewer controller.
//!
//! Composes the gesture navigator with the currently expanded product and
//! its combo sub-item cursor, and answers navigation bounds for the
//! presentation layer. Index changes requested by swipes commit only
//! after the transition settle delay, under the navigator's lock; the
//! combo disclosure is a plain bounded cursor with no timer and no lock.
//!
//! The controller exclusively owns both selections. Closing the viewer
//! (or replacing the catalog underneath it) clears them together and
//! cancels any pending commit.

use crate::config::Timings;
use crate::content::{Catalog, Product};
use crate::gesture::{Direction, GestureNavigator, NavigatorState};
use crate::scheduler::{Scheduler, TimerToken};
use std::time::Duration;

/// The product currently open in the detail viewer, identified by its
/// category and visible-item index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedSelection {
    pub group_id: String,
    pub item_index: usize,
}

/// Composes sequencing, gestures and selection state for the detail view.
#[derive(Debug)]
pub struct ViewerController {
    catalog: Catalog,
    expanded: Option<ExpandedSelection>,
    combo_sub: Option<usize>,
    navigator: GestureNavigator,
    scheduler: Scheduler,
    pending_commit: Option<(TimerToken, Direction)>,
    settle: Duration,
}

impl ViewerController {
    #[must_use]
    pub fn new(catalog: Catalog, timings: &Timings) -> Self {
        Self {
            catalog,
            expanded: None,
            combo_sub: None,
            navigator: GestureNavigator::new(timings.swipe_threshold),
            scheduler: Scheduler::new(),
            pending_commit: None,
            settle: timings.transition_settle,
        }
    }

    /// Replaces the catalog wholesale. Selections into the old catalog
    /// would dangle, so the viewer closes.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.close();
        self.catalog = catalog;
    }

    /// Opens a product, bounds-checked against the group's visible items.
    /// Returns `false` without changing state for out-of-bounds requests.
    pub fn open(&mut self, group_id: &str, item_index: usize) -> bool {
        if item_index >= self.catalog.visible_item_count(group_id) {
            tracing::trace!(group_id, item_index, "ignoring out-of-bounds open");
            return false;
        }
        self.abort_transition();
        self.expanded = Some(ExpandedSelection {
            group_id: group_id.to_string(),
            item_index,
        });
        self.combo_sub = None;
        true
    }

    /// Closes the viewer, clearing the expanded selection and the combo
    /// sub-selection together.
    pub fn close(&mut self) {
        self.abort_transition();
        self.expanded = None;
        self.combo_sub = None;
    }

    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        matches!(&self.expanded, Some(selection) if selection.item_index > 0)
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        match &self.expanded {
            Some(selection) => {
                selection.item_index + 1 < self.catalog.visible_item_count(&selection.group_id)
            }
            None => false,
        }
    }

    fn can_advance(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.can_go_next(),
            Direction::Backward => self.can_go_prev(),
            Direction::None => false,
        }
    }

    /// Requests a navigation. When the bounds allow it and no transition
    /// is in flight, takes the navigator's lock and arms the settle
    /// timer; the index change itself commits in [`apply_tick`] once the
    /// delay elapses. Returns whether a transition began.
    ///
    /// [`apply_tick`]: Self::apply_tick
    pub fn navigate(&mut self, direction: Direction) -> bool {
        if self.navigator.is_transitioning() {
            return false;
        }
        if !self.can_advance(direction) {
            tracing::trace!(?direction, "ignoring out-of-bounds navigation");
            return false;
        }
        if !self.navigator.begin(direction) {
            return false;
        }
        let token = self.scheduler.start_once(self.settle);
        self.pending_commit = Some((token, direction));
        true
    }

    /// Applies one settle tick, committing the pending index change and
    /// releasing the transition lock. Stale tokens are discarded. Returns
    /// the committed index.
    pub fn apply_tick(&mut self, token: TimerToken) -> Option<usize> {
        match self.pending_commit {
            Some((armed, direction)) if armed == token => {
                self.pending_commit = None;
                self.navigator.finish();
                let selection = self.expanded.as_mut()?;
                match direction {
                    Direction::Forward => selection.item_index += 1,
                    Direction::Backward => selection.item_index -= 1,
                    Direction::None => {}
                }
                // The combo cursor indexes the previous product's list.
                self.combo_sub = None;
                Some(selection.item_index)
            }
            _ => {
                tracing::trace!(?token, "discarding stale settle tick");
                None
            }
        }
    }

    /// Waits out the settle delay of an in-flight transition and commits
    /// it. Returns `None` immediately when no transition is pending.
    pub async fn settled(&mut self) -> Option<usize> {
        let token = self.scheduler.next_tick().await?;
        self.apply_tick(token)
    }

    /// A pointer touched down on the viewer surface.
    pub fn gesture_start(&mut self, x: f32) {
        self.navigator.gesture_start(x);
    }

    /// The pointer moved across the viewer surface.
    pub fn gesture_move(&mut self, x: f32) {
        self.navigator.gesture_move(x);
    }

    /// The pointer lifted; a recognized swipe is routed into
    /// [`navigate`](Self::navigate). Returns whether a transition began.
    pub fn gesture_end(&mut self) -> bool {
        match self.navigator.gesture_end() {
            Some(direction) => self.navigate(direction),
            None => false,
        }
    }

    /// Opens one combo sub-item, bounded by the expanded product's list.
    /// Re-opening the index that is already open collapses the disclosure
    /// instead. Returns whether the request was acted on.
    pub fn open_sub_item(&mut self, index: usize) -> bool {
        let Some(product) = self.expanded_product() else {
            return false;
        };
        if index >= product.combo_items.len() {
            tracing::trace!(index, "ignoring out-of-bounds sub-item");
            return false;
        }
        if self.combo_sub == Some(index) {
            self.combo_sub = None;
        } else {
            self.combo_sub = Some(index);
        }
        true
    }

    /// Collapses the combo disclosure.
    pub fn close_sub_item(&mut self) {
        self.combo_sub = None;
    }

    fn abort_transition(&mut self) {
        if let Some((token, _)) = self.pending_commit.take() {
            self.scheduler.cancel(token);
            self.navigator.finish();
        }
    }

    #[must_use]
    pub fn expanded(&self) -> Option<&ExpandedSelection> {
        self.expanded.as_ref()
    }

    /// The visible product currently open, if any.
    #[must_use]
    pub fn expanded_product(&self) -> Option<&Product> {
        let selection = self.expanded.as_ref()?;
        self.catalog
            .visible_item(&selection.group_id, selection.item_index)
    }

    #[must_use]
    pub fn combo_sub_index(&self) -> Option<usize> {
        self.combo_sub
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.navigator.is_transitioning()
    }

    /// Transition direction, for slide styling only.
    #[must_use]
    pub fn navigator_state(&self) -> NavigatorState {
        self.navigator.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ComboItem, ProductDescriptor};

    fn combo(name: &str) -> ComboItem {
        ComboItem {
            name: name.to_string(),
            description: None,
            quantity: 1,
            unit: None,
            photo_url: None,
        }
    }

    fn product(name: &str, combo_items: Vec<ComboItem>) -> ProductDescriptor {
        ProductDescriptor {
            name: name.to_string(),
            visible: true,
            combo_items,
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_groups([(
            "mains".to_string(),
            vec![
                product("Feijoada", vec![combo("Rice"), combo("Farofa"), combo("Orange")]),
                product("Moqueca", Vec::new()),
                product("Picanha", Vec::new()),
            ],
        )])
    }

    fn viewer() -> ViewerController {
        ViewerController::new(catalog(), &Timings::default())
    }

    #[test]
    fn bounds_are_false_while_closed() {
        let viewer = viewer();
        assert!(!viewer.can_go_prev());
        assert!(!viewer.can_go_next());
    }

    #[test]
    fn open_is_bounds_checked() {
        let mut viewer = viewer();
        assert!(!viewer.open("mains", 3));
        assert!(!viewer.open("desserts", 0));
        assert_eq!(viewer.expanded(), None);

        assert!(viewer.open("mains", 1));
        let selection = viewer.expanded().expect("open selection");
        assert_eq!(selection.group_id, "mains");
        assert_eq!(selection.item_index, 1);
        assert!(viewer.can_go_prev());
        assert!(viewer.can_go_next());
    }

    #[test]
    fn bounds_close_at_the_edges() {
        let mut viewer = viewer();
        viewer.open("mains", 0);
        assert!(!viewer.can_go_prev());
        assert!(viewer.can_go_next());

        viewer.open("mains", 2);
        assert!(viewer.can_go_prev());
        assert!(!viewer.can_go_next());
    }

    #[test]
    fn navigate_past_the_end_is_a_no_op() {
        let mut viewer = viewer();
        viewer.open("mains", 2);

        assert!(!viewer.navigate(Direction::Forward));
        assert_eq!(viewer.expanded().unwrap().item_index, 2);
        assert!(!viewer.is_transitioning());
        assert!(!viewer.can_go_next());
    }

    #[test]
    fn navigate_locks_until_committed() {
        let mut viewer = viewer();
        viewer.open("mains", 0);

        assert!(viewer.navigate(Direction::Forward));
        assert!(viewer.is_transitioning());
        // The index does not move until the settle delay elapses.
        assert_eq!(viewer.expanded().unwrap().item_index, 0);

        // Locked: further requests are ignored.
        assert!(!viewer.navigate(Direction::Forward));
        assert!(!viewer.navigate(Direction::Backward));
    }

    #[test]
    fn close_clears_both_selections_and_the_lock() {
        let mut viewer = viewer();
        viewer.open("mains", 0);
        viewer.open_sub_item(1);
        viewer.navigate(Direction::Forward);

        viewer.close();
        assert_eq!(viewer.expanded(), None);
        assert_eq!(viewer.combo_sub_index(), None);
        assert!(!viewer.is_transitioning());
    }

    #[test]
    fn replacing_the_catalog_closes_the_viewer() {
        let mut viewer = viewer();
        viewer.open("mains", 1);

        viewer.replace_catalog(Catalog::default());
        assert_eq!(viewer.expanded(), None);
        assert!(!viewer.open("mains", 0));
    }

    #[test]
    fn sub_item_toggles_as_a_disclosure() {
        let mut viewer = viewer();
        viewer.open("mains", 0);

        assert!(viewer.open_sub_item(2));
        assert_eq!(viewer.combo_sub_index(), Some(2));

        // Opening the same index again collapses it.
        assert!(viewer.open_sub_item(2));
        assert_eq!(viewer.combo_sub_index(), None);

        assert!(viewer.open_sub_item(0));
        assert!(viewer.open_sub_item(1));
        assert_eq!(viewer.combo_sub_index(), Some(1));

        viewer.close_sub_item();
        assert_eq!(viewer.combo_sub_index(), None);
    }

    #[test]
    fn sub_item_is_bounded_by_the_expanded_product() {
        let mut viewer = viewer();
        assert!(!viewer.open_sub_item(0));

        viewer.open("mains", 0);
        assert!(!viewer.open_sub_item(3));
        assert_eq!(viewer.combo_sub_index(), None);

        // A product without combo contents has nothing to disclose.
        viewer.open("mains", 1);
        assert!(!viewer.open_sub_item(0));
    }

    #[tokio::test(start_paused = true)]
    async fn commit_lands_exactly_after_the_settle_delay() {
        let mut viewer = viewer();
        viewer.open("mains", 0);

        viewer.gesture_start(200.0);
        viewer.gesture_move(140.0);
        assert!(viewer.gesture_end());
        assert!(viewer.is_transitioning());

        let started = tokio::time::Instant::now();
        assert_eq!(viewer.settled().await, Some(1));
        assert_eq!(started.elapsed(), Duration::from_millis(150));
        assert!(!viewer.is_transitioning());
        assert_eq!(viewer.expanded().unwrap().item_index, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn commit_resets_the_combo_cursor() {
        let mut viewer = viewer();
        viewer.open("mains", 0);
        viewer.open_sub_item(1);

        viewer.navigate(Direction::Forward);
        viewer.settled().await;
        assert_eq!(viewer.combo_sub_index(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn backward_commit_decrements() {
        let mut viewer = viewer();
        viewer.open("mains", 2);

        viewer.gesture_start(100.0);
        viewer.gesture_move(180.0);
        assert!(viewer.gesture_end());

        assert_eq!(viewer.settled().await, Some(1));
        assert_eq!(viewer.expanded().unwrap().item_index, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn aborted_transition_never_commits() {
        let mut viewer = viewer();
        viewer.open("mains", 0);
        viewer.navigate(Direction::Forward);

        viewer.close();
        assert_eq!(viewer.settled().await, None);
    }
}
