//! The per-state values shown on the dashboard.

use crate::{
    Error,
    aggregation::StateCounts,
    states::{GeoPoint, US_STATES, UsState, state_index},
};

/// The dashboard's view of one state.
///
/// "Red" is the number of contracts awarded to recipients located in the
/// state, "green" the number of contracts performed in the state.
#[derive(Debug, Clone, PartialEq)]
pub struct StateView {
    state: &'static UsState,
    red: u64,
    green: u64,
    is_selected: bool,
}

impl StateView {
    /// The two-letter state code.
    pub fn code(&self) -> &'static str {
        self.state.code
    }

    /// The full state name.
    pub fn name(&self) -> &'static str {
        self.state.name
    }

    /// Where the map zooms to when this state is selected.
    pub fn center(&self) -> GeoPoint {
        self.state.center
    }

    /// Contracts awarded to recipients in this state.
    pub fn red(&self) -> u64 {
        self.red
    }

    /// Contracts performed in this state.
    pub fn green(&self) -> u64 {
        self.green
    }

    /// Green minus red, negative when the state receives more awards than
    /// it performs work for.
    pub fn combined(&self) -> i64 {
        self.green as i64 - self.red as i64
    }

    /// Whether the user has clicked on this state.
    pub fn is_selected(&self) -> bool {
        self.is_selected
    }
}

/// One [StateView] for each of the 50 states, with at most one selected.
#[derive(Debug, Clone, PartialEq)]
pub struct StateViews {
    views: Vec<StateView>,
}

impl StateViews {
    /// Build the views from aggregated counts, with nothing selected.
    pub fn from_counts(counts: &StateCounts) -> Self {
        let views = US_STATES
            .iter()
            .zip(counts.iter())
            .map(|(state, (_, counts))| StateView {
                state,
                red: counts.recipient_location,
                green: counts.place_of_performance,
                is_selected: false,
            })
            .collect();

        Self { views }
    }

    /// The view for `code`, if it is one of the 50 states.
    pub fn get(&self, code: &str) -> Option<&StateView> {
        state_index(code).map(|index| &self.views[index])
    }

    /// Iterate over the views in the order of [US_STATES].
    pub fn iter(&self) -> impl Iterator<Item = &StateView> {
        self.views.iter()
    }

    /// The selected state, if any.
    pub fn selected(&self) -> Option<&StateView> {
        self.views.iter().find(|view| view.is_selected)
    }

    /// Deselect every state.
    pub fn clear_selection(&mut self) {
        for view in &mut self.views {
            view.is_selected = false;
        }
    }

    /// Make `code` the only selected state.
    ///
    /// # Errors
    /// Returns [Error::UnknownState] if `code` is not one of the 50 states,
    /// in which case the current selection is left as it was.
    pub fn select(&mut self, code: &str) -> Result<&StateView, Error> {
        let index = state_index(code).ok_or_else(|| Error::UnknownState(code.to_owned()))?;

        self.clear_selection();
        let view = &mut self.views[index];
        view.is_selected = true;

        Ok(view)
    }
}


#[cfg(test)]
mod tests {
    use crate::{
        Error,
        state_view::test_utils::views_with,
        states::US_STATES,
    };

    #[test]
    fn maps_recipient_counts_to_red_and_performance_counts_to_green() {
        let views = views_with(&[("TX", 4, 9)]);

        let texas = views.get("TX").unwrap();

        assert_eq!(texas.red(), 4);
        assert_eq!(texas.green(), 9);
        assert_eq!(texas.name(), "Texas");
    }

    #[test]
    fn combined_is_green_minus_red() {
        let views = views_with(&[("CA", 10, 3), ("TX", 2, 7), ("OH", 5, 5)]);

        assert_eq!(views.get("CA").unwrap().combined(), -7);
        assert_eq!(views.get("TX").unwrap().combined(), 5);
        assert_eq!(views.get("OH").unwrap().combined(), 0);
        for view in views.iter() {
            assert_eq!(view.combined(), view.green() as i64 - view.red() as i64);
        }
    }

    #[test]
    fn has_one_view_per_state_in_table_order() {
        let views = views_with(&[]);

        let codes: Vec<_> = views.iter().map(|view| view.code()).collect();
        let expected: Vec<_> = US_STATES.iter().map(|state| state.code).collect();
        assert_eq!(codes, expected);
    }

    #[test]
    fn selecting_a_state_deselects_the_previous_one() {
        let mut views = views_with(&[]);

        views.select("CA").unwrap();
        views.select("NY").unwrap();

        assert_eq!(views.iter().filter(|view| view.is_selected()).count(), 1);
        assert_eq!(views.selected().map(|view| view.code()), Some("NY"));
    }

    #[test]
    fn clear_selection_deselects_everything() {
        let mut views = views_with(&[]);
        views.select("WA").unwrap();

        views.clear_selection();

        assert_eq!(views.selected(), None);
    }

    #[test]
    fn unknown_state_keeps_current_selection() {
        let mut views = views_with(&[]);
        views.select("FL").unwrap();

        let result = views.select("PR").map(|view| view.code());

        assert_eq!(result, Err(Error::UnknownState("PR".to_owned())));
        assert_eq!(views.selected().map(|view| view.code()), Some("FL"));
    }
}
