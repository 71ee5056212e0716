//! Ranking states by the metric the map is colored by.

use std::cmp::Reverse;

use crate::state_view::{StateView, StateViews};

/// The number of states listed in each ranking.
pub const RANKING_SIZE: usize = 5;

/// A state and its value for the ranked metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedState {
    /// The two-letter state code.
    pub code: &'static str,
    /// The state's value for the metric.
    pub value: i64,
}

/// What the rankings panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rankings {
    /// The page was just opened.
    Prompt,
    /// The map was reset to white.
    Cleared,
    /// A state was clicked.
    Selected(&'static str),
    /// The states with the most awarded contracts.
    TopRed(Vec<RankedState>),
    /// The states with the most offered contracts.
    TopGreen(Vec<RankedState>),
    /// The states at either end of the combined scale.
    Extremes {
        /// Highest combined value first.
        most_offered: Vec<RankedState>,
        /// Lowest combined value first.
        most_completed: Vec<RankedState>,
    },
}

impl Rankings {
    /// The top states by awarded contracts.
    pub fn top_red(views: &StateViews) -> Self {
        Rankings::TopRed(top_nonzero(views, |view| view.red()))
    }

    /// The top states by offered contracts.
    pub fn top_green(views: &StateViews) -> Self {
        Rankings::TopGreen(top_nonzero(views, |view| view.green()))
    }

    /// The states with the highest and the lowest combined values.
    pub fn extremes(views: &StateViews) -> Self {
        let mut ranked: Vec<RankedState> = views
            .iter()
            .map(|view| RankedState {
                code: view.code(),
                value: view.combined(),
            })
            .collect();

        ranked.sort_by_key(|state| (Reverse(state.value), state.code));
        let most_offered = ranked.iter().take(RANKING_SIZE).copied().collect();

        ranked.sort_by_key(|state| (state.value, state.code));
        let most_completed = ranked.iter().take(RANKING_SIZE).copied().collect();

        Rankings::Extremes {
            most_offered,
            most_completed,
        }
    }
}

/// The states with the largest non-zero `metric`, largest first, ties broken
/// alphabetically by state code.
fn top_nonzero(views: &StateViews, metric: impl Fn(&StateView) -> u64) -> Vec<RankedState> {
    let mut ranked: Vec<RankedState> = views
        .iter()
        .map(|view| RankedState {
            code: view.code(),
            value: metric(view) as i64,
        })
        .filter(|state| state.value > 0)
        .collect();

    ranked.sort_by_key(|state| (Reverse(state.value), state.code));
    ranked.truncate(RANKING_SIZE);

    ranked
}

#[cfg(test)]
mod tests {
    use crate::{
        dashboard::ranking::{RankedState, Rankings},
        state_view::test_utils::views_with,
    };

    fn ranked(pairs: &[(&'static str, i64)]) -> Vec<RankedState> {
        pairs
            .iter()
            .map(|&(code, value)| RankedState { code, value })
            .collect()
    }

    #[test]
    fn top_red_lists_five_largest_descending() {
        let views = views_with(&[
            ("CA", 50, 0),
            ("TX", 40, 0),
            ("VA", 70, 0),
            ("NY", 10, 0),
            ("FL", 20, 0),
            ("OH", 5, 0),
        ]);

        let rankings = Rankings::top_red(&views);

        assert_eq!(
            rankings,
            Rankings::TopRed(ranked(&[
                ("VA", 70),
                ("CA", 50),
                ("TX", 40),
                ("FL", 20),
                ("NY", 10)
            ]))
        );
    }

    #[test]
    fn top_green_skips_states_without_contracts() {
        let views = views_with(&[("WA", 99, 3), ("OR", 0, 8)]);

        let rankings = Rankings::top_green(&views);

        assert_eq!(
            rankings,
            Rankings::TopGreen(ranked(&[("OR", 8), ("WA", 3)]))
        );
    }

    #[test]
    fn ties_are_broken_alphabetically() {
        let views = views_with(&[("WY", 7, 0), ("AK", 7, 0), ("MT", 7, 0)]);

        let rankings = Rankings::top_red(&views);

        assert_eq!(
            rankings,
            Rankings::TopRed(ranked(&[("AK", 7), ("MT", 7), ("WY", 7)]))
        );
    }

    #[test]
    fn extremes_lists_both_ends_of_the_combined_scale() {
        let views = views_with(&[
            ("CA", 30, 0),
            ("TX", 0, 25),
            ("VA", 10, 40),
            ("MD", 12, 2),
        ]);

        let Rankings::Extremes {
            most_offered,
            most_completed,
        } = Rankings::extremes(&views)
        else {
            panic!("expected extremes");
        };

        assert_eq!(most_offered.len(), 5);
        assert_eq!(&most_offered[..2], &ranked(&[("VA", 30), ("TX", 25)])[..]);
        // The remaining slots go to the first zero-valued states alphabetically.
        assert_eq!(most_offered[2], RankedState { code: "AK", value: 0 });

        assert_eq!(most_completed.len(), 5);
        assert_eq!(&most_completed[..2], &ranked(&[("CA", -30), ("MD", -10)])[..]);
    }
}
