//! The dashboard's state machine.
//!
//! A session owns the state views for the lifetime of the server. Each user
//! action is an event that first clears the selection, then either selects a
//! state or picks a map coloring. The result holds everything needed to
//! render the page.

use crate::{
    Error,
    aggregation::StateCounts,
    dashboard::{map::MapColoring, ranking::Rankings},
    state_view::{StateView, StateViews},
};

/// A single user action on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    /// The page was loaded.
    Initial,
    /// The "Show Completed (Red)" button was clicked.
    ShowRed,
    /// The "Show Offered (Green)" button was clicked.
    ShowGreen,
    /// The "Show Combined" button was clicked.
    ShowCombined,
    /// The "Reset White" button was clicked.
    Reset,
    /// A state on the map was clicked.
    SelectState(String),
}

/// The outcome of an event, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardRender {
    /// How the map is colored.
    pub coloring: MapColoring,
    /// What the rankings panel shows.
    pub rankings: Rankings,
    /// The clicked state, which the detail panel shows. The panel is hidden
    /// when this is `None`.
    pub detail: Option<StateView>,
}

/// The in-memory state of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSession {
    views: StateViews,
}

impl DashboardSession {
    /// Create a session for the aggregated `counts` with no state selected.
    pub fn new(counts: &StateCounts) -> Self {
        Self {
            views: StateViews::from_counts(counts),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_views(views: StateViews) -> Self {
        Self { views }
    }

    /// The current state views.
    pub fn views(&self) -> &StateViews {
        &self.views
    }

    /// Apply `event` and describe how the dashboard should look afterwards.
    ///
    /// Every event starts by clearing the selection, including a click on a
    /// state that turns out to be unknown.
    ///
    /// # Errors
    /// Returns [Error::UnknownState] if a clicked state is not one of the 50
    /// states. No state is selected afterwards.
    pub fn handle(&mut self, event: DashboardEvent) -> Result<DashboardRender, Error> {
        self.views.clear_selection();

        if let DashboardEvent::SelectState(code) = &event {
            let view = self.views.select(code)?.clone();

            return Ok(DashboardRender {
                coloring: MapColoring::Neutral,
                rankings: Rankings::Selected(view.code()),
                detail: Some(view),
            });
        }

        let (coloring, rankings) = match event {
            DashboardEvent::ShowRed => (MapColoring::Red, Rankings::top_red(&self.views)),
            DashboardEvent::ShowGreen => (MapColoring::Green, Rankings::top_green(&self.views)),
            DashboardEvent::ShowCombined => {
                (MapColoring::Combined, Rankings::extremes(&self.views))
            }
            DashboardEvent::Reset => (MapColoring::Neutral, Rankings::Cleared),
            DashboardEvent::Initial | DashboardEvent::SelectState(_) => {
                (MapColoring::Neutral, Rankings::Prompt)
            }
        };

        Ok(DashboardRender {
            coloring,
            rankings,
            detail: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        aggregation::StateCounts,
        dashboard::{
            map::MapColoring,
            ranking::Rankings,
            session::{DashboardEvent, DashboardSession},
        },
        state_view::test_utils::views_with,
    };

    fn session_with(values: &[(&str, u64, u64)]) -> DashboardSession {
        DashboardSession::from_views(views_with(values))
    }

    #[test]
    fn starts_with_nothing_selected() {
        let session = DashboardSession::new(&StateCounts::default());

        assert_eq!(session.views().selected(), None);
    }

    #[test]
    fn initial_event_shows_prompt_on_a_white_map() {
        let mut session = session_with(&[]);

        let render = session.handle(DashboardEvent::Initial).unwrap();

        assert_eq!(render.coloring, MapColoring::Neutral);
        assert_eq!(render.rankings, Rankings::Prompt);
        assert_eq!(render.detail, None);
    }

    #[test]
    fn clicking_a_state_after_combined_view_shows_its_details() {
        let mut session = session_with(&[("NY", 12, 20), ("CA", 30, 4)]);
        session.handle(DashboardEvent::ShowCombined).unwrap();

        let render = session
            .handle(DashboardEvent::SelectState("NY".to_owned()))
            .unwrap();

        assert_eq!(render.coloring, MapColoring::Neutral);
        assert_eq!(render.rankings, Rankings::Selected("NY"));
        let detail = render.detail.unwrap();
        assert_eq!(detail.code(), "NY");
        assert_eq!(detail.red(), 12);
        assert_eq!(detail.green(), 20);
        assert_eq!(detail.combined(), 8);
        assert!(detail.is_selected());

        let selected: Vec<_> = session
            .views()
            .iter()
            .filter(|view| view.is_selected())
            .map(|view| view.code())
            .collect();
        assert_eq!(selected, vec!["NY"]);
    }

    #[test]
    fn button_events_clear_the_selection_and_hide_details() {
        let mut session = session_with(&[("TX", 5, 1)]);

        for event in [
            DashboardEvent::ShowRed,
            DashboardEvent::ShowGreen,
            DashboardEvent::ShowCombined,
            DashboardEvent::Reset,
        ] {
            session
                .handle(DashboardEvent::SelectState("TX".to_owned()))
                .unwrap();

            let render = session.handle(event.clone()).unwrap();

            assert_eq!(render.detail, None, "{event:?}");
            assert_eq!(session.views().selected(), None, "{event:?}");
        }
    }

    #[test]
    fn buttons_pick_coloring_and_rankings() {
        let mut session = session_with(&[("TX", 5, 1)]);

        let red = session.handle(DashboardEvent::ShowRed).unwrap();
        let green = session.handle(DashboardEvent::ShowGreen).unwrap();
        let combined = session.handle(DashboardEvent::ShowCombined).unwrap();
        let reset = session.handle(DashboardEvent::Reset).unwrap();

        assert_eq!(red.coloring, MapColoring::Red);
        assert!(matches!(red.rankings, Rankings::TopRed(_)));
        assert_eq!(green.coloring, MapColoring::Green);
        assert!(matches!(green.rankings, Rankings::TopGreen(_)));
        assert_eq!(combined.coloring, MapColoring::Combined);
        assert!(matches!(combined.rankings, Rankings::Extremes { .. }));
        assert_eq!(reset.coloring, MapColoring::Neutral);
        assert_eq!(reset.rankings, Rankings::Cleared);
    }

    #[test]
    fn unknown_state_is_rejected_after_clearing_the_selection() {
        let mut session = session_with(&[]);
        session
            .handle(DashboardEvent::SelectState("CO".to_owned()))
            .unwrap();

        let result = session.handle(DashboardEvent::SelectState("ZZ".to_owned()));

        assert_eq!(result, Err(Error::UnknownState("ZZ".to_owned())));
        assert_eq!(session.views().selected(), None);
    }
}
