//! Alert messages that are swapped into the page's alert container by htmx.

use maud::{Markup, html};

/// An alert message with a short headline and a longer explanation.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// Something went wrong with the user's request.
    Error {
        /// The headline.
        message: String,
        /// What happened and how to fix it.
        details: String,
    },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        match self {
            Alert::Error { message, details } => html!(
                div
                    role="alert"
                    class="flex flex-col p-4 mb-4 text-sm text-red-800 rounded-lg
                        bg-red-50 dark:bg-gray-800 dark:text-red-400"
                {
                    span class="font-medium" { (message) }

                    @if !details.is_empty() {
                        p { (details) }
                    }
                }
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn renders_message_and_details() {
        let markup = Alert::Error {
            message: "Unknown state".to_owned(),
            details: "\"ZZ\" is not a state".to_owned(),
        }
        .into_html();

        let fragment = Html::parse_fragment(&markup.into_string());
        let alert = fragment
            .select(&Selector::parse("div[role='alert']").unwrap())
            .next()
            .expect("alert div missing");
        let text: String = alert.text().collect();

        assert!(text.contains("Unknown state"));
        assert!(text.contains("\"ZZ\" is not a state"));
    }

    #[test]
    fn omits_empty_details() {
        let markup = Alert::Error {
            message: "Oops".to_owned(),
            details: String::new(),
        }
        .into_html();

        assert!(!markup.into_string().contains("<p>"));
    }
}
