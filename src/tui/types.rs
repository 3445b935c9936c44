//! TUI type definitions for screens, focus, routes and actions.

/// The current screen/view of the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Full-screen carousel
    Home,
    /// Episode listing, optionally restricted to one series id
    EpisodeList { series: Option<String> },
    /// Episode detail page for an episode id
    EpisodeDetail { episode: String },
    /// Series listing
    Shows,
    /// Hosts page
    About,
    /// Social links page
    Contact,
}

/// Focus state on the home screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Focus {
    Sidebar,
    Main,
}

/// An in-app link target.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Episodes,
    Episode(String),
    Shows,
    Show(String),
    About,
    Contact,
    /// Anything that does not resolve to a page
    External(String),
}

impl Route {
    /// Resolve a link target such as `/episodes/<slug>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use podcast_carousel::tui::Route;
    ///
    /// assert_eq!(Route::parse("/episodes"), Route::Episodes);
    /// assert_eq!(Route::parse("/episodes/pilot"), Route::Episode("pilot".to_string()));
    /// assert_eq!(
    ///     Route::parse("https://spotify.com"),
    ///     Route::External("https://spotify.com".to_string())
    /// );
    /// ```
    pub fn parse(target: &str) -> Self {
        let path = target.trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').skip(1).collect();
        if !target.starts_with('/') {
            return Route::External(target.to_string());
        }
        match segments.as_slice() {
            [] | [""] => Route::Home,
            ["episodes"] => Route::Episodes,
            ["episodes", slug] => Route::Episode(slug.to_string()),
            ["shows"] => Route::Shows,
            ["shows", slug] => Route::Show(slug.to_string()),
            ["about"] => Route::About,
            ["contact"] => Route::Contact,
            _ => Route::External(target.to_string()),
        }
    }
}

/// Actions that can be returned from the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action, continue running
    None,
    /// Quit the application
    Quit,
    /// Follow a link
    Open(Route),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parse() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/shows/"), Route::Shows);
        assert_eq!(Route::parse("/shows/season-1"), Route::Show("season-1".to_string()));
        assert_eq!(Route::parse("/about"), Route::About);
        assert_eq!(Route::parse("/contact"), Route::Contact);
        assert_eq!(
            Route::parse("/episodes/a/b"),
            Route::External("/episodes/a/b".to_string())
        );
    }
}
