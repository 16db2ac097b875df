/// In-app navigation
///
/// Screens are addressed by web-style paths so a launch can be linked to by
/// its flight number alone.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// The paginated launch grid
    #[default]
    Launches,
    /// Detail view of one launch
    Launch(u32),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Launches => "/launches".to_string(),
            Route::Launch(flight_number) => format!("/launches/{}", flight_number),
        }
    }

    /// Resolve a path. `/` lands on the launch list.
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] | ["launches"] => Some(Route::Launches),
            ["launches", id] => id.parse().ok().map(Route::Launch),
            _ => None,
        }
    }

    /// Breadcrumb trail: label plus the route it links to (None for the current page)
    pub fn breadcrumbs(&self) -> Vec<(String, Option<Route>)> {
        match self {
            Route::Launches => vec![
                ("Home".to_string(), Some(Route::Launches)),
                ("Launches".to_string(), None),
            ],
            Route::Launch(flight_number) => vec![
                ("Home".to_string(), Some(Route::Launches)),
                ("Launches".to_string(), Some(Route::Launches)),
                (format!("#{}", flight_number), None),
            ],
        }
    }
}
