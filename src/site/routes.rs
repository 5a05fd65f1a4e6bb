use std::fmt;

/// Client-side routes of the public site and the admin area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Services,
    ServiceDetail(String),
    AnnouncementDetail(String),
    Contact,
    NotFound,
    AdminLogin,
    AdminDashboard,
    AdminMessages,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Services => "/services".to_string(),
            Route::ServiceDetail(slug) => format!("/services/{}", slug),
            Route::AnnouncementDetail(slug) => format!("/announcements/{}", slug),
            Route::Contact => "/contact".to_string(),
            Route::NotFound => "/404".to_string(),
            Route::AdminLogin => "/admin/login".to_string(),
            Route::AdminDashboard => "/admin".to_string(),
            Route::AdminMessages => "/admin/messages".to_string(),
        }
    }

    /// Match a path; anything unknown is `NotFound`.
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["services"] => Route::Services,
            ["services", slug] => Route::ServiceDetail(slug.to_string()),
            ["announcements", slug] => Route::AnnouncementDetail(slug.to_string()),
            ["contact"] => Route::Contact,
            ["admin"] => Route::AdminDashboard,
            ["admin", "login"] => Route::AdminLogin,
            ["admin", "messages"] => Route::AdminMessages,
            _ => Route::NotFound,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Route::AdminLogin | Route::AdminDashboard | Route::AdminMessages
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
