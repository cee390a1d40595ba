//! The navigation surface: a login entry and the protected user list.

use std::fmt;

use crate::session::Session;

/// A screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Users,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Users => "/users",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// What navigating to a path ends up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
}

/// Resolves a path against the session. Unknown paths resolve to `None`.
pub fn resolve(path: &str, session: &Session) -> Option<Resolution> {
    match path {
        "/" => Some(Resolution::Redirect(Route::Login)),
        "/login" => Some(Resolution::Render(Route::Login)),
        "/users" => Some(match session.redirect() {
            Some(to) => Resolution::Redirect(to),
            None => Resolution::Render(Route::Users),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::{resolve, Resolution, Route};
    use crate::session::Session;

    #[test]
    fn test_root_redirects_to_login() {
        let session = Session::new();
        assert_eq!(
            resolve("/", &session),
            Some(Resolution::Redirect(Route::Login))
        );
    }

    #[test]
    fn test_users_is_guarded() {
        let session = Session::new();
        assert_eq!(
            resolve("/users", &session),
            Some(Resolution::Redirect(Route::Login))
        );
        assert_eq!(
            resolve("/login", &session),
            Some(Resolution::Render(Route::Login))
        );
        assert_eq!(resolve("/nope", &session), None);
    }

    #[test]
    fn test_users_renders_when_authenticated() {
        let mut session = Session::new();
        session.mark_authenticated();
        assert_eq!(
            resolve("/users", &session),
            Some(Resolution::Render(Route::Users))
        );
        assert_eq!(
            resolve("/", &session),
            Some(Resolution::Redirect(Route::Login))
        );
    }
}
