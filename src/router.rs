//! Page routing.
//!
//! Maps a location path plus the authentication state to one of a fixed set
//! of pages. The page is never stored independently of those two inputs.

use tracing::info;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";

/// A top-level page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// The balance/orders dashboard.
    Home,
    Login,
    Register,
    NotFound,
}

impl Page {
    /// Location shown for this page, if it has a fixed one.
    pub fn canonical_path(self) -> Option<&'static str> {
        match self {
            Self::Home => Some(HOME_PATH),
            Self::Login => Some(LOGIN_PATH),
            Self::Register => Some(REGISTER_PATH),
            Self::NotFound => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Dashboard",
            Self::Login => "Login",
            Self::Register => "Register",
            Self::NotFound => "Not Found",
        }
    }
}

/// Resolve the page for `path`.
pub fn resolve(path: &str, is_authenticated: bool) -> Page {
    match (path, is_authenticated) {
        (HOME_PATH | LOGIN_PATH | REGISTER_PATH, true) => Page::Home,
        (HOME_PATH | LOGIN_PATH, false) => Page::Login,
        (REGISTER_PATH, false) => Page::Register,
        _ => Page::NotFound,
    }
}

/// Tracks the current location and the page entered for it.
///
/// The generation changes each time a different page is entered, so work
/// started on a page can recognize that its page is gone.
#[derive(Debug)]
pub struct Navigator {
    path: String,
    page: Page,
    generation: u64,
}

impl Navigator {
    pub fn new(path: &str, is_authenticated: bool) -> Self {
        let page = resolve(path, is_authenticated);
        Self {
            path: location_for(page, path),
            page,
            generation: 0,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Go to `path`. Returns the page if a different one was entered.
    pub fn navigate(&mut self, path: &str, is_authenticated: bool) -> Option<Page> {
        let page = resolve(path, is_authenticated);
        self.path = location_for(page, path);

        if page == self.page {
            return None;
        }
        info!(from = ?self.page, to = ?page, path = %self.path, "Page changed");
        self.page = page;
        self.generation += 1;
        Some(page)
    }

    /// Re-resolve the current location, e.g. after the session changed.
    pub fn reload(&mut self, is_authenticated: bool) -> Option<Page> {
        let path = self.path.clone();
        self.navigate(&path, is_authenticated)
    }
}

fn location_for(page: Page, requested: &str) -> String {
    page.canonical_path().unwrap_or(requested).to_string()
}
