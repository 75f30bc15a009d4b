use crate::modules::auth::repository::Session;
use crate::modules::user::repository::Role;

/// Every page the application knows. Targets keep the original file names so
/// the navigation surface reads like the page links it replaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Index,
    Browse,
    Orders,
    Restaurant,
    Courier,
    Analytics,
    Login,
    Register,
}

pub const ALL_PAGES: [Page; 8] = [
    Page::Index,
    Page::Browse,
    Page::Orders,
    Page::Restaurant,
    Page::Courier,
    Page::Analytics,
    Page::Login,
    Page::Register,
];

/// Pages reachable without a session.
pub const PUBLIC_PAGES: [Page; 2] = [Page::Login, Page::Register];

impl Page {
    pub fn target(self) -> &'static str {
        match self {
            Page::Index => "index.html",
            Page::Browse => "browse.html",
            Page::Orders => "orders.html",
            Page::Restaurant => "restaurant.html",
            Page::Courier => "courier.html",
            Page::Analytics => "analytics.html",
            Page::Login => "login.html",
            Page::Register => "register.html",
        }
    }

    fn from_target(target: &str) -> Option<Self> {
        ALL_PAGES.iter().copied().find(|page| page.target() == target)
    }
}

/// Resolves a navigation target to a page: final path segment, empty or
/// unknown falls back to the landing page.
pub fn resolve_page(target: &str) -> Page {
    let file = target.rsplit('/').next().unwrap_or(target);
    match file.is_empty() {
        true => Page::Index,
        false => Page::from_target(file).unwrap_or(Page::Index),
    }
}

/// Pages each role may open. Exhaustive over `Role`, so a new role cannot be
/// added without deciding its permissions.
pub fn permitted_pages(role: Role) -> &'static [Page] {
    match role {
        Role::Customer => &[Page::Browse, Page::Orders],
        Role::Restaurant => &[Page::Restaurant],
        Role::Courier => &[Page::Courier],
        Role::Admin => &[
            Page::Index,
            Page::Browse,
            Page::Orders,
            Page::Restaurant,
            Page::Courier,
            Page::Analytics,
        ],
    }
}

/// First permitted page: where the role lands after sign-in or a denied
/// navigation.
pub fn landing_page(role: Role) -> Page {
    permitted_pages(role).first().copied().unwrap_or(Page::Index)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Allow(Page),
    RedirectToLogin,
    Redirect(Page),
}

/// Runs before every page: public pages pass unconditionally, everything else
/// needs a session whose role permits the page.
pub fn gate(target: &str, session: Option<&Session>) -> Outcome {
    let page = resolve_page(target);
    if PUBLIC_PAGES.contains(&page) {
        return Outcome::Allow(page);
    }
    let session = match session {
        Some(session) => session,
        None => return Outcome::RedirectToLogin,
    };
    match permitted_pages(session.role).contains(&page) {
        true => Outcome::Allow(page),
        false => Outcome::Redirect(landing_page(session.role)),
    }
}

/// Navigation links shown for a role: permitted pages plus the public ones.
/// Cosmetic only; direct navigation still goes through `gate`.
pub fn visible_nav(role: Role) -> Vec<Page> {
    ALL_PAGES
        .iter()
        .copied()
        .filter(|page| PUBLIC_PAGES.contains(page) || permitted_pages(role).contains(page))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session {
            username: String::from("sam"),
            role,
        }
    }

    #[test]
    fn resolves_final_path_segment() {
        assert_eq!(resolve_page("browse.html"), Page::Browse);
        assert_eq!(resolve_page("some/dir/courier.html"), Page::Courier);
        assert_eq!(resolve_page(""), Page::Index);
        assert_eq!(resolve_page("pages/"), Page::Index);
    }

    #[test]
    fn public_pages_pass_without_a_session() {
        assert_eq!(gate("login.html", None), Outcome::Allow(Page::Login));
        assert_eq!(gate("register.html", None), Outcome::Allow(Page::Register));
    }

    #[test]
    fn missing_session_redirects_to_login() {
        assert_eq!(gate("browse.html", None), Outcome::RedirectToLogin);
    }

    #[test]
    fn denied_navigation_redirects_to_first_permitted_page() {
        for role in [Role::Customer, Role::Restaurant, Role::Courier, Role::Admin] {
            let session = session(role);
            let permitted = permitted_pages(role);
            for page in ALL_PAGES {
                if PUBLIC_PAGES.contains(&page) || permitted.contains(&page) {
                    continue;
                }
                assert_eq!(
                    gate(page.target(), Some(&session)),
                    Outcome::Redirect(permitted[0]),
                    "role {:?} page {:?}",
                    role,
                    page
                );
            }
        }
    }

    #[test]
    fn permitted_navigation_is_allowed() {
        let session = session(Role::Customer);
        assert_eq!(gate("orders.html", Some(&session)), Outcome::Allow(Page::Orders));
    }

    #[test]
    fn nav_visibility_is_permitted_plus_public() {
        let visible = visible_nav(Role::Courier);
        assert!(visible.contains(&Page::Courier));
        assert!(visible.contains(&Page::Login));
        assert!(!visible.contains(&Page::Browse));
    }
}
