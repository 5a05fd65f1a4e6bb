//! Admin area: auth guard and the CRUD surfaces behind it.

pub mod contact;
pub mod guard;
pub mod messages;
pub mod users;

pub use contact::ContactEditor;
pub use guard::{AuthGuard, GuardState, Role};
pub use messages::{pending_badge, MessageFilter, MessagesBoard};
pub use users::{UserFilter, UserStatus, UsersBoard};

/// Case fold for admin search boxes. Turkish dotted and dotless i both fold
/// to plain `i`, so "AYDIN" finds "Aydın" and "ilker" finds "İlker".
pub(crate) fn fold_search(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| *c != '\u{0307}')
        .map(|c| if c == 'ı' { 'i' } else { c })
        .collect()
}

/// Substring test of an already folded needle against any of `fields`.
pub(crate) fn search_matches(needle: &str, fields: &[&str]) -> bool {
    needle.is_empty() || fields.iter().any(|field| fold_search(field).contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_search_turkish_i() {
        assert_eq!(fold_search("AYDIN"), "aydin");
        assert_eq!(fold_search("Aydın"), "aydin");
        assert_eq!(fold_search("İlker"), "ilker");
        assert_eq!(fold_search("ŞAHİN"), "şahin");
    }

    #[test]
    fn test_search_matches_any_field() {
        assert!(search_matches("", &[]));
        assert!(search_matches("ilk", &["x", "İlker"]));
        assert!(!search_matches("ilk", &["Mehmet"]));
    }
}
