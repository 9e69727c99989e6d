//! Login/password/website triplet extraction.

use tracing::debug;

use crate::model::{Card, Field, FieldKind};

/// One qualifying auto-login triplet anchored at a login field.
#[derive(Debug, PartialEq, Eq)]
pub struct LoginTriplet {
    pub title: String,
    pub login: String,
    pub password: String,
    pub url: String,
}

/// Find every auto-login triplet on a card.
///
/// For each non-empty login field the password and website are resolved by
/// scanning forward from the login's own position. Cards that hold several
/// login blocks list them sequentially, so anchoring the scan at each login
/// pairs it with the *next* password/website rather than the card's first.
/// A login whose forward scan comes up short is skipped on its own; later
/// logins still get their chance.
pub fn extract_triplets(card: &Card) -> Vec<LoginTriplet> {
    let mut triplets = Vec::new();

    for (i, f) in card.fields.iter().enumerate() {
        if f.kind != FieldKind::Login || f.value.is_empty() {
            continue;
        }
        debug!(id = %card.id, title = %card.title, "found login");
        let rest = &card.fields[i..];

        let password = first_value(rest, FieldKind::Password);
        let url = first_value(rest, FieldKind::Website);
        let (Some(password), Some(url)) = (password, url) else {
            debug!(id = %card.id, title = %card.title, "missing password or website value(s)");
            continue;
        };

        let title = site_title(&card.title, &url);
        if title.is_empty() {
            debug!(id = %card.id, title = %card.title, "missing title");
            continue;
        }

        triplets.push(LoginTriplet {
            title,
            login: f.value.clone(),
            password: password.to_string(),
            url: url.to_string(),
        });
    }

    triplets
}

fn first_value(fields: &[Field], kind: FieldKind) -> Option<&str> {
    fields
        .iter()
        .find(|f| f.kind == kind && !f.value.is_empty())
        .map(|f| f.value.as_str())
}

/// Cards with an empty title fall back to the website with its scheme
/// stripped (first occurrence only, exact case).
fn site_title(card_title: &str, url: &str) -> String {
    if !card_title.is_empty() {
        return card_title.to_string();
    }
    url.replacen("http://", "", 1).replacen("https://", "", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(fields: Vec<Field>) -> Card {
        Card {
            id: "1".into(),
            title: "Example".into(),
            fields,
            ..Card::default()
        }
    }

    #[test]
    fn single_triplet() {
        let c = card(vec![
            Field::new("Login", FieldKind::Login, "bob"),
            Field::new("Password", FieldKind::Password, "pw1"),
            Field::new("Website", FieldKind::Website, "https://example.com"),
        ]);
        let t = extract_triplets(&c);
        assert_eq!(t.len(), 1);
        assert_eq!(t[0].login, "bob");
        assert_eq!(t[0].password, "pw1");
        assert_eq!(t[0].url, "https://example.com");
        assert_eq!(t[0].title, "Example");
    }

    #[test]
    fn multi_login_pairs_forward() {
        let c = card(vec![
            Field::new("Login", FieldKind::Login, "first"),
            Field::new("Password", FieldKind::Password, "pw-first"),
            Field::new("Website", FieldKind::Website, "https://a.example"),
            Field::new("Login 2", FieldKind::Login, "second"),
            Field::new("Password 2", FieldKind::Password, "pw-second"),
            Field::new("Website 2", FieldKind::Website, "https://b.example"),
        ]);
        let t = extract_triplets(&c);
        assert_eq!(t.len(), 2);
        assert_eq!(t[0].password, "pw-first");
        assert_eq!(t[1].login, "second");
        assert_eq!(t[1].password, "pw-second");
        assert_eq!(t[1].url, "https://b.example");
    }

    #[test]
    fn second_login_shares_trailing_website() {
        // The forward scan pairs both logins with the one website at the end.
        let c = card(vec![
            Field::new("Login", FieldKind::Login, "first"),
            Field::new("Password", FieldKind::Password, "pw-first"),
            Field::new("Login 2", FieldKind::Login, "second"),
            Field::new("Password 2", FieldKind::Password, "pw-second"),
            Field::new("Website", FieldKind::Website, "https://a.example"),
        ]);
        let t = extract_triplets(&c);
        assert_eq!(t.len(), 2);
        assert_eq!(t[0].url, "https://a.example");
        assert_eq!(t[1].url, "https://a.example");
    }

    #[test]
    fn forward_scan_crosses_later_blocks() {
        let c = card(vec![
            Field::new("Login", FieldKind::Login, "first"),
            Field::new("Website", FieldKind::Website, "https://a.example"),
            Field::new("Login 2", FieldKind::Login, "second"),
            Field::new("Password", FieldKind::Password, "pw"),
            Field::new("Website 2", FieldKind::Website, "https://b.example"),
        ]);
        // First login finds a website but its forward scan also reaches the
        // password after the second login, so both qualify.
        let t = extract_triplets(&c);
        assert_eq!(t.len(), 2);
        assert_eq!(t[0].login, "first");
        assert_eq!(t[0].password, "pw");
    }

    #[test]
    fn unpaired_login_is_skipped_alone() {
        let c = card(vec![
            Field::new("Login", FieldKind::Login, "first"),
            Field::new("Password", FieldKind::Password, "pw-first"),
            Field::new("Website", FieldKind::Website, "https://a.example"),
            Field::new("Login 2", FieldKind::Login, "second"),
            Field::new("Password 2", FieldKind::Password, "pw-second"),
        ]);
        // Second login has no website after it; only the first qualifies.
        let t = extract_triplets(&c);
        assert_eq!(t.len(), 1);
        assert_eq!(t[0].login, "first");
    }

    #[test]
    fn empty_values_do_not_pair() {
        let c = card(vec![
            Field::new("Login", FieldKind::Login, "bob"),
            Field::new("Password", FieldKind::Password, ""),
            Field::new("Website", FieldKind::Website, "https://a.example"),
        ]);
        assert!(extract_triplets(&c).is_empty());
    }

    #[test]
    fn password_before_login_is_not_seen() {
        let c = card(vec![
            Field::new("Password", FieldKind::Password, "pw"),
            Field::new("Login", FieldKind::Login, "bob"),
            Field::new("Website", FieldKind::Website, "https://a.example"),
        ]);
        assert!(extract_triplets(&c).is_empty());
    }

    #[test]
    fn title_falls_back_to_website() {
        let mut c = card(vec![
            Field::new("Login", FieldKind::Login, "bob"),
            Field::new("Password", FieldKind::Password, "pw1"),
            Field::new("Website", FieldKind::Website, "https://example.com"),
        ]);
        c.title = String::new();
        let t = extract_triplets(&c);
        assert_eq!(t[0].title, "example.com");
    }

    #[test]
    fn scheme_strip_is_first_match_only() {
        assert_eq!(
            site_title("", "http://mirror.example/http://deep"),
            "mirror.example/http://deep"
        );
        assert_eq!(site_title("", "HTTPS://example.com"), "HTTPS://example.com");
    }
}
