//! Extra-block assembly.
//!
//! LastPass has no custom fields, so everything that is not part of the
//! structured record lands in the free-text "extra" column: the field dump,
//! the card's notes, and the original label list.

use crate::model::Card;

/// Extra block for a Site. Fields whose value equals the extracted url,
/// login or password are left out so the structured columns are not repeated.
/// The exclusion is by value, not by field identity: an unrelated field that
/// happens to hold the same value is suppressed too.
pub fn site_extra(card: &Card, labels: &[String], url: &str, login: &str, password: &str) -> String {
    assemble(card, labels, None, Some([url, login, password]))
}

/// Extra block for a Secure Note. No extraction happened, so every field is
/// dumped; an optional `NoteType:` prefix leads the block.
pub fn note_extra(card: &Card, labels: &[String], prefix: Option<&str>) -> String {
    assemble(card, labels, prefix, None)
}

fn assemble(
    card: &Card,
    labels: &[String],
    prefix: Option<&str>,
    exclude: Option<[&str; 3]>,
) -> String {
    let mut extra = String::new();

    if let Some(p) = prefix {
        // LastPass expects a blank line after the NoteType line.
        extra.push_str(p);
        extra.push_str("\n\n");
    }

    for f in &card.fields {
        if let Some(values) = &exclude {
            if values.contains(&f.value.as_str()) {
                continue;
            }
        }
        extra.push_str(&f.name);
        extra.push_str(": ");
        extra.push_str(&f.value);
        extra.push_str("\n\n");
    }

    extra.push_str(&card.notes);

    if !labels.is_empty() {
        extra.push_str("\n\nLabels: ");
        extra.push_str(&labels.join(", "));
    }

    extra
}
