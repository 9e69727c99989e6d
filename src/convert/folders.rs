//! Label resolution and folder policy.
//!
//! LastPass files every record into a single folder and has no tags, so a
//! card's labels have to collapse to one grouping string.

use crate::model::{Card, Label};

/// Folder settings taken from the CLI.
#[derive(Debug, Default)]
pub struct FolderRules {
    /// Folder for cards with no labels, and the prefix for unmatched ones.
    pub default_folder: String,
    /// Label names that win, in order. First match over the card's labels
    /// decides the folder.
    pub priority: Vec<String>,
}

/// Resolve a card's label-id references to names, preserving the card's own
/// reference order. Ids with no matching label row are dropped.
pub fn card_labels(card: &Card, labels: &[Label]) -> Vec<String> {
    card.label_ids
        .iter()
        .filter_map(|id| labels.iter().find(|l| &l.id == id))
        .map(|l| l.name.clone())
        .collect()
}

/// Pick the one destination folder for a card's resolved labels.
///
/// Priority-list order dominates label order, compared case-insensitively but
/// returning the priority entry's own casing. Labelled cards that match no
/// priority entry get `"<default> - <first label>"` so they sort next to the
/// default folder while keeping their primary label visible.
pub fn resolve_folder(labels: &[String], rules: &FolderRules) -> String {
    if labels.is_empty() {
        return rules.default_folder.clone();
    }

    for wanted in &rules.priority {
        if labels.iter().any(|l| eq_fold(wanted, l)) {
            return wanted.clone();
        }
    }

    format!("{} - {}", rules.default_folder, labels[0])
}

fn eq_fold(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// LastPass parses a leading `NoteType:` line to pick a structured secure
/// note template. Folders named after the stock templates opt in.
pub fn note_type_prefix(folder: &str) -> Option<&'static str> {
    const NOTE_TYPES: &[(&str, &str)] = &[
        ("Credit Cards", "NoteType:Credit Card"),
        ("Banking", "NoteType:Bank Account"),
        ("Databases", "NoteType:Database"),
        ("Licenses", "NoteType:Driver's License"),
        ("Insurance", "NoteType:Insurance"),
        ("Membership", "NoteType:Membership"),
        ("Passport", "NoteType:Passport"),
        ("Servers", "NoteType:Server"),
        ("Software", "NoteType:Software License"),
    ];
    NOTE_TYPES
        .iter()
        .find(|(f, _)| *f == folder)
        .map(|(_, prefix)| *prefix)
}
