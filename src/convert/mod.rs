//! Card classification: one SafeInCloud card in, LastPass records out.

pub mod extra;
pub mod fields;
pub mod folders;

use tracing::info;

use crate::export::{SecureNote, Site};
use crate::model::{Card, Label};
use folders::FolderRules;

/// Everything a single card produced. A card becomes one or more auto-login
/// sites, or exactly one secure note when no login triplet qualifies. Never
/// both.
#[derive(Debug)]
pub enum CardOutput {
    Sites(Vec<Site>),
    Note(SecureNote),
}

impl CardOutput {
    /// Names of the emitted records, used as the attachment naming key.
    pub fn names(&self) -> Vec<&str> {
        match self {
            CardOutput::Sites(sites) => sites.iter().map(|s| s.name.as_str()).collect(),
            CardOutput::Note(n) => vec![n.name.as_str()],
        }
    }
}

/// Classify one card. Pure: attachment dumping and accumulation are the
/// caller's job.
pub fn convert_card(card: &Card, label_table: &[Label], rules: &FolderRules) -> CardOutput {
    let labels = folders::card_labels(card, label_table);
    let grouping = folders::resolve_folder(&labels, rules);

    let triplets = fields::extract_triplets(card);
    if !triplets.is_empty() {
        let sites = triplets
            .into_iter()
            .map(|t| {
                info!(id = %card.id, name = %t.title, folder = %grouping, "importing site");
                Site {
                    extra: extra::site_extra(card, &labels, &t.url, &t.login, &t.password),
                    url: t.url,
                    username: t.login,
                    password: t.password,
                    name: t.title,
                    grouping: grouping.clone(),
                    fav: card.star,
                }
            })
            .collect();
        return CardOutput::Sites(sites);
    }

    let name = if card.title.is_empty() {
        format!("SecureNote {}", card.id)
    } else {
        card.title.clone()
    };
    info!(id = %card.id, name = %name, folder = %grouping, "importing secure note");

    let prefix = folders::note_type_prefix(&grouping);
    CardOutput::Note(SecureNote {
        extra: extra::note_extra(card, &labels, prefix),
        name,
        grouping,
        fav: card.star,
    })
}
