//! In-memory representation of a SafeInCloud export.

/// One parsed SafeInCloud database: the flat card list plus the label table
/// the cards reference by id.
#[derive(Debug, Default)]
pub struct Database {
    pub cards: Vec<Card>,
    pub labels: Vec<Label>,
}

#[derive(Debug, Default)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub star: bool,
    pub deleted: bool,
    pub template: bool,
    /// Label references in the card's own order.
    pub label_ids: Vec<String>,
    /// Typed fields in document order. Order matters: multi-login pairing
    /// scans forward from each login anchor.
    pub fields: Vec<Field>,
    pub notes: String,
    pub files: Vec<FileAttachment>,
    pub images: Vec<ImageAttachment>,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub value: String,
}

/// SafeInCloud field `type` attribute. Anything that is not a login,
/// password or website is free text as far as classification is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Login,
    Password,
    Website,
    Other,
}

impl FieldKind {
    pub fn from_attr(s: &str) -> Self {
        match s {
            "login" => FieldKind::Login,
            "password" => FieldKind::Password,
            "website" => FieldKind::Website,
            _ => FieldKind::Other,
        }
    }
}

#[derive(Debug)]
pub struct Label {
    pub id: String,
    pub name: String,
}

#[derive(Debug)]
pub struct FileAttachment {
    pub name: String,
    pub data: Vec<u8>,
}

/// SafeInCloud re-encodes every image attachment as JPEG, so the original
/// filename and format are gone by export time.
#[derive(Debug)]
pub struct ImageAttachment {
    pub data: Vec<u8>,
}

#[cfg(test)]
impl Field {
    pub fn new(name: &str, kind: FieldKind, value: &str) -> Self {
        Field {
            name: name.to_string(),
            kind,
            value: value.to_string(),
        }
    }
}
