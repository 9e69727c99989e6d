//! SafeInCloud XML export parser.
//!
//! An export is a flat `<database>` holding `<card>` elements and a `<label>`
//! table. Cards carry their typed `<field>` children, free-text `<notes>`,
//! `<label_id>` references and base64-encoded `<file>`/`<image>` attachments.

use std::path::Path;

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::model::{Card, Database, Field, FieldKind, FileAttachment, ImageAttachment, Label};

pub fn parse_file(path: &Path) -> Result<Database> {
    let xml = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_str(&xml).with_context(|| format!("failed to parse {}", path.display()))
}

/// Which element's text content is currently being collected.
enum Capture {
    Field { name: String, kind: FieldKind },
    Notes,
    LabelId,
    File { name: String },
    Image,
}

pub fn parse_str(xml: &str) -> Result<Database> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut db = Database::default();
    let mut card: Option<Card> = None;
    let mut capture: Option<Capture> = None;
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"card" => {
                    card = Some(card_from_attrs(&e)?);
                }
                b"label" => db.labels.push(label_from_attrs(&e)?),
                b"field" if card.is_some() => {
                    let kind = attr(&e, "type")?
                        .map(|t| FieldKind::from_attr(&t))
                        .unwrap_or(FieldKind::Other);
                    capture = Some(Capture::Field {
                        name: attr(&e, "name")?.unwrap_or_default(),
                        kind,
                    });
                    text.clear();
                }
                b"notes" if card.is_some() => {
                    capture = Some(Capture::Notes);
                    text.clear();
                }
                b"label_id" if card.is_some() => {
                    capture = Some(Capture::LabelId);
                    text.clear();
                }
                b"file" if card.is_some() => {
                    capture = Some(Capture::File {
                        name: attr(&e, "name")?.unwrap_or_default(),
                    });
                    text.clear();
                }
                b"image" if card.is_some() => {
                    capture = Some(Capture::Image);
                    text.clear();
                }
                _ => {}
            },
            // Self-closing variants: empty field values, attribute-only labels.
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"label" => db.labels.push(label_from_attrs(&e)?),
                b"field" => {
                    if let Some(c) = card.as_mut() {
                        let kind = attr(&e, "type")?
                            .map(|t| FieldKind::from_attr(&t))
                            .unwrap_or(FieldKind::Other);
                        c.fields.push(Field {
                            name: attr(&e, "name")?.unwrap_or_default(),
                            kind,
                            value: String::new(),
                        });
                    }
                }
                _ => {}
            },
            Ok(Event::Text(e)) if capture.is_some() => {
                text.push_str(&e.unescape()?);
            }
            Ok(Event::CData(e)) if capture.is_some() => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"card" => {
                    if let Some(c) = card.take() {
                        debug!(id = %c.id, title = %c.title, "parsed card");
                        db.cards.push(c);
                    }
                }
                b"field" | b"notes" | b"label_id" | b"file" | b"image" => {
                    if let (Some(cap), Some(c)) = (capture.take(), card.as_mut()) {
                        commit(cap, &text, c)?;
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    if card.is_some() {
        bail!("unterminated <card> element");
    }
    debug!(cards = db.cards.len(), labels = db.labels.len(), "parsed database");
    Ok(db)
}

fn commit(cap: Capture, text: &str, card: &mut Card) -> Result<()> {
    match cap {
        Capture::Field { name, kind } => card.fields.push(Field {
            name,
            kind,
            value: text.to_string(),
        }),
        Capture::Notes => card.notes = text.to_string(),
        Capture::LabelId => card.label_ids.push(text.trim().to_string()),
        Capture::File { name } => card.files.push(FileAttachment {
            name,
            data: decode_payload(text)?,
        }),
        Capture::Image => card.images.push(ImageAttachment {
            data: decode_payload(text)?,
        }),
    }
    Ok(())
}

/// Attachment payloads are base64 with XML pretty-printing whitespace mixed in.
fn decode_payload(text: &str) -> Result<Vec<u8>> {
    let cleaned: String = text.split_whitespace().collect();
    BASE64
        .decode(cleaned.as_bytes())
        .context("invalid base64 attachment payload")
}

fn card_from_attrs(e: &BytesStart) -> Result<Card> {
    Ok(Card {
        id: attr(e, "id")?.unwrap_or_default(),
        title: attr(e, "title")?.unwrap_or_default(),
        star: flag(e, "star")?,
        deleted: flag(e, "deleted")?,
        template: flag(e, "template")?,
        ..Card::default()
    })
}

fn label_from_attrs(e: &BytesStart) -> Result<Label> {
    Ok(Label {
        id: attr(e, "id")?.unwrap_or_default(),
        name: attr(e, "name")?.unwrap_or_default(),
    })
}

fn attr(e: &BytesStart, key: &str) -> Result<Option<String>> {
    for a in e.attributes() {
        let a = a?;
        if a.key.as_ref() == key.as_bytes() {
            return Ok(Some(a.unescape_value()?.to_string()));
        }
    }
    Ok(None)
}

fn flag(e: &BytesStart, key: &str) -> Result<bool> {
    Ok(attr(e, key)?.as_deref() == Some("true"))
}
