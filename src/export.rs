//! LastPass CSV records and writers.
//!
//! Column names and order are the import contract with LastPass and must not
//! change. Headers and rows come from fixed hand-written tables, one per
//! record type.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

pub const SITES_CSV: &str = "lastpass_sites.csv";
pub const NOTES_CSV: &str = "lastpass_notes.csv";

/// URL sentinel LastPass uses to mark a record as a secure note.
pub const SECURE_NOTE_URL: &str = "http://sn";

/// An auto-login site record. url, username, password and name are all
/// required; records missing any of them never get this far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub url: String,
    pub username: String,
    pub password: String,
    pub extra: String,
    pub name: String,
    pub grouping: String,
    pub fav: bool,
}

impl Site {
    /// `type` and `hostname` are part of the wire format but always empty.
    pub const COLUMNS: [&'static str; 9] = [
        "url", "type", "username", "password", "hostname", "extra", "name", "grouping", "fav",
    ];

    fn row(&self) -> [&str; 9] {
        [
            self.url.as_str(),
            "",
            self.username.as_str(),
            self.password.as_str(),
            "",
            self.extra.as_str(),
            self.name.as_str(),
            self.grouping.as_str(),
            fav_str(self.fav),
        ]
    }
}

/// A secure note record. Username and password stay empty no matter what the
/// card held; LastPass treats any value there as an auto-login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecureNote {
    pub extra: String,
    pub name: String,
    pub grouping: String,
    pub fav: bool,
}

impl SecureNote {
    pub const COLUMNS: [&'static str; 7] =
        ["url", "username", "password", "extra", "name", "grouping", "fav"];

    fn row(&self) -> [&str; 7] {
        [
            SECURE_NOTE_URL,
            "",
            "",
            self.extra.as_str(),
            self.name.as_str(),
            self.grouping.as_str(),
            fav_str(self.fav),
        ]
    }
}

fn fav_str(fav: bool) -> &'static str {
    if fav {
        "1"
    } else {
        ""
    }
}

/// The two append-only output sequences a run accumulates, flushed to CSV
/// once classification is done.
#[derive(Debug, Default)]
pub struct Outputs {
    pub sites: Vec<Site>,
    pub notes: Vec<SecureNote>,
}

pub fn write_sites_csv(sites: &[Site]) -> Result<()> {
    let mut w = writer(Path::new(SITES_CSV))?;
    write_site_records(&mut w, sites).context("writing sites csv")?;
    info!(records = sites.len(), path = SITES_CSV, "wrote sites csv");
    Ok(())
}

pub fn write_notes_csv(notes: &[SecureNote]) -> Result<()> {
    let mut w = writer(Path::new(NOTES_CSV))?;
    write_note_records(&mut w, notes).context("writing notes csv")?;
    info!(records = notes.len(), path = NOTES_CSV, "wrote notes csv");
    Ok(())
}

fn writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    csv::Writer::from_path(path).with_context(|| format!("failed to create {}", path.display()))
}

fn write_site_records<W: io::Write>(w: &mut csv::Writer<W>, sites: &[Site]) -> Result<()> {
    // The original tool leaves an empty export header-less; keep that.
    if sites.is_empty() {
        w.flush()?;
        return Ok(());
    }
    w.write_record(Site::COLUMNS)?;
    for s in sites {
        w.write_record(s.row())?;
    }
    w.flush()?;
    Ok(())
}

fn write_note_records<W: io::Write>(w: &mut csv::Writer<W>, notes: &[SecureNote]) -> Result<()> {
    if notes.is_empty() {
        w.flush()?;
        return Ok(());
    }
    w.write_record(SecureNote::COLUMNS)?;
    for n in notes {
        w.write_record(n.row())?;
    }
    w.flush()?;
    Ok(())
}
