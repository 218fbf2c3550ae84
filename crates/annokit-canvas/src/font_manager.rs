//! System font lookup for on-canvas labels
//!
//! Labels use whatever sans-serif face the host system provides. There
//! is no bundled fallback: when no face can be loaded (headless CI, bare
//! containers), the renderer skips label text and draws geometry only.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::Font;
use std::{
    collections::HashMap,
    fs,
    sync::{Mutex, OnceLock},
};

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// System sans-serif face for shape labels
///
/// Negative results are cached too, so a fontless system pays for the
/// query once.
pub fn label_font(bold: bool) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<bool, Option<&'static Font<'static>>>>> = OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    if let Some(entry) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&bold) {
        return *entry;
    }

    let loaded = load_system_sans(bold)
        .map(|font| -> &'static Font<'static> { Box::leak(Box::new(font)) });

    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(bold, loaded);
    loaded
}

fn load_system_sans(bold: bool) -> Option<Font<'static>> {
    let families = [Family::SansSerif];
    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}
