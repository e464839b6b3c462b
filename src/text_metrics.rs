//! Text width measurement for name labels and arc-label backing boxes.
//! Resolves a system face once per family and caches glyph advances; when
//! no face resolves the estimate keeps layout deterministic.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

/// Per-character estimate when no face resolves or a glyph is missing.
const FALLBACK_ADVANCE: f32 = 0.56;

static MEASURER: Lazy<Mutex<Measurer>> = Lazy::new(|| Mutex::new(Measurer::default()));

/// Width of `text` in px at `font_size` px in the first resolvable family.
pub fn text_width(text: &str, font_size: f32, font_family: &str) -> f32 {
    if text.is_empty() || font_size <= 0.0 {
        return 0.0;
    }
    match MEASURER.lock() {
        Ok(mut measurer) => measurer.width(text, font_size, font_family),
        Err(_) => fallback_width(text, font_size),
    }
}

fn fallback_width(text: &str, font_size: f32) -> f32 {
    let count = text.chars().filter(|ch| *ch != '\n').count();
    count as f32 * font_size * FALLBACK_ADVANCE
}

#[derive(Default)]
struct Measurer {
    db: Option<Database>,
    faces: HashMap<String, Option<FaceData>>,
}

struct FaceData {
    bytes: Vec<u8>,
    index: u32,
    units_per_em: f32,
    advances: HashMap<char, Option<u16>>,
}

impl Measurer {
    fn width(&mut self, text: &str, font_size: f32, family: &str) -> f32 {
        let key = family.trim().to_string();
        if !self.faces.contains_key(&key) {
            let face = self.load(family);
            self.faces.insert(key.clone(), face);
        }
        match self.faces.get_mut(&key).and_then(|face| face.as_mut()) {
            Some(face) => face.width(text, font_size),
            None => fallback_width(text, font_size),
        }
    }

    fn load(&mut self, family: &str) -> Option<FaceData> {
        let db = self.db.get_or_insert_with(|| {
            let mut db = Database::new();
            db.load_system_fonts();
            db
        });

        let names: Vec<String> = family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\'').to_string())
            .filter(|name| !name.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = Vec::with_capacity(names.len().max(1));
        for name in &names {
            match name.to_ascii_lowercase().as_str() {
                "serif" => families.push(Family::Serif),
                "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => {
                    families.push(Family::SansSerif)
                }
                "monospace" | "ui-monospace" => families.push(Family::Monospace),
                "cursive" => families.push(Family::Cursive),
                "fantasy" => families.push(Family::Fantasy),
                _ => families.push(Family::Name(name)),
            }
        }
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = db.query(&query)?;
        let mut loaded = None;
        db.with_face_data(id, |data, index| {
            if let Ok(face) = Face::parse(data, index) {
                loaded = Some(FaceData {
                    bytes: data.to_vec(),
                    index,
                    units_per_em: face.units_per_em().max(1) as f32,
                    advances: HashMap::new(),
                });
            }
        });
        loaded
    }
}

impl FaceData {
    fn width(&mut self, text: &str, font_size: f32) -> f32 {
        let FaceData {
            bytes,
            index,
            units_per_em,
            advances,
        } = self;
        let Ok(face) = Face::parse(bytes.as_slice(), *index) else {
            return fallback_width(text, font_size);
        };
        let scale = font_size / *units_per_em;
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = *advances.entry(ch).or_insert_with(|| {
                face.glyph_index(ch)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
            });
            match advance {
                Some(advance) => width += advance as f32 * scale,
                None => width += font_size * FALLBACK_ADVANCE,
            }
        }
        width.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_zero_width() {
        assert_eq!(text_width("", 11.0, "Helvetica"), 0.0);
        assert_eq!(text_width("abc", 0.0, "Helvetica"), 0.0);
    }

    #[test]
    fn width_grows_with_text() {
        let short = text_width("ab", 11.0, "Helvetica");
        let long = text_width("abcdef", 11.0, "Helvetica");
        assert!(long > short);
    }

    #[test]
    fn repeated_measurement_is_stable() {
        let first = text_width("wr_data", 11.0, "Helvetica");
        let second = text_width("wr_data", 11.0, "Helvetica");
        assert_eq!(first, second);
    }
}
