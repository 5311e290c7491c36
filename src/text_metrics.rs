//! Default text-measurement backend. Resolves fonts through `fontdb`,
//! reads glyph advances with `ttf-parser`, and falls back to calibrated
//! per-character factors when no face can be loaded. The layout engine only
//! ever sees the measurement callback; this module is one provider of it.

use std::collections::HashMap;
use std::sync::Mutex;

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use ttf_parser::Face;

use crate::config::LayoutConfig;
use crate::hyphenation::hyphenations;
use crate::layout::{Baseline, MeasuredWrapping, TextAnchor, TextBox, TextHints};
use crate::model::{FontRef, Station};

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Style under which labels are measured.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub font_family: String,
    pub font_size: f32,
    pub font_weight: f32,
    pub line_height: f32,
}

impl LabelStyle {
    pub fn from_config(config: &LayoutConfig, font: Option<&FontRef>) -> LabelStyle {
        LabelStyle {
            font_family: font
                .and_then(FontRef::font_name)
                .unwrap_or_else(|| "sans-serif".to_string()),
            font_size: config.label.font_size,
            font_weight: config.label.font_weight,
            line_height: config.label_line_height(),
        }
    }
}

/// Session-scoped measurer: owns the hyphenation table and an append-only
/// cache keyed by (style, hints, text). Entries are never invalidated here;
/// dropping the measurer ends the session.
#[derive(Debug)]
pub struct LabelMeasurer {
    style: LabelStyle,
    hyphenation: HashMap<String, String>,
    cache: HashMap<String, Vec<MeasuredWrapping>>,
}

impl LabelMeasurer {
    pub fn new(style: LabelStyle, hyphenation: HashMap<String, String>) -> Self {
        Self {
            style,
            hyphenation,
            cache: HashMap::new(),
        }
    }

    /// Candidate wrappings of a station's label, unbroken text first.
    pub fn measure(&mut self, station: &Station, hints: TextHints) -> Vec<MeasuredWrapping> {
        let key = cache_key(&self.style, hints, &station.name);
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }
        let wrappings = measure_wrappings(&station.name, Some(&self.hyphenation), &self.style, hints);
        self.cache.insert(key, wrappings.clone());
        wrappings
    }
}

fn cache_key(style: &LabelStyle, hints: TextHints, text: &str) -> String {
    format!(
        "{}|{}|{}|{:?}|{:?}|{}",
        style.font_family,
        style.font_size,
        style.font_weight,
        hints.text_anchor,
        hints.dominant_baseline,
        text
    )
}

/// Measures every hyphenation alternative of `text` into per-line boxes.
pub fn measure_wrappings(
    text: &str,
    hyphenation: Option<&HashMap<String, String>>,
    style: &LabelStyle,
    hints: TextHints,
) -> Vec<MeasuredWrapping> {
    hyphenations(text, hyphenation)
        .iter()
        .map(|candidate| measure_candidate(candidate, style, hints))
        .collect()
}

fn measure_candidate(text: &str, style: &LabelStyle, hints: TextHints) -> MeasuredWrapping {
    let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    let boxes = lines
        .iter()
        .map(|line| {
            let metrics = line_metrics(line, style);
            let x = match hints.text_anchor {
                TextAnchor::Start => 0.0,
                TextAnchor::Middle => -metrics.width / 2.0,
                TextAnchor::End => -metrics.width,
            };
            let (y, height) = match hints.dominant_baseline {
                Baseline::Alphabetic => (-metrics.ascent, metrics.ascent + metrics.descent),
                Baseline::Hanging => (0.0, metrics.ascent + metrics.descent),
            };
            TextBox::new(x, y, metrics.width, height)
        })
        .collect();
    MeasuredWrapping { lines, boxes }
}

struct LineMetrics {
    width: f32,
    ascent: f32,
    descent: f32,
}

fn line_metrics(line: &str, style: &LabelStyle) -> LineMetrics {
    let mut guard = match TEXT_MEASURER.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    guard.measure(line, style)
}

/// Process-wide font database and face cache.
struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    faces: HashMap<String, Option<FontFace>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            faces: HashMap::new(),
        }
    }

    fn measure(&mut self, line: &str, style: &LabelStyle) -> LineMetrics {
        let key = format!("{}|{}", normalize_family_key(&style.font_family), style.font_weight);
        if !self.faces.contains_key(&key) {
            let face = self.load_face(&style.font_family, style.font_weight);
            self.faces.insert(key.clone(), face);
        }
        match self.faces.get_mut(&key).and_then(Option::as_mut) {
            Some(face) => LineMetrics {
                width: face.measure_width(line, style.font_size),
                ascent: face.ascent * style.font_size,
                descent: face.descent * style.font_size,
            },
            None => fallback_metrics(line, style.font_size),
        }
    }

    fn load_face(&mut self, font_family: &str, font_weight: f32) -> Option<FontFace> {
        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let mut names: Vec<String> = Vec::new();
        let mut families: Vec<Family> = Vec::new();
        for part in font_family.split(',') {
            let raw = part.trim().trim_matches('"').trim_matches('\'');
            if raw.is_empty() {
                continue;
            }
            match raw.to_ascii_lowercase().as_str() {
                "sans-serif" => families.push(Family::SansSerif),
                "serif" => families.push(Family::Serif),
                "monospace" => families.push(Family::Monospace),
                "cursive" => families.push(Family::Cursive),
                "fantasy" => families.push(Family::Fantasy),
                _ => names.push(raw.to_string()),
            }
        }
        let named: Vec<Family> = names.iter().map(|name| Family::Name(name)).collect();
        let ordered: Vec<Family> = named.into_iter().chain(families).collect();

        let query = Query {
            families: &ordered,
            weight: Weight(font_weight.clamp(1.0, 1000.0) as u16),
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        let (source, index) = {
            let info = self.db.face(id)?;
            (info.source.clone(), info.index)
        };
        let data: Vec<u8> = match source {
            fontdb::Source::Binary(data) => data.as_ref().as_ref().to_vec(),
            fontdb::Source::SharedFile(_, data) => data.as_ref().as_ref().to_vec(),
            fontdb::Source::File(path) => std::fs::read(path).ok()?,
        };
        FontFace::parse(data, index)
    }
}

fn normalize_family_key(font_family: &str) -> String {
    font_family.to_ascii_lowercase().replace(' ', "")
}

/// One loaded face with a per-character advance cache in font units.
struct FontFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: f32,
    ascent: f32,
    descent: f32,
    advances: HashMap<char, f32>,
}

impl FontFace {
    fn parse(data: Vec<u8>, index: u32) -> Option<FontFace> {
        let face = Face::parse(&data, index).ok()?;
        let units_per_em = face.units_per_em() as f32;
        if units_per_em <= 0.0 {
            return None;
        }
        let ascent = face.ascender() as f32 / units_per_em;
        let descent = -(face.descender() as f32) / units_per_em;
        Some(FontFace {
            data,
            index,
            units_per_em,
            ascent,
            descent: descent.max(0.0),
            advances: HashMap::new(),
        })
    }

    fn measure_width(&mut self, text: &str, font_size: f32) -> f32 {
        let missing: Vec<char> = text
            .chars()
            .filter(|ch| !self.advances.contains_key(ch))
            .collect();
        if !missing.is_empty()
            && let Ok(face) = Face::parse(&self.data, self.index)
        {
            for ch in missing {
                let advance = face
                    .glyph_index(ch)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .map(|advance| advance as f32)
                    .unwrap_or(self.units_per_em * fallback_char_factor(ch));
                self.advances.insert(ch, advance);
            }
        }
        let units: f32 = text
            .chars()
            .map(|ch| {
                self.advances
                    .get(&ch)
                    .copied()
                    .unwrap_or(self.units_per_em * fallback_char_factor(ch))
            })
            .sum();
        units / self.units_per_em * font_size
    }
}

fn fallback_metrics(line: &str, font_size: f32) -> LineMetrics {
    let width: f32 = line
        .chars()
        .map(|ch| fallback_char_factor(ch) * font_size)
        .sum();
    LineMetrics {
        width,
        ascent: 0.8 * font_size,
        descent: 0.2 * font_size,
    }
}

/// Width factors for environments with no usable font, grouped by rough
/// glyph class.
fn fallback_char_factor(ch: char) -> f32 {
    match ch {
        'i' | 'j' | 'l' | 'I' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.28,
        'f' | 'r' | 't' | '(' | ')' | '[' | ']' | ' ' | '-' => 0.34,
        'm' | 'w' | '@' | '%' | '&' => 0.87,
        'M' | 'W' => 0.95,
        ch if ch.is_ascii_uppercase() || ch.is_ascii_digit() => 0.66,
        _ => 0.55,
    }
}
