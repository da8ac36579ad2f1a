use std::{collections::BTreeMap, path::Path};

use anyhow::Context as _;
use egui::Color32;

pub const DARK_TEXT: Color32 = Color32::from_rgb(0x11, 0x11, 0x11);
pub const LIGHT_TEXT: Color32 = Color32::from_rgb(0xFF, 0xFF, 0xFF);

const LUMINANCE_THRESHOLD: f32 = 0.65;

macro_rules! palette {
    ($($hex:literal),* $(,)?) => {
        [$(Color32::from_rgb(
            (($hex >> 16) & 0xFF) as u8,
            (($hex >> 8) & 0xFF) as u8,
            ($hex & 0xFF) as u8,
        )),*]
    };
}

const LIGHT: [Color32; 8] = palette![
    0xFF8A80, 0xFFD180, 0xFFF59D, 0xC8E6C9, 0x80DEEA, 0xA7FFEB, 0xB39DDB, 0x90CAF9,
];
const DARK: [Color32; 8] = palette![
    0xFF6B6B, 0xFFD166, 0xFAFF8E, 0xB9F6CA, 0x4DD0E1, 0x80CBC4, 0xB388FF, 0x64B5F6,
];
const NEON: [Color32; 8] = palette![
    0xFF2D95, 0x7CFF01, 0x00FFFF, 0xFFDD00, 0xFF6A00, 0x00FF9E, 0xFF00FF, 0x47FFA2,
];
const PASTEL: [Color32; 8] = palette![
    0xFFDBE9, 0xFFF0B3, 0xD1FFD6, 0xCFEFFF, 0xE7DFFF, 0xFFD6E7, 0xFBE7D6, 0xE6F7FF,
];
const RETRO: [Color32; 8] = palette![
    0xFFB86B, 0xFFD3A8, 0xF3E2A9, 0xB8E0D2, 0xC0B9FF, 0xFFB6C1, 0xF6C49F, 0xC3D69B,
];

const BUILTIN: [(&str, &[Color32]); 5] = [
    ("light", &LIGHT),
    ("dark", &DARK),
    ("neon", &NEON),
    ("pastel", &PASTEL),
    ("retro", &RETRO),
];

/// Segment colors plus an optional uniform label color.
///
/// When `text` is `None` each label picks a dark or light color depending on
/// the luminance of its segment.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(try_from = "RawTheme")]
pub struct Theme {
    pub colors: Vec<Color32>,
    pub text: Option<Color32>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(LIGHT.to_vec())
    }
}

impl Theme {
    pub fn new(colors: Vec<Color32>) -> Self {
        Self { colors, text: None }
    }

    pub fn with_text(self, text: Color32) -> Self {
        Self {
            text: Some(text),
            ..self
        }
    }

    pub fn builtin(name: &str) -> Option<Self> {
        BUILTIN
            .iter()
            .find_map(|&(key, colors)| (key == name).then(|| Self::new(colors.to_vec())))
    }

    pub fn builtin_names() -> impl Iterator<Item = &'static str> + ExactSizeIterator {
        BUILTIN.iter().map(|&(name, _)| name)
    }

    /// Segment colors cycle when there are fewer colors than entries.
    pub fn fill(&self, index: usize) -> Color32 {
        match self.colors.len() {
            0 => LIGHT[index % LIGHT.len()],
            len => self.colors[index % len],
        }
    }

    pub fn label_color(&self, fill: Color32) -> Color32 {
        self.text.unwrap_or_else(|| contrast_text(fill))
    }
}

pub fn luminance(color: Color32) -> f32 {
    (0.299 * color.r() as f32 + 0.587 * color.g() as f32 + 0.114 * color.b() as f32) / 255.0
}

pub fn contrast_text(fill: Color32) -> Color32 {
    if luminance(fill) > LUMINANCE_THRESHOLD {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

/// Parses `#rrggbb` or `#rrggbbaa`, the leading `#` is optional.
pub fn parse_hex_color(input: &str) -> Result<Color32, String> {
    let hex = input.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    if !matches!(hex.len(), 6 | 8) || !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid color: '{input}'"));
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|err| err.to_string());
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    let a = if hex.len() == 8 { channel(6)? } else { 0xFF };

    Ok(Color32::from_rgba_unmultiplied(r, g, b, a))
}

#[derive(serde::Deserialize)]
struct RawTheme {
    colors: Vec<String>,
    #[serde(default)]
    text: Option<String>,
}

impl TryFrom<RawTheme> for Theme {
    type Error = String;

    fn try_from(raw: RawTheme) -> Result<Self, Self::Error> {
        if raw.colors.is_empty() {
            return Err("a theme needs at least one color".into());
        }

        Ok(Self {
            colors: raw
                .colors
                .iter()
                .map(|c| parse_hex_color(c))
                .collect::<Result<_, _>>()?,
            text: raw.text.as_deref().map(parse_hex_color).transpose()?,
        })
    }
}

pub fn parse_themes(yaml: &str) -> anyhow::Result<BTreeMap<String, Theme>> {
    serde_yaml::from_str(yaml).with_context(|| "cannot parse theme document")
}

pub fn load_themes(path: impl AsRef<Path>) -> anyhow::Result<BTreeMap<String, Theme>> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read themes from '{}'", path.display()))?;
    let themes = parse_themes(&data)?;
    log::info!("loaded {} theme(s) from {}", themes.len(), path.display());
    Ok(themes)
}
