use crate::error::{AppResult, ConfigErrorKind, PanelError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A single terminal colour: either a 24-bit value or one of the 16 basic
/// ANSI colours (stored as its foreground SGR code).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Color {
    Rgb(u8, u8, u8),
    Ansi(u8),
}

impl Color {
    pub const WHITE: Color = Color::Rgb(0xff, 0xff, 0xff);

    /// SGR parameters selecting this colour as foreground, e.g. `38;2;255;0;0`.
    pub fn fg_sgr(&self) -> String {
        match self {
            Color::Rgb(r, g, b) => format!("38;2;{r};{g};{b}"),
            Color::Ansi(code) => code.to_string(),
        }
    }
}

impl FromStr for Color {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| PanelError::InvalidColor(s.to_string()));
        }
        ansi_code(s)
            .map(Color::Ansi)
            .ok_or_else(|| PanelError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = PanelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Color::Ansi(code) => write!(f, "ansi({code})"),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        // #rgb shorthand, each digit doubled
        3 => {
            let mut it = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some(Color::Rgb(it.next()??, it.next()??, it.next()??))
        }
        _ => None,
    }
}

fn ansi_code(name: &str) -> Option<u8> {
    match name.to_ascii_lowercase().as_str() {
        "black" => Some(30),
        "red" => Some(31),
        "green" => Some(32),
        "yellow" => Some(33),
        "blue" => Some(34),
        "magenta" => Some(35),
        "cyan" => Some(36),
        "white" => Some(37),
        "gray" | "grey" | "bright_black" => Some(90),
        "bright_red" => Some(91),
        "bright_green" => Some(92),
        "bright_yellow" => Some(93),
        "bright_blue" => Some(94),
        "bright_magenta" => Some(95),
        "bright_cyan" => Some(96),
        "bright_white" => Some(97),
        "default" | "reset" => Some(39),
        _ => None,
    }
}

/// Named colours used by the room panel and the VML translator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Plain text, also used for list separators
    pub text: Color,
    pub room_name: Color,
    pub exit: Color,
    pub exit_separator: Color,
    /// VML tag name -> colour
    pub vml: BTreeMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let vml = [
            ("item", Color::Rgb(0xe6, 0xc8, 0x4f)),
            ("npc", Color::Rgb(0xf0, 0x8a, 0x5d)),
            ("player", Color::Rgb(0x7e, 0xc8, 0xe3)),
            ("shop", Color::Rgb(0xb8, 0xe9, 0x86)),
            ("exit", Color::WHITE),
            ("room", Color::WHITE),
            ("damage", Color::Rgb(0xe0, 0x4f, 0x4f)),
            ("heal", Color::Rgb(0x5f, 0xd0, 0x7a)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self {
            text: Color::Rgb(0xc4, 0xe9, 0xe9),
            room_name: Color::WHITE,
            exit: Color::WHITE,
            exit_separator: Color::Rgb(0xc4, 0xe9, 0xe9),
            vml,
        }
    }
}

/// On-disk shape: every field optional, VML entries merge into the defaults.
/// Colours stay strings here so a bad one surfaces as `InvalidColor`.
#[derive(Debug, Default, Deserialize)]
struct ThemeFile {
    text: Option<String>,
    room_name: Option<String>,
    exit: Option<String>,
    exit_separator: Option<String>,
    #[serde(default)]
    vml: BTreeMap<String, String>,
}

fn set_color(slot: &mut Color, value: Option<String>) -> AppResult<()> {
    if let Some(v) = value {
        *slot = v.parse()?;
    }
    Ok(())
}

impl Theme {
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| PanelError::Config {
            path: path.to_path_buf(),
            source: ConfigErrorKind::Read(e),
        })?;
        let theme = Self::from_toml(&data).map_err(|e| match e {
            PanelError::Toml(e) => PanelError::Config {
                path: path.to_path_buf(),
                source: ConfigErrorKind::Parse(e),
            },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "theme loaded");
        Ok(theme)
    }

    pub fn from_toml(data: &str) -> AppResult<Self> {
        let file: ThemeFile = toml::from_str(data)?;
        let mut theme = Theme::default();
        set_color(&mut theme.text, file.text)?;
        set_color(&mut theme.room_name, file.room_name)?;
        set_color(&mut theme.exit, file.exit)?;
        set_color(&mut theme.exit_separator, file.exit_separator)?;
        // tags are matched lowercased
        for (tag, value) in file.vml {
            theme.vml.insert(tag.to_ascii_lowercase(), value.parse()?);
        }
        Ok(theme)
    }

    /// Colour for a VML tag, if the palette knows it.
    pub fn vml_color(&self, tag: &str) -> Option<Color> {
        self.vml.get(&tag.to_ascii_lowercase()).copied()
    }

    /// Colour used for item names in the room listing.
    pub fn item(&self) -> Color {
        self.vml_color("item").unwrap_or(self.text)
    }
}
