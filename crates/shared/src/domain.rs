use serde::{Deserialize, Serialize};

use crate::error::ColorError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);
    };
}

id_newtype!(SlideId);
id_newtype!(SwatchId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Next,
    Prev,
}

/// An option that can be held by a selection swap. Equality of options is
/// decided by `id`, never by the rest of the payload.
pub trait Selectable: Clone + Send + Sync + 'static {
    type Id: Copy + Eq + std::fmt::Debug + Send + Sync + 'static;

    fn id(&self) -> Self::Id;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub fn parse(raw: &str) -> Result<Self, ColorError> {
        let digits = raw
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(raw.to_string()))?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorError::Length(raw.to_string()));
        }

        let channel = |at: usize| {
            u8::from_str_radix(&digits[at..at + 2], 16)
                .map_err(|_| ColorError::Digit(raw.to_string()))
        };

        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub id: SlideId,
    pub title: String,
    pub subtitle: String,
    pub hex: HexColor,
    pub video: String,
}

/// A paint option on the configurator page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub id: SwatchId,
    pub name: String,
    pub hex: HexColor,
    pub video: String,
}

impl Selectable for Swatch {
    type Id = SwatchId;

    fn id(&self) -> SwatchId {
        self.id
    }
}
