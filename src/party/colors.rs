use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The classic Cult of The Party Parrot color ramp
pub const PARTY_PARROT_COLORS: [&str; 10] = [
    "#FD8E8D", "#FDD58E", "#8CFD8E", "#8CFFFE", "#8DB6FB", "#D690FC", "#FD90FD", "#FD6EF4", "#FC6FB6", "#FD6A6B",
];

static PARTY_PARROT_RAMP: Lazy<Vec<Color>> =
    Lazy::new(|| PARTY_PARROT_COLORS.iter().filter_map(|color| color.parse().ok()).collect());

/// The party parrot ramp as parsed colors
pub fn party_parrot_ramp() -> Vec<Color> {
    PARTY_PARROT_RAMP.clone()
}

/// An RGB color, written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("invalid color '{0}': expected #RGB or #RRGGBB")]
pub struct InvalidColor(pub String);

impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidColor(input.to_string());
        let digits = input.trim().strip_prefix('#').ok_or_else(invalid)?;
        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };
        let bytes = hex::decode(expanded).map_err(|_| invalid())?;
        Ok(Self::new(bytes[0], bytes[1], bytes[2]))
    }
}

impl TryFrom<String> for Color {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode_upper([self.r, self.g, self.b]))
    }
}

#[cfg(feature = "json-schema")]
impl schemars::JsonSchema for Color {
    fn schema_name() -> String {
        "Color".to_string()
    }

    fn json_schema(generator: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#FD8E8D", Color::new(0xfd, 0x8e, 0x8d))]
    #[case("#fd8e8d", Color::new(0xfd, 0x8e, 0x8d))]
    #[case("#0af", Color::new(0x00, 0xaa, 0xff))]
    #[case(" #000000 ", Color::new(0, 0, 0))]
    fn parse_valid(#[case] input: &str, #[case] expected: Color) {
        assert_eq!(input.parse::<Color>(), Ok(expected));
    }

    #[rstest]
    #[case("FD8E8D")]
    #[case("#FD8E8")]
    #[case("#GGGGGG")]
    #[case("red")]
    #[case("")]
    fn parse_invalid(#[case] input: &str) {
        assert!(input.parse::<Color>().is_err());
    }

    #[test]
    fn display_is_uppercase() {
        assert_eq!(Color::new(0xfc, 0x6f, 0xb6).to_string(), "#FC6FB6");
    }

    #[test]
    fn default_ramp_is_complete() {
        let ramp = party_parrot_ramp();
        assert_eq!(ramp.len(), PARTY_PARROT_COLORS.len());
        let rendered: Vec<_> = ramp.iter().map(Color::to_string).collect();
        assert_eq!(rendered, PARTY_PARROT_COLORS);
    }
}
