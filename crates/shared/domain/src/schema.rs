use crate::constants::{SCHEMA_AGE, SCHEMA_BAPTISM, SCHEMA_STRUCTURED_ADDRESS};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Optional registration form fields enabled by the active schema revision.
    ///
    /// Early revisions only knew the free-text address; later ones added the
    /// structured address block and the baptism question.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SchemaFeatures: u8 {
        /// The form may carry an explicit age next to the birth date.
        const AGE = 1 << 0;
        /// The form asks whether the member is baptized (required answer).
        const BAPTISM = 1 << 1;
        /// The form carries postal code, street, number, ... instead of free text.
        const STRUCTURED_ADDRESS = 1 << 2;

        const ALL = Self::AGE.bits() | Self::BAPTISM.bits() | Self::STRUCTURED_ADDRESS.bits();
    }
}

impl Default for SchemaFeatures {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<&str> for SchemaFeatures {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            SCHEMA_AGE => Self::AGE,
            SCHEMA_BAPTISM => Self::BAPTISM,
            SCHEMA_STRUCTURED_ADDRESS => Self::STRUCTURED_ADDRESS,
            "all" | "*" => Self::ALL,
            _ => Self::empty(),
        }
    }
}

impl SchemaFeatures {
    /// Names of the enabled flags, in declaration order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        [
            (Self::AGE, SCHEMA_AGE),
            (Self::BAPTISM, SCHEMA_BAPTISM),
            (Self::STRUCTURED_ADDRESS, SCHEMA_STRUCTURED_ADDRESS),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect()
    }
}

impl Serialize for SchemaFeatures {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.names().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SchemaFeatures {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        Ok(names.iter().fold(Self::empty(), |acc, name| acc | Self::from(name.as_str())))
    }
}
