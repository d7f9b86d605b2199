use crate::error::MembersError;
use crate::photo::PhotoRef;
use album_kernel::{is_safe_id, safe_nanoid};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque member identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub(crate) fn generate() -> Self {
        Self(safe_nanoid!())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MemberId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for MemberId {
    type Err = MembersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if is_safe_id(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(MembersError::InvalidId {
                message: format!("'{s}' is not a member id").into(),
                context: None,
            })
        }
    }
}

/// A registered church member as shown in the album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub photo_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_ai_hint: Option<String>,
    /// Display address, possibly multi-line.
    pub address: String,
    pub time_at_church: String,
    pub serves_in_ministry: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ministries_served: Option<String>,
    pub role: String,
    pub age: u32,
    pub birth_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_baptized: Option<bool>,
    #[serde(skip)]
    pub(crate) photo: Option<PhotoRef>,
}

impl Member {
    /// Transient reference of an uploaded photo, `None` for the placeholder.
    #[must_use]
    pub const fn photo_ref(&self) -> Option<&PhotoRef> {
        self.photo.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_parse_back() {
        let id = MemberId::generate();
        let parsed: MemberId = id.as_str().parse().expect("generated id parses");
        assert_eq!(parsed, id);
        assert_ne!(MemberId::generate(), id);
    }

    #[test]
    fn ambiguous_ids_are_rejected() {
        let err = "member-01".parse::<MemberId>().expect_err("dash and zero are not in the alphabet");
        assert!(matches!(err, MembersError::InvalidId { .. }));
    }
}
