//! Structured address fields, postal code parsing and the display composition.
//!
//! Field names follow the Brazilian form (`cep`, `logradouro`, ...) through serde
//! aliases, so payloads from either naming scheme deserialize.

use album_kernel::domain::constants::ADDRESS_NOT_INFORMED;
use fxhash::FxHashMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static RE_POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{5})-?([0-9]{3})$").expect("postal code pattern"));

/// A postal code normalized to `NNNNN-NNN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    /// Parses `NNNNNNNN` or `NNNNN-NNN` (surrounding whitespace ignored).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = RE_POSTAL_CODE.captures(raw.trim())?;
        Some(Self(format!("{}-{}", &caps[1], &caps[2])))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structured address as entered in the registration form.
///
/// Every field is optional; blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressFields {
    #[serde(alias = "cep", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(alias = "logradouro", skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(alias = "numero", skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(alias = "complemento", skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    #[serde(alias = "bairro", skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(alias = "cidade", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Two-letter state code, upper-cased on display.
    #[serde(alias = "uf", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl AddressFields {
    /// `true` when no field carries text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields().into_iter().all(|f| present(f).is_none())
    }

    /// Trims every field and drops blank ones.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let clean = |f: &Option<String>| present(f.as_deref()).map(str::to_owned);
        Self {
            postal_code: clean(&self.postal_code),
            street: clean(&self.street),
            number: clean(&self.number),
            complement: clean(&self.complement),
            district: clean(&self.district),
            city: clean(&self.city),
            region: clean(&self.region),
        }
    }

    /// Copies fields from `found` into the ones still blank here; entered values win.
    pub fn fill_missing(&mut self, found: Self) {
        let merge = |mine: &mut Option<String>, theirs: Option<String>| {
            if present(mine.as_deref()).is_none()
                && let Some(value) = theirs.filter(|v| !v.trim().is_empty())
            {
                *mine = Some(value);
            }
        };
        merge(&mut self.postal_code, found.postal_code);
        merge(&mut self.street, found.street);
        merge(&mut self.number, found.number);
        merge(&mut self.complement, found.complement);
        merge(&mut self.district, found.district);
        merge(&mut self.city, found.city);
        merge(&mut self.region, found.region);
    }

    /// Looks up the entered postal code and fills the blank fields from the result.
    ///
    /// Returns `true` when the lookup found an address.
    pub fn prefill(&mut self, lookup: &dyn AddressLookup) -> bool {
        let Some(code) = self.postal_code.as_deref().and_then(PostalCode::parse) else {
            return false;
        };
        match lookup.lookup(&code) {
            Some(found) => {
                self.postal_code = Some(code.0);
                self.fill_missing(found);
                true
            },
            None => false,
        }
    }

    /// Composes the multi-line display address, `None` when every field is blank.
    ///
    /// ```text
    /// street, number, complement
    /// district - city/UF
    /// CEP: 00000-000
    /// ```
    #[must_use]
    pub fn compose(&self) -> Option<String> {
        let first = [self.street.as_deref(), self.number.as_deref(), self.complement.as_deref()]
            .into_iter()
            .filter_map(present)
            .collect::<Vec<_>>()
            .join(", ");

        let region = present(self.region.as_deref()).map(str::to_uppercase);
        let locality = match (present(self.city.as_deref()), region.as_deref()) {
            (Some(city), Some(uf)) => Some(format!("{city}/{uf}")),
            (Some(city), None) => Some(city.to_owned()),
            (None, Some(uf)) => Some(uf.to_owned()),
            (None, None) => None,
        };
        let second = [present(self.district.as_deref()), locality.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" - ");

        let third = present(self.postal_code.as_deref())
            .map(|cep| format!("CEP: {cep}"))
            .unwrap_or_default();

        let lines =
            [first, second, third].into_iter().filter(|l| !l.is_empty()).collect::<Vec<_>>();
        (!lines.is_empty()).then(|| lines.join("\n"))
    }

    fn fields(&self) -> [Option<&str>; 7] {
        [
            self.postal_code.as_deref(),
            self.street.as_deref(),
            self.number.as_deref(),
            self.complement.as_deref(),
            self.district.as_deref(),
            self.city.as_deref(),
            self.region.as_deref(),
        ]
    }
}

/// Resolves the address shown for a member.
///
/// Structured fields win over the free text; with neither, the "not informed" marker is used.
#[must_use]
pub fn display_address(fields: Option<&AddressFields>, free_text: Option<&str>) -> String {
    fields
        .and_then(AddressFields::compose)
        .or_else(|| free_text.map(str::trim).filter(|t| !t.is_empty()).map(str::to_owned))
        .unwrap_or_else(|| ADDRESS_NOT_INFORMED.to_owned())
}

fn present(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|v| !v.is_empty())
}

/// Postal code lookup used to pre-fill the structured address.
pub trait AddressLookup: fmt::Debug + Send + Sync {
    fn lookup(&self, postal_code: &PostalCode) -> Option<AddressFields>;
}

/// In-memory lookup table keyed by postal code.
#[derive(Debug, Clone, Default)]
pub struct StaticAddressLookup {
    entries: FxHashMap<PostalCode, AddressFields>,
}

impl StaticAddressLookup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, builder style.
    #[must_use]
    pub fn with(mut self, postal_code: PostalCode, fields: AddressFields) -> Self {
        self.insert(postal_code, fields);
        self
    }

    /// Adds or replaces the address known for `postal_code`.
    pub fn insert(&mut self, postal_code: PostalCode, fields: AddressFields) {
        let mut fields = fields.normalized();
        fields.postal_code = Some(postal_code.0.clone());
        self.entries.insert(postal_code, fields);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl AddressLookup for StaticAddressLookup {
    fn lookup(&self, postal_code: &PostalCode) -> Option<AddressFields> {
        self.entries.get(postal_code).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(v: &str) -> Option<String> {
        Some(v.to_owned())
    }

    #[test]
    fn postal_code_is_normalized() {
        assert_eq!(PostalCode::parse("27000000").map(|c| c.0), Some("27000-000".to_owned()));
        assert_eq!(PostalCode::parse(" 27000-000 ").map(|c| c.0), Some("27000-000".to_owned()));
        assert!(PostalCode::parse("2700-0000").is_none());
        assert!(PostalCode::parse("27000-00a").is_none());
        assert!(PostalCode::parse("").is_none());
        assert!(PostalCode::parse("27000--000").is_none());
        assert!(PostalCode::parse("270000000").is_none());
        assert!(PostalCode::parse("٢٧٠٠٠٠٠٠").is_none());
    }

    #[test]
    fn compose_full_address() {
        let fields = AddressFields {
            street: field("Rua X"),
            number: field("10"),
            district: field("Centro"),
            city: field("VR"),
            region: field("rj"),
            postal_code: field("27000-000"),
            ..AddressFields::default()
        };
        assert_eq!(fields.compose().as_deref(), Some("Rua X, 10\nCentro - VR/RJ\nCEP: 27000-000"));
    }

    #[test]
    fn compose_skips_absent_pieces() {
        let fields = AddressFields {
            street: field("Rua X"),
            complement: field("apto 2"),
            city: field("Volta Redonda"),
            number: field("   "),
            ..AddressFields::default()
        };
        assert_eq!(fields.compose().as_deref(), Some("Rua X, apto 2\nVolta Redonda"));

        let only_region = AddressFields { region: field("sp"), ..AddressFields::default() };
        assert_eq!(only_region.compose().as_deref(), Some("SP"));
    }

    #[test]
    fn display_falls_back_to_free_text_then_marker() {
        let blank = AddressFields { street: field(" "), ..AddressFields::default() };
        assert!(blank.is_empty());
        assert_eq!(display_address(Some(&blank), Some(" Rua Y, 5 ")), "Rua Y, 5");
        assert_eq!(display_address(None, Some("  ")), ADDRESS_NOT_INFORMED);
        assert_eq!(display_address(None, None), ADDRESS_NOT_INFORMED);
    }

    #[test]
    fn fill_missing_keeps_entered_values() {
        let mut entered = AddressFields {
            number: field("42"),
            street: field("Minha Rua"),
            ..AddressFields::default()
        };
        entered.fill_missing(AddressFields {
            street: field("Rua Oficial"),
            district: field("Centro"),
            city: field("Volta Redonda"),
            region: field("RJ"),
            ..AddressFields::default()
        });

        assert_eq!(entered.street.as_deref(), Some("Minha Rua"));
        assert_eq!(entered.number.as_deref(), Some("42"));
        assert_eq!(entered.district.as_deref(), Some("Centro"));
        assert_eq!(entered.city.as_deref(), Some("Volta Redonda"));
    }

    #[test]
    fn prefill_uses_lookup() {
        let code = PostalCode::parse("27213-000").expect("valid code");
        let lookup = StaticAddressLookup::new().with(
            code,
            AddressFields {
                street: field("Rua Trinta e Três"),
                city: field("Volta Redonda"),
                ..AddressFields::default()
            },
        );

        let mut fields = AddressFields { postal_code: field("27213000"), ..AddressFields::default() };
        assert!(fields.prefill(&lookup));
        assert_eq!(fields.postal_code.as_deref(), Some("27213-000"));
        assert_eq!(fields.street.as_deref(), Some("Rua Trinta e Três"));

        let mut unknown =
            AddressFields { postal_code: field("99999-999"), ..AddressFields::default() };
        assert!(!unknown.prefill(&lookup));
        assert!(unknown.street.is_none());
    }

    #[test]
    fn deserializes_brazilian_field_names() {
        let fields: AddressFields = serde_json::from_value(serde_json::json!({
            "cep": "27000-000",
            "logradouro": "Rua X",
            "uf": "rj"
        }))
        .expect("aliases");
        assert_eq!(fields.street.as_deref(), Some("Rua X"));
        assert_eq!(fields.region.as_deref(), Some("rj"));
    }
}
