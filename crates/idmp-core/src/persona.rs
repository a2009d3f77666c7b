//! Persona types — the attribute bag one patron record arrives as.
//!
//! Field names follow the IDMPersonas schema (camelCase on the wire).
//! Unrecognized input fields are accepted and ignored; at the Rust API
//! level the struct is closed.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

// ─── Field limits ────────────────────────────────────────────────────────────

/// Maximum length of `givenName` / `familyName`.
pub const MAX_NAME_LEN: usize = 50;
/// Maximum length of a single phone number.
pub const MAX_PHONE_LEN: usize = 50;
/// Maximum length of `postalCode`.
pub const MAX_POSTAL_CODE_LEN: usize = 20;

// ─── Expiry ──────────────────────────────────────────────────────────────────

/// An account expiration — a full date-time, or a bare calendar date that
/// stands for midnight on that date.
///
/// Timezone-naive throughout; no offset is attached or implied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expiry {
  DateTime(NaiveDateTime),
  Date(NaiveDate),
}

impl Expiry {
  /// The expiry as a combined date-time, date-only values at midnight.
  pub fn to_datetime(self) -> NaiveDateTime {
    match self {
      Self::DateTime(dt) => dt,
      Self::Date(d) => d.and_time(NaiveTime::MIN),
    }
  }
}

// ─── Address ─────────────────────────────────────────────────────────────────

/// One postal address. `street_address_line1` is the only required line;
/// the rest are emitted only when supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
  pub street_address_line1: String,
  pub street_address_line2: Option<String>,
  pub city_or_locality:     Option<String>,
  pub state_or_province:    Option<String>,
  pub postal_code:          Option<String>,
  pub country:              Option<String>,
}

// ─── Persona ─────────────────────────────────────────────────────────────────

/// The attribute bag for one patron.
///
/// `barcode`, `borrower_category`, and `home_branch` are mandatory for WMS
/// Circulation rather than the schema itself. The optional fields have
/// combination rules — see [`crate::validate::validate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
  pub institution_id:    String,
  pub barcode:           String,
  pub borrower_category: String,
  pub home_branch:       String,

  /// Correlation mode A: an identifier in an institutional source system.
  pub id_at_source:   Option<String>,
  /// Required whenever `id_at_source` is set.
  pub source_system:  Option<String>,
  /// Correlation mode B: an existing OCLC account name.
  pub oclc_user_name: Option<String>,

  pub given_name:  Option<String>,
  pub family_name: Option<String>,

  /// The first entry is the primary email address.
  pub email_addresses: Option<Vec<String>>,
  pub phone_numbers:   Option<Vec<String>>,

  // Flat fields of the primary postal address.
  pub street_address_line1: Option<String>,
  pub street_address_line2: Option<String>,
  pub city_or_locality:     Option<String>,
  pub state_or_province:    Option<String>,
  pub postal_code:          Option<String>,
  pub country:              Option<String>,

  /// Further addresses beyond the flat primary one, each rendered as its
  /// own contact block.
  pub additional_addresses: Option<Vec<Address>>,

  pub note:   Option<String>,
  pub expiry: Option<Expiry>,
}

impl Persona {
  /// The flat address fields assembled as an [`Address`], if a primary
  /// address was supplied at all (`street_address_line1` is the trigger).
  pub fn primary_address(&self) -> Option<Address> {
    self.street_address_line1.as_ref().map(|line1| Address {
      street_address_line1: line1.clone(),
      street_address_line2: self.street_address_line2.clone(),
      city_or_locality:     self.city_or_locality.clone(),
      state_or_province:    self.state_or_province.clone(),
      postal_code:          self.postal_code.clone(),
      country:              self.country.clone(),
    })
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
