//! Invariant checks for a [`Persona`], run in full before any XML is
//! emitted.
//!
//! Checks run in a fixed order and the first violation wins. The
//! correlation rule is the looser of the two known variants: `sourceSystem`
//! is required whenever `idAtSource` is present, `oclcUserName` may coexist
//! with the pair, and a record carrying neither mode is accepted.

use crate::{
  error::{Error, Result},
  persona::{
    Address, MAX_NAME_LEN, MAX_PHONE_LEN, MAX_POSTAL_CODE_LEN, Persona,
  },
};

/// Validate one persona record.
///
/// In order: name presence, contact-field presence, contact-entry minimum,
/// length caps, correlation rule.
pub fn validate(persona: &Persona) -> Result<()> {
  if !(non_empty(&persona.given_name) || non_empty(&persona.family_name)) {
    return Err(Error::MissingName);
  }

  // Presence first, then a stricter pass that rejects supplied-but-empty
  // lists with its own message.
  if persona.email_addresses.is_none()
    && persona.phone_numbers.is_none()
    && persona.street_address_line1.is_none()
  {
    return Err(Error::NoContactMethod);
  }

  let has_email = persona
    .email_addresses
    .as_ref()
    .is_some_and(|e| !e.is_empty());
  let has_phone = persona
    .phone_numbers
    .as_ref()
    .is_some_and(|p| !p.is_empty());
  if !(has_email || has_phone || persona.street_address_line1.is_some()) {
    return Err(Error::EmptyContactMethod);
  }

  if let Some(code) = &persona.postal_code {
    check_len("postalCode", MAX_POSTAL_CODE_LEN, code)?;
  }
  if let Some(name) = &persona.given_name {
    check_len("givenName", MAX_NAME_LEN, name)?;
  }
  if let Some(name) = &persona.family_name {
    check_len("familyName", MAX_NAME_LEN, name)?;
  }
  for number in persona.phone_numbers.iter().flatten() {
    check_len("phone number", MAX_PHONE_LEN, number)?;
  }
  for address in persona.additional_addresses.iter().flatten() {
    validate_address(address)?;
  }

  if let Some(id) = &persona.id_at_source
    && persona.source_system.is_none()
  {
    return Err(Error::MissingSourceSystem {
      id_at_source: id.clone(),
    });
  }

  Ok(())
}

/// Per-address checks, applied to each `additionalAddresses` entry.
pub fn validate_address(address: &Address) -> Result<()> {
  if let Some(code) = &address.postal_code {
    check_len("postalCode", MAX_POSTAL_CODE_LEN, code)?;
  }
  Ok(())
}

fn non_empty(value: &Option<String>) -> bool {
  value.as_deref().is_some_and(|s| !s.is_empty())
}

fn check_len(field: &'static str, max: usize, value: &str) -> Result<()> {
  if value.chars().count() > max {
    return Err(Error::TooLong {
      field,
      max,
      value: value.to_string(),
    });
  }
  Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  /// A record that passes every check; tests break one rule at a time.
  fn base_record() -> Persona {
    Persona {
      institution_id: "1234567".to_string(),
      barcode: "123456789".to_string(),
      borrower_category: "P".to_string(),
      home_branch: "mainBranch".to_string(),
      oclc_user_name: Some("123456789".to_string()),
      given_name: Some("Linus".to_string()),
      family_name: Some("Torvalds".to_string()),
      email_addresses: Some(vec!["linus@example.tld".to_string()]),
      ..Default::default()
    }
  }

  // ── Name presence ───────────────────────────────────────────────────────────

  #[test]
  fn missing_both_names_is_rejected() {
    let record = Persona {
      given_name: None,
      family_name: None,
      ..base_record()
    };
    assert!(matches!(validate(&record), Err(Error::MissingName)));
  }

  #[test]
  fn empty_string_names_do_not_count() {
    let record = Persona {
      given_name: Some(String::new()),
      family_name: None,
      ..base_record()
    };
    assert!(matches!(validate(&record), Err(Error::MissingName)));
  }

  #[test]
  fn one_name_is_enough() {
    let record = Persona {
      given_name: None,
      ..base_record()
    };
    assert!(validate(&record).is_ok());
  }

  // ── Contact minimum ─────────────────────────────────────────────────────────

  #[test]
  fn no_contact_fields_is_rejected() {
    let record = Persona {
      email_addresses: None,
      phone_numbers: None,
      street_address_line1: None,
      ..base_record()
    };
    assert!(matches!(validate(&record), Err(Error::NoContactMethod)));
  }

  #[test]
  fn empty_contact_lists_are_rejected() {
    let record = Persona {
      email_addresses: Some(vec![]),
      phone_numbers: Some(vec![]),
      street_address_line1: None,
      ..base_record()
    };
    assert!(matches!(validate(&record), Err(Error::EmptyContactMethod)));
  }

  #[test]
  fn street_address_alone_is_enough() {
    let record = Persona {
      email_addresses: None,
      street_address_line1: Some("123 example bay".to_string()),
      ..base_record()
    };
    assert!(validate(&record).is_ok());
  }

  // ── Length caps ─────────────────────────────────────────────────────────────

  #[test]
  fn long_postal_code_is_rejected() {
    let record = Persona {
      street_address_line1: Some("123 example bay".to_string()),
      postal_code: Some("9".repeat(21)),
      ..base_record()
    };
    match validate(&record) {
      Err(Error::TooLong { field, max, .. }) => {
        assert_eq!(field, "postalCode");
        assert_eq!(max, 20);
      }
      other => panic!("expected TooLong, got {other:?}"),
    }
  }

  #[test]
  fn postal_code_at_cap_is_accepted() {
    let record = Persona {
      street_address_line1: Some("123 example bay".to_string()),
      postal_code: Some("9".repeat(20)),
      ..base_record()
    };
    assert!(validate(&record).is_ok());
  }

  #[test]
  fn long_given_name_is_rejected() {
    let record = Persona {
      given_name: Some("x".repeat(51)),
      ..base_record()
    };
    assert!(matches!(
      validate(&record),
      Err(Error::TooLong { field: "givenName", .. })
    ));
  }

  #[test]
  fn long_family_name_is_rejected() {
    let record = Persona {
      family_name: Some("x".repeat(51)),
      ..base_record()
    };
    assert!(matches!(
      validate(&record),
      Err(Error::TooLong { field: "familyName", .. })
    ));
  }

  #[test]
  fn long_phone_number_is_rejected() {
    let record = Persona {
      phone_numbers: Some(vec!["+1".to_string(), "5".repeat(51)]),
      ..base_record()
    };
    assert!(matches!(
      validate(&record),
      Err(Error::TooLong { field: "phone number", .. })
    ));
  }

  #[test]
  fn additional_address_postal_code_is_checked() {
    let record = Persona {
      additional_addresses: Some(vec![Address {
        street_address_line1: "B".to_string(),
        postal_code: Some("9".repeat(21)),
        ..Default::default()
      }]),
      ..base_record()
    };
    assert!(matches!(
      validate(&record),
      Err(Error::TooLong { field: "postalCode", .. })
    ));
  }

  // ── Correlation rule ────────────────────────────────────────────────────────

  #[test]
  fn id_at_source_without_source_system_is_rejected() {
    let record = Persona {
      oclc_user_name: None,
      id_at_source: Some("torvalds-l".to_string()),
      source_system: None,
      ..base_record()
    };
    let err = validate(&record).unwrap_err();
    assert!(
      err.to_string().contains("sourceSystem"),
      "message should name sourceSystem: {err}"
    );
  }

  #[test]
  fn id_at_source_with_source_system_is_accepted() {
    let record = Persona {
      oclc_user_name: None,
      id_at_source: Some("torvalds-l".to_string()),
      source_system: Some("LDAP".to_string()),
      ..base_record()
    };
    assert!(validate(&record).is_ok());
  }

  #[test]
  fn both_correlation_modes_may_coexist() {
    let record = Persona {
      id_at_source: Some("torvalds-l".to_string()),
      source_system: Some("LDAP".to_string()),
      ..base_record()
    };
    assert!(validate(&record).is_ok());
  }

  #[test]
  fn neither_correlation_mode_is_accepted() {
    let record = Persona {
      oclc_user_name: None,
      ..base_record()
    };
    assert!(validate(&record).is_ok());
  }
}
