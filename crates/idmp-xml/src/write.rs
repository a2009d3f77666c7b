//! Personas document generation.
//!
//! Uses `quick-xml`'s writer API throughout. Element order within a
//! persona follows the IDMPersonas-2.2 sequence: correlation, user name,
//! expiration, name, circulation info, contact blocks, note.

use std::io::Cursor;

use idmp_core::{
  Result,
  persona::{Address, Persona},
  validate::validate,
};
use quick_xml::{
  Writer,
  events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

// ─── Namespaces ──────────────────────────────────────────────────────────────

/// The IDMPersonas schema namespace.
pub const NS_PERSONAS: &str = "http://worldcat.org/xmlschemas/IDMPersonas-2.2";
/// The XML Schema instance namespace.
pub const NS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// The `xsi:schemaLocation` pair carried on the root element.
pub const SCHEMA_LOCATION: &str =
  "http://worldcat.org/xmlschemas/IDMPersonas-2.2 IDMPersonas-2.2.xsd";

// ─── Document builder ────────────────────────────────────────────────────────

/// Accumulates an `oclcPersonas` document, one persona at a time.
///
/// Appends are independent and all-or-nothing; batch policy (abort vs.
/// skip on a bad record) belongs to the caller.
pub struct PersonasBuilder {
  writer: Writer<Cursor<Vec<u8>>>,
}

impl Default for PersonasBuilder {
  fn default() -> Self { Self::new() }
}

impl PersonasBuilder {
  /// Start an empty document: the XML declaration plus the
  /// namespace-qualified `oclcPersonas` root start tag.
  pub fn new() -> Self {
    let cursor = Cursor::new(Vec::new());
    let mut writer = Writer::new(cursor);

    writer
      .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
      .unwrap();

    let mut root = BytesStart::new("oclcPersonas");
    root.push_attribute(("xmlns", NS_PERSONAS));
    root.push_attribute(("xmlns:xsi", NS_XSI));
    root.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
    writer.write_event(Event::Start(root)).unwrap();

    Self { writer }
  }

  /// Validate `persona` and append it as one `persona` child of the root.
  ///
  /// Validation completes before the first event is written; on `Err` the
  /// document is byte-identical to its state before the call.
  pub fn append(&mut self, persona: &Persona) -> Result<()> {
    validate(persona)?;
    write_persona(&mut self.writer, persona);
    Ok(())
  }

  /// Close the root element and return the document as UTF-8 bytes.
  pub fn finish(mut self) -> Vec<u8> {
    self
      .writer
      .write_event(Event::End(BytesEnd::new("oclcPersonas")))
      .unwrap();
    self.writer.into_inner().into_inner()
  }
}

/// Render one `persona` element on its own, without a surrounding document.
///
/// Same validation and byte output as [`PersonasBuilder::append`]; callers
/// that manage their own document can splice the fragment in.
pub fn persona_fragment(persona: &Persona) -> Result<Vec<u8>> {
  validate(persona)?;
  let mut writer = Writer::new(Cursor::new(Vec::new()));
  write_persona(&mut writer, persona);
  Ok(writer.into_inner().into_inner())
}

// ─── Persona element ─────────────────────────────────────────────────────────

/// Write one persona. The record must already have passed [`validate`].
fn write_persona(w: &mut Writer<Cursor<Vec<u8>>>, persona: &Persona) {
  let mut start = BytesStart::new("persona");
  start.push_attribute(("institutionId", persona.institution_id.as_str()));
  w.write_event(Event::Start(start)).unwrap();

  // Validation guarantees sourceSystem whenever idAtSource is set.
  if let (Some(source_system), Some(id_at_source)) =
    (&persona.source_system, &persona.id_at_source)
  {
    write_start(w, "correlationInfo");
    write_text_elem(w, "sourceSystem", source_system);
    write_text_elem(w, "idAtSource", id_at_source);
    write_end(w, "correlationInfo");
  }

  if let Some(user_name) = &persona.oclc_user_name {
    write_text_elem(w, "oclcUserName", user_name);
  }

  if let Some(expiry) = persona.expiry {
    let stamp = expiry.to_datetime().format("%Y-%m-%dT%H:%M:%S").to_string();
    write_text_elem(w, "oclcExpirationDate", &stamp);
  }

  write_start(w, "nameInfo");
  if let Some(given) = &persona.given_name {
    write_text_elem(w, "givenName", given);
  }
  if let Some(family) = &persona.family_name {
    write_text_elem(w, "familyName", family);
  }
  write_end(w, "nameInfo");

  write_start(w, "wmsCircPatronInfo");
  write_text_elem(w, "barcode", &persona.barcode);
  write_text_elem(w, "borrowerCategory", &persona.borrower_category);
  write_text_elem(w, "homeBranch", &persona.home_branch);
  write_end(w, "wmsCircPatronInfo");

  // One contactInfo sibling per contact method.
  for (i, address) in persona.email_addresses.iter().flatten().enumerate() {
    write_start(w, "contactInfo");
    write_start(w, "email");
    write_text_elem(w, "emailAddress", address);
    write_text_elem(w, "isPrimary", if i == 0 { "true" } else { "false" });
    write_end(w, "email");
    write_end(w, "contactInfo");
  }

  for number in persona.phone_numbers.iter().flatten() {
    write_start(w, "contactInfo");
    write_start(w, "phone");
    write_text_elem(w, "number", number);
    write_end(w, "phone");
    write_end(w, "contactInfo");
  }

  if let Some(address) = persona.primary_address() {
    write_postal_address(w, &address);
  }
  for address in persona.additional_addresses.iter().flatten() {
    write_postal_address(w, address);
  }

  if let Some(note) = &persona.note {
    write_start(w, "note");
    write_text_elem(w, "text", note);
    write_end(w, "note");
  }

  write_end(w, "persona");
}

/// One `contactInfo`/`postalAddress` block; optional lines only when
/// supplied, in schema order.
fn write_postal_address(w: &mut Writer<Cursor<Vec<u8>>>, address: &Address) {
  write_start(w, "contactInfo");
  write_start(w, "postalAddress");
  write_text_elem(w, "streetAddressLine1", &address.street_address_line1);
  if let Some(line2) = &address.street_address_line2 {
    write_text_elem(w, "streetAddressLine2", line2);
  }
  if let Some(city) = &address.city_or_locality {
    write_text_elem(w, "cityOrLocality", city);
  }
  if let Some(state) = &address.state_or_province {
    write_text_elem(w, "stateOrProvince", state);
  }
  if let Some(code) = &address.postal_code {
    write_text_elem(w, "postalCode", code);
  }
  if let Some(country) = &address.country {
    write_text_elem(w, "country", country);
  }
  write_end(w, "postalAddress");
  write_end(w, "contactInfo");
}

// ─── XML writer helpers ──────────────────────────────────────────────────────

fn write_start(w: &mut Writer<Cursor<Vec<u8>>>, tag: &str) {
  w.write_event(Event::Start(BytesStart::new(tag))).unwrap();
}

fn write_end(w: &mut Writer<Cursor<Vec<u8>>>, tag: &str) {
  w.write_event(Event::End(BytesEnd::new(tag))).unwrap();
}

fn write_text_elem(w: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) {
  write_start(w, tag);
  w.write_event(Event::Text(BytesText::new(text))).unwrap();
  write_end(w, tag);
}

// ─── Tests ───────────────────────────────────────────────────────────────────
