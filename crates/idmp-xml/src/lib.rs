//! IDMPersonas-2.2 document generation.
//!
//! Validates each record via [`idmp_core::validate`] and renders it with
//! `quick-xml`'s writer API. Pure synchronous; the document accumulates in
//! an in-memory buffer handed back from [`PersonasBuilder::finish`], and
//! writing it to a file or stream is the caller's business.
//!
//! # Quick start
//!
//! ```no_run
//! use idmp_core::persona::Persona;
//! use idmp_xml::PersonasBuilder;
//!
//! let record = Persona {
//!   institution_id:    "1234567".into(),
//!   barcode:           "123456789".into(),
//!   borrower_category: "P".into(),
//!   home_branch:       "mainBranch".into(),
//!   oclc_user_name:    Some("jdoe".into()),
//!   family_name:       Some("Doe".into()),
//!   email_addresses:   Some(vec!["jdoe@example.tld".into()]),
//!   ..Default::default()
//! };
//!
//! let mut doc = PersonasBuilder::new();
//! doc.append(&record).unwrap();
//! let bytes = doc.finish();
//! ```

mod write;

pub use write::{
  NS_PERSONAS, NS_XSI, PersonasBuilder, SCHEMA_LOCATION, persona_fragment,
};
