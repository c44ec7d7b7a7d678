//! Freeform resolution: what to say when no command matched.
//!
//! Every strategy runs, in a fixed order, and each contributes whatever it
//! finds. None of them reports a miss, so text that matches nothing produces
//! no replies at all.

use crate::codec::{CLASS_PART_HEX_LEN, IDENTIFIER_HEX_LEN, parse_identifier};
use crate::numbase::NumberBase;
use crate::respond::{OnMiss, Responder};

/// Run all freeform strategies against `text`.
pub fn resolve(responder: &mut Responder<'_>, text: &str) {
    let text = text.trim();

    // ── identifiers ─────────────────────────────────────────────

    if let Some(id) = parse_identifier(text, IDENTIFIER_HEX_LEN) {
        tracing::debug!(id = %id.hex, "freeform identifier");
        responder.identifier(&id, OnMiss::Silent);
        responder.sys_code_by_id(id.value, OnMiss::Silent);
    }

    if parse_identifier(text, CLASS_PART_HEX_LEN).is_some() {
        responder.class_part(text, OnMiss::Silent);
    }

    // ── numbers ─────────────────────────────────────────────────

    if let Some(token) = text.split_whitespace().next() {
        let bases: &[NumberBase] = if token.starts_with(NumberBase::Hex.prefix()) {
            &[NumberBase::Hex]
        } else if token.starts_with(NumberBase::Binary.prefix()) {
            &[NumberBase::Binary]
        } else {
            &NumberBase::ALL
        };
        for base in bases {
            responder.number(token, *base, OnMiss::Silent);
        }
    }

    // ── names ───────────────────────────────────────────────────

    responder.sys_code_text(text, OnMiss::Silent);

    if !responder.table(text, OnMiss::Silent) {
        responder.table_names(text, OnMiss::Silent);
    }

    responder.translations(text, OnMiss::Silent);
}
