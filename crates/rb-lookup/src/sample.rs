//! Small sample dataset for development and tests.

use std::collections::BTreeMap;

use rb_protocol::{Column, KeyNode, SysCode, SysSubsetEntry, Table};

use crate::dataset::{Dataset, PropertiesPair};

/// The complete sample bundle.
pub fn dataset() -> Dataset {
    Dataset {
        tables: tables(),
        syscodes: syscodes(),
        key_nodes: key_nodes(),
        properties: vec![properties()],
    }
}

pub fn tables() -> Vec<Table> {
    vec![
        Table {
            id: 0x083,
            name: "PORTFOLIO".into(),
            columns: vec![
                column("PORTFOLIO_ID", "NUMBER", Some(16), false),
                column("NAME", "VARCHAR2", Some(80), true),
                column("KUNDE_ID", "NUMBER", Some(16), false),
            ],
        },
        Table {
            id: 0x010,
            name: "KUNDE".into(),
            columns: vec![
                column("KUNDE_ID", "NUMBER", Some(16), false),
                column("NAME", "VARCHAR2", Some(120), true),
            ],
        },
        Table {
            id: 0x051,
            name: "SYSCODE".into(),
            columns: vec![
                column("SYSCODE_ID", "NUMBER", Some(16), false),
                column("NAME", "VARCHAR2", Some(60), false),
            ],
        },
        Table {
            id: 0x0a1,
            name: "ZUORD_PORTFOLIO_KUNDE".into(),
            columns: vec![
                column("PORTFOLIO_ID", "NUMBER", Some(16), false),
                column("KUNDE_ID", "NUMBER", Some(16), false),
            ],
        },
        Table {
            id: 0x0a2,
            name: "ZUORDNUNG".into(),
            columns: vec![column("ZUORDNUNG_ID", "NUMBER", Some(16), false)],
        },
    ]
}

pub fn syscodes() -> Vec<SysCode> {
    vec![
        SysCode {
            id: 0x1051000094000000,
            group_id: 0,
            code: "IP".into(),
            name: "C_InstParam".into(),
            german_short: "Instrumentparameter".into(),
            german_medium: String::new(),
            english_short: "Instrument parameter".into(),
            english_medium: String::new(),
            children: vec![0x10510000940000aa, 0x10510000940000ab],
            subset_entries: vec![],
        },
        SysCode {
            id: 0x10510000940000aa,
            group_id: 0x1051000094000000,
            code: "PV".into(),
            name: "C_InstParam_PseudoVerfall".into(),
            german_short: "Pseudoverfall".into(),
            german_medium: "Pseudoverfall des Instruments".into(),
            english_short: "Pseudo expiry".into(),
            english_medium: "Pseudo expiry of instrument".into(),
            children: vec![],
            subset_entries: vec![SysSubsetEntry {
                id: 0x1052000000000001,
                sort_number: 1,
                default_entry: true,
            }],
        },
        SysCode {
            id: 0x10510000940000ab,
            group_id: 0x1051000094000000,
            code: "V".into(),
            name: "C_InstParam_Verfall".into(),
            german_short: "Verfall".into(),
            german_medium: String::new(),
            english_short: "Expiry".into(),
            english_medium: String::new(),
            children: vec![],
            subset_entries: vec![],
        },
    ]
}

pub fn key_nodes() -> Vec<KeyNode> {
    vec![
        KeyNode {
            id: 1890,
            name: "INTEREST_RATE".into(),
            english: "Interest rate".into(),
            german: "Zinssatz".into(),
            parent: None,
            children: vec![1891],
        },
        KeyNode {
            id: 1891,
            name: "INTEREST".into(),
            english: "Interest".into(),
            german: "Zins".into(),
            parent: Some(1890),
            children: vec![],
        },
    ]
}

pub fn properties() -> PropertiesPair {
    let english: BTreeMap<String, String> = [
        ("label.interest", "Interest"),
        ("label.accrued", "Accrued interest"),
        ("label.portfolio", "Portfolio"),
        ("label.customer", "Customer"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    let german: BTreeMap<String, String> = [
        ("label.interest", "Zins"),
        ("label.accrued", "Marchzins"),
        ("label.portfolio", "Depot"),
        ("label.customer", "Kunde"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    PropertiesPair { english, german }
}

fn column(name: &str, data_type: &str, size: Option<u32>, nullable: bool) -> Column {
    Column {
        name: name.into(),
        data_type: data_type.into(),
        size,
        nullable,
    }
}
