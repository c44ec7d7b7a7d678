//! Reference entities served by the lookup services.

use serde::{Deserialize, Serialize};

// ── SysCode ─────────────────────────────────────────────────────

/// A coded enumeration value with bilingual labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysCode {
    /// 64-bit identifier (16 hex digits).
    pub id: u64,
    /// Identifier of the syscode group this value belongs to.
    #[serde(default)]
    pub group_id: u64,
    /// Short code as stored in the database.
    #[serde(default)]
    pub code: String,
    /// Symbolic name, e.g. `C_InstParam_PseudoVerfall`.
    pub name: String,
    #[serde(default)]
    pub german_short: String,
    #[serde(default)]
    pub german_medium: String,
    #[serde(default)]
    pub english_short: String,
    #[serde(default)]
    pub english_medium: String,
    /// Ids of child syscodes.
    #[serde(default)]
    pub children: Vec<u64>,
    #[serde(default)]
    pub subset_entries: Vec<SysSubsetEntry>,
}

/// Membership of a syscode in a subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysSubsetEntry {
    pub id: u64,
    pub sort_number: i32,
    #[serde(default)]
    pub default_entry: bool,
}

// ── Table ───────────────────────────────────────────────────────

/// A database table from the schema definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Small integer table id; `id | 0x1000` is the table's classpart.
    pub id: u16,
    /// Upper-case table name.
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

/// A column of a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

fn default_nullable() -> bool {
    true
}

impl Table {
    /// Fixed-width text dump, one line per column under a header.
    pub fn dump(&self) -> String {
        let name_width = self
            .columns
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0)
            .max("COLUMN".len());
        let type_width = self
            .columns
            .iter()
            .map(|c| c.data_type.len())
            .max()
            .unwrap_or(0)
            .max("TYPE".len());

        let mut out = format!("TABLE {} (id {})\n\n", self.name, self.id);
        out.push_str(&format!(
            "{:<name_width$}  {:<type_width$}  {:>6}  NULL\n",
            "COLUMN", "TYPE", "SIZE"
        ));
        for column in &self.columns {
            let size = column.size.map(|s| s.to_string()).unwrap_or_default();
            let nullable = if column.nullable { "Y" } else { "N" };
            out.push_str(&format!(
                "{:<name_width$}  {:<type_width$}  {:>6}  {}\n",
                column.name, column.data_type, size, nullable
            ));
        }
        out
    }
}

// ── KeyNode ─────────────────────────────────────────────────────

/// A node in the key-migration hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyNode {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub english: String,
    #[serde(default)]
    pub german: String,
    #[serde(default)]
    pub parent: Option<i32>,
    #[serde(default)]
    pub children: Vec<i32>,
}
