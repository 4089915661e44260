use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{CellValue, ClientId, MissingColumns};

/// The six case-management export tables the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TableName {
    Client,
    Ahpscreening,
    Goalshortterm,
    Ahpdischarge,
    Interaction,
    InteractionReferral,
}

impl TableName {
    pub const ALL: [TableName; 6] = [
        TableName::Client,
        TableName::Ahpscreening,
        TableName::Goalshortterm,
        TableName::Ahpdischarge,
        TableName::Interaction,
        TableName::InteractionReferral,
    ];

    /// Sheet name used by the export workbook.
    pub fn sheet_name(self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Ahpscreening => "Ahpscreening",
            Self::Goalshortterm => "Goalshortterm",
            Self::Ahpdischarge => "Ahpdischarge",
            Self::Interaction => "Interaction",
            Self::InteractionReferral => "Interaction_referral",
        }
    }

    /// Case-insensitive lookup by sheet name.
    pub fn from_sheet_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        Self::ALL
            .into_iter()
            .find(|table| table.sheet_name().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

/// An immutable, column-addressed table of tagged cells.
///
/// Accessors hand out private copies of the values they coerce, so one
/// computation can never change what another sees.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// A table with no columns and no rows, standing in for an absent sheet.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Builds a table from column names and row cells in one step.
    pub fn from_rows<C, R>(name: impl Into<String>, columns: &[C], rows: R) -> Self
    where
        C: AsRef<str>,
        R: IntoIterator<Item = Vec<CellValue>>,
    {
        let mut table = Self::new(
            name,
            columns.iter().map(|c| c.as_ref().to_string()).collect(),
        );
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Appends a row, padding with `Null` or truncating to the column count.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Null);
        self.rows.push(row);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Checks that every named column exists.
    pub fn require(&self, columns: &[&str]) -> Result<(), MissingColumns> {
        let missing: Vec<String> = columns
            .iter()
            .filter(|column| !self.has_column(column))
            .map(|column| (*column).to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MissingColumns {
                table: self.name.clone(),
                columns: missing,
            })
        }
    }

    /// Raw cells of a column in row order.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &CellValue> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|cells| &cells[idx])
    }

    /// String form of every cell in a column.
    pub fn texts(&self, name: &str) -> Option<Vec<Option<String>>> {
        Some(
            self.column(name)?
                .map(|cell| cell.as_text().map(|text| text.into_owned()))
                .collect(),
        )
    }

    /// Parse-or-null timestamp view of a column.
    pub fn timestamps(&self, name: &str) -> Option<Vec<Option<NaiveDateTime>>> {
        Some(self.column(name)?.map(CellValue::to_timestamp).collect())
    }

    /// Client identifier view of a column; blank cells map to `None`.
    pub fn client_ids(&self, name: &str) -> Option<Vec<Option<ClientId>>> {
        Some(self.column(name)?.map(ClientId::from_cell).collect())
    }
}

/// The engine's input mapping: one table per export sheet.
///
/// Sheets that were not loaded answer an empty table, which every metric
/// treats as missing its required columns.
#[derive(Debug, Clone)]
pub struct Tables {
    client: Table,
    ahpscreening: Table,
    goalshortterm: Table,
    ahpdischarge: Table,
    interaction: Table,
    interaction_referral: Table,
    loaded: BTreeSet<TableName>,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            client: Table::empty(TableName::Client.sheet_name()),
            ahpscreening: Table::empty(TableName::Ahpscreening.sheet_name()),
            goalshortterm: Table::empty(TableName::Goalshortterm.sheet_name()),
            ahpdischarge: Table::empty(TableName::Ahpdischarge.sheet_name()),
            interaction: Table::empty(TableName::Interaction.sheet_name()),
            interaction_referral: Table::empty(TableName::InteractionReferral.sheet_name()),
            loaded: BTreeSet::new(),
        }
    }
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: TableName, table: Table) {
        *self.slot_mut(name) = table;
        self.loaded.insert(name);
    }

    #[must_use]
    pub fn with_table(mut self, name: TableName, table: Table) -> Self {
        self.insert(name, table);
        self
    }

    pub fn get(&self, name: TableName) -> &Table {
        match name {
            TableName::Client => &self.client,
            TableName::Ahpscreening => &self.ahpscreening,
            TableName::Goalshortterm => &self.goalshortterm,
            TableName::Ahpdischarge => &self.ahpdischarge,
            TableName::Interaction => &self.interaction,
            TableName::InteractionReferral => &self.interaction_referral,
        }
    }

    pub fn is_loaded(&self, name: TableName) -> bool {
        self.loaded.contains(&name)
    }

    /// Names of the sheets that were supplied, in declaration order.
    pub fn loaded(&self) -> impl Iterator<Item = TableName> + '_ {
        self.loaded.iter().copied()
    }

    /// Total row count across all loaded tables.
    pub fn total_rows(&self) -> usize {
        TableName::ALL
            .into_iter()
            .map(|name| self.get(name).height())
            .sum()
    }

    fn slot_mut(&mut self, name: TableName) -> &mut Table {
        match name {
            TableName::Client => &mut self.client,
            TableName::Ahpscreening => &mut self.ahpscreening,
            TableName::Goalshortterm => &mut self.goalshortterm,
            TableName::Ahpdischarge => &mut self.ahpdischarge,
            TableName::Interaction => &mut self.interaction,
            TableName::InteractionReferral => &mut self.interaction_referral,
        }
    }
}
