use thiserror::Error;

use crate::config::TableConfig;

use super::loader::LoadError;
use super::model::{Cell, Table};

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

/// Keep rows flagged for plotting that belong to the target method, then drop
/// the flag column.
///
/// A row passes when:
/// * its plot flag equals `include_value`, and
/// * `target_method` is unset, or its method equals `target_method`.
///
/// Zero surviving rows is not an error.
pub fn filter_rows(mut table: Table, cfg: &TableConfig) -> Result<Table, LoadError> {
    let plot = column(&table, &cfg.plot_column)?;
    let method = column(&table, &cfg.method_column)?;

    let before = table.len();
    table.rows.retain(|row| {
        let flagged = row[plot].as_str() == Some(cfg.include_value.as_str());
        let method_ok = match &cfg.target_method {
            Some(target) => row[method].as_str() == Some(target.as_str()),
            None => true,
        };
        flagged && method_ok
    });
    table.remove_column(plot);

    log::info!("Filter kept {} of {} rows", table.len(), before);
    Ok(table)
}

fn column(table: &Table, name: &str) -> Result<usize, LoadError> {
    table
        .column_index(name)
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

// ---------------------------------------------------------------------------
// Group key
// ---------------------------------------------------------------------------

/// Identity of one reaction pathway. Field order is the sort order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GroupKey {
    pub index: Cell,
    pub category: Cell,
    pub method: Cell,
    pub solvent: Cell,
    pub additive: Cell,
}

/// A group key could not be formed for a row.
#[derive(Debug, Error)]
#[error("row {row}: key column '{column}' is empty")]
pub struct SchemaError {
    pub row: usize,
    pub column: String,
}

/// One filtered row, keyed for grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedRow {
    pub key: GroupKey,
    pub molecule: Cell,
    /// Row position in the filtered table; preserves source order.
    pub row: usize,
    pub energy: Cell,
}

/// Column positions of the key fields in a filtered table.
struct KeyColumns {
    index: usize,
    category: usize,
    method: usize,
    solvent: usize,
    additive: usize,
    molecule: usize,
    energy: usize,
}

impl KeyColumns {
    fn resolve(table: &Table, cfg: &TableConfig) -> Result<Self, LoadError> {
        Ok(Self {
            index: column(table, &cfg.index_column)?,
            category: column(table, &cfg.category_column)?,
            method: column(table, &cfg.method_column)?,
            solvent: column(table, &cfg.solvent_column)?,
            additive: column(table, &cfg.additive_column)?,
            molecule: column(table, &cfg.molecule_column)?,
            energy: column(table, &cfg.energy_column)?,
        })
    }

    fn key(&self, row_no: usize, row: &[Cell], table: &Table) -> Result<GroupKey, SchemaError> {
        for col in [self.index, self.category, self.method, self.solvent, self.additive] {
            if row[col].is_missing() {
                return Err(SchemaError {
                    row: row_no,
                    column: table.headers[col].clone(),
                });
            }
        }
        Ok(GroupKey {
            index: row[self.index].clone(),
            category: row[self.category].clone(),
            method: row[self.method].clone(),
            solvent: row[self.solvent].clone(),
            additive: row[self.additive].clone(),
        })
    }
}

/// Key every row by (index, category, method, solvent, additive) plus the
/// molecule. Rows whose key cannot be formed are logged and dropped.
pub fn index_rows(table: &Table, cfg: &TableConfig) -> Result<Vec<KeyedRow>, LoadError> {
    let cols = KeyColumns::resolve(table, cfg)?;

    let mut keyed = Vec::with_capacity(table.len());
    for (row_no, row) in table.rows.iter().enumerate() {
        match cols.key(row_no, row, table) {
            Ok(key) => keyed.push(KeyedRow {
                key,
                molecule: row[cols.molecule].clone(),
                row: row_no,
                energy: row[cols.energy].clone(),
            }),
            Err(e) => log::warn!("Dropping row: {e}"),
        }
    }
    Ok(keyed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Cell {
        Cell::String(v.into())
    }

    fn table() -> Table {
        let headers = ["Index", "Molecule", "ΔG, kcal/mol", "Plot", "Category", "Method", "Solvent", "Additive"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        Table::new(
            headers,
            vec![
                vec![Cell::Integer(1), s("A"), Cell::Float(0.0), s("Yes"), s("cat"), s("DLPNO//r^2SCAN-3c"), s("No"), s("none")],
                vec![Cell::Integer(1), s("B"), Cell::Float(1.0), s("No"), s("cat"), s("DLPNO//r^2SCAN-3c"), s("No"), s("none")],
                vec![Cell::Integer(2), s("C"), Cell::Float(2.0), s("Yes"), s("cat"), s("r2SCAN-3c"), s("No"), s("none")],
                vec![Cell::Integer(3), s("D"), Cell::Float(3.0), s("Yes"), Cell::Null, s("DLPNO//r^2SCAN-3c"), s("No"), s("none")],
            ],
        )
    }

    #[test]
    fn keeps_flagged_target_rows_and_drops_flag() {
        let out = filter_rows(table(), &TableConfig::default()).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.column_index("Plot").is_none());
        assert_eq!(out.rows[0][1], s("A"));
    }

    #[test]
    fn no_target_method_keeps_every_method() {
        let cfg = TableConfig {
            target_method: None,
            ..TableConfig::default()
        };
        let out = filter_rows(table(), &cfg).unwrap();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn all_flags_no_gives_empty_table() {
        let mut t = table();
        for row in &mut t.rows {
            row[3] = s("No");
        }
        let out = filter_rows(t, &TableConfig::default()).unwrap();
        assert!(out.is_empty());
        assert!(index_rows(&out, &TableConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn rows_without_key_are_dropped() {
        let out = filter_rows(table(), &TableConfig::default()).unwrap();
        let keyed = index_rows(&out, &TableConfig::default()).unwrap();
        assert_eq!(keyed.len(), 1);
        assert_eq!(keyed[0].molecule, s("A"));
        assert_eq!(keyed[0].key.index, Cell::Integer(1));
    }
}
