use crate::config::TableConfig;

use super::loader::LoadError;
use super::model::{Cell, Table};

/// Drop the separator row that closes every `block_rows`-row block
/// (0-indexed rows `block_rows - 1`, `2 * block_rows - 1`, ...).
/// `block_rows == 0` disables the drop.
pub fn drop_separator_rows(table: &mut Table, block_rows: usize) {
    if block_rows == 0 {
        return;
    }
    let before = table.len();
    let mut row_no = 0usize;
    table.rows.retain(|_| {
        let keep = row_no % block_rows != block_rows - 1;
        row_no += 1;
        keep
    });
    log::debug!("Dropped {} separator rows", before - table.len());
}

/// Forward-fill missing cells of column 0 and of every column `>= fill_from`.
///
/// A single pass over the rows carrying the last non-missing value seen in
/// each filled column. Columns `1..fill_from` are left untouched. Leading
/// missing cells (nothing seen yet) stay missing.
pub fn forward_fill(table: &mut Table, fill_from: usize) {
    let width = table.headers.len();
    let filled = |col: usize| col == 0 || col >= fill_from;
    let mut last_seen: Vec<Option<Cell>> = vec![None; width];

    for row in &mut table.rows {
        for (col, cell) in row.iter_mut().enumerate() {
            if !filled(col) {
                continue;
            }
            if cell.is_missing() {
                if let Some(prev) = &last_seen[col] {
                    *cell = prev.clone();
                }
            } else {
                last_seen[col] = Some(cell.clone());
            }
        }
    }
}

/// Every column the pipeline reads, by configured name.
fn required_columns(cfg: &TableConfig) -> Vec<&str> {
    let mut cols: Vec<&str> = vec![
        cfg.index_column.as_str(),
        cfg.category_column.as_str(),
        cfg.method_column.as_str(),
        cfg.solvent_column.as_str(),
        cfg.additive_column.as_str(),
        cfg.molecule_column.as_str(),
        cfg.plot_column.as_str(),
        cfg.energy_column.as_str(),
    ];
    cols.extend(cfg.dropped_columns.iter().map(String::as_str));
    cols
}

/// Turn a raw sheet into the normalized table:
/// separator rows dropped, unused columns dropped, then forward-filled.
pub fn normalize(mut table: Table, cfg: &TableConfig) -> Result<Table, LoadError> {
    for name in required_columns(cfg) {
        if table.column_index(name).is_none() {
            return Err(LoadError::MissingColumn(name.to_string()));
        }
    }

    drop_separator_rows(&mut table, cfg.block_rows);

    for name in &cfg.dropped_columns {
        if let Some(col) = table.column_index(name) {
            table.remove_column(col);
        }
    }

    forward_fill(&mut table, cfg.fill_from);
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(i: i64) -> Cell {
        Cell::Integer(i)
    }

    fn numbered(n: usize) -> Table {
        Table::new(
            vec!["n".into()],
            (0..n).map(|i| vec![int(i as i64)]).collect(),
        )
    }

    #[test]
    fn drops_every_twelfth_row() {
        let mut t = numbered(30);
        drop_separator_rows(&mut t, 12);
        assert_eq!(t.len(), 28);
        assert!(!t.rows.contains(&vec![int(11)]));
        assert!(!t.rows.contains(&vec![int(23)]));
        assert!(t.rows.contains(&vec![int(12)]));
        assert!(t.rows.contains(&vec![int(29)]));
    }

    #[test]
    fn zero_block_keeps_everything() {
        let mut t = numbered(13);
        drop_separator_rows(&mut t, 0);
        assert_eq!(t.len(), 13);
    }

    #[test]
    fn fills_only_first_and_trailing_columns() {
        let headers: Vec<String> = (0..9).map(|i| format!("c{i}")).collect();
        let mut t = Table::new(
            headers,
            vec![
                (0..9).map(|i| int(i)).collect(),
                vec![Cell::Null; 9],
                vec![Cell::Null, Cell::Null, int(20), Cell::Null, Cell::Null, Cell::Null, Cell::Null, int(70), Cell::Float(f64::NAN)],
            ],
        );
        forward_fill(&mut t, 7);

        // column 0 and 7.. filled, 1..6 untouched
        assert_eq!(t.rows[1][0], int(0));
        assert_eq!(t.rows[1][7], int(7));
        assert_eq!(t.rows[1][8], int(8));
        for col in 1..7 {
            assert_eq!(t.rows[1][col], Cell::Null);
        }
        assert_eq!(t.rows[2][0], int(0));
        assert_eq!(t.rows[2][7], int(70));
        assert_eq!(t.rows[2][8], int(8));
        assert_eq!(t.rows[2][2], int(20));
    }

    #[test]
    fn leading_gaps_stay_missing() {
        let mut t = Table::new(
            vec!["a".into()],
            vec![vec![Cell::Null], vec![int(1)], vec![Cell::Null]],
        );
        forward_fill(&mut t, 7);
        assert_eq!(t.rows[0][0], Cell::Null);
        assert_eq!(t.rows[2][0], int(1));
    }

    #[test]
    fn forward_fill_is_idempotent() {
        let headers: Vec<String> = (0..10).map(|i| format!("c{i}")).collect();
        let rows = (0..40)
            .map(|r| {
                (0..10)
                    .map(|c| if (r * 7 + c * 3) % 4 == 0 { int((r * 10 + c) as i64) } else { Cell::Null })
                    .collect()
            })
            .collect();
        let mut once = Table::new(headers, rows);
        drop_separator_rows(&mut once, 12);
        forward_fill(&mut once, 7);
        let mut twice = once.clone();
        forward_fill(&mut twice, 7);
        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_requires_schema_columns() {
        let t = Table::new(vec!["Index".into(), "Method".into()], vec![]);
        let err = normalize(t, &TableConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(_)));
    }
}
