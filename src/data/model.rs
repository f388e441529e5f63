use std::fmt;

// ---------------------------------------------------------------------------
// Cell – a single spreadsheet value
// ---------------------------------------------------------------------------

/// A dynamically-typed spreadsheet cell.
/// Group keys are sorted, so `Cell` must be `Ord`.
#[derive(Debug, Clone)]
pub enum Cell {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so a tuple of cells can key a stable sort --

/// Equality agrees with `Ord`, so `Integer(1) == Float(1.0)`.
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Cell::*;
        fn discriminant(v: &Cell) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                // Integers and floats compare numerically with each other.
                Integer(_) | Float(_) => 2,
                String(_) => 3,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Integer(a), Float(b)) => (*a as f64).total_cmp(b),
            (Float(a), Integer(b)) => a.total_cmp(&(*b as f64)),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::String(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Null => write!(f, "<null>"),
        }
    }
}

impl Cell {
    /// Missing in the dataframe sense: empty cell or NaN.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            Cell::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::String(s) => Some(s),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the loaded sheet
// ---------------------------------------------------------------------------

/// A rectangular sheet: ordered column names and rows in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table, padding or truncating every row to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Null);
                row
            })
            .collect();
        Table { headers, rows }
    }

    /// Position of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Remove a column by position from the header and every row.
    pub fn remove_column(&mut self, col: usize) {
        self.headers.remove(col);
        for row in &mut self.rows {
            row.remove(col);
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells_compare_across_variants() {
        assert!(Cell::Integer(1) < Cell::Float(1.5));
        assert!(Cell::Float(2.0) > Cell::Integer(1));
        assert!(Cell::Null < Cell::Integer(-10));
        assert!(Cell::Integer(100) < Cell::String("a".into()));
    }

    #[test]
    fn integral_float_equals_integer() {
        assert_eq!(Cell::Integer(1), Cell::Float(1.0));
        assert_eq!(Cell::Integer(1).cmp(&Cell::Float(1.0)), std::cmp::Ordering::Equal);
        assert_ne!(Cell::Integer(1), Cell::Float(1.5));
        assert_ne!(Cell::String("1".into()), Cell::Integer(1));
    }

    #[test]
    fn nan_is_missing() {
        assert!(Cell::Float(f64::NAN).is_missing());
        assert!(Cell::Null.is_missing());
        assert!(!Cell::String(String::new()).is_missing());
    }

    #[test]
    fn new_pads_short_rows() {
        let t = Table::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![vec![Cell::Integer(1)]],
        );
        assert_eq!(t.rows[0], vec![Cell::Integer(1), Cell::Null, Cell::Null]);
    }
}
