//! Tabular result of a forecast run: history spliced with the projection.

use chrono::NaiveDate;

/// Column headers of a result frame, in row field order.
pub const COLUMNS: [&str; 5] = [
    "Date",
    "Invoice total by day",
    "Vendor",
    "Geo Region Group",
    "Vendor ID",
];

/// One day of a result frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub date: NaiveDate,
    /// Historical amount where history covers the day, forecast otherwise.
    pub amount: f64,
    pub vendor: String,
    pub region: String,
    pub vendor_id: String,
}

/// Ordered rows spanning history plus the forecast horizon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultFrame {
    rows: Vec<ResultRow>,
}

impl ResultFrame {
    pub fn from_rows(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRow> {
        self.rows.iter()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    /// The amount column.
    pub fn amounts(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.amount).collect()
    }

    /// Append all rows of another frame, e.g. to build an aggregate table
    /// across groups.
    pub fn append(&mut self, other: ResultFrame) {
        self.rows.extend(other.rows);
    }
}

impl<'a> IntoIterator for &'a ResultFrame {
    type Item = &'a ResultRow;
    type IntoIter = std::slice::Iter<'a, ResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
