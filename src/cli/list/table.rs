use std::fmt::{self, Write};

/// A plain-text table with space-aligned columns, in the style of
/// `docker ps` and friends. Header cells must be awk safe: a single
/// whitespace-free word, so line-oriented tooling can split on runs of
/// spaces.
pub(crate) struct Table {
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
    num_columns: Option<usize>,
    show_header: bool,
}

impl Table {
    pub(crate) fn new() -> Table {
        Table {
            header: None,
            rows: Vec::new(),
            num_columns: None,
            show_header: true,
        }
    }

    pub(crate) fn show_header(&mut self, show_header: bool) {
        self.show_header = show_header;
    }

    fn expect_columns(&mut self, num_columns: usize) {
        match self.num_columns {
            Some(expected) if expected != num_columns => panic!(
                "table has {} columns but a row with {} columns was inserted",
                expected, num_columns
            ),
            Some(_) => {}
            None => self.num_columns = Some(num_columns),
        }
    }

    fn collect_cells<I>(row: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        row.into_iter().map(|cell| cell.into()).collect()
    }

    pub(crate) fn set_header<I>(&mut self, header: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let header = Self::collect_cells(header);

        self.expect_columns(header.len());

        for cell in &header {
            if cell.contains(|c: char| c.is_whitespace()) {
                panic!("table header cell \"{}\" contains whitespace", cell);
            }
        }

        self.header = Some(header);
    }

    pub(crate) fn add_row<I>(&mut self, row: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let row = Self::collect_cells(row);

        self.expect_columns(row.len());

        self.rows.push(row);
    }

    fn printed_rows(&self) -> impl Iterator<Item = &Vec<String>> {
        let header = match self.show_header {
            true => self.header.as_ref(),
            false => None,
        };

        header.into_iter().chain(self.rows.iter())
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![0usize; self.num_columns.unwrap_or(0)];

        for row in self.printed_rows() {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.len());
            }
        }

        widths
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();

        for row in self.printed_rows() {
            for (i, cell) in row.iter().enumerate() {
                if i != 0 {
                    f.write_str("  ")?;
                }

                if i == row.len() - 1 {
                    // No trailing padding on the last column.
                    f.write_str(cell)?;
                } else {
                    f.write_fmt(format_args!("{:<width$}", cell, width = widths[i]))?;
                }
            }

            f.write_char('\n')?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_columns_under_the_header() {
        let mut tab = Table::new();

        tab.set_header(vec!["NAME", "KIND"]);
        tab.add_row(vec!["gpt-4", "chat"]);
        tab.add_row(vec!["text-embedding-3-small", "embedding"]);

        assert_eq!(
            tab.to_string(),
            "NAME                    KIND\n\
             gpt-4                   chat\n\
             text-embedding-3-small  embedding\n"
        );
    }

    #[test]
    fn headerless_output_skips_the_header() {
        let mut tab = Table::new();

        tab.set_header(vec!["NAME", "KIND"]);
        tab.add_row(vec!["gpt-4", "chat"]);
        tab.show_header(false);

        assert_eq!(tab.to_string(), "gpt-4  chat\n");
    }

    #[test]
    #[should_panic(expected = "columns")]
    fn rejects_ragged_rows() {
        let mut tab = Table::new();

        tab.add_row(vec!["a", "b"]);
        tab.add_row(vec!["a"]);
    }
}
