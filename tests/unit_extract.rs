use assert_matches::assert_matches;
use sheetlink::SheetLinkError;
use sheetlink::extract::FieldExtractor;
use sheetlink::host::{SpreadsheetHandle, SpreadsheetHost};
use sheetlink::model::Span;
use std::sync::Arc;

/// Scripted spreadsheet collaborator: one spreadsheet per id, tabs as
/// (name, rows) pairs.
struct FakeSheets {
    id: String,
    tabs: Vec<(String, Vec<Vec<String>>)>,
}

impl FakeSheets {
    fn new(id: &str, tabs: &[(&str, &[(&str, &str)])]) -> Self {
        Self {
            id: id.to_string(),
            tabs: tabs
                .iter()
                .map(|(name, rows)| {
                    let grid = rows
                        .iter()
                        .map(|(label, value)| vec![label.to_string(), value.to_string()])
                        .collect();
                    (name.to_string(), grid)
                })
                .collect(),
        }
    }
}

struct FakeHandle {
    tabs: Vec<(String, Vec<Vec<String>>)>,
}

impl FakeHandle {
    fn tab(&self, sheet_name: &str) -> sheetlink::Result<&Vec<Vec<String>>> {
        self.tabs
            .iter()
            .find(|(name, _)| name == sheet_name)
            .map(|(_, rows)| rows)
            .ok_or_else(|| SheetLinkError::NotFound(format!("tab '{sheet_name}'")))
    }
}

impl SpreadsheetHost for FakeSheets {
    fn open_by_id(&self, spreadsheet_id: &str) -> sheetlink::Result<Box<dyn SpreadsheetHandle>> {
        if spreadsheet_id != self.id {
            return Err(SheetLinkError::NotFound(format!(
                "spreadsheet '{spreadsheet_id}'"
            )));
        }
        Ok(Box::new(FakeHandle {
            tabs: self.tabs.clone(),
        }))
    }
}

impl SpreadsheetHandle for FakeHandle {
    fn sheet_names(&self) -> sheetlink::Result<Vec<String>> {
        Ok(self.tabs.iter().map(|(name, _)| name.clone()).collect())
    }

    fn row_count(&self, sheet_name: &str) -> sheetlink::Result<u32> {
        Ok(self.tab(sheet_name)?.len() as u32)
    }

    fn read_range(
        &self,
        sheet_name: &str,
        row: u32,
        col: u32,
        num_rows: u32,
        num_cols: u32,
    ) -> sheetlink::Result<Vec<Vec<String>>> {
        let rows = self.tab(sheet_name)?;
        let mut grid = Vec::new();
        for r in row..row + num_rows {
            let source = rows.get(r as usize - 1);
            let mut cells = Vec::new();
            for c in col..col + num_cols {
                cells.push(
                    source
                        .and_then(|cells| cells.get(c as usize - 1))
                        .cloned()
                        .unwrap_or_default(),
                );
            }
            grid.push(cells);
        }
        Ok(grid)
    }

    fn sheet_gid(&self, sheet_name: &str) -> sheetlink::Result<String> {
        self.tabs
            .iter()
            .position(|(name, _)| name == sheet_name)
            .map(|idx| idx.to_string())
            .ok_or_else(|| SheetLinkError::NotFound(format!("tab '{sheet_name}'")))
    }
}

fn extractor(tabs: &[(&str, &[(&str, &str)])]) -> FieldExtractor {
    FieldExtractor::new(Arc::new(FakeSheets::new("book", tabs)), 100)
}

#[test]
fn tabs_come_back_in_declaration_order() {
    let extractor = extractor(&[("Results", &[]), ("Inputs", &[]), ("Notes", &[])]);
    assert_eq!(extractor.tabs("book").unwrap(), ["Results", "Inputs", "Notes"]);
}

#[test]
fn fields_preserve_row_order_and_normalize_values() {
    let extractor = extractor(&[(
        "Results",
        &[("Field1", "Value1"), ("Field2", "2.3e7")][..],
    )]);

    let fields = extractor.fields("book", "Results").unwrap();
    assert_eq!(fields.len(), 2);

    assert_eq!(fields[0].label, "Field1");
    assert_eq!(fields[0].display_value, "Value1");
    assert_eq!(fields[0].exponent, None);
    assert_eq!(fields[0].cell_row, 1);
    assert_eq!(fields[0].cell_col, 2);

    assert_eq!(fields[1].label, "Field2");
    assert_eq!(fields[1].raw_value, "2.3e7");
    assert_eq!(fields[1].display_value, "2.3×107");
    assert_eq!(fields[1].exponent, Some(Span::new(6, 7)));
    assert_eq!(fields[1].cell_row, 2);
    assert_eq!(fields[1].spreadsheet_id, "book");
    assert_eq!(fields[1].sheet_gid, "0");
}

#[test]
fn rows_with_empty_labels_are_skipped() {
    let extractor = extractor(&[(
        "Results",
        &[("Field1", "Value1"), ("", "orphan"), ("Field3", "Value3")][..],
    )]);

    let fields = extractor.fields("book", "Results").unwrap();
    let labels: Vec<_> = fields.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, ["Field1", "Field3"]);
    // Cell coordinates still point at the original rows.
    assert_eq!(fields[1].cell_row, 3);
}

#[test]
fn unknown_spreadsheet_is_not_found() {
    let extractor = extractor(&[("Results", &[])]);
    assert_matches!(
        extractor.fields("other", "Results"),
        Err(SheetLinkError::NotFound(_))
    );
    assert_matches!(extractor.tabs("other"), Err(SheetLinkError::NotFound(_)));
}

#[test]
fn unknown_tab_is_not_found_not_empty() {
    let extractor = extractor(&[("Results", &[("Field1", "Value1")][..])]);
    assert_matches!(
        extractor.fields("book", "Missing"),
        Err(SheetLinkError::NotFound(_))
    );
}

#[test]
fn tab_without_labeled_rows_is_empty_tab() {
    let extractor = extractor(&[("Blank", &[]), ("Unlabeled", &[("", "value")][..])]);
    assert_matches!(
        extractor.fields("book", "Blank"),
        Err(SheetLinkError::EmptyTab(_))
    );
    assert_matches!(
        extractor.fields("book", "Unlabeled"),
        Err(SheetLinkError::EmptyTab(_))
    );
}

#[test]
fn row_scan_is_bounded() {
    let rows: Vec<(String, String)> = (1..=50)
        .map(|i| (format!("Field{i}"), format!("{i}")))
        .collect();
    let borrowed: Vec<(&str, &str)> = rows
        .iter()
        .map(|(label, value)| (label.as_str(), value.as_str()))
        .collect();

    let host = Arc::new(FakeSheets::new("book", &[("Big", &borrowed[..])]));
    let extractor = FieldExtractor::new(host, 10);

    let fields = extractor.fields("book", "Big").unwrap();
    assert_eq!(fields.len(), 10);
    assert_eq!(fields.last().unwrap().cell_row, 10);
}
