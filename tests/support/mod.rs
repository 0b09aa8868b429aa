#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use umya_spreadsheet::{Spreadsheet, Worksheet};

pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("properties.json")
    }

    pub fn create_workbook(&self, file: &str, build: impl FnOnce(&mut Spreadsheet)) -> PathBuf {
        let mut book = umya_spreadsheet::new_file();
        build(&mut book);
        let path = self.dir.path().join(file);
        umya_spreadsheet::writer::xlsx::write(&book, &path).expect("write workbook");
        path
    }
}

/// Fills a label/value tab: column A labels, column B values, one row per
/// pair starting at row 1. Empty strings leave the cell unset.
pub fn fill_fields(sheet: &mut Worksheet, rows: &[(&str, &str)]) {
    for (idx, (label, value)) in rows.iter().enumerate() {
        let row = idx as u32 + 1;
        if !label.is_empty() {
            sheet.get_cell_mut((1, row)).set_value_string(*label);
        }
        if !value.is_empty() {
            sheet.get_cell_mut((2, row)).set_value_string(*value);
        }
    }
}
