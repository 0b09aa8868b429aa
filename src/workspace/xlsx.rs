use crate::errors::{Result, SheetLinkError};
use crate::host::{NameResolver, SpreadsheetHandle, SpreadsheetHost};
use parking_lot::RwLock;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use umya_spreadsheet::{Spreadsheet, Worksheet};
use walkdir::WalkDir;

/// Spreadsheet host backed by a directory of workbook files. Workbooks are
/// identified by a slug-plus-hash id derived from their path; slugs are
/// accepted as aliases.
pub struct XlsxWorkspace {
    root: PathBuf,
    extensions: Vec<String>,
    index: RwLock<HashMap<String, PathBuf>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkbookListing {
    pub id: String,
    pub slug: String,
    pub path: PathBuf,
}

impl XlsxWorkspace {
    pub fn new(root: impl Into<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            root: root.into(),
            extensions,
            index: RwLock::new(HashMap::new()),
        }
    }

    /// Workbooks currently present under the workspace root, sorted by slug.
    pub fn list(&self) -> Result<Vec<WorkbookListing>> {
        let located = self.scan()?;
        self.register_all(&located);
        Ok(located)
    }

    fn scan(&self) -> Result<Vec<WorkbookListing>> {
        let mut out = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(SheetLinkError::host)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !has_supported_extension(&self.extensions, path) {
                continue;
            }
            out.push(locate(path));
        }
        out.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(out)
    }

    fn register_all(&self, located: &[WorkbookListing]) {
        let mut index = self.index.write();
        for workbook in located {
            index.insert(workbook.id.to_ascii_lowercase(), workbook.path.clone());
            index.insert(workbook.slug.to_ascii_lowercase(), workbook.path.clone());
        }
    }

    fn resolve(&self, id_or_slug: &str) -> Result<PathBuf> {
        let lowered = id_or_slug.to_ascii_lowercase();
        if let Some(path) = self.index.read().get(&lowered).cloned() {
            if path.exists() {
                return Ok(path);
            }
        }

        let scanned = self.scan()?;
        self.register_all(&scanned);
        scanned
            .into_iter()
            .find(|wb| {
                lowered == wb.id.to_ascii_lowercase() || lowered == wb.slug.to_ascii_lowercase()
            })
            .map(|wb| wb.path)
            .ok_or_else(|| SheetLinkError::NotFound(format!("spreadsheet '{id_or_slug}'")))
    }
}

impl SpreadsheetHost for XlsxWorkspace {
    fn open_by_id(&self, spreadsheet_id: &str) -> Result<Box<dyn SpreadsheetHandle>> {
        let path = self.resolve(spreadsheet_id)?;
        let book = umya_spreadsheet::reader::xlsx::read(&path).map_err(SheetLinkError::host)?;
        Ok(Box::new(XlsxHandle { book }))
    }
}

impl NameResolver for XlsxWorkspace {
    fn name_of(&self, spreadsheet_id: &str) -> Result<String> {
        let path = self.resolve(spreadsheet_id)?;
        Ok(slug_of(&path))
    }
}

struct XlsxHandle {
    book: Spreadsheet,
}

impl XlsxHandle {
    fn sheet(&self, sheet_name: &str) -> Result<&Worksheet> {
        self.book
            .get_sheet_by_name(sheet_name)
            .ok_or_else(|| SheetLinkError::NotFound(format!("tab '{sheet_name}'")))
    }
}

impl SpreadsheetHandle for XlsxHandle {
    fn sheet_names(&self) -> Result<Vec<String>> {
        Ok(self
            .book
            .get_sheet_collection()
            .iter()
            .map(|sheet| sheet.get_name().to_string())
            .collect())
    }

    fn row_count(&self, sheet_name: &str) -> Result<u32> {
        Ok(self.sheet(sheet_name)?.get_highest_row())
    }

    fn read_range(
        &self,
        sheet_name: &str,
        row: u32,
        col: u32,
        num_rows: u32,
        num_cols: u32,
    ) -> Result<Vec<Vec<String>>> {
        let sheet = self.sheet(sheet_name)?;
        let mut grid = Vec::with_capacity(num_rows as usize);
        for r in row..row + num_rows {
            let mut cells = Vec::with_capacity(num_cols as usize);
            for c in col..col + num_cols {
                let value = sheet
                    .get_cell((c, r))
                    .map(|cell| cell.get_value().to_string())
                    .unwrap_or_default();
                cells.push(value);
            }
            grid.push(cells);
        }
        Ok(grid)
    }

    fn sheet_gid(&self, sheet_name: &str) -> Result<String> {
        // Tab position doubles as the gid, matching how sheet links address
        // tabs by a stable per-workbook id.
        self.book
            .get_sheet_collection()
            .iter()
            .position(|sheet| sheet.get_name() == sheet_name)
            .map(|idx| idx.to_string())
            .ok_or_else(|| SheetLinkError::NotFound(format!("tab '{sheet_name}'")))
    }
}

fn locate(path: &Path) -> WorkbookListing {
    let slug = slug_of(path);
    let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    WorkbookListing {
        id: workbook_id(&slug, &canonical),
        slug,
        path: path.to_path_buf(),
    }
}

fn slug_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "workbook".to_string())
}

fn workbook_id(slug: &str, canonical: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical.to_string_lossy().as_bytes());
    let digest = hasher.finalize();
    let short: String = digest.iter().take(4).map(|b| format!("{b:02x}")).collect();
    format!("{slug}-{short}")
}

fn has_supported_extension(allowed: &[String], path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lower = ext.to_ascii_lowercase();
            allowed.iter().any(|candidate| candidate == &lower)
        })
        .unwrap_or(false)
}
