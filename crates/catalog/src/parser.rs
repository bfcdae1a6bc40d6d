//! Parser for the tab-separated course catalog file.
//!
//! Expected format: a header row naming the columns, then one course per
//! line. Required columns (any order, extra columns ignored):
//! `key`, `title`, `description`, `minimum credits`, `cluster`.
//!
//! An empty `minimum credits` cell parses to `None`; the documented default
//! is applied by `Course::minimum_credits_or_default`, never here.

use crate::error::{CatalogError, Result};
use crate::types::Course;
use std::fs;
use std::path::Path;

const FILE_LABEL: &str = "catalog";

/// Resolved positions of the required columns within a row.
struct ColumnLayout {
    key: usize,
    title: usize,
    description: usize,
    minimum_credits: usize,
    cluster: usize,
}

impl ColumnLayout {
    fn from_header(header: &str) -> Result<Self> {
        let names: Vec<&str> = header.split('\t').map(str::trim).collect();

        let position = |column: &str| -> Result<usize> {
            names
                .iter()
                .position(|name| name.eq_ignore_ascii_case(column))
                .ok_or_else(|| CatalogError::MissingColumn {
                    column: column.to_string(),
                })
        };

        Ok(Self {
            key: position("key")?,
            title: position("title")?,
            description: position("description")?,
            minimum_credits: position("minimum credits")?,
            cluster: position("cluster")?,
        })
    }

    fn widest(&self) -> usize {
        [
            self.key,
            self.title,
            self.description,
            self.minimum_credits,
            self.cluster,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

/// Parse the catalog file into courses, preserving file order.
pub fn parse_catalog(path: &Path) -> Result<Vec<Course>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(e),
    })?;

    let mut lines = content.lines().enumerate();

    let (_, header) = lines
        .next()
        .ok_or_else(|| CatalogError::ParseError {
            file: FILE_LABEL.to_string(),
            line: 1,
            reason: "Missing header row".to_string(),
        })?;
    let layout = ColumnLayout::from_header(header)?;

    let mut courses = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue; // Skip empty lines
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() <= layout.widest() {
            return Err(CatalogError::ParseError {
                file: FILE_LABEL.to_string(),
                line: line_no,
                reason: format!(
                    "Expected at least {} fields but found {}",
                    layout.widest() + 1,
                    fields.len()
                ),
            });
        }

        courses.push(parse_row(&layout, &fields, line_no)?);
    }

    Ok(courses)
}

fn parse_row(layout: &ColumnLayout, fields: &[&str], line_no: usize) -> Result<Course> {
    let key = fields[layout.key].trim();
    if key.is_empty() {
        return Err(CatalogError::ParseError {
            file: FILE_LABEL.to_string(),
            line: line_no,
            reason: "Empty course key".to_string(),
        });
    }

    let minimum_credits = parse_minimum_credits(fields[layout.minimum_credits], line_no)?;

    let cluster = fields[layout.cluster]
        .trim()
        .parse()
        .map_err(|e| CatalogError::ParseError {
            file: FILE_LABEL.to_string(),
            line: line_no,
            reason: format!("Invalid cluster id: {}", e),
        })?;

    Ok(Course {
        key: key.to_string(),
        title: fields[layout.title].trim().to_string(),
        description: fields[layout.description].trim().to_string(),
        minimum_credits,
        cluster,
    })
}

fn parse_minimum_credits(raw: &str, line_no: usize) -> Result<Option<f32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let credits: f32 = raw.parse().map_err(|e| CatalogError::ParseError {
        file: FILE_LABEL.to_string(),
        line: line_no,
        reason: format!("Invalid minimum credits: {}", e),
    })?;

    if credits < 0.0 || !credits.is_finite() {
        return Err(CatalogError::InvalidValue {
            field: "minimum credits".to_string(),
            value: raw.to_string(),
        });
    }

    Ok(Some(credits))
}
