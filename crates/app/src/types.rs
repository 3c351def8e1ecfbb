//! TypeScript declarations of the view models, shared with the mobile front end.

use std::{fs, io, path::Path};

use db::models::{
    officer::{CreateOfficer, Department, Officer, PtoBalances, Rank},
    shift::{Recurrence, RecurrencePattern, Shift},
};
use services::services::shift_filter::ShiftFilter;
use ts_rs::TS;

const HEADER: &str =
    "// This file was generated by `generate-types`. Do not edit it by hand.\n";

pub fn declarations() -> String {
    let decls = [
        Rank::decl(),
        Department::decl(),
        PtoBalances::decl(),
        Officer::decl(),
        CreateOfficer::decl(),
        RecurrencePattern::decl(),
        Recurrence::decl(),
        Shift::decl(),
        ShiftFilter::decl(),
    ];

    let body = decls
        .iter()
        .map(|decl| format!("export {}", decl.trim()))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{HEADER}\n{body}\n")
}

pub fn write(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, declarations())
}

/// True when the file on disk matches the current declarations.
pub fn is_current(path: &Path) -> io::Result<bool> {
    match fs::read_to_string(path) {
        Ok(existing) => Ok(existing == declarations()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declarations_cover_view_models() {
        let ts = declarations();
        assert!(ts.starts_with(HEADER));
        for name in ["Officer", "PtoBalances", "Shift", "Recurrence", "ShiftFilter"] {
            assert!(ts.contains(&format!("export type {name} ")), "missing {name}");
        }
        assert!(ts.contains("isSupervisor"));
        assert!(ts.contains("\"K-9\""));
    }

    #[test]
    fn test_write_then_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared").join("types.ts");
        assert!(!is_current(&path).unwrap());

        write(&path).unwrap();
        assert!(is_current(&path).unwrap());

        fs::write(&path, "stale").unwrap();
        assert!(!is_current(&path).unwrap());
    }
}
