//! Módulo `datafiles`: carga de mallas y planes desde disco.
//!
//! Submódulos:
//! - `io`: helpers de celdas y normalización de nombres/encabezados
//! - `json`: mallas en JSON (`cursos.json`) y guardado/carga de planes
//! - `xlsx`: mallas en Excel vía calamine

/// Helpers de IO y normalización
pub mod io;

/// Mallas y planes en JSON
pub mod json;

/// Mallas en Excel
pub mod xlsx;

pub use io::normalize_name;
pub use json::{leer_cursos_json, load_plan_json, parse_courses_json, save_plan_json};
pub use xlsx::{leer_cursos_excel, rows_to_courses};

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::CourseCatalog;
use crate::models::Course;

/// Directorio por defecto con las mallas (relativo al directorio de trabajo)
pub const DATAFILES_DIR: &str = "datafiles";

/// Resuelve el directorio de datafiles: override explícito, luego
/// `QUICKPLAN_DATAFILES_DIR`, luego `datafiles/` bajo el directorio actual.
pub fn get_datafiles_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    if let Ok(path) = std::env::var("QUICKPLAN_DATAFILES_DIR") {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    cwd.join(DATAFILES_DIR)
}

/// Resuelve un nombre de archivo: rutas existentes se usan tal cual; si no,
/// se busca dentro del directorio de datafiles.
pub fn resolve_datafile_path(name: &str, datafiles_dir: &Path) -> Result<PathBuf, Box<dyn Error>> {
    let direct = PathBuf::from(name);
    if direct.is_file() {
        return Ok(direct);
    }
    let candidate = datafiles_dir.join(name);
    if candidate.is_file() {
        return Ok(candidate);
    }
    Err(format!("datafile '{}' not found (searched . and {:?})", name, datafiles_dir).into())
}

/// Lista los archivos de malla disponibles (`.json`, `.xlsx`, `.xls`, `.ods`).
pub fn list_catalog_files(datafiles_dir: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(datafiles_dir)?.flatten() {
        let p = entry.path();
        if !p.is_file() {
            continue;
        }
        let Some(name) = p.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        // ignorar temporales de editores (.~archivo.xlsx, archivo~)
        if name.starts_with('.') || name.starts_with('~') || name.ends_with('~') {
            continue;
        }
        if is_catalog_extension(&p) {
            out.push(name.to_string());
        }
    }
    out.sort();
    Ok(out)
}

fn is_catalog_extension(p: &Path) -> bool {
    matches!(
        p.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase()).as_deref(),
        Some("json") | Some("xlsx") | Some("xls") | Some("ods")
    )
}

/// Lee los cursos según la extensión del archivo.
pub fn leer_cursos<P: AsRef<Path>>(path: P) -> Result<Vec<Course>, Box<dyn Error>> {
    let path = path.as_ref();
    let ext = path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("json") => leer_cursos_json(path),
        Some("xlsx") | Some("xls") | Some("ods") => leer_cursos_excel(path, None),
        _ => Err(format!("unsupported catalog format: {:?}", path).into()),
    }
}

/// Lee y valida una malla completa.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CourseCatalog, Box<dyn Error>> {
    let courses = leer_cursos(path.as_ref())?;
    let catalog = CourseCatalog::new(courses)?;
    log::info!("catalog {:?} loaded: {} courses", path.as_ref(), catalog.len());
    Ok(catalog)
}
