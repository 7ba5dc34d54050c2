use calamine::{open_workbook_auto, Reader};
use std::error::Error;
use std::path::Path;

use crate::datafiles::io::{cell_to_string, normalize_header, split_codes};
use crate::models::Course;

// Encabezados aceptados por columna (ya normalizados)
const CODE_HEADERS: &[&str] = &["codigo", "code", "asignatura"];
const NAME_HEADERS: &[&str] = &["nombre", "name", "nombreasignado"];
const YEAR_HEADERS: &[&str] = &["anio", "ano", "year", "nivel"];
const TERM_HEADERS: &[&str] = &["ciclo", "term", "termino", "periodo"];
const CREDITS_HEADERS: &[&str] = &["creditos", "credits", "sct"];
const PREREQ_HEADERS: &[&str] = &["requisitos", "prerequisitos", "prerrequisitos", "prerequisites"];

struct Columns {
    code: usize,
    name: usize,
    year: usize,
    term: usize,
    credits: Option<usize>,
    prereqs: Option<usize>,
}

fn find_column(header: &[String], accepted: &[&str]) -> Option<usize> {
    header
        .iter()
        .position(|h| accepted.contains(&normalize_header(h).as_str()))
}

fn locate_columns(header: &[String]) -> Result<Columns, Box<dyn Error>> {
    let required = |accepted: &[&str], what: &str| -> Result<usize, Box<dyn Error>> {
        find_column(header, accepted).ok_or_else(|| format!("columna '{}' no encontrada en encabezado {:?}", what, header).into())
    };
    Ok(Columns {
        code: required(CODE_HEADERS, "codigo")?,
        name: required(NAME_HEADERS, "nombre")?,
        year: required(YEAR_HEADERS, "anio")?,
        term: required(TERM_HEADERS, "ciclo")?,
        credits: find_column(header, CREDITS_HEADERS),
        prereqs: find_column(header, PREREQ_HEADERS),
    })
}

/// Convierte filas de texto (primera fila = encabezado) en cursos.
/// Las filas con código vacío se omiten.
pub fn rows_to_courses(rows: &[Vec<String>]) -> Result<Vec<Course>, Box<dyn Error>> {
    let Some(header) = rows.first() else {
        return Ok(Vec::new());
    };
    let cols = locate_columns(header)?;
    let cell = |row: &Vec<String>, idx: usize| row.get(idx).map(|s| s.trim().to_string()).unwrap_or_default();

    let mut courses = Vec::new();
    for (row_idx, row) in rows.iter().enumerate().skip(1) {
        let code = cell(row, cols.code);
        if code.is_empty() {
            continue;
        }
        let year = cell(row, cols.year)
            .parse::<u32>()
            .map_err(|e| format!("fila {}: año inválido para '{}': {}", row_idx + 1, code, e))?;
        let term = cell(row, cols.term)
            .parse::<u8>()
            .map_err(|e| format!("fila {}: ciclo inválido para '{}': {}", row_idx + 1, code, e))?;
        let credits = cols
            .credits
            .map(|i| cell(row, i))
            .filter(|s| !s.is_empty())
            .map(|s| s.replace(',', ".").parse::<f64>())
            .transpose()
            .map_err(|e| format!("fila {}: créditos inválidos para '{}': {}", row_idx + 1, code, e))?
            .unwrap_or(0.0);
        let prerequisites = cols.prereqs.map(|i| split_codes(&cell(row, i))).unwrap_or_default();

        courses.push(Course {
            name: cell(row, cols.name),
            code,
            year,
            term,
            credits,
            prerequisites,
            offered_terms: Vec::new(),
        });
    }
    Ok(courses)
}

/// Lee la malla desde un libro Excel. Usa la hoja `sheet` si existe, si no la primera.
pub fn leer_cursos_excel<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> Result<Vec<Course>, Box<dyn Error>> {
    let mut workbook = open_workbook_auto(path.as_ref())?;
    let names = workbook.sheet_names().to_owned();
    let sheet_to_use = match sheet {
        Some(s) if names.iter().any(|n| n == s) => s.to_string(),
        _ => names
            .first()
            .cloned()
            .ok_or("No se encontraron hojas en el archivo Excel")?,
    };

    let range = workbook.worksheet_range(&sheet_to_use)?;
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|r| r.iter().map(cell_to_string).collect())
        .collect();
    log::debug!("{:?}: hoja '{}' con {} filas", path.as_ref(), sheet_to_use, rows.len());
    rows_to_courses(&rows)
}
