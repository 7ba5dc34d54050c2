use calamine::Data;

/// Convierte un `Data` de calamine a String (versión genérica para celdas)
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Normaliza encabezados eliminando espacios, acentos y pasando a minúsculas.
pub fn normalize_header(s: &str) -> String {
    fold_accents(&s.to_lowercase())
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .collect()
}

/// Normaliza nombres de curso para comparar: minúsculas, sin acentos y con
/// espacios colapsados.
pub fn normalize_name(s: &str) -> String {
    fold_accents(&s.to_lowercase())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn fold_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Separa una celda de requisitos ("MAT1, FIS1; QUI1") en códigos.
pub fn split_codes(cell: &str) -> Vec<String> {
    cell.split([',', ';'])
        .map(|p| p.trim())
        .filter(|p| !p.is_empty() && *p != "-")
        .map(|p| p.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Cálculo   Diferencial "), "calculo diferencial");
        assert_eq!(normalize_name("PROGRAMACIÓN"), "programacion");
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Año"), "ano");
        assert_eq!(normalize_header("Código Curso"), "codigocurso");
    }

    #[test]
    fn test_split_codes() {
        assert_eq!(split_codes("MAT1, FIS1;QUI1"), vec!["MAT1", "FIS1", "QUI1"]);
        assert!(split_codes("-").is_empty());
        assert!(split_codes("").is_empty());
    }

    #[test]
    fn test_cell_to_string_float_integral() {
        assert_eq!(cell_to_string(&Data::Float(2.0)), "2");
        assert_eq!(cell_to_string(&Data::Float(4.5)), "4.5");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }
}
