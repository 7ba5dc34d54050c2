use std::error::Error;
use std::fmt;

/// Errores de construcción de catálogo y de consulta.
///
/// Un plan infactible no es un error: se devuelve como `PlanOutcome::Infeasible`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// La malla no es consistente (requisito inexistente, código duplicado, ciclo).
    CatalogInconsistent(String),
    /// El código pedido no existe en la malla.
    NotFound(String),
    /// Parámetros de entrada inválidos.
    InvalidInput(String),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::CatalogInconsistent(msg) => write!(f, "catalog inconsistent: {}", msg),
            PlanError::NotFound(code) => write!(f, "course not found: {}", code),
            PlanError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
        }
    }
}

impl Error for PlanError {}
