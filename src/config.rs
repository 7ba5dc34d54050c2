//! Configuración de la aplicación desde variables de entorno (y `.env` si existe).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::algorithm::{DomainStrategy, PlannerOptions, SearchLimits, VariableTieBreak, DEFAULT_TERMS_PER_YEAR};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_CATALOG: &str = "cursos.json";
pub const DEFAULT_HORIZON: u32 = 12;
pub const DEFAULT_MAX_NODES: u64 = 2_000_000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub catalog: String,
    pub datafiles_dir: Option<PathBuf>,
    pub default_horizon: u32,
    pub max_nodes: Option<u64>,
    pub time_limit: Option<Duration>,
    pub terms_per_year: u8,
    pub domain_strategy: DomainStrategy,
    pub tie_break: VariableTieBreak,
    pub log_level: log::LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind_addr: DEFAULT_BIND.to_string(),
            catalog: DEFAULT_CATALOG.to_string(),
            datafiles_dir: None,
            default_horizon: DEFAULT_HORIZON,
            max_nodes: Some(DEFAULT_MAX_NODES),
            time_limit: None,
            terms_per_year: DEFAULT_TERMS_PER_YEAR,
            domain_strategy: DomainStrategy::TermRestricted,
            tie_break: VariableTieBreak::CatalogOrder,
            log_level: log::LevelFilter::Info,
        }
    }
}

// load .env if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

/// Lee `key` y la parsea; valores inválidos se ignoran con aviso.
fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    if raw.trim().is_empty() {
        return None;
    }
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            // el logger puede no estar instalado aún
            eprintln!("WARN: invalid value for {}: '{}', using default", key, raw);
            None
        }
    }
}

impl AppConfig {
    /// Carga `.env` y construye la configuración desde el entorno.
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup()
    }

    fn from_lookup() -> Self {
        let d = AppConfig::default();
        let max_nodes = match parse_var::<u64>("QUICKPLAN_MAX_NODES") {
            Some(0) => None,
            Some(n) => Some(n),
            None => d.max_nodes,
        };
        AppConfig {
            bind_addr: parse_var("QUICKPLAN_BIND").unwrap_or(d.bind_addr),
            catalog: parse_var("QUICKPLAN_CATALOG").unwrap_or(d.catalog),
            datafiles_dir: parse_var::<String>("QUICKPLAN_DATAFILES_DIR").map(PathBuf::from),
            default_horizon: parse_var("QUICKPLAN_HORIZON").unwrap_or(d.default_horizon),
            max_nodes,
            time_limit: parse_var::<u64>("QUICKPLAN_TIME_LIMIT_MS").map(Duration::from_millis),
            terms_per_year: parse_var::<u8>("QUICKPLAN_TERMS_PER_YEAR")
                .filter(|t| *t > 0)
                .unwrap_or(d.terms_per_year),
            domain_strategy: parse_var("QUICKPLAN_DOMAIN_STRATEGY").unwrap_or(d.domain_strategy),
            tie_break: parse_var("QUICKPLAN_TIE_BREAK").unwrap_or(d.tie_break),
            log_level: parse_var("QUICKPLAN_LOG").unwrap_or(d.log_level),
        }
    }

    /// Opciones de planificación derivadas de la configuración.
    pub fn planner_options(&self) -> PlannerOptions {
        let mut limits = SearchLimits::unlimited();
        limits.max_nodes = self.max_nodes;
        limits.time_limit = self.time_limit;
        PlannerOptions {
            strategy: self.domain_strategy,
            terms_per_year: self.terms_per_year,
            limits,
            tie_break: self.tie_break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = AppConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8080");
        assert_eq!(c.default_horizon, 12);
        let opts = c.planner_options();
        assert_eq!(opts.limits.max_nodes, Some(DEFAULT_MAX_NODES));
        assert_eq!(opts.strategy, DomainStrategy::TermRestricted);
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("full".parse::<DomainStrategy>(), Ok(DomainStrategy::FullHorizon));
        assert_eq!("Term".parse::<DomainStrategy>(), Ok(DomainStrategy::TermRestricted));
        assert!("weekly".parse::<DomainStrategy>().is_err());
    }
}
