pub mod benchmarks;
pub mod calculator;
pub mod config;
pub mod format;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod input;
pub mod presets;
pub mod reference;
pub mod report;
pub mod roster;
pub mod session;

pub use benchmarks::{BenchmarkZone, Benchmarks, DEFAULT_JPY_PER_USD, MarginRating};
pub use calculator::{
    CalculatorOutput, CostLine, DailyProfitTrend, DashboardFigures, calculate, cost_breakdown,
    direct_cost_ratio,
};
pub use config::{
    CalculatorConfig, ConfigError, ConfigResult, Settings, load_config_from_json,
    load_reference_from_csv, save_config_to_json, save_reference_to_csv, validate_config,
};
pub use format::{DisplayCurrency, format_currency, format_percent};
pub use input::{
    CalculatorInput, CostBucket, DirectCosts, InputField, ProjectDetails, ProjectType,
    coerce_amount, coerce_value,
};
pub use presets::{JobPreset, PresetCatalogue};
pub use reference::{
    ReferenceJob, ReferenceRow, ReferenceSummary, ReferenceTable, ReferenceTier,
};
pub use roster::{TeamMember, TeamRoster};
pub use session::{CalculatorSession, SessionError, ensure_known_members};
