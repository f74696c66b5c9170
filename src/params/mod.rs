//! Household financial parameters, validation, presets and persistence

mod data;
mod validate;
mod presets;
pub mod loader;

pub use data::{
    ParameterSet, MarriageCosts, ChildCostProfile, MARRIAGE_COST_KEYS, CHILD_COST_KEYS,
    INFANT_YEARS,
};
pub use validate::{ParameterDocument, ParameterError, MAX_AMOUNT, MAX_RATE_PERCENT, MIN_RATE_PERCENT};
pub use presets::{Preset, UnknownPreset};
pub use loader::{
    LoadError, load_source, load_parameters, load_parameters_from_reader, save_parameters,
    save_parameters_to_writer, load_parameter_sets_csv, load_parameter_sets_csv_from_reader,
    DEFAULT_CONFIG_PATH,
};
