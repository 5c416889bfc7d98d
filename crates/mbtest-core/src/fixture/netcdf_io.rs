//! Writing and reading the fixture's NetCDF container.

use super::{
    PhotoRateSeries, CHANNEL_NAMES, CHANNEL_UNITS, TIME_DIMENSION, TIME_UNITS, TIME_VARIABLE,
    UNITS_ATTRIBUTE,
};
use crate::errors::{FixtureError, FixtureResult};
use crate::parameters::PhotoRateParameters;
use netcdf::AttributeValue;
use std::panic::Location;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Attach the failing operation and the call site to a NetCDF error.
trait NetcdfContext<T> {
    fn context(self, operation: impl Into<String>) -> FixtureResult<T>;
}

impl<T> NetcdfContext<T> for Result<T, netcdf::Error> {
    #[track_caller]
    fn context(self, operation: impl Into<String>) -> FixtureResult<T> {
        let location = Location::caller();
        self.map_err(|source| FixtureError::Netcdf {
            operation: operation.into(),
            file: location.file(),
            line: location.line(),
            source,
        })
    }
}

/// Outcome of [`write_photo_rates`].
#[derive(Debug, Clone, PartialEq)]
pub struct WriteSummary {
    pub path: PathBuf,
    /// Number of records along the unlimited dimension
    pub records: usize,
    /// Number of records that fell inside the active window
    pub active_records: usize,
}

/// Variables in file order with their units.
fn schema() -> impl Iterator<Item = (&'static str, &'static str)> {
    std::iter::once((TIME_VARIABLE, TIME_UNITS))
        .chain(CHANNEL_NAMES.into_iter().map(|name| (name, CHANNEL_UNITS)))
}

/// Create the fixture file described by `parameters`, replacing any existing file.
///
/// The dimension, variables and `units` attributes are defined first, then
/// every sample is written to the next slot of the unlimited dimension as it is
/// generated.
pub fn write_photo_rates(parameters: &PhotoRateParameters) -> FixtureResult<WriteSummary> {
    let series = PhotoRateSeries::new(parameters)?;
    let window = series.window();
    let path = parameters.output.as_path();
    debug!(
        path = %path.display(),
        dataset_start = series.dataset_start(),
        window_start = window.start,
        window_stop = window.stop,
        records = series.len(),
        "Writing photolysis-rate fixture"
    );

    // Classic format, clobbering any existing file
    let mut file = netcdf::create_with(path, netcdf::Options::empty()).context("create file")?;
    file.add_unlimited_dimension(TIME_DIMENSION)
        .context(format!("define dimension '{TIME_DIMENSION}'"))?;

    for (name, units) in schema() {
        let mut variable = file
            .add_variable::<f64>(name, &[TIME_DIMENSION])
            .context(format!("define variable '{name}'"))?;
        variable
            .put_attribute(UNITS_ATTRIBUTE, units)
            .context(format!("assign units of '{name}'"))?;
    }

    let mut records = 0;
    let mut active_records = 0;
    for sample in series {
        if window.contains(sample.time) {
            active_records += 1;
        }
        let values = std::iter::once(sample.time).chain(sample.rates.values());
        for ((name, _), value) in schema().zip(values) {
            file.variable_mut(name)
                .ok_or_else(|| FixtureError::MissingVariable(name.to_string()))?
                .put_value(value, [sample.index])
                .context(format!("write record {} of '{name}'", sample.index))?;
        }
        records += 1;
    }

    info!(
        path = %path.display(),
        records,
        active_records,
        "Wrote photolysis-rate fixture"
    );
    Ok(WriteSummary {
        path: path.to_path_buf(),
        records,
        active_records,
    })
}

/// A variable read back from a fixture file.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub units: String,
    pub values: Vec<f64>,
}

/// Contents of a fixture file.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoRateTable {
    /// Variables in file order: `time` followed by the rate channels
    pub variables: Vec<Variable>,
}

impl PhotoRateTable {
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn time(&self) -> Option<&Variable> {
        self.get(TIME_VARIABLE)
    }

    /// Number of records along the time axis.
    pub fn len(&self) -> usize {
        self.time().map_or(0, |v| v.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read a fixture file back, checking that it has the expected layout.
pub fn read_photo_rates(path: impl AsRef<Path>) -> FixtureResult<PhotoRateTable> {
    let path = path.as_ref();
    let file = netcdf::open(path).context("open file")?;

    let dimension = file
        .dimension(TIME_DIMENSION)
        .ok_or_else(|| FixtureError::MissingDimension(TIME_DIMENSION.to_string()))?;
    if !dimension.is_unlimited() {
        return Err(FixtureError::LimitedDimension(TIME_DIMENSION.to_string()));
    }

    let mut variables = Vec::new();
    for (name, _) in schema() {
        let variable = file
            .variable(name)
            .ok_or_else(|| FixtureError::MissingVariable(name.to_string()))?;
        let units = match variable.attribute(UNITS_ATTRIBUTE).map(|a| a.value()) {
            Some(Ok(AttributeValue::Str(units))) => units,
            _ => return Err(FixtureError::MissingUnits(name.to_string())),
        };
        let values = variable
            .get_values::<f64, _>(..)
            .context(format!("read variable '{name}'"))?;
        variables.push(Variable {
            name: name.to_string(),
            units,
            values,
        });
    }
    debug!(path = %path.display(), records = dimension.len(), "Read photolysis-rate fixture");

    Ok(PhotoRateTable { variables })
}

/// Re-read a freshly written fixture and check every variable holds the
/// number of records that were written.
pub fn verify_photo_rates(summary: &WriteSummary) -> FixtureResult<PhotoRateTable> {
    let table = read_photo_rates(&summary.path)?;
    for variable in &table.variables {
        if variable.values.len() != summary.records {
            return Err(FixtureError::RecordCount {
                path: format!("{}:{}", summary.path.display(), variable.name),
                expected: summary.records,
                found: variable.values.len(),
            });
        }
    }
    Ok(table)
}
