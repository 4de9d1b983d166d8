mod error;
mod logging;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use error::RunnerError;
pub use logging::init_logging;

pub struct Environment<I = ()> {
    input_json: serde_json::Map<String, Value>,
    pub input: I,
    pub seed: u64,
    pub replicate: u64,
    pub log_level: LevelFilter,
    output: Value,
}

impl Environment {
    pub fn from_json(data: Value) -> Result<Self, RunnerError> {
        let mut input_json = data
            .get("input")
            .and_then(|v| v.as_object())
            .cloned()
            .unwrap_or_default();

        let seed = take_u64(&mut input_json, "seed")?;
        let replicate = take_u64(&mut input_json, "replicate")?;

        let log_level = match input_json.remove("log_level") {
            Some(Value::String(level)) => LevelFilter::from_str(&level)
                .map_err(|_| RunnerError::InvalidLogLevel(level.clone()))?,
            Some(other) => return Err(RunnerError::InvalidLogLevel(other.to_string())),
            None => LevelFilter::Info,
        };

        let output = data.get("output").cloned().unwrap_or(Value::Null);

        Ok(Self {
            input_json,
            input: (),
            seed,
            replicate,
            log_level,
            output,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, RunnerError> {
        if raw.trim().is_empty() {
            return Err(RunnerError::EmptyInput);
        }
        Self::from_json(serde_json::from_str(raw)?)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, RunnerError> {
        let data: Value = toml::from_str(raw)?;
        Self::from_json(data)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, RunnerError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        Self::from_json_str(&raw)
    }

    pub fn from_stdin() -> Result<Self, RunnerError> {
        Self::from_reader(io::stdin())
    }

    /// Reads a request document from disk. `.toml` files are parsed as
    /// TOML, anything else as JSON.
    pub fn from_path(path: &Path) -> Result<Self, RunnerError> {
        let raw = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&raw),
            _ => Self::from_json_str(&raw),
        }
    }

    pub fn with_input_type<I: DeserializeOwned>(self) -> Result<Environment<I>, RunnerError> {
        let input_value = Value::Object(self.input_json.clone());
        let input = serde_json::from_value(input_value).map_err(RunnerError::InvalidInput)?;
        Ok(Environment {
            input_json: self.input_json,
            input,
            seed: self.seed,
            replicate: self.replicate,
            log_level: self.log_level,
            output: self.output,
        })
    }
}

impl<I> Environment<I> {
    pub fn input_json(&self) -> &serde_json::Map<String, Value> {
        &self.input_json
    }

    pub fn output_dir(&self) -> Option<PathBuf> {
        let output = &self.output;

        if output.get("spec").and_then(|v| v.as_str()) == Some("filesystem") {
            return output
                .get("dir")
                .and_then(|v| v.as_str())
                .map(PathBuf::from);
        }

        // Profiled output falls back to the first profile without a default
        let profile = output
            .get("profile")
            .and_then(|v| v.as_object())
            .and_then(|profiles| profiles.get("default").or_else(|| profiles.values().next()))?;
        if profile.get("spec").and_then(|v| v.as_str()) == Some("filesystem") {
            return profile
                .get("dir")
                .and_then(|v| v.as_str())
                .map(PathBuf::from);
        }

        None
    }

    pub fn write_csv(
        &self,
        filename: &str,
        headers: &[&str],
        rows: &[Vec<String>],
    ) -> Result<Option<PathBuf>, RunnerError> {
        match self.output_dir() {
            Some(dir) => {
                fs::create_dir_all(&dir)?;
                let path = dir.join(filename);
                write_records(csv::Writer::from_path(&path)?, headers, rows)?;
                Ok(Some(path))
            }
            None => {
                write_records(csv::Writer::from_writer(io::stdout()), headers, rows)?;
                Ok(None)
            }
        }
    }
}

/// Reserved keys are optional, but must be unsigned integers when present.
fn take_u64(
    input_json: &mut serde_json::Map<String, Value>,
    key: &'static str,
) -> Result<u64, RunnerError> {
    match input_json.remove(key) {
        None => Ok(0),
        Some(value) => value
            .as_u64()
            .ok_or_else(|| RunnerError::InvalidReservedKey {
                key,
                value: value.to_string(),
            }),
    }
}

fn write_records<W: Write>(
    mut wtr: csv::Writer<W>,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<(), RunnerError> {
    wtr.write_record(headers)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
