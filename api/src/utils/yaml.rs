use anyhow::{anyhow, Result};

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
/// Simple wrapper struct to implement Default trait for yaml_rust::Yaml
pub struct Yaml(pub yaml_rust::Yaml);

impl Default for Yaml {
    fn default() -> Self {
        Self(yaml_rust::Yaml::Null)
    }
}

impl AsRef<yaml_rust::Yaml> for Yaml {
    fn as_ref(&self) -> &yaml_rust::Yaml {
        &self.0
    }
}

impl AsMut<yaml_rust::Yaml> for Yaml {
    fn as_mut(&mut self) -> &mut yaml_rust::Yaml {
        &mut self.0
    }
}

/// Get a boolean option, error if it is missing
///
/// Besides YAML booleans, `1`, `yes`, `true` and `on` in any case read as true.
/// Any other present string or integer reads as false.
pub fn get_boolean_without_default(doc: &yaml_rust::Yaml, key: &str) -> Result<bool> {
    match &doc[key] {
        yaml_rust::Yaml::Boolean(b) => Ok(*b),
        yaml_rust::Yaml::Integer(i) => Ok(*i == 1),
        yaml_rust::Yaml::String(s) => Ok(matches!(
            s.to_ascii_lowercase().as_str(),
            "1" | "yes" | "true" | "on"
        )),
        yaml_rust::Yaml::BadValue => Err(anyhow!("Option {} not found", key)),
        _ => Err(anyhow!("Wrong value type for {}, expecting boolean", key)),
    }
}

/// Get an integer option within `min..=max`, error if it is missing or out of range
pub fn get_integer_without_default(
    doc: &yaml_rust::Yaml,
    key: &str,
    min: i64,
    max: i64,
) -> Result<i64> {
    match doc[key] {
        yaml_rust::Yaml::Integer(i) if (min..=max).contains(&i) => Ok(i),
        yaml_rust::Yaml::Integer(i) => Err(anyhow!(
            "Option {} value {} is out of {}..={}",
            key,
            i,
            min,
            max
        )),
        yaml_rust::Yaml::BadValue => Err(anyhow!("Option {} not found", key)),
        _ => Err(anyhow!("Wrong value type for {}, expecting integer", key)),
    }
}

pub fn get_integer(doc: &yaml_rust::Yaml, key: &str, default: i64, min: i64, max: i64) -> i64 {
    get_integer_without_default(doc, key, min, max).unwrap_or_else(|e| {
        match doc[key] {
            yaml_rust::Yaml::BadValue => log::debug!("{}, using {}", e, default),
            _ => log::warn!("{}, using {}", e, default),
        }
        default
    })
}
