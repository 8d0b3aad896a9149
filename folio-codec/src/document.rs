//! The configuration document: a pretty-printed JSON object with `colors`,
//! `darkMode`, `components`, `exportDate` and `version`.

use crate::{CodecError, CodecResult};
use chrono::{DateTime, SecondsFormat, Utc};
use folio_model::{Colors, ComponentRecord, Configuration, FieldMap, Settings};
use folio_types::{ComponentId, ComponentType, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Version tag written into every exported document.
pub const FORMAT_VERSION: &str = "1.0";

const SUPPORTED_MAJOR: &str = "1";

#[derive(Serialize)]
struct ExportDocument<'a> {
    #[serde(flatten)]
    configuration: &'a Configuration,
    #[serde(rename = "exportDate")]
    export_date: String,
    version: &'static str,
}

#[derive(Deserialize)]
struct ImportDocument {
    colors: Colors,
    #[serde(rename = "darkMode", default)]
    dark_mode: Option<bool>,
    components: Vec<ImportedRecord>,
}

#[derive(Deserialize)]
struct ImportedRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type")]
    component_type: ComponentType,
    #[serde(default)]
    data: FieldMap,
    #[serde(default)]
    order: Option<i64>,
    #[serde(default)]
    timestamp: Option<Timestamp>,
    #[serde(rename = "lastModified", default)]
    last_modified: Option<Timestamp>,
}

/// Serializes a configuration, stamping it with the export time and format version.
pub fn encode(configuration: &Configuration, exported_at: DateTime<Utc>) -> CodecResult<String> {
    let document = ExportDocument {
        configuration,
        export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        version: FORMAT_VERSION,
    };
    let text = serde_json::to_string_pretty(&document).map_err(CodecError::Serialize)?;
    debug!(
        "Encoded configuration with {} components",
        configuration.components.len()
    );
    Ok(text)
}

/// Parses and validates a document.
///
/// Fails with [`CodecError::Parse`] if the text is not JSON and with
/// [`CodecError::InvalidFormat`] if `colors` or `components` is missing or
/// any entry is malformed. Records without an id get one generated from
/// `now`; records without a timestamp are stamped with `now`.
pub fn decode(text: &str, now: Timestamp) -> CodecResult<Configuration> {
    let value: Value = serde_json::from_str(text).map_err(CodecError::Parse)?;
    validate_shape(&value)?;

    let document: ImportDocument =
        serde_json::from_value(value).map_err(|e| CodecError::InvalidFormat(e.to_string()))?;

    let settings = Settings {
        colors: document.colors,
        dark_mode: document
            .dark_mode
            .unwrap_or_else(|| Settings::default().dark_mode),
    };

    let components = document
        .components
        .into_iter()
        .map(|imported| into_record(imported, now))
        .collect::<Vec<_>>();

    debug!("Decoded configuration with {} components", components.len());
    Ok(Configuration::new(settings, components))
}

/// Conventional file name for an export made at the given time.
pub fn export_filename(exported_at: DateTime<Utc>) -> String {
    format!("portfolio-config-{}.json", exported_at.format("%Y-%m-%d"))
}

fn validate_shape(value: &Value) -> CodecResult<()> {
    let Some(object) = value.as_object() else {
        return Err(CodecError::InvalidFormat(
            "document must be a JSON object".into(),
        ));
    };
    match object.get("colors") {
        Some(Value::Object(_)) => {}
        Some(_) => return Err(CodecError::InvalidFormat("`colors` must be an object".into())),
        None => return Err(CodecError::InvalidFormat("missing `colors`".into())),
    }
    match object.get("components") {
        Some(Value::Array(_)) => {}
        Some(_) => {
            return Err(CodecError::InvalidFormat(
                "`components` must be an array".into(),
            ));
        }
        None => return Err(CodecError::InvalidFormat("missing `components`".into())),
    }
    if let Some(version) = object.get("version") {
        let version = version
            .as_str()
            .ok_or_else(|| CodecError::InvalidFormat("`version` must be a string".into()))?;
        if version.split('.').next() != Some(SUPPORTED_MAJOR) {
            return Err(CodecError::InvalidFormat(format!(
                "unsupported version {version}"
            )));
        }
    }
    Ok(())
}

fn into_record(imported: ImportedRecord, now: Timestamp) -> ComponentRecord {
    let id = match imported.id.as_deref().map(ComponentId::parse) {
        Some(Ok(id)) => id,
        Some(Err(_)) | None => {
            let id = ComponentId::generate(now);
            warn!("Imported {} without an id, assigned {}", imported.component_type, id);
            id
        }
    };
    ComponentRecord {
        id,
        component_type: imported.component_type,
        data: imported.data,
        order: imported.order,
        created_at: imported.timestamp.unwrap_or(now),
        modified_at: imported.last_modified,
    }
}
