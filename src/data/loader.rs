use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::error::LoadError;
use super::model::{MissionRecord, MissionTable, Missions};

/// Columns every dataset must carry. `Time` and `Price` are optional.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Company",
    "Location",
    "Date",
    "Rocket",
    "Mission",
    "RocketStatus",
    "MissionStatus",
];

/// Full column layout, in the order written by [`write_csv`].
pub const COLUMNS: [&str; 9] = [
    "Company",
    "Location",
    "Date",
    "Time",
    "Rocket",
    "Mission",
    "RocketStatus",
    "Price",
    "MissionStatus",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a mission table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row `Company,Location,Date,Time,Rocket,Mission,RocketStatus,Price,MissionStatus`
/// * `.json` – `[{ "Company": "...", "Date": "1957-10-04", ... }, ...]`
pub fn load_file(path: &Path) -> Result<MissionTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let file = File::open(path).map_err(|source| LoadError::DatasetUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let table = match ext.as_str() {
        "csv" => read_csv(file)?,
        "json" => read_json(file)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };
    log::info!("Loaded {} missions from {}", table.len(), path.display());
    Ok(table)
}

// ---------------------------------------------------------------------------
// Raw rows – the on-disk shape, all text
// ---------------------------------------------------------------------------

/// One row exactly as stored in the dataset, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMission {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time", default)]
    pub time: Option<String>,
    #[serde(rename = "Rocket")]
    pub rocket: String,
    #[serde(rename = "Mission")]
    pub mission: String,
    #[serde(rename = "RocketStatus")]
    pub rocket_status: String,
    #[serde(rename = "Price", default)]
    pub price: Option<String>,
    #[serde(rename = "MissionStatus")]
    pub mission_status: String,
}

impl RawMission {
    /// Validate and type the row. `row` is the 1-based data row number.
    pub fn into_record(self, row: usize) -> Result<MissionRecord, LoadError> {
        let fail = |message: String| LoadError::schema(Some(row), message);

        let company = self.company.trim().to_string();
        if company.is_empty() {
            return Err(fail("empty Company".to_string()));
        }

        let launch_date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|e| fail(format!("unparseable Date '{}': {e}", self.date)))?;

        let launch_time = match non_blank(self.time.as_deref()) {
            Some(t) => Some(parse_time(t).ok_or_else(|| fail(format!("unparseable Time '{t}'")))?),
            None => None,
        };

        let price = match non_blank(self.price.as_deref()) {
            Some(p) => Some(
                p.replace(',', "")
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| fail(format!("unparseable Price '{p}'")))?,
            ),
            None => None,
        };

        Ok(MissionRecord {
            company,
            location: self.location,
            launch_date,
            launch_time,
            rocket: self.rocket,
            mission_name: self.mission,
            rocket_status: self.rocket_status.trim().parse().map_err(fail)?,
            price,
            mission_status: self.mission_status.trim().parse().map_err(fail)?,
        })
    }
}

impl From<&MissionRecord> for RawMission {
    fn from(m: &MissionRecord) -> Self {
        RawMission {
            company: m.company.clone(),
            location: m.location.clone(),
            date: m.launch_date.format(DATE_FORMAT).to_string(),
            time: m.launch_time.map(|t| t.format("%H:%M:%S").to_string()),
            rocket: m.rocket.clone(),
            mission: m.mission_name.clone(),
            rocket_status: m.rocket_status.to_string(),
            price: m.price.map(|p| p.to_string()),
            mission_status: m.mission_status.to_string(),
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

fn table_from_rows(
    rows: impl Iterator<Item = Result<RawMission, LoadError>>,
) -> Result<MissionTable, LoadError> {
    let records = rows
        .enumerate()
        .map(|(i, raw)| raw.and_then(|raw| raw.into_record(i + 1)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MissionTable::new(records))
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Read a CSV dataset from any reader.
pub fn read_csv<R: Read>(reader: R) -> Result<MissionTable, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h.trim() == **col))
    {
        return Err(LoadError::schema(
            None,
            format!("missing required column '{missing}'"),
        ));
    }

    table_from_rows(
        reader
            .deserialize::<RawMission>()
            .map(|row| row.map_err(LoadError::from)),
    )
}

/// Write `missions` as CSV in the same layout [`read_csv`] accepts.
pub fn write_csv<W, M>(writer: W, missions: &M) -> Result<(), LoadError>
where
    W: io::Write,
    M: Missions + ?Sized,
{
    // header written by hand so an empty export still reloads
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(COLUMNS)?;
    for m in missions.iter_missions() {
        writer.serialize(RawMission::from(m))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write `missions` to a CSV file at `path`.
pub fn save_csv<M: Missions + ?Sized>(path: &Path, missions: &M) -> Result<(), LoadError> {
    let file = File::create(path).map_err(|source| LoadError::DatasetUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(file, missions)?;
    log::info!("Exported {} missions to {}", missions.mission_count(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Company": "RVSN USSR",
///     "Location": "Site 1/5, Baikonur Cosmodrome, Kazakhstan",
///     "Date": "1957-10-04",
///     "Time": "19:28:00",
///     "Rocket": "Sputnik 8K71PS",
///     "Mission": "Sputnik-1",
///     "RocketStatus": "Retired",
///     "Price": null,
///     "MissionStatus": "Success"
///   },
///   ...
/// ]
/// ```
pub fn read_json<R: Read>(reader: R) -> Result<MissionTable, LoadError> {
    let root: JsonValue = serde_json::from_reader(reader)?;
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::schema(None, "expected top-level JSON array"))?;

    table_from_rows(records.iter().enumerate().map(|(i, rec)| {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::schema(Some(i + 1), "row is not a JSON object"))?;
        raw_from_json(obj, i + 1)
    }))
}

fn raw_from_json(obj: &Map<String, JsonValue>, row: usize) -> Result<RawMission, LoadError> {
    let required = |key: &str| {
        json_text(obj.get(key))
            .ok_or_else(|| LoadError::schema(Some(row), format!("missing required field '{key}'")))
    };
    Ok(RawMission {
        company: required("Company")?,
        location: required("Location")?,
        date: required("Date")?,
        time: json_text(obj.get("Time")),
        rocket: required("Rocket")?,
        mission: required("Mission")?,
        rocket_status: required("RocketStatus")?,
        price: json_text(obj.get("Price")),
        mission_status: required("MissionStatus")?,
    })
}

fn json_text(val: Option<&JsonValue>) -> Option<String> {
    match val? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
