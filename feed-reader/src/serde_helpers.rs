//! CSV cell formats that serde does not read out of the box
use serde::de::{self, Deserialize, Deserializer};

/// `YYYYMMDD` dates, use with `#[serde(with = "date_format")]`
pub mod date_format {
    use chrono::NaiveDate;
    use serde::de::{self, Deserialize, Deserializer};
    use serde::ser::Serializer;

    const FORMAT: &str = "%Y%m%d";

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let cell = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&cell, FORMAT)
            .map_err(|e| de::Error::custom(format!("invalid date `{cell}`: {e}")))
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }
}

/// `0`/`1` flags, use with `#[serde(with = "flag")]`
pub mod flag {
    use serde::de::{self, Deserialize, Deserializer};
    use serde::ser::Serializer;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let cell = String::deserialize(deserializer)?;
        match cell.as_str() {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(de::Error::invalid_value(
                de::Unexpected::Str(other),
                &"0 or 1",
            )),
        }
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }
}

/// Blank cells and missing columns both read as `None`
pub fn empty_as_none<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    let cell = Option::<String>::deserialize(de)?;
    Ok(cell.filter(|s| !s.trim().is_empty()))
}

pub fn optional_float<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    match empty_as_none(de)? {
        None => Ok(None),
        Some(cell) => cell.trim().parse().map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Serialize, Deserialize)]
    struct Row {
        #[serde(with = "date_format")]
        date: NaiveDate,
        #[serde(with = "flag")]
        monday: bool,
        #[serde(default, deserialize_with = "optional_float", skip_serializing)]
        lat: Option<f64>,
    }

    fn parse(data: &str) -> Result<Row, csv::Error> {
        csv::Reader::from_reader(data.as_bytes())
            .deserialize()
            .next()
            .unwrap()
    }

    #[test]
    fn dates_flags_and_floats() {
        let row = parse("date,monday,lat\n20240115,1,45.5\n").unwrap();
        assert_eq!(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), row.date);
        assert!(row.monday);
        assert_eq!(Some(45.5), row.lat);

        let row = parse("date,monday,lat\n20240115,0,\n").unwrap();
        assert!(!row.monday);
        assert_eq!(None, row.lat);
    }

    #[test]
    fn invalid_cells() {
        assert!(parse("date,monday,lat\n2024-01-15,1,\n").is_err());
        assert!(parse("date,monday,lat\n20240115,yes,\n").is_err());
    }

    #[test]
    fn dates_and_flags_are_written_back_as_read() {
        let row = parse("date,monday,lat\n20240115,1,\n").unwrap();
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(row).unwrap();
        let written = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!("date,monday\n20240115,1\n", written);
    }
}
