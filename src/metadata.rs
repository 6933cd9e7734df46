use std::io::Write;

use csv::{StringRecord, WriterBuilder};

use crate::error::Result;

/// Single-row key/value header found at the top of every NSRDB file
/// (source, location id, time zone, elevation, ...). Keys keep file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    fields: Vec<(String, String)>,
}

impl Metadata {
    /// Pairs a header record with its value record. Missing values are
    /// empty, values beyond the last header are dropped.
    pub fn from_records(header: &StringRecord, values: &StringRecord) -> Self {
        let fields = header
            .iter()
            .enumerate()
            .map(|(i, k)| (k.trim().to_string(), values.get(i).unwrap_or("").trim().to_string()))
            .collect();
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// UTC offset in hours. Older downloads label it `Local Time Zone`.
    pub fn time_zone(&self) -> Option<f64> {
        self.get_f64("Time Zone")
            .or_else(|| self.get_f64("Local Time Zone"))
    }

    /// Site elevation in metres.
    pub fn elevation(&self) -> Option<f64> {
        self.get_f64("Elevation")
    }

    pub fn location_id(&self) -> Option<&str> {
        self.get("Location ID")
    }

    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().from_writer(out);
        wtr.write_record(self.keys())?;
        wtr.write_record(self.fields.iter().map(|(_, v)| v.as_str()))?;
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Metadata {
        let header = StringRecord::from(vec!["Source", "Location ID", "Time Zone", "Elevation", "Extra"]);
        let values = StringRecord::from(vec!["NSRDB", "128364", "-8", "12"]);
        Metadata::from_records(&header, &values)
    }

    #[test]
    fn typed_accessors() {
        let md = sample();
        assert_eq!(md.len(), 5);
        assert_eq!(md.location_id(), Some("128364"));
        assert_eq!(md.time_zone(), Some(-8.0));
        assert_eq!(md.elevation(), Some(12.0));
        assert_eq!(md.get("Extra"), Some(""));
        assert_eq!(md.get("Nope"), None);
    }

    #[test]
    fn local_time_zone_fallback() {
        let header = StringRecord::from(vec!["Local Time Zone"]);
        let values = StringRecord::from(vec!["-5"]);
        let md = Metadata::from_records(&header, &values);
        assert_eq!(md.time_zone(), Some(-5.0));
        assert_eq!(md.elevation(), None);
    }
}
