use crate::error::Result;
use crate::models::FlightRecord;
use csv::{ReaderBuilder, Trim};
use encoding_rs::mem::decode_latin1;
use tracing::debug;

/// Parses the airline CSV export into `FlightRecord`s.
///
/// The export is ISO-8859-1: every byte maps to the code point of the same
/// value, so decoding never fails.
pub struct FlightReader {
    delimiter: u8,
}

impl FlightReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Decode and parse raw CSV bytes
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<Vec<FlightRecord>> {
        let text = decode_latin1(bytes);
        self.read_str(&text)
    }

    pub fn read_str(&self, text: &str) -> Result<Vec<FlightRecord>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut records = Vec::new();
        for result in reader.deserialize::<FlightRecord>() {
            records.push(result?);
        }

        debug!("Parsed {} flight records", records.len());
        Ok(records)
    }
}

impl Default for FlightReader {
    fn default() -> Self {
        Self::new()
    }
}
