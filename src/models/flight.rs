use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// One row of the airline on-time performance table.
///
/// Only the columns the dashboard reads are kept; everything else in the
/// source file is skipped during deserialization. The diversion columns are
/// identifier-like and stay text so codes such as `0A1` survive untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    #[serde(rename = "Year")]
    pub year: i32,

    #[serde(rename = "Month")]
    pub month: u32,

    #[serde(rename = "Reporting_Airline")]
    pub reporting_airline: String,

    #[serde(rename = "CarrierDelay", default)]
    pub carrier_delay: Option<f64>,

    #[serde(rename = "WeatherDelay", default)]
    pub weather_delay: Option<f64>,

    #[serde(rename = "NASDelay", default)]
    pub nas_delay: Option<f64>,

    #[serde(rename = "SecurityDelay", default)]
    pub security_delay: Option<f64>,

    #[serde(rename = "LateAircraftDelay", default)]
    pub late_aircraft_delay: Option<f64>,

    #[serde(rename = "Div1Airport", default)]
    pub div1_airport: Option<String>,

    #[serde(rename = "Div1TailNum", default)]
    pub div1_tail_num: Option<String>,

    #[serde(rename = "Div2Airport", default)]
    pub div2_airport: Option<String>,

    #[serde(rename = "Div2TailNum", default)]
    pub div2_tail_num: Option<String>,
}

impl FlightRecord {
    pub fn new(year: i32, month: u32, reporting_airline: String) -> Self {
        Self {
            year,
            month,
            reporting_airline,
            carrier_delay: None,
            weather_delay: None,
            nas_delay: None,
            security_delay: None,
            late_aircraft_delay: None,
            div1_airport: None,
            div1_tail_num: None,
            div2_airport: None,
            div2_tail_num: None,
        }
    }

    /// Delay in minutes recorded for `cause`, if any.
    pub fn delay(&self, cause: DelayCause) -> Option<f64> {
        match cause {
            DelayCause::Carrier => self.carrier_delay,
            DelayCause::Weather => self.weather_delay,
            DelayCause::Nas => self.nas_delay,
            DelayCause::Security => self.security_delay,
            DelayCause::LateAircraft => self.late_aircraft_delay,
        }
    }

    pub fn set_delay(&mut self, cause: DelayCause, minutes: Option<f64>) {
        let slot = match cause {
            DelayCause::Carrier => &mut self.carrier_delay,
            DelayCause::Weather => &mut self.weather_delay,
            DelayCause::Nas => &mut self.nas_delay,
            DelayCause::Security => &mut self.security_delay,
            DelayCause::LateAircraft => &mut self.late_aircraft_delay,
        };
        *slot = minutes;
    }

    pub fn is_diverted(&self) -> bool {
        self.div1_airport.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// The five delay-cause columns reported per flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DelayCause {
    Carrier,
    Weather,
    Nas,
    Security,
    LateAircraft,
}

impl DelayCause {
    /// Display order of the dashboard charts.
    pub const ALL: [DelayCause; 5] = [
        DelayCause::Carrier,
        DelayCause::Weather,
        DelayCause::Nas,
        DelayCause::Security,
        DelayCause::LateAircraft,
    ];

    /// Column name in the source CSV.
    pub fn column(&self) -> &'static str {
        match self {
            DelayCause::Carrier => "CarrierDelay",
            DelayCause::Weather => "WeatherDelay",
            DelayCause::Nas => "NASDelay",
            DelayCause::Security => "SecurityDelay",
            DelayCause::LateAircraft => "LateAircraftDelay",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DelayCause::Carrier => "carrier",
            DelayCause::Weather => "weather",
            DelayCause::Nas => "NAS",
            DelayCause::Security => "security",
            DelayCause::LateAircraft => "late aircraft",
        }
    }

    /// Id of the page element the chart for this cause is drawn into.
    pub fn element_id(&self) -> &'static str {
        match self {
            DelayCause::Carrier => "carrier-plot",
            DelayCause::Weather => "weather-plot",
            DelayCause::Nas => "nas-plot",
            DelayCause::Security => "security-plot",
            DelayCause::LateAircraft => "late-plot",
        }
    }

    pub fn chart_title(&self) -> String {
        format!("Average {} delay time (minutes) by airline", self.label())
    }
}

pub struct FlightRecordBuilder {
    year: Option<i32>,
    month: Option<u32>,
    reporting_airline: Option<String>,
    delays: [Option<f64>; 5],
}

impl Default for FlightRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FlightRecordBuilder {
    pub fn new() -> Self {
        Self {
            year: None,
            month: None,
            reporting_airline: None,
            delays: [None; 5],
        }
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn airline(mut self, code: &str) -> Self {
        self.reporting_airline = Some(code.to_string());
        self
    }

    pub fn delay(mut self, cause: DelayCause, minutes: f64) -> Self {
        self.delays[cause as usize] = Some(minutes);
        self
    }

    /// Sets all five causes at once, in `DelayCause::ALL` order.
    pub fn delays(mut self, minutes: [Option<f64>; 5]) -> Self {
        self.delays = minutes;
        self
    }

    pub fn build(self) -> Result<FlightRecord> {
        let mut record = FlightRecord::new(
            self.year
                .ok_or_else(|| DashboardError::MissingData("Year".to_string()))?,
            self.month
                .ok_or_else(|| DashboardError::MissingData("Month".to_string()))?,
            self.reporting_airline
                .ok_or_else(|| DashboardError::MissingData("Reporting_Airline".to_string()))?,
        );

        for (cause, minutes) in DelayCause::ALL.into_iter().zip(self.delays) {
            record.set_delay(cause, minutes);
        }

        Ok(record)
    }
}
