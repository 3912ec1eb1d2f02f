use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BAGGAGE: &str = "2P Cabin: 5-7Kg";

/// Carriers the agency issues tickets for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Airline {
    #[default]
    #[serde(rename = "Air Cairo")]
    AirCairo,
    #[serde(rename = "Egyptair")]
    Egyptair,
    #[serde(rename = "AlMasria Universal Airlines")]
    AlMasria,
    #[serde(rename = "Nesma Airline")]
    Nesma,
    #[serde(rename = "Nile Air")]
    NileAir,
    #[serde(rename = "FLYNAS")]
    Flynas,
    #[serde(rename = "Saudi Arabian")]
    SaudiArabian,
    #[serde(rename = "Flyadeal")]
    Flyadeal,
    #[serde(rename = "Emirates")]
    Emirates,
    #[serde(rename = "Ethiopian")]
    Ethiopian,
    #[serde(rename = "Etihad")]
    Etihad,
    #[serde(rename = "Gulf Air")]
    GulfAir,
    #[serde(rename = "Jazeera Airways")]
    JazeeraAirways,
    #[serde(rename = "Oman Air")]
    OmanAir,
    #[serde(rename = "Qatar")]
    Qatar,
    #[serde(rename = "Royal Jordanian")]
    RoyalJordanian,
    #[serde(rename = "Turkish Airlines")]
    TurkishAirlines,
}

impl Airline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Airline::AirCairo => "Air Cairo",
            Airline::Egyptair => "Egyptair",
            Airline::AlMasria => "AlMasria Universal Airlines",
            Airline::Nesma => "Nesma Airline",
            Airline::NileAir => "Nile Air",
            Airline::Flynas => "FLYNAS",
            Airline::SaudiArabian => "Saudi Arabian",
            Airline::Flyadeal => "Flyadeal",
            Airline::Emirates => "Emirates",
            Airline::Ethiopian => "Ethiopian",
            Airline::Etihad => "Etihad",
            Airline::GulfAir => "Gulf Air",
            Airline::JazeeraAirways => "Jazeera Airways",
            Airline::OmanAir => "Oman Air",
            Airline::Qatar => "Qatar",
            Airline::RoyalJordanian => "Royal Jordanian",
            Airline::TurkishAirlines => "Turkish Airlines",
        }
    }
}

impl std::fmt::Display for Airline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CabinClass {
    #[default]
    Economy,
    #[serde(rename = "Business Class")]
    Business,
}

impl CabinClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            CabinClass::Economy => "Economy",
            CabinClass::Business => "Business Class",
        }
    }
}

impl std::fmt::Display for CabinClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    EGP,
    USD,
}

impl Currency {
    /// Prefix used on the rendered totals line.
    pub fn prefix(&self) -> &'static str {
        match self {
            Currency::EGP => "EGP ",
            Currency::USD => "$ ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrandTotal {
    pub amount: f64,
    pub currency: Currency,
}

/// One leg of the itinerary. Dates are ISO (`YYYY-MM-DD`), times are 24h
/// (`HH:MM`); the empty string means "not filled in yet".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightLeg {
    pub from: String,
    pub to: String,
    pub departure_date: String,
    pub departure_time: String,
    pub arrival_date: String,
    pub arrival_time: String,
    pub flight_number: String,
    pub terminal: String,
    pub arrival_terminal: String,
    pub class: CabinClass,
    pub airline: Airline,
    pub duration: String,
    pub remark: String,
}

impl FlightLeg {
    /// Elapsed wall-clock time between departure and arrival, formatted as
    /// `"{h}h {m}m"`. Returns the empty string when any of the four
    /// timestamp fields is missing or unparseable. The difference is taken
    /// as an absolute value, so reversed timestamps still yield a positive
    /// duration.
    pub fn computed_duration(&self) -> String {
        if self.departure_date.is_empty()
            || self.departure_time.is_empty()
            || self.arrival_date.is_empty()
            || self.arrival_time.is_empty()
        {
            return String::new();
        }

        let departure = combine(&self.departure_date, &self.departure_time);
        let arrival = combine(&self.arrival_date, &self.arrival_time);

        match (departure, arrival) {
            (Some(departure), Some(arrival)) => {
                let total = (arrival - departure).num_minutes().abs();
                format!("{}h {}m", total / 60, total % 60)
            }
            _ => String::new(),
        }
    }
}

fn combine(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .ok()?;
    Some(date.and_time(time))
}

/// A single editing session's ticket. Lives in memory only; its terminal
/// state is either "exported to document" or "submitted to the gateway".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketRecord {
    pub passenger_name: String,
    pub email: String,
    pub pnr: String,
    pub ticket_number: String,
    pub frequent_flyer_no: String,
    pub seat_no: String,
    pub meals: String,
    pub baggage: String,
    pub flights: Vec<FlightLeg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grand_total: Option<GrandTotal>,
}

impl Default for TicketRecord {
    fn default() -> Self {
        Self {
            passenger_name: String::new(),
            email: String::new(),
            pnr: String::new(),
            ticket_number: String::new(),
            frequent_flyer_no: String::new(),
            seat_no: String::new(),
            meals: String::new(),
            baggage: DEFAULT_BAGGAGE.to_string(),
            flights: vec![FlightLeg::default()],
            grand_total: None,
        }
    }
}

impl TicketRecord {
    /// Empty record with one default leg.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_flight(&mut self) {
        self.flights.push(FlightLeg::default());
    }

    /// Removes the leg at `index`. The record always keeps at least one leg.
    pub fn remove_flight(&mut self, index: usize) -> bool {
        if self.flights.len() > 1 && index < self.flights.len() {
            self.flights.remove(index);
            true
        } else {
            false
        }
    }

    /// Recomputes the derived duration of every leg. Preserve-if-set: a
    /// non-empty duration (operator-entered or previously derived) is never
    /// overwritten.
    pub fn refresh_durations(&mut self) {
        for leg in &mut self.flights {
            if leg.duration.is_empty() {
                leg.duration = leg.computed_duration();
            }
        }
    }

    /// File name used for the local document export.
    pub fn document_file_name(&self) -> String {
        format!("flight-ticket-{}.pdf", self.pnr)
    }
}
