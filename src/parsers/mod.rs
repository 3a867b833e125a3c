//! Parsers for user input and the flight CSV

mod flights;
mod year;

pub use flights::{decode_latin1, FlightCsvParser, ParsedFlights};
pub use year::parse_year;
