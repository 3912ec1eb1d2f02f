pub mod ticket;

pub use ticket::{Airline, CabinClass, Currency, FlightLeg, GrandTotal, TicketRecord};
