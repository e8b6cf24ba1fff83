//! Call domain module

mod call_status;
mod destination;
mod sip_address;

pub use call_status::CallStatus;
pub use destination::{Destination, DestinationRoster};
pub use sip_address::SipAddress;
