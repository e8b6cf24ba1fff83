//! Call-control markup (TwiML) module

mod voice_response;

pub use voice_response::{Dial, Sip, Verb, VoiceResponse, RECORD_FROM_ANSWER};
