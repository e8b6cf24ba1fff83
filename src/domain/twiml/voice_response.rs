//! Call-control markup returned to the telephony provider

use std::fmt::Write as _;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Recording mode for a `<Dial>`
pub const RECORD_FROM_ANSWER: &str = "record-from-answer";

/// A SIP endpoint inside a `<Dial>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sip {
    pub uri: String,
    pub status_callback: Option<String>,
    pub status_callback_events: Vec<String>,
}

impl Sip {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            status_callback: None,
            status_callback_events: Vec::new(),
        }
    }

    /// Ask the provider to call `url` when any of `events` happens on this leg
    pub fn status_callback(mut self, url: impl Into<String>, events: &[&str]) -> Self {
        self.status_callback = Some(url.into());
        self.status_callback_events = events.iter().map(|e| (*e).to_string()).collect();
        self
    }
}

/// Ring one or more endpoints at once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dial {
    pub record: Option<String>,
    pub action: Option<String>,
    pub sips: Vec<Sip>,
}

impl Dial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(mut self, mode: impl Into<String>) -> Self {
        self.record = Some(mode.into());
        self
    }

    /// URL the provider requests once the dialed call ends
    pub fn action(mut self, url: impl Into<String>) -> Self {
        self.action = Some(url.into());
        self
    }

    pub fn sip(mut self, sip: Sip) -> Self {
        self.sips.push(sip);
        self
    }
}

/// A single instruction in the response document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Say {
        text: String,
        language: Option<String>,
    },
    Dial(Dial),
    Hangup,
}

/// A complete `<Response>` document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceResponse {
    verbs: Vec<Verb>,
}

impl VoiceResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn say(mut self, text: impl Into<String>, language: Option<&str>) -> Self {
        self.verbs.push(Verb::Say {
            text: text.into(),
            language: language.map(str::to_string),
        });
        self
    }

    pub fn dial(mut self, dial: Dial) -> Self {
        self.verbs.push(Verb::Dial(dial));
        self
    }

    pub fn hangup(mut self) -> Self {
        self.verbs.push(Verb::Hangup);
        self
    }

    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    /// The `<Dial>` verb, if the response contains one
    pub fn find_dial(&self) -> Option<&Dial> {
        self.verbs.iter().find_map(|v| match v {
            Verb::Dial(dial) => Some(dial),
            _ => None,
        })
    }

    /// Serialize to the provider's XML format
    pub fn render(&self) -> String {
        let mut out = String::from(XML_DECLARATION);
        out.push_str("<Response>");
        for verb in &self.verbs {
            render_verb(&mut out, verb);
        }
        out.push_str("</Response>");
        out
    }
}

fn render_verb(out: &mut String, verb: &Verb) {
    match verb {
        Verb::Say { text, language } => {
            out.push_str("<Say");
            if let Some(language) = language {
                push_attr(out, "language", language);
            }
            out.push('>');
            out.push_str(&escape(text));
            out.push_str("</Say>");
        }
        Verb::Dial(dial) => {
            out.push_str("<Dial");
            if let Some(action) = &dial.action {
                push_attr(out, "action", action);
            }
            if let Some(record) = &dial.record {
                push_attr(out, "record", record);
            }
            out.push('>');
            for sip in &dial.sips {
                out.push_str("<Sip");
                if let Some(callback) = &sip.status_callback {
                    push_attr(out, "statusCallback", callback);
                }
                if !sip.status_callback_events.is_empty() {
                    push_attr(
                        out,
                        "statusCallbackEvent",
                        &sip.status_callback_events.join(" "),
                    );
                }
                out.push('>');
                out.push_str(&escape(&sip.uri));
                out.push_str("</Sip>");
            }
            out.push_str("</Dial>");
        }
        Verb::Hangup => out.push_str("<Hangup/>"),
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, r#" {}="{}""#, name, escape(value));
}

fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
