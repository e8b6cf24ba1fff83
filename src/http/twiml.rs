//! Call-control markup responses

use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::domain::twiml::VoiceResponse;

const XML_CONTENT_TYPE: &str = "application/xml";

/// A `VoiceResponse` rendered as an HTTP response
#[derive(Debug, Clone)]
pub struct Twiml(pub VoiceResponse);

impl IntoResponse for Twiml {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], self.0.render()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_xml_content_type() {
        let response = Twiml(VoiceResponse::new().hangup()).into_response();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            XML_CONTENT_TYPE
        );
    }
}
