//! Language negotiation for result messages.

use axum::extract::{FromRequestParts, Query};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use coursepilot_core::messages::Language;
use serde::Deserialize;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

/// Language result messages are rendered in.
///
/// Taken from `?lang=`, then `Accept-Language`, then the server default.
/// Unsupported values fall through to the next source instead of failing
/// the request.
#[derive(Debug, Clone, Copy)]
pub struct Lang(pub Language);

impl FromRequestParts<AppState> for Lang {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let from_query = Query::<LangQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.lang)
            .and_then(|code| code.parse().ok());

        let from_header = || {
            parts
                .headers
                .get(ACCEPT_LANGUAGE)
                .and_then(|v| v.to_str().ok())
                .and_then(Language::from_accept_language)
        };

        let language = from_query
            .or_else(from_header)
            .unwrap_or(state.config.default_lang);
        Ok(Lang(language))
    }
}
