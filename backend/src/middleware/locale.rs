use axum::{
    extract::Request,
    http::header::{ACCEPT_LANGUAGE, CONTENT_LANGUAGE},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};

use crate::i18n::Locale;

/// Stores the negotiated [`Locale`] in the request extensions
/// and echoes it in `Content-Language`.
pub async fn detect_locale(mut request: Request, next: Next) -> Response {
    let accept_language = request
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    let locale = Locale::detect(request.uri().query(), accept_language);
    request.extensions_mut().insert(locale);

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(CONTENT_LANGUAGE, HeaderValue::from_static(locale.into()));
    response
}
