//! Response language negotiation and translated success messages.

use std::convert::Infallible;

use aide::OperationIo;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use strum::{AsRefStr, EnumString, IntoStaticStr};

/// Languages the API answers in
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, AsRefStr, EnumString, IntoStaticStr, OperationIo,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Arabic
    Ar,
}

/// Keys of the success message catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Health check succeeded
    Healthy,
    /// Chat answer generated
    ChatAnswered,
    /// Dashboard listing loaded
    DashboardLoaded,
    /// Company chart loaded
    ChartLoaded,
}

impl Locale {
    /// Resolves the locale of a request
    ///
    /// `lang` query parameter first, then the first supported `Accept-Language` tag.
    #[must_use]
    pub fn detect(query: Option<&str>, accept_language: Option<&str>) -> Self {
        query
            .and_then(lang_param)
            .and_then(Self::from_tag)
            .or_else(|| accept_language.and_then(Self::from_accept_language))
            .unwrap_or_default()
    }

    /// Matches a language tag such as `ar-SA` on its primary subtag
    fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next()?;
        primary.parse().ok()
    }

    fn from_accept_language(header: &str) -> Option<Self> {
        header
            .split(',')
            .filter_map(|entry| entry.split(';').next())
            .find_map(Self::from_tag)
    }

    /// Catalogue lookup
    #[must_use]
    pub const fn text(self, message: Message) -> &'static str {
        match (self, message) {
            (Self::En, Message::Healthy) => "Service is healthy",
            (Self::Ar, Message::Healthy) => "الخدمة تعمل بشكل سليم",
            (Self::En, Message::ChatAnswered) => "Answer generated successfully",
            (Self::Ar, Message::ChatAnswered) => "تم إنشاء الإجابة بنجاح",
            (Self::En, Message::DashboardLoaded) => "Dashboard data retrieved successfully",
            (Self::Ar, Message::DashboardLoaded) => "تم جلب بيانات لوحة المعلومات بنجاح",
            (Self::En, Message::ChartLoaded) => "Chart data retrieved successfully",
            (Self::Ar, Message::ChartLoaded) => "تم جلب بيانات الرسم البياني بنجاح",
        }
    }
}

fn lang_param(query: &str) -> Option<&str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(key, value)| (key == "lang").then_some(value))
}

/// Reads the locale stored by the locale middleware, English when absent
impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().copied().unwrap_or_default())
    }
}
