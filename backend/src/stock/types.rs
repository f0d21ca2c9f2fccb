use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A listed company as returned by the provider listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    /// Tadawul ticker, e.g. `2222`
    #[serde(rename = "tadawulID")]
    pub tadawul_id: String,
    /// Provider company identifier
    #[serde(rename = "companyID")]
    pub company_id: u64,
    /// Argaam identifier
    #[serde(rename = "argaamID", default)]
    pub argaam_id: String,
    /// English name
    pub company_name: String,
    /// Arabic name
    #[serde(default)]
    pub company_name_ar: String,
    /// English short name (the provider spells it `acrynom`)
    #[serde(default)]
    pub acrynom_name: String,
    /// Arabic short name
    #[serde(default)]
    pub acrynom_name_ar: String,
    /// English sector name
    #[serde(default)]
    pub sector: String,
    /// Arabic sector name
    #[serde(default)]
    pub sector_ar: String,
    /// Last traded price in SAR
    #[serde(default)]
    pub price: f64,
    /// Absolute change since the previous close
    #[serde(default)]
    pub change: f64,
    /// Percentage change since the previous close
    #[serde(default)]
    pub change_percent: f64,
}

/// Dashboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStock {
    /// Provider company identifier
    #[serde(rename = "companyID")]
    pub company_id: u64,
    /// Argaam identifier
    #[serde(rename = "argaamID")]
    pub argaam_id: String,
    /// English name
    pub company_name: String,
    /// Arabic name
    pub company_name_ar: String,
    /// Arabic short name
    pub acrynom_name_ar: String,
    /// English sector name
    pub sector: String,
    /// Arabic sector name
    pub sector_ar: String,
    /// Percentage change since the previous close
    pub percentage_gained: f64,
    /// Last traded price in SAR
    pub price: f64,
}

impl From<&CompanyInfo> for DashboardStock {
    fn from(company: &CompanyInfo) -> Self {
        Self {
            company_id: company.company_id,
            argaam_id: company.argaam_id.clone(),
            company_name: company.company_name.clone(),
            company_name_ar: company.company_name_ar.clone(),
            acrynom_name_ar: company.acrynom_name_ar.clone(),
            sector: company.sector.clone(),
            sector_ar: company.sector_ar.clone(),
            percentage_gained: company.change_percent,
            price: company.price,
        }
    }
}

/// Daily OHLCV row as returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// ISO-8601 trading date
    pub date: String,
    /// Opening price
    pub open: f64,
    /// Session high
    pub high: f64,
    /// Session low
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Traded volume
    #[serde(default)]
    pub volume: f64,
}

/// Chart point: a price row plus plotting coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StockPrice {
    /// ISO-8601 trading date
    pub date: String,
    /// Opening price
    pub open: f64,
    /// Session high
    pub high: f64,
    /// Session low
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Traded volume
    pub volume: f64,
    /// Position in the series, oldest first
    pub x: usize,
    /// Closing price, duplicated for line charts
    pub y: f64,
}

impl StockPrice {
    /// Orders provider rows by date and assigns plotting coordinates
    #[must_use]
    pub fn series(mut points: Vec<PricePoint>) -> Vec<Self> {
        // ISO dates order lexicographically
        points.sort_by(|a, b| a.date.cmp(&b.date));
        points
            .into_iter()
            .enumerate()
            .map(|(x, point)| Self {
                date: point.date,
                open: point.open,
                high: point.high,
                low: point.low,
                close: point.close,
                volume: point.volume,
                x,
                y: point.close,
            })
            .collect()
    }
}
