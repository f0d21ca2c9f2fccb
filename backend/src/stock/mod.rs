//! Stock market data: provider client, wire types and company lookup.

mod client;
mod error;
mod search;
mod types;

pub use client::HttpStockClient;
pub use error::StockError;
pub use search::find_company;
pub use types::{CompanyInfo, DashboardStock, PricePoint, StockPrice};

/// History length used when a chart request does not say
pub const DEFAULT_HISTORY_DAYS: u32 = 30;
/// Longest history a single request may ask for
pub const MAX_HISTORY_DAYS: u32 = 365;

/// Applies the default and bounds to a requested history length
#[must_use]
pub fn history_days(requested: Option<u32>) -> u32 {
    requested
        .unwrap_or(DEFAULT_HISTORY_DAYS)
        .clamp(1, MAX_HISTORY_DAYS)
}

/// Source of listing and price data
#[async_trait::async_trait]
pub trait StockClient: Send + Sync {
    /// Every listed company with its latest quote
    async fn companies(&self) -> Result<Vec<CompanyInfo>, StockError>;

    /// Daily price rows for the last `days` trading days
    async fn price_history(&self, company_id: u64, days: u32) -> Result<Vec<PricePoint>, StockError>;
}


/// In-memory stock client for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use std::collections::HashMap;

    use super::{CompanyInfo, PricePoint, StockClient, StockError};

    /// In-memory stock client
    #[derive(Default)]
    pub struct MockStockClient {
        companies: Vec<CompanyInfo>,
        prices: HashMap<u64, Vec<PricePoint>>,
        unavailable: bool,
    }

    impl MockStockClient {
        /// Client serving the given listing, without prices
        #[must_use]
        pub fn new(companies: Vec<CompanyInfo>) -> Self {
            Self {
                companies,
                ..Self::default()
            }
        }

        /// A handful of Tadawul blue chips with three days of prices each
        #[must_use]
        pub fn with_sample_data() -> Self {
            let companies = vec![
                company(1, "2222", "Saudi Arabian Oil Co.", "ARAMCO", "Energy", 27.45, 1.2),
                company(2, "2010", "Saudi Basic Industries Corp.", "SABIC", "Materials", 68.9, -0.8),
                company(3, "7010", "Saudi Telecom Co.", "STC", "Telecommunication", 41.3, 2.4),
                company(4, "1120", "Al Rajhi Bank", "RAJHI", "Banks", 88.1, -1.6),
            ];
            let prices = companies
                .iter()
                .map(|c| {
                    let rows = (1..=3)
                        .map(|day| PricePoint {
                            date: format!("2025-03-0{day}"),
                            open: c.price - 0.5,
                            high: c.price + 1.0,
                            low: c.price - 1.0,
                            close: c.price + f64::from(day) * 0.1,
                            volume: 1_000_000.0,
                        })
                        .collect();
                    (c.company_id, rows)
                })
                .collect();

            Self {
                companies,
                prices,
                unavailable: false,
            }
        }

        /// Makes every call fail with a provider error
        #[must_use]
        pub const fn unavailable(mut self) -> Self {
            self.unavailable = true;
            self
        }

        /// Replaces the price rows of one company
        #[must_use]
        pub fn with_prices(mut self, company_id: u64, rows: Vec<PricePoint>) -> Self {
            self.prices.insert(company_id, rows);
            self
        }

        fn check_available(&self) -> Result<(), StockError> {
            if self.unavailable {
                Err(StockError::Http {
                    status: 503,
                    body: "provider unavailable".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait::async_trait]
    impl StockClient for MockStockClient {
        async fn companies(&self) -> Result<Vec<CompanyInfo>, StockError> {
            self.check_available()?;
            Ok(self.companies.clone())
        }

        async fn price_history(
            &self,
            company_id: u64,
            days: u32,
        ) -> Result<Vec<PricePoint>, StockError> {
            self.check_available()?;
            let rows = self.prices.get(&company_id).cloned().unwrap_or_default();
            let keep = usize::try_from(days).unwrap_or(usize::MAX);
            let skip = rows.len().saturating_sub(keep);
            Ok(rows.into_iter().skip(skip).collect())
        }
    }

    /// Builds a listed company with derived identifiers
    #[must_use]
    pub fn company(
        company_id: u64,
        tadawul_id: &str,
        name: &str,
        acrynom: &str,
        sector: &str,
        price: f64,
        change_percent: f64,
    ) -> CompanyInfo {
        CompanyInfo {
            tadawul_id: tadawul_id.to_string(),
            company_id,
            argaam_id: format!("argaam-{company_id}"),
            company_name: name.to_string(),
            company_name_ar: String::new(),
            acrynom_name: acrynom.to_string(),
            acrynom_name_ar: acrynom.to_string(),
            sector: sector.to_string(),
            sector_ar: String::new(),
            price,
            change: price * change_percent / 100.0,
            change_percent,
        }
    }
}
