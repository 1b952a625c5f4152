/// Venue sheet published as CSV
///
/// Google Sheets serves any worksheet as CSV via
/// `https://docs.google.com/spreadsheets/d/<id>/export?format=csv`; any other
/// URL returning a CSV with a header row works too. Columns are matched by
/// header name, blank cells count as absent and unknown columns are ignored.
use crate::{
    error::{AppError, AppResult},
    models::VenueRecord,
    services::sources::CatalogSource,
};
use reqwest::Client as HttpClient;

#[derive(Clone)]
pub struct SheetCsvSource {
    http_client: HttpClient,
    url: String,
}

impl SheetCsvSource {
    pub fn new(url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            url,
        }
    }
}

/// Parses CSV text with a header row into venue records
pub fn parse_venues(csv_text: &str) -> AppResult<Vec<VenueRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut venues = Vec::new();
    for row in reader.deserialize::<VenueRecord>() {
        venues.push(row?);
    }
    Ok(venues)
}

#[async_trait::async_trait]
impl CatalogSource for SheetCsvSource {
    async fn fetch(&self) -> AppResult<Vec<VenueRecord>> {
        let response = self.http_client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Catalog sheet returned status {}: {}",
                status, body
            )));
        }

        let text = response.text().await?;
        let venues = parse_venues(&text)?;

        tracing::debug!(url = %self.url, venues = venues.len(), "Fetched catalog sheet");

        Ok(venues)
    }

    fn name(&self) -> &'static str {
        "sheet_csv"
    }
}
