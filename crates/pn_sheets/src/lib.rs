use async_trait::async_trait;
use pn_core::{Error, PublishedSource, Result};
use serde::Deserialize;
use tracing::debug;
use url::Url;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const CONTENT_COLUMN: &str = "Content";

/// Reads previously-published post contents out of the destination
/// spreadsheet, via the Sheets v4 values endpoint with an API key.
///
/// This is a read-only enrichment source: any failure here is reported as an
/// error for the caller to degrade on, never to abort on.
pub struct SheetSource {
    sheet_id: String,
    api_key: String,
    range: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetSource {
    pub fn new(sheet_id: impl Into<String>, api_key: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            sheet_id: sheet_id.into(),
            api_key: api_key.into(),
            range: range.into(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> Result<Url> {
        let base = format!("{}/{}/values/{}", SHEETS_API_BASE, self.sheet_id, self.range);
        Url::parse_with_params(&base, &[("key", self.api_key.as_str())])
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", base, e)))
    }
}

/// Pull the `Content` column out of a raw sheet value grid (header row
/// first). Rows too short to reach the column are skipped.
fn extract_contents(values: &[Vec<String>]) -> Result<Vec<String>> {
    let Some((header, rows)) = values.split_first() else {
        debug!("📋 Sheet is empty");
        return Ok(Vec::new());
    };

    let column = header
        .iter()
        .position(|h| h == CONTENT_COLUMN)
        .ok_or_else(|| Error::Sheet(format!("no {} column in sheet header", CONTENT_COLUMN)))?;

    Ok(rows
        .iter()
        .filter_map(|row| row.get(column))
        .filter(|content| !content.is_empty())
        .cloned()
        .collect())
}

#[async_trait]
impl PublishedSource for SheetSource {
    fn name(&self) -> &str {
        "google-sheets"
    }

    async fn fetch_published_contents(&self) -> Result<Vec<String>> {
        let endpoint = self.endpoint()?;
        let response = self.client.get(endpoint).send().await?.error_for_status()?;
        let range: ValueRange = response.json().await?;
        extract_contents(&range.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_extracts_content_column_by_header() {
        let values = grid(&[
            &["Date", "Platform", "Title", "Content"],
            &["2025-06-01", "LinkedIn", "Rents", "Rents keep climbing"],
            &["2025-06-01", "Twitter", "Prices", "Prices cool off"],
        ]);

        let contents = extract_contents(&values).unwrap();
        assert_eq!(contents, vec!["Rents keep climbing", "Prices cool off"]);
    }

    #[test]
    fn test_short_and_empty_rows_are_skipped() {
        let values = grid(&[
            &["Content", "Notes"],
            &["A post"],
            &[],
            &["", "row with empty content"],
        ]);

        let contents = extract_contents(&values).unwrap();
        assert_eq!(contents, vec!["A post"]);
    }

    #[test]
    fn test_missing_content_column_is_an_error() {
        let values = grid(&[&["Date", "Platform"], &["2025-06-01", "LinkedIn"]]);
        assert!(extract_contents(&values).is_err());
    }

    #[test]
    fn test_empty_sheet_yields_empty_corpus() {
        assert!(extract_contents(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_value_range_payload_shape() {
        let payload = r#"{"range": "Sheet1!A1:D3", "majorDimension": "ROWS",
            "values": [["Content"], ["A post"]]}"#;
        let range: ValueRange = serde_json::from_str(payload).unwrap();
        assert_eq!(extract_contents(&range.values).unwrap(), vec!["A post"]);
    }

    #[test]
    fn test_endpoint_carries_key_and_range() {
        let source = SheetSource::new("sheet123", "key456", "Sheet1");
        let endpoint = source.endpoint().unwrap();
        assert!(endpoint.path().ends_with("/sheet123/values/Sheet1"));
        assert_eq!(endpoint.query(), Some("key=key456"));
    }
}
