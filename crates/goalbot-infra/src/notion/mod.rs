//! NotionPageStore -- concrete [`PageStore`] implementation for Notion.
//!
//! Creates goal pages via `POST /v1/pages` against a fixed database and
//! lists previously saved pages via a database query. The integration
//! token is wrapped in [`secrecy::SecretString`] and is never logged or
//! included in `Debug` output.

pub mod types;

use std::time::Duration;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};

use goalbot_core::page::PageStore;
use goalbot_types::page::{GoalPage, GoalPageSummary, PageError};

use self::types::{
    Block, CreatePageRequest, CreatePageResponse, DatabaseQueryRequest, DatabaseQueryResponse,
    PageParent, PageProperties, RichText, RichTextProperty, TitleProperty,
};

/// Classification label written to every goal page's `Role` property and
/// used to filter the listing query.
const ROLE_LABEL: &str = "Life Goal";

/// Notion page store for yearly goals.
pub struct NotionPageStore {
    client: reqwest::Client,
    token: SecretString,
    database_id: String,
    base_url: String,
}

// NotionPageStore intentionally does NOT derive Debug to prevent
// accidental exposure of the integration token.

impl NotionPageStore {
    /// The Notion API version header value.
    const API_VERSION: &'static str = "2022-06-28";

    /// Create a new page store writing into the given database.
    pub fn new(token: SecretString, database_id: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            token,
            database_id,
            base_url: "https://api.notion.com".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, PageError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(self.token.expose_secret())
            .header("Notion-Version", Self::API_VERSION)
            .json(body)
            .send()
            .await
            .map_err(|e| PageError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => PageError::AuthenticationFailed,
                429 => PageError::RateLimited,
                _ => PageError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        Ok(response)
    }
}

/// Canonical URL for a Notion page id: separators stripped, fixed host.
pub fn page_url(page_id: &str) -> String {
    format!("https://notion.so/{}", page_id.replace('-', ""))
}

/// Expand a [`GoalPage`] into the fixed create-page structure.
///
/// Properties: `Name` (title + date stamp) and `Role` (classification
/// label). Children: heading(title,1), intro paragraph, heading("Goals",2),
/// goal text, heading("Info",3), creation date + user label.
fn build_create_request(database_id: &str, page: &GoalPage, date: &str) -> CreatePageRequest {
    CreatePageRequest {
        parent: PageParent {
            database_id: database_id.to_string(),
        },
        properties: PageProperties {
            name: TitleProperty {
                title: vec![RichText::text(format!("{} - {date}", page.title))],
            },
            role: RichTextProperty {
                rich_text: vec![RichText::text(ROLE_LABEL)],
            },
        },
        children: vec![
            Block::heading(&page.title, 1),
            Block::paragraph(
                "These yearly goals were developed through a conversation with an AI assistant.",
            ),
            Block::heading("Goals", 2),
            Block::paragraph(&page.goals),
            Block::heading("Info", 3),
            Block::paragraph(format!("Created on: {date}\nUser: {}", page.user_label)),
        ],
    }
}

impl PageStore for NotionPageStore {
    fn name(&self) -> &str {
        "notion"
    }

    async fn create_goal_page(&self, page: &GoalPage) -> Result<String, PageError> {
        let date = Utc::now().format("%Y-%m-%d").to_string();
        let body = build_create_request(&self.database_id, page, &date);

        let response = self.post_json("/v1/pages", &body).await?;

        let created: CreatePageResponse = response
            .json()
            .await
            .map_err(|e| PageError::Deserialization(format!("failed to parse response: {e}")))?;

        Ok(page_url(&created.id))
    }

    async fn list_goal_pages(&self) -> Result<Vec<GoalPageSummary>, PageError> {
        let body = DatabaseQueryRequest::role_equals(ROLE_LABEL);
        let path = format!("/v1/databases/{}/query", self.database_id);

        let response = self.post_json(&path, &body).await?;

        let queried: DatabaseQueryResponse = response
            .json()
            .await
            .map_err(|e| PageError::Deserialization(format!("failed to parse response: {e}")))?;

        Ok(queried
            .results
            .iter()
            .map(|p| GoalPageSummary {
                title: p.title(),
                url: page_url(&p.id),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_strips_separators() {
        assert_eq!(
            page_url("59833787-2cf9-4fdf-8782-e53db20768a5"),
            "https://notion.so/598337872cf94fdf8782e53db20768a5"
        );
    }

    #[test]
    fn test_create_request_block_structure() {
        let page = GoalPage {
            title: "Yearly Goals".to_string(),
            goals: "1. Run a marathon".to_string(),
            user_label: "I want to run a marathon".to_string(),
        };
        let body = serde_json::to_value(build_create_request("db-1", &page, "2026-08-23")).unwrap();

        assert_eq!(body["parent"]["database_id"], "db-1");
        assert_eq!(
            body["properties"]["Name"]["title"][0]["text"]["content"],
            "Yearly Goals - 2026-08-23"
        );
        assert_eq!(
            body["properties"]["Role"]["rich_text"][0]["text"]["content"],
            "Life Goal"
        );

        let children = body["children"].as_array().unwrap();
        assert_eq!(children.len(), 6);
        assert_eq!(children[0]["type"], "heading_1");
        assert_eq!(children[2]["type"], "heading_2");
        assert_eq!(
            children[3]["paragraph"]["rich_text"][0]["text"]["content"],
            "1. Run a marathon"
        );
        assert_eq!(children[4]["type"], "heading_3");
        assert_eq!(
            children[5]["paragraph"]["rich_text"][0]["text"]["content"],
            "Created on: 2026-08-23\nUser: I want to run a marathon"
        );
    }
}
