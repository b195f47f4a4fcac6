//! Notion API wire types.
//!
//! These are Notion-specific request/response structures used for HTTP
//! communication with the Notion pages and database-query endpoints. They
//! are NOT the generic page types from goalbot-types -- those are
//! store-agnostic.

use serde::{Deserialize, Serialize};

/// Inner text content of a rich-text item.
#[derive(Debug, Clone, Serialize)]
pub struct TextContent {
    pub content: String,
}

/// A single rich-text item.
#[derive(Debug, Clone, Serialize)]
pub struct RichText {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: TextContent,
}

impl RichText {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: "text",
            text: TextContent {
                content: content.into(),
            },
        }
    }
}

/// Body shared by heading and paragraph blocks.
#[derive(Debug, Clone, Serialize)]
pub struct BlockBody {
    pub rich_text: Vec<RichText>,
}

/// Block payload, tagged by the Notion block type.
///
/// Notion keys the payload under the type name, e.g.
/// `{"type": "heading_1", "heading_1": {...}}` -- the internally-tagged
/// enum with matching field names produces exactly that shape.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum BlockPayload {
    #[serde(rename = "heading_1")]
    Heading1 { heading_1: BlockBody },
    #[serde(rename = "heading_2")]
    Heading2 { heading_2: BlockBody },
    #[serde(rename = "heading_3")]
    Heading3 { heading_3: BlockBody },
    #[serde(rename = "paragraph")]
    Paragraph { paragraph: BlockBody },
}

/// A page content block.
#[derive(Debug, Clone, Serialize)]
pub struct Block {
    pub object: &'static str,
    #[serde(flatten)]
    pub payload: BlockPayload,
}

impl Block {
    /// Heading block; levels outside 1..=3 fall back to level 2.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        let body = BlockBody {
            rich_text: vec![RichText::text(text)],
        };
        let payload = match level {
            1 => BlockPayload::Heading1 { heading_1: body },
            3 => BlockPayload::Heading3 { heading_3: body },
            _ => BlockPayload::Heading2 { heading_2: body },
        };
        Self {
            object: "block",
            payload,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            object: "block",
            payload: BlockPayload::Paragraph {
                paragraph: BlockBody {
                    rich_text: vec![RichText::text(text)],
                },
            },
        }
    }
}

/// The `Name` title property of a goal page.
#[derive(Debug, Clone, Serialize)]
pub struct TitleProperty {
    pub title: Vec<RichText>,
}

/// The `Role` rich-text property of a goal page.
#[derive(Debug, Clone, Serialize)]
pub struct RichTextProperty {
    pub rich_text: Vec<RichText>,
}

/// Properties of a goal page; field names match the database schema.
#[derive(Debug, Clone, Serialize)]
pub struct PageProperties {
    #[serde(rename = "Name")]
    pub name: TitleProperty,
    #[serde(rename = "Role")]
    pub role: RichTextProperty,
}

/// Parent reference for a page created inside a database.
#[derive(Debug, Clone, Serialize)]
pub struct PageParent {
    pub database_id: String,
}

/// Request body for `POST /v1/pages`.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePageRequest {
    pub parent: PageParent,
    pub properties: PageProperties,
    pub children: Vec<Block>,
}

/// Response body for a created page; only the id is used.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePageResponse {
    pub id: String,
}

/// Equality filter on a rich-text property.
#[derive(Debug, Clone, Serialize)]
pub struct EqualsFilter {
    pub equals: String,
}

/// Filter on the `Role` property.
#[derive(Debug, Clone, Serialize)]
pub struct RoleFilter {
    pub property: &'static str,
    pub rich_text: EqualsFilter,
}

/// Request body for `POST /v1/databases/{id}/query`.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseQueryRequest {
    pub filter: RoleFilter,
}

impl DatabaseQueryRequest {
    /// Filter for pages whose `Role` equals the given value.
    pub fn role_equals(value: impl Into<String>) -> Self {
        Self {
            filter: RoleFilter {
                property: "Role",
                rich_text: EqualsFilter {
                    equals: value.into(),
                },
            },
        }
    }
}

/// Response body for a database query.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseQueryResponse {
    #[serde(default)]
    pub results: Vec<QueryPage>,
}

/// One page of a database query result.
///
/// Properties come back as free-form JSON; only the title is extracted.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryPage {
    pub id: String,
    #[serde(default)]
    pub properties: serde_json::Value,
}

impl QueryPage {
    /// Extract the plain-text title from the `Name` property, falling back
    /// to "Untitled".
    pub fn title(&self) -> String {
        self.properties
            .pointer("/Name/title/0/plain_text")
            .and_then(|v| v.as_str())
            .unwrap_or("Untitled")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_heading_block_shape() {
        let block = serde_json::to_value(Block::heading("Goals", 2)).unwrap();
        assert_eq!(block["object"], "block");
        assert_eq!(block["type"], "heading_2");
        assert_eq!(
            block["heading_2"]["rich_text"][0]["text"]["content"],
            "Goals"
        );
    }

    #[test]
    fn test_heading_level_out_of_range_falls_back() {
        let block = serde_json::to_value(Block::heading("x", 7)).unwrap();
        assert_eq!(block["type"], "heading_2");
    }

    #[test]
    fn test_paragraph_block_shape() {
        let block = serde_json::to_value(Block::paragraph("1. Run a marathon")).unwrap();
        assert_eq!(block["type"], "paragraph");
        assert_eq!(
            block["paragraph"]["rich_text"][0]["text"]["content"],
            "1. Run a marathon"
        );
    }

    #[test]
    fn test_query_request_filter_shape() {
        let req = serde_json::to_value(DatabaseQueryRequest::role_equals("Life Goal")).unwrap();
        assert_eq!(req["filter"]["property"], "Role");
        assert_eq!(req["filter"]["rich_text"]["equals"], "Life Goal");
    }

    #[test]
    fn test_query_page_title_extraction() {
        let page = QueryPage {
            id: "abc-def".to_string(),
            properties: json!({
                "Name": {"title": [{"plain_text": "Yearly Goals - 2026-01-05"}]}
            }),
        };
        assert_eq!(page.title(), "Yearly Goals - 2026-01-05");

        let empty = QueryPage {
            id: "abc".to_string(),
            properties: json!({}),
        };
        assert_eq!(empty.title(), "Untitled");
    }
}
