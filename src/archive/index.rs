// src/archive/index.rs
// =============================================================================
// This module asks the archive which robots.txt captures exist for a target.
//
// Query (CDX API):
//   url={target}/robots.txt  output=json  fl=timestamp
//   filter=statuscode:200    collapse=digest
//   limit=-N                 (only with --recent: the newest N rows)
//
// Response: a JSON array of rows, the first row being a header:
//   [["timestamp"], ["20200101000000"], ["20210101000000"]]
//
// collapse=digest makes the archive drop captures whose content did not
// change, so every timestamp we get back is a distinct robots.txt body.
// =============================================================================

use super::{ArchiveClient, SnapshotTimestamp};
use crate::error::CrawlError;
use crate::sampler::Limit;
use crate::target::Target;
use tracing::debug;

impl ArchiveClient {
    // Lists the available snapshot timestamps for {target}/robots.txt
    //
    // Returns them in the index's own order (oldest first).
    // An unknown target is not an error, just an empty list.
    pub async fn list_versions(
        &self,
        target: &Target,
        limit: Limit,
        recent_only: bool,
    ) -> Result<Vec<SnapshotTimestamp>, CrawlError> {
        let unavailable = |reason: String| CrawlError::IndexUnavailable {
            target: target.to_string(),
            reason,
        };

        let mut query = vec![
            ("url", format!("{}/robots.txt", target)),
            ("output", "json".to_string()),
            ("fl", "timestamp".to_string()),
            ("filter", "statuscode:200".to_string()),
            ("collapse", "digest".to_string()),
        ];

        // Let the server trim to the newest N rows instead of sending the full history
        if let (true, Limit::AtMost(n)) = (recent_only, limit) {
            query.push(("limit", format!("-{}", n)));
        }

        debug!(%target, %limit, recent_only, "querying snapshot index");

        let response = self
            .http
            .get(self.index_url())
            .query(&query)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("HTTP {}", status.as_u16())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let versions = parse_index(&body).map_err(|source| CrawlError::IndexFormat {
            target: target.to_string(),
            source,
        })?;

        debug!(%target, count = versions.len(), "snapshot index answered");
        Ok(versions)
    }
}

// Decodes the CDX JSON table, dropping the header row
//
// Each row holds the requested fields; we asked only for the timestamp,
// so the first column is the one we keep.
fn parse_index(body: &str) -> Result<Vec<SnapshotTimestamp>, serde_json::Error> {
    // The archive sends an empty body, not "[]", for URLs it never captured
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<Vec<String>> = serde_json::from_str(body)?;

    Ok(rows
        .into_iter()
        .skip(1)
        .filter_map(|row| row.into_iter().next())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::normalize;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_index_skips_header() {
        let body = r#"[["timestamp"],["20200101000000"],["20210101000000"]]"#;
        assert_eq!(
            parse_index(body).unwrap(),
            vec!["20200101000000", "20210101000000"]
        );
    }

    #[test]
    fn test_parse_index_empty_forms() {
        assert!(parse_index("").unwrap().is_empty());
        assert!(parse_index("  \n").unwrap().is_empty());
        assert!(parse_index("[]").unwrap().is_empty());
        assert!(parse_index(r#"[["timestamp"]]"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_index_rejects_non_table() {
        assert!(parse_index("<html>busy</html>").is_err());
        assert!(parse_index(r#"{"timestamp": 1}"#).is_err());
    }

    #[tokio::test]
    async fn test_list_versions_sends_expected_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cdx/search/cdx"))
            .and(query_param("url", "https://example.com/robots.txt"))
            .and(query_param("output", "json"))
            .and(query_param("fl", "timestamp"))
            .and(query_param("filter", "statuscode:200"))
            .and(query_param("collapse", "digest"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"[["timestamp"],["20200101000000"]]"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ArchiveClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let target = normalize("example.com").unwrap();
        let versions = client
            .list_versions(&target, Limit::AtMost(50), false)
            .await
            .unwrap();

        assert_eq!(versions, vec!["20200101000000"]);
    }

    #[tokio::test]
    async fn test_list_versions_recent_trims_server_side() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cdx/search/cdx"))
            .and(query_param("limit", "-5"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let client = ArchiveClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
        let target = normalize("example.com").unwrap();
        let versions = client
            .list_versions(&target, Limit::AtMost(5), true)
            .await
            .unwrap();

        assert!(versions.is_empty());
    }

    #[tokio::test]
    async fn test_list_versions_error_kinds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("url", "https://down.example/robots.txt"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("url", "https://garbled.example/robots.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ArchiveClient::new(&server.uri(), Duration::from_secs(5)).unwrap();

        let down = normalize("down.example").unwrap();
        let err = client.list_versions(&down, Limit::Unlimited, false).await.unwrap_err();
        assert!(matches!(err, CrawlError::IndexUnavailable { .. }));

        let garbled = normalize("garbled.example").unwrap();
        let err = client.list_versions(&garbled, Limit::Unlimited, false).await.unwrap_err();
        assert!(matches!(err, CrawlError::IndexFormat { .. }));
    }
}
