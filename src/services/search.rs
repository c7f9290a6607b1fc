// src/services/search.rs

//! Search request orchestration.
//!
//! Issues the form-encoded search request and hands the body to the
//! result parser. The statistics feature is supplementary to the host
//! application, so transport failures degrade to an empty result list
//! instead of propagating.

use reqwest::Client;
use url::Url;

use crate::error::Result;
use crate::models::{ClientConfig, SearchCandidate};
use crate::services::SearchParser;
use crate::utils::http;

/// Path of the HTML search endpoint, relative to the base URL.
const SEARCH_PATH: &str = "search_results.php";

/// Client for the site's search endpoint.
///
/// Holds no mutable state between calls; a shared instance is safe to
/// use from concurrent callers.
pub struct SearchClient {
    client: Client,
    search_url: Url,
    parser: SearchParser,
}

impl SearchClient {
    /// Create a new search client with the given configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = http::create_client(config)?;
        let base_url = Url::parse(&config.base_url)?;
        let search_url = base_url.join(SEARCH_PATH)?;
        let parser = SearchParser::new(base_url)?;

        Ok(Self {
            client,
            search_url,
            parser,
        })
    }

    /// Search the site for a game by free-text name.
    ///
    /// Every call is a fresh request; nothing is cached or deduplicated.
    /// On transport failure the error is logged and an empty list
    /// returned, so a broken or unreachable remote reads as "no results
    /// found".
    pub async fn search(&self, name: &str) -> Vec<SearchCandidate> {
        match self.fetch_results(name).await {
            Ok(body) => self.parser.parse(&body),
            Err(error) => {
                log::error!("Search request for '{}' failed: {}", name, error);
                Vec::new()
            }
        }
    }

    /// Download the raw search-result page.
    async fn fetch_results(&self, name: &str) -> Result<String> {
        let form = [
            ("queryString", name),
            ("t", "games"),
            ("sorthead", "popular"),
            ("sortd", "Normal Order"),
            ("plat", ""),
            ("length_type", "main"),
            ("length_min", ""),
            ("length_max", ""),
            ("detail", "0"),
        ];

        let response = self
            .client
            .post(self.search_url.clone())
            .form(&form)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    const SEARCH_PAGE: &str = r#"<html><body><ul>
<li class="back_darkish">
  <div class="search_list_image">
    <a title="Hollow Knight" href="game?id=26286">
      <img alt="Box Art" src="https://example.com/games/26286.jpg" />
    </a>
  </div>
  <div class="search_list_details_block">
    <div class="search_list_tidbit">Main Story</div>
    <div class="search_list_tidbit">26&#189; Hours</div>
    <div class="search_list_tidbit">Main + Extra</div>
    <div class="search_list_tidbit">40 Hours</div>
    <div class="search_list_tidbit">Completionist</div>
    <div class="search_list_tidbit">60 Hours</div>
  </div>
</li>
</ul></body></html>"#;

    /// Check whether a buffered request holds the full head and the
    /// body announced by Content-Length.
    fn request_complete(request: &[u8]) -> bool {
        let Some(head_end) = request.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let head = String::from_utf8_lossy(&request[..head_end]).to_lowercase();
        let content_length: usize = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);
        request.len() >= head_end + 4 + content_length
    }

    /// Serve a single canned HTTP response on a loopback socket and
    /// return the base URL to point the client at.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request_complete(&request) {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}/", addr)
    }

    fn config_for(base_url: String) -> ClientConfig {
        ClientConfig {
            base_url,
            ..ClientConfig::default()
        }
    }

    #[tokio::test]
    async fn test_search_round_trip() {
        let base_url = serve_once("200 OK", SEARCH_PAGE).await;
        let client = SearchClient::new(&config_for(base_url.clone())).unwrap();

        let candidates = client.search("hollow knight").await;
        assert_eq!(candidates.len(), 1);

        let candidate = &candidates[0];
        assert_eq!(candidate.name, "Hollow Knight");
        assert_eq!(candidate.game_id, 26286);
        assert_eq!(candidate.image_url, "https://example.com/games/26286.jpg");
        assert_eq!(candidate.detail_url, format!("{base_url}game?id=26286"));
        assert_eq!(candidate.main_story_seconds, 95400);
        assert_eq!(candidate.main_extra_seconds, 144000);
        assert_eq!(candidate.completionist_seconds, 216000);
        assert_eq!(candidate.solo_seconds, 0);
        assert_eq!(candidate.co_op_seconds, 0);
        assert_eq!(candidate.vs_seconds, 0);
    }

    #[tokio::test]
    async fn test_search_connection_failure_yields_empty() {
        // Bind then drop a listener so the port is known to refuse.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);

        let client = SearchClient::new(&config_for(base_url)).unwrap();
        assert!(client.search("anything").await.is_empty());
    }

    #[tokio::test]
    async fn test_search_http_error_yields_empty() {
        let base_url = serve_once("503 Service Unavailable", "").await;
        let client = SearchClient::new(&config_for(base_url)).unwrap();
        assert!(client.search("anything").await.is_empty());
    }
}
