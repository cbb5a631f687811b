use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Request, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::models::{CatalogItem, CatalogItemDetail, Genre, GenreList, Page, SearchParams};

pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const SEARCH_MOVIES: &str = "/search/movie";
pub const POPULAR_MOVIES: &str = "/movie/popular";
pub const TOP_RATED_MOVIES: &str = "/movie/top_rated";
pub const MOVIE_DETAILS: &str = "/movie";
pub const GENRES: &str = "/genre/movie/list";

/// Read-only access to the movie catalog.
///
/// Every call goes to the source fresh; implementations neither retry nor cache.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn search(&self, params: &SearchParams) -> Result<Page<CatalogItem>, FetchError>;
    async fn list_popular(&self, page: u32) -> Result<Page<CatalogItem>, FetchError>;
    async fn list_top_rated(&self, page: u32) -> Result<Page<CatalogItem>, FetchError>;
    async fn get_detail(&self, id: u64) -> Result<CatalogItemDetail, FetchError>;
    async fn list_genres(&self) -> Result<Vec<Genre>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub access_token: String,
    pub language: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            access_token: String::new(),
            language: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP adapter for the TMDB v3 REST API.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: Client,
    base_url: String,
    language: Option<String>,
}

impl TmdbClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", settings.access_token.trim()))
            .map_err(|e| FetchError::InvalidToken(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .user_agent(concat!("moviedb/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            language: settings.language.clone().filter(|l| !l.trim().is_empty()),
        })
    }

    fn build(&self, path: &str, query: &[(&str, String)]) -> Result<Request, FetchError> {
        let mut rb = self.http.get(format!("{}{}", self.base_url, path)).query(query);
        if let Some(lang) = &self.language {
            rb = rb.query(&[("language", lang)]);
        }
        rb.build().map_err(|e| FetchError::Network(format!("invalid request: {}", e)))
    }

    pub fn search_request(&self, params: &SearchParams) -> Result<Request, FetchError> {
        if params.query.trim().is_empty() {
            return Err(FetchError::EmptyQuery);
        }
        let mut query = vec![
            ("query", params.query.clone()),
            ("page", params.page.max(1).to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];
        if let Some(year) = params.year {
            query.push(("year", year.to_string()));
        }
        if let Some(year) = params.primary_release_year {
            query.push(("primary_release_year", year.to_string()));
        }
        self.build(SEARCH_MOVIES, &query)
    }

    pub fn list_request(&self, path: &str, page: u32) -> Result<Request, FetchError> {
        self.build(path, &[("page", page.max(1).to_string())])
    }

    pub fn detail_request(&self, id: u64) -> Result<Request, FetchError> {
        self.build(&format!("{}/{}", MOVIE_DETAILS, id), &[])
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request, detail_id: Option<u64>) -> Result<T, FetchError> {
        let path = request.url().path().to_string();
        debug!(%path, "GET");
        let res = self.http.execute(request).await?;
        let status = res.status();
        let body = res.bytes().await?;
        check_status(status, detail_id)?;
        decode_body(&body)
    }
}

/// Map a non-2xx status; 404 only means "not found" for single-movie lookups.
pub(crate) fn check_status(status: StatusCode, detail_id: Option<u64>) -> Result<(), FetchError> {
    if status.is_success() {
        return Ok(());
    }
    match (status, detail_id) {
        (StatusCode::NOT_FOUND, Some(id)) => Err(FetchError::NotFound { id }),
        _ => Err(FetchError::Status { code: status.as_u16() }),
    }
}

pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(body).map_err(|e| FetchError::MalformedResponse(e.to_string()))
}

fn logged<T>(endpoint: &str, res: Result<T, FetchError>) -> Result<T, FetchError> {
    if let Err(e) = &res {
        warn!(endpoint, error = %e, "catalog request failed");
    }
    res
}

#[async_trait]
impl CatalogSource for TmdbClient {
    async fn search(&self, params: &SearchParams) -> Result<Page<CatalogItem>, FetchError> {
        let res = match self.search_request(params) {
            Ok(req) => self.execute(req, None).await,
            Err(e) => Err(e),
        };
        logged(SEARCH_MOVIES, res)
    }

    async fn list_popular(&self, page: u32) -> Result<Page<CatalogItem>, FetchError> {
        let res = match self.list_request(POPULAR_MOVIES, page) {
            Ok(req) => self.execute(req, None).await,
            Err(e) => Err(e),
        };
        logged(POPULAR_MOVIES, res)
    }

    async fn list_top_rated(&self, page: u32) -> Result<Page<CatalogItem>, FetchError> {
        let res = match self.list_request(TOP_RATED_MOVIES, page) {
            Ok(req) => self.execute(req, None).await,
            Err(e) => Err(e),
        };
        logged(TOP_RATED_MOVIES, res)
    }

    async fn get_detail(&self, id: u64) -> Result<CatalogItemDetail, FetchError> {
        let res = match self.detail_request(id) {
            Ok(req) => self.execute(req, Some(id)).await,
            Err(e) => Err(e),
        };
        logged(MOVIE_DETAILS, res)
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, FetchError> {
        let res = match self.build(GENRES, &[]) {
            Ok(req) => self.execute::<GenreList>(req, None).await.map(|l| l.genres),
            Err(e) => Err(e),
        };
        logged(GENRES, res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    fn client(base_url: &str) -> TmdbClient {
        TmdbClient::new(&ClientSettings {
            base_url: base_url.to_string(),
            access_token: "test-token".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn unusable_token_is_rejected_up_front() {
        let err = TmdbClient::new(&ClientSettings {
            access_token: "abc\ndef".to_string(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, FetchError::InvalidToken(_)));
    }

    /// Answer exactly one request with a canned response; hands back the raw request head.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = sock.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let resp = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            sock.write_all(resp.as_bytes()).await.unwrap();
            let _ = sock.shutdown().await;
            let _ = tx.send(String::from_utf8_lossy(&head).to_string());
        });
        (format!("http://{}", addr), rx)
    }

    #[test]
    fn search_request_carries_parameters() {
        let c = client(DEFAULT_API_BASE_URL);
        let mut params = SearchParams::new("blade runner").page(2);
        params.year = Some(1982);
        let req = c.search_request(&params).unwrap();
        assert_eq!(req.url().path(), "/3/search/movie");
        let q: HashMap<String, String> = req.url().query_pairs().into_owned().collect();
        assert_eq!(q["query"], "blade runner");
        assert_eq!(q["page"], "2");
        assert_eq!(q["include_adult"], "false");
        assert_eq!(q["year"], "1982");
        assert!(!q.contains_key("primary_release_year"));
        assert!(!q.contains_key("language"));
    }

    #[test]
    fn empty_query_is_rejected_before_sending() {
        let c = client(DEFAULT_API_BASE_URL);
        assert_eq!(c.search_request(&SearchParams::new("   ")).unwrap_err(), FetchError::EmptyQuery);
    }

    #[test]
    fn language_is_appended_when_configured() {
        let c = TmdbClient::new(&ClientSettings {
            access_token: "t".into(),
            language: Some("de-DE".into()),
            ..Default::default()
        })
        .unwrap();
        let req = c.list_request(POPULAR_MOVIES, 3).unwrap();
        let q: HashMap<String, String> = req.url().query_pairs().into_owned().collect();
        assert_eq!(q["page"], "3");
        assert_eq!(q["language"], "de-DE");
        assert_eq!(c.detail_request(550).unwrap().url().path(), "/3/movie/550");
    }

    #[test]
    fn status_mapping() {
        assert_eq!(check_status(StatusCode::OK, None), Ok(()));
        assert_eq!(check_status(StatusCode::NOT_FOUND, Some(7)), Err(FetchError::NotFound { id: 7 }));
        assert_eq!(check_status(StatusCode::NOT_FOUND, None), Err(FetchError::Status { code: 404 }));
        assert_eq!(check_status(StatusCode::INTERNAL_SERVER_ERROR, Some(7)), Err(FetchError::Status { code: 500 }));
    }

    #[test]
    fn malformed_body_is_reported() {
        let err = decode_body::<Page<CatalogItem>>(b"{\"page\": \"one\"").unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn detail_404_becomes_not_found() {
        let (base, _head) = serve_once("404 Not Found", r#"{"success":false,"status_code":34}"#).await;
        let err = client(&base).get_detail(999_999_999).await.unwrap_err();
        assert_eq!(err, FetchError::NotFound { id: 999_999_999 });
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn popular_page_decodes_and_sends_bearer_token() {
        let body = r#"{"page":1,"results":[{"id":1,"title":"A","genre_ids":[28]}],"total_pages":7,"total_results":130}"#;
        let (base, head) = serve_once("200 OK", body).await;
        let page = client(&base).list_popular(1).await.unwrap();
        assert_eq!(page.total_pages, 7);
        assert_eq!(page.results[0].genre_ids, vec![28]);
        let head = head.await.unwrap().to_ascii_lowercase();
        assert!(head.starts_with("get /movie/popular?page=1"));
        assert!(head.contains("authorization: bearer test-token"));
    }

    #[tokio::test]
    async fn genres_unwrap_envelope() {
        let body = r#"{"genres":[{"id":28,"name":"Action"},{"id":12,"name":"Adventure"}]}"#;
        let (base, _head) = serve_once("200 OK", body).await;
        let genres = client(&base).list_genres().await.unwrap();
        assert_eq!(genres.iter().map(|g| g.name.as_str()).collect::<Vec<_>>(), vec!["Action", "Adventure"]);
    }

    #[tokio::test]
    async fn unreachable_host_is_network_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = client(&format!("http://{}", addr)).list_top_rated(1).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }
}
