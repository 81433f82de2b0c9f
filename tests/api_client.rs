use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use animestream_lib::api::{DataSource, HiAnimeClient, Period, RailKind, RetryPolicy};
use animestream_lib::config::AppConfig;
use animestream_lib::errors::ApiError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASE: &str = "/api/v2/hianime";

fn client_for(server: &MockServer) -> HiAnimeClient {
    let config = AppConfig {
        api_base_url: format!("{}{}", server.uri(), BASE),
        request_timeout_secs: 2,
        ..Default::default()
    };
    HiAnimeClient::new(&config)
        .unwrap()
        .with_retry_policy(fast_retry())
}

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 2,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
    }
}

const HOME_JSON: &str = r#"{
    "success": true,
    "data": {
        "genres": ["Action", "Drama"],
        "spotlightAnimes": [
            {"id": "one-piece-100", "name": "One Piece", "jname": "ワンピース", "rank": 1,
             "otherInfo": ["TV", "24m"], "episodes": {"sub": 1100, "dub": 1000}}
        ],
        "trendingAnimes": [
            {"id": "dandadan-19319", "name": "Dandadan", "type": "TV", "episodes": {"sub": 12, "dub": 12}}
        ],
        "top10Animes": {
            "today": [{"id": "one-piece-100", "name": "One Piece", "rank": 1, "episodes": {"sub": 1100, "dub": null}}],
            "week": [],
            "month": []
        }
    }
}"#;

const DETAILS_JSON: &str = r#"{
    "success": true,
    "data": {
        "anime": {
            "info": {
                "id": "dandadan-19319",
                "name": "Dandadan",
                "description": "Momo and Okarun.",
                "stats": {"rating": "PG-13", "quality": "HD", "type": "TV", "duration": "24m",
                          "episodes": {"sub": 12, "dub": 12}}
            },
            "moreInfo": {"genres": ["Action", "Comedy"], "studios": "Science SARU", "status": "Finished Airing"}
        },
        "recommendedAnimes": [{"id": "chainsaw-man-17406", "name": "Chainsaw Man", "type": "TV"}],
        "relatedAnimes": []
    }
}"#;

#[tokio::test]
async fn test_home_page_from_live_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/home", BASE)))
        .respond_with(ResponseTemplate::new(200).set_body_string(HOME_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let (home, source) = client_for(&server).get_home_page().await;

    assert_eq!(source, DataSource::Live);
    assert_eq!(home.data.spotlight_animes[0].name, "One Piece");
    assert_eq!(home.data.rail(RailKind::Trending)[0].kind, "TV");
    assert_eq!(home.data.top10(Period::Today)[0].episodes.dub, 0);
    assert!(home.data.rail(RailKind::MostPopular).is_empty());
}

#[tokio::test]
async fn test_home_page_falls_back_to_mock_on_server_error() {
    let server = MockServer::start().await;
    // The home fetch is not retried: one attempt, then the built-in catalog.
    Mock::given(method("GET"))
        .and(path(format!("{}/home", BASE)))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (home, source) = client_for(&server).get_home_page().await;

    assert_eq!(source, DataSource::Mock);
    assert!(!home.data.spotlight_animes.is_empty());
    assert!(!home.data.rail(RailKind::Trending).is_empty());
}

#[tokio::test]
async fn test_home_page_falls_back_to_mock_on_bad_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/home", BASE)))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let (_, source) = client_for(&server).get_home_page().await;
    assert_eq!(source, DataSource::Mock);
}

#[tokio::test]
async fn test_home_page_unsuccessful_flag_uses_mock() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/home", BASE)))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success": false}"#))
        .mount(&server)
        .await;

    let (_, source) = client_for(&server).get_home_page().await;
    assert_eq!(source, DataSource::Mock);
}

#[tokio::test]
async fn test_unreachable_server_uses_mock() {
    let config = AppConfig {
        // Port 9 (discard) on localhost is closed in test environments
        api_base_url: "http://127.0.0.1:9/api/v2/hianime".to_string(),
        request_timeout_secs: 1,
        ..Default::default()
    };
    let client = HiAnimeClient::new(&config).unwrap();
    let (home, source) = client.get_home_page().await;
    assert_eq!(source, DataSource::Mock);
    assert!(!home.data.spotlight_animes.is_empty());
}

#[tokio::test]
async fn test_anime_details_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/anime/dandadan-19319", BASE)))
        .respond_with(ResponseTemplate::new(200).set_body_string(DETAILS_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let details = client_for(&server)
        .get_anime_details("dandadan-19319")
        .await
        .unwrap();

    assert_eq!(details.info().name, "Dandadan");
    assert_eq!(details.info().stats.rating, "PG-13");
    assert_eq!(details.genres(), vec!["Action", "Comedy"]);
    assert_eq!(details.more_info("studios").as_deref(), Some("Science SARU"));
    assert_eq!(details.recommended_animes.len(), 1);
}

#[tokio::test]
async fn test_details_not_found_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/anime/missing", BASE)))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_anime_details("missing")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 404, .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_details_retries_transient_failures() {
    let server = MockServer::start().await;
    let attempt = AtomicU32::new(0);
    Mock::given(method("GET"))
        .and(path(format!("{}/anime/dandadan-19319", BASE)))
        .respond_with(move |_: &wiremock::Request| {
            if attempt.fetch_add(1, Ordering::SeqCst) == 0 {
                ResponseTemplate::new(503)
            } else {
                ResponseTemplate::new(200).set_body_string(DETAILS_JSON)
            }
        })
        .expect(2)
        .mount(&server)
        .await;

    let details = client_for(&server)
        .get_anime_details("dandadan-19319")
        .await
        .unwrap();
    assert_eq!(details.info().id, "dandadan-19319");
}

#[tokio::test]
async fn test_details_gives_up_after_max_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/anime/flaky", BASE)))
        .respond_with(ResponseTemplate::new(502))
        .expect(3) // Initial + 2 retries
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_anime_details("flaky")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 502, .. }));
}

#[tokio::test]
async fn test_search_sends_query_and_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/search", BASE)))
        .and(query_param("q", "one piece"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"success": true, "data": {
                "animes": [{"id": "one-piece-100", "name": "One Piece", "type": "TV"}],
                "currentPage": 2, "hasNextPage": false, "totalPages": 2, "searchQuery": "one piece"
            }}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server).search_anime("  one piece ", 2).await.unwrap();

    assert_eq!(results.current_page, 2);
    assert_eq!(results.total_pages, 2);
    assert!(!results.has_next_page);
    assert_eq!(results.animes[0].id, "one-piece-100");
}

#[tokio::test]
async fn test_search_rejects_blank_query_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).search_anime("   ", 1).await.unwrap_err();
    assert!(matches!(err, ApiError::EmptyQuery));
}

#[tokio::test]
async fn test_offline_client_never_hits_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = AppConfig {
        api_base_url: format!("{}{}", server.uri(), BASE),
        offline: true,
        ..Default::default()
    };
    let client = HiAnimeClient::new(&config).unwrap();

    let (_, source) = client.get_home_page().await;
    assert_eq!(source, DataSource::Mock);
    assert!(matches!(
        client.get_anime_details("x").await,
        Err(ApiError::Offline)
    ));
    let results = client.search_anime("chainsaw", 1).await.unwrap();
    assert_eq!(results.animes[0].name, "Chainsaw Man");
}
