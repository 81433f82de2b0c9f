use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::config::AppConfig;
use crate::errors::ApiError;
use crate::mock;

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AnimeEpisodes {
    #[serde(deserialize_with = "null_as_zero")]
    pub sub: u32,
    #[serde(deserialize_with = "null_as_zero")]
    pub dub: u32,
}

impl AnimeEpisodes {
    pub fn label(&self) -> String {
        match (self.sub, self.dub) {
            (0, 0) => "TBA".to_string(),
            (sub, 0) => format!("SUB {}", sub),
            (sub, dub) => format!("SUB {} | DUB {}", sub, dub),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SpotlightAnime {
    pub id: String,
    pub name: String,
    pub jname: String,
    pub poster: String,
    pub description: String,
    pub rank: u32,
    pub other_info: Vec<String>,
    pub episodes: AnimeEpisodes,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct BasicAnime {
    pub id: String,
    pub name: String,
    pub poster: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub episodes: AnimeEpisodes,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Top10Anime {
    pub id: String,
    pub name: String,
    pub poster: String,
    pub rank: u32,
    pub episodes: AnimeEpisodes,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Top10Animes {
    pub today: Vec<Top10Anime>,
    pub week: Vec<Top10Anime>,
    pub month: Vec<Top10Anime>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HomeData {
    pub genres: Vec<String>,
    pub latest_episode_animes: Vec<BasicAnime>,
    pub spotlight_animes: Vec<SpotlightAnime>,
    pub top10_animes: Top10Animes,
    pub top_airing_animes: Vec<BasicAnime>,
    pub top_upcoming_animes: Vec<BasicAnime>,
    pub trending_animes: Vec<BasicAnime>,
    pub most_popular_animes: Vec<BasicAnime>,
    pub most_favorite_animes: Vec<BasicAnime>,
    pub latest_completed_animes: Vec<BasicAnime>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct HomePageData {
    pub success: Option<bool>,
    pub data: HomeData,
}

/// Horizontal card rails on the home screen, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RailKind {
    Trending,
    LatestEpisodes,
    MostPopular,
    TopAiring,
    TopUpcoming,
    MostFavorite,
    LatestCompleted,
}

impl RailKind {
    pub const ALL: [RailKind; 7] = [
        RailKind::Trending,
        RailKind::LatestEpisodes,
        RailKind::MostPopular,
        RailKind::TopAiring,
        RailKind::TopUpcoming,
        RailKind::MostFavorite,
        RailKind::LatestCompleted,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            RailKind::Trending => "Trending Now",
            RailKind::LatestEpisodes => "Latest Episodes",
            RailKind::MostPopular => "Popular Anime",
            RailKind::TopAiring => "Top Airing",
            RailKind::TopUpcoming => "Top Upcoming",
            RailKind::MostFavorite => "Most Favorite",
            RailKind::LatestCompleted => "Latest Completed",
        }
    }

    /// Prefix used in focus ids, e.g. `popular-card-3`.
    pub fn slug(&self) -> &'static str {
        match self {
            RailKind::Trending => "trending",
            RailKind::LatestEpisodes => "latest",
            RailKind::MostPopular => "popular",
            RailKind::TopAiring => "airing",
            RailKind::TopUpcoming => "upcoming",
            RailKind::MostFavorite => "favorite",
            RailKind::LatestCompleted => "completed",
        }
    }
}

/// Top-10 time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Today,
    Week,
    Month,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Today, Period::Week, Period::Month];

    pub fn label(&self) -> &'static str {
        match self {
            Period::Today => "Today",
            Period::Week => "Week",
            Period::Month => "Month",
        }
    }

    pub fn from_index(index: usize) -> Period {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn index(&self) -> usize {
        match self {
            Period::Today => 0,
            Period::Week => 1,
            Period::Month => 2,
        }
    }
}

impl HomeData {
    pub fn rail(&self, kind: RailKind) -> &[BasicAnime] {
        match kind {
            RailKind::Trending => &self.trending_animes,
            RailKind::LatestEpisodes => &self.latest_episode_animes,
            RailKind::MostPopular => &self.most_popular_animes,
            RailKind::TopAiring => &self.top_airing_animes,
            RailKind::TopUpcoming => &self.top_upcoming_animes,
            RailKind::MostFavorite => &self.most_favorite_animes,
            RailKind::LatestCompleted => &self.latest_completed_animes,
        }
    }

    pub fn top10(&self, period: Period) -> &[Top10Anime] {
        match period {
            Period::Today => &self.top10_animes.today,
            Period::Week => &self.top10_animes.week,
            Period::Month => &self.top10_animes.month,
        }
    }

    /// Finds any catalog entry by id and returns it as a card summary.
    pub fn find_summary(&self, id: &str) -> Option<BasicAnime> {
        if let Some(s) = self.spotlight_animes.iter().find(|a| a.id == id) {
            return Some(BasicAnime {
                id: s.id.clone(),
                name: s.name.clone(),
                poster: s.poster.clone(),
                kind: s.other_info.get(1).cloned().unwrap_or_default(),
                episodes: s.episodes,
            });
        }
        RailKind::ALL
            .iter()
            .flat_map(|kind| self.rail(*kind).iter())
            .find(|a| a.id == id)
            .cloned()
            .or_else(|| {
                Period::ALL
                    .iter()
                    .flat_map(|p| self.top10(*p).iter())
                    .find(|a| a.id == id)
                    .map(|t| BasicAnime {
                        id: t.id.clone(),
                        name: t.name.clone(),
                        poster: t.poster.clone(),
                        kind: String::new(),
                        episodes: t.episodes,
                    })
            })
    }

    pub fn description_for(&self, id: &str) -> Option<&str> {
        self.spotlight_animes
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.description.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AnimeStats {
    pub rating: String,
    pub quality: String,
    pub episodes: AnimeEpisodes,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AnimeInfo {
    pub id: String,
    pub name: String,
    pub poster: String,
    pub description: String,
    pub stats: AnimeStats,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimeAbout {
    pub info: AnimeInfo,
    pub more_info: HashMap<String, serde_json::Value>,
}

/// Payload of `/anime/:id`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimeDetails {
    pub anime: AnimeAbout,
    pub recommended_animes: Vec<BasicAnime>,
    pub related_animes: Vec<BasicAnime>,
}

impl AnimeDetails {
    /// Builds a summary-only detail page from a catalog card.
    pub fn from_summary(summary: &BasicAnime, description: Option<&str>) -> Self {
        AnimeDetails {
            anime: AnimeAbout {
                info: AnimeInfo {
                    id: summary.id.clone(),
                    name: summary.name.clone(),
                    poster: summary.poster.clone(),
                    description: description.unwrap_or_default().to_string(),
                    stats: AnimeStats {
                        episodes: summary.episodes,
                        kind: summary.kind.clone(),
                        ..Default::default()
                    },
                },
                more_info: HashMap::new(),
            },
            recommended_animes: vec![],
            related_animes: vec![],
        }
    }

    pub fn info(&self) -> &AnimeInfo {
        &self.anime.info
    }

    /// String-ish `moreInfo` value; arrays are joined with ", ".
    pub fn more_info(&self, key: &str) -> Option<String> {
        match self.anime.more_info.get(key)? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(", "))
                }
            }
            _ => None,
        }
    }

    pub fn genres(&self) -> Vec<String> {
        match self.anime.more_info.get("genres") {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => vec![],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
struct DetailsResponse {
    success: Option<bool>,
    data: AnimeDetails,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResults {
    pub animes: Vec<BasicAnime>,
    pub current_page: u32,
    pub has_next_page: bool,
    pub total_pages: u32,
    pub search_query: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
struct SearchResponse {
    success: Option<bool>,
    data: SearchResults,
}

/// Where the home catalog currently on screen came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Mock,
}

impl DataSource {
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Live => "LIVE",
            DataSource::Mock => "MOCK",
        }
    }
}

/// Exponential backoff used for detail and search requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// `min(base * 2^attempt, max)`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

#[derive(Debug, Clone)]
pub struct HiAnimeClient {
    base_url: Url,
    offline: bool,
    retry: RetryPolicy,
    client: reqwest::Client,
}

impl HiAnimeClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(config.api_base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.api_base_url, e)))?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("animestream/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()?;

        Ok(Self {
            base_url,
            offline: config.offline,
            retry: RetryPolicy {
                max_retries: config.max_retries,
                ..RetryPolicy::default()
            },
            client,
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ApiError> {
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_json_with_retry<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ApiError> {
        let mut attempt = 0;
        loop {
            match self.get_json(url).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for(attempt);
                    tracing::debug!(%url, attempt, ?delay, error = %e, "retrying request");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_home(&self) -> Result<HomePageData, ApiError> {
        let url = self.endpoint(&["home"])?;
        let home: HomePageData = self.get_json(&url).await?;
        if home.success == Some(false) {
            return Err(ApiError::Unsuccessful(url.to_string()));
        }
        Ok(home)
    }

    /// Fetches the home catalog. Never fails: any error yields the built-in
    /// mock catalog tagged [`DataSource::Mock`].
    pub async fn get_home_page(&self) -> (HomePageData, DataSource) {
        if self.offline {
            tracing::info!("offline mode, serving mock home data");
            return (mock::home_page(), DataSource::Mock);
        }
        match self.fetch_home().await {
            Ok(home) => {
                tracing::info!(
                    spotlight = home.data.spotlight_animes.len(),
                    trending = home.data.trending_animes.len(),
                    "home page loaded"
                );
                (home, DataSource::Live)
            }
            Err(e) => {
                tracing::warn!(error = %e, "API call failed, using mock data");
                (mock::home_page(), DataSource::Mock)
            }
        }
    }

    pub async fn get_anime_details(&self, anime_id: &str) -> Result<AnimeDetails, ApiError> {
        if self.offline {
            return Err(ApiError::Offline);
        }
        let url = self.endpoint(&["anime", anime_id])?;
        let resp: DetailsResponse = self.get_json_with_retry(&url).await?;
        if resp.success == Some(false) {
            return Err(ApiError::Unsuccessful(url.to_string()));
        }
        Ok(resp.data)
    }

    pub async fn search_anime(&self, query: &str, page: u32) -> Result<SearchResults, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::EmptyQuery);
        }
        let page = page.max(1);
        if self.offline {
            return Ok(mock::search(query, page));
        }
        let mut url = self.endpoint(&["search"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("page", &page.to_string());
        let resp: SearchResponse = self.get_json_with_retry(&url).await?;
        if resp.success == Some(false) {
            return Err(ApiError::Unsuccessful(url.to_string()));
        }
        let mut results = resp.data;
        if results.current_page == 0 {
            results.current_page = page;
        }
        Ok(results)
    }
}
