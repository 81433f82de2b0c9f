//! Built-in catalog served when the API is unreachable or in offline mode.

use crate::api::{
    AnimeEpisodes, BasicAnime, HomeData, HomePageData, Period, RailKind, SearchResults,
    SpotlightAnime, Top10Anime, Top10Animes,
};

const POSTER_BASE: &str = "https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/";

/// Results per page for offline search.
const SEARCH_PAGE_SIZE: usize = 20;

fn poster(file: &str) -> String {
    format!("{}{}", POSTER_BASE, file)
}

fn tv(id: &str, name: &str, file: &str, sub: u32, dub: u32) -> BasicAnime {
    BasicAnime {
        id: id.to_string(),
        name: name.to_string(),
        poster: poster(file),
        kind: "TV".to_string(),
        episodes: AnimeEpisodes { sub, dub },
    }
}

fn ranked(rank: u32, anime: &BasicAnime) -> Top10Anime {
    Top10Anime {
        id: anime.id.clone(),
        name: anime.name.clone(),
        poster: anime.poster.clone(),
        rank,
        episodes: anime.episodes,
    }
}

fn attack_on_titan() -> BasicAnime {
    tv("attack-on-titan-112", "Attack on Titan", "bx16498-C6FPmWm59CyP.jpg", 87, 84)
}

fn demon_slayer() -> BasicAnime {
    tv(
        "demon-slayer-kimetsu-no-yaiba-55",
        "Demon Slayer: Kimetsu no Yaiba",
        "bx101922-PEn1CTc93blC.jpg",
        44,
        34,
    )
}

fn one_piece() -> BasicAnime {
    tv("one-piece-100", "One Piece", "bx21-YCDoj1EkAxFn.jpg", 1080, 1000)
}

fn my_hero_academia() -> BasicAnime {
    tv("my-hero-academia-1176", "My Hero Academia", "bx21459-RoPwgrZ32gM3.jpg", 158, 148)
}

fn jujutsu_kaisen() -> BasicAnime {
    tv("jujutsu-kaisen-tv-22199", "Jujutsu Kaisen", "bx113415-bbBWj4pEFseh.jpg", 24, 24)
}

fn frieren() -> BasicAnime {
    tv(
        "frieren-beyond-journeys-end-28755",
        "Frieren: Beyond Journey's End",
        "bx154587-gHcOAe8KohzK.jpg",
        28,
        0,
    )
}

fn chainsaw_man() -> BasicAnime {
    tv("chainsaw-man-17406", "Chainsaw Man", "bx127230-FlochcFsyoF4.jpg", 12, 12)
}

fn blue_lock() -> BasicAnime {
    tv("blue-lock-25927", "Blue Lock", "bx137822-isPJZjx8GiKr.jpg", 24, 24)
}

fn spotlight(
    anime: BasicAnime,
    jname: &str,
    rank: u32,
    aired: &str,
    duration: &str,
    description: &str,
) -> SpotlightAnime {
    SpotlightAnime {
        id: anime.id,
        name: anime.name,
        jname: jname.to_string(),
        poster: anime.poster,
        description: description.to_string(),
        rank,
        other_info: vec![aired.to_string(), anime.kind, duration.to_string()],
        episodes: anime.episodes,
    }
}

fn popular() -> Vec<BasicAnime> {
    vec![
        attack_on_titan(),
        demon_slayer(),
        one_piece(),
        my_hero_academia(),
        jujutsu_kaisen(),
    ]
}

pub fn home_page() -> HomePageData {
    HomePageData {
        success: Some(true),
        data: HomeData {
            genres: [
                "Action",
                "Adventure",
                "Comedy",
                "Drama",
                "Fantasy",
                "Romance",
                "Sci-Fi",
                "Slice of Life",
                "Supernatural",
                "Thriller",
            ]
            .iter()
            .map(|g| g.to_string())
            .collect(),
            latest_episode_animes: popular(),
            spotlight_animes: vec![
                spotlight(
                    chainsaw_man(),
                    "チェンソーマン",
                    1,
                    "Oct 11, 2022",
                    "23m",
                    "The world is full of devils, and humanity lives in fear of them. Devils are born from human fears and the stronger the fear, the stronger the devil. A young man named Denji has been trying to pay off his late father's debt to the yakuza by working with his pet devil Pochita to hunt other devils for bounties. But after Denji gets killed, Pochita makes a contract with him to share his heart and bring him back to life.",
                ),
                spotlight(
                    frieren(),
                    "葬送のフリーレン",
                    2,
                    "Sep 29, 2023",
                    "28m",
                    "After the party of heroes defeated the Demon King, they restored peace to the land and returned to lives of solitude. Generations pass, and the elven mage Frieren comes face to face with humanity's mortality. She takes on a new apprentice and promises to fulfill old friends' dying wishes. Can an immortal understand the weight of life?",
                ),
                spotlight(
                    blue_lock(),
                    "ブルーロック",
                    3,
                    "Oct 9, 2022",
                    "24m",
                    "After a disastrous defeat at the 2018 World Cup, Japan's team struggles to regroup. But what's missing? An absolute Ace Striker, who can guide them to the win. The Japan Football Union is hell-bent on creating a striker who hungers for goals and thirsts for victory, and who can be the decisive instrument in turning around a losing match...",
                ),
            ],
            top10_animes: Top10Animes {
                today: vec![
                    ranked(1, &frieren()),
                    ranked(2, &chainsaw_man()),
                    ranked(3, &blue_lock()),
                ],
                week: vec![ranked(1, &jujutsu_kaisen())],
                month: vec![ranked(1, &attack_on_titan()), ranked(2, &demon_slayer())],
            },
            top_airing_animes: vec![
                tv("spy-x-family-23289", "Spy x Family", "bx140960-V3QpsAU4CWzi.jpg", 25, 25),
                tv(
                    "kaguya-sama-wa-kokurasetai-101921",
                    "Kaguya-sama: Love is War",
                    "bx101921-VrZ0LNSlPFCW.jpg",
                    36,
                    24,
                ),
            ],
            top_upcoming_animes: vec![tv(
                "tower-of-god-season-2-168187",
                "Tower of God Season 2",
                "bx168187-kEFqEQRGwu8x.jpg",
                0,
                0,
            )],
            trending_animes: vec![
                tv("wind-breaker-171745", "Wind Breaker", "bx171745-ZRHE0n5RKtbf.jpg", 13, 0),
                tv("kaiju-no-8-170001", "Kaiju No. 8", "bx170001-0MiP1Wa3vE7a.jpg", 12, 12),
            ],
            most_popular_animes: popular(),
            most_favorite_animes: vec![],
            latest_completed_animes: vec![],
        },
    }
}

/// Case-insensitive name search over every list of the mock catalog.
pub fn search(query: &str, page: u32) -> SearchResults {
    let home = home_page();
    let needle = query.trim().to_lowercase();

    let mut matches: Vec<BasicAnime> = Vec::new();
    let mut push = |anime: BasicAnime| {
        if anime.name.to_lowercase().contains(&needle) && !matches.iter().any(|m| m.id == anime.id)
        {
            matches.push(anime);
        }
    };

    for s in &home.data.spotlight_animes {
        if let Some(summary) = home.data.find_summary(&s.id) {
            push(summary);
        }
    }
    for kind in RailKind::ALL {
        for anime in home.data.rail(kind) {
            push(anime.clone());
        }
    }
    for period in Period::ALL {
        for entry in home.data.top10(period) {
            if let Some(summary) = home.data.find_summary(&entry.id) {
                push(summary);
            }
        }
    }

    let total_pages = matches.len().div_ceil(SEARCH_PAGE_SIZE).max(1) as u32;
    let page = page.clamp(1, total_pages);
    let animes = matches
        .into_iter()
        .skip((page as usize - 1) * SEARCH_PAGE_SIZE)
        .take(SEARCH_PAGE_SIZE)
        .collect();

    SearchResults {
        animes,
        current_page: page,
        has_next_page: page < total_pages,
        total_pages,
        search_query: query.trim().to_string(),
    }
}
