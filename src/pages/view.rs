use askama::Template;
use chrono::NaiveDateTime;

use crate::database::{ScoreOrder, ScoreRecord, ScoreValue, StoreError};

/// Ordering selected for the ranking page via the `sort` query parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortMode {
    Top,
    Recent,
}

impl SortMode {
    /// Parses the request parameter. Absent or unrecognized values fall back
    /// to `Top`, silently.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("recent") => Self::Recent,
            _ => Self::Top,
        }
    }

    pub fn order(&self) -> ScoreOrder {
        match self {
            Self::Top => ScoreOrder::TopScores,
            Self::Recent => ScoreOrder::Newest,
        }
    }

    pub fn is_top(&self) -> bool {
        *self == Self::Top
    }

    pub fn is_recent(&self) -> bool {
        *self == Self::Recent
    }

    pub fn page_title(&self) -> &'static str {
        match self {
            Self::Top => "Ranking (Top Scores)",
            Self::Recent => "Ranking (Últimos Jogos)",
        }
    }
}

/// A photo reference already joined to the public photo directory.
#[derive(Clone, Debug, PartialEq)]
pub struct PhotoRef {
    pub url: String,
    pub file_name: String,
}

/// One podium position. The score always renders; the image only when the
/// stored file name survived sanitization.
#[derive(Clone, Debug, PartialEq)]
pub struct PodiumSlot {
    pub score: ScoreValue,
    pub photo: Option<PhotoRef>,
}

/// One row of the ranking table.
#[derive(Clone, Debug, PartialEq)]
pub struct RankingRow {
    pub position: usize,
    pub score: ScoreValue,
    pub photo: Option<PhotoRef>,
    pub when: String,
}

/// Landing page: podium slots in rank order plus the gallery cards.
#[derive(Template)]
#[template(path = "index.html")]
pub struct GalleryPage {
    pub db_error: bool,
    pub first: Option<PodiumSlot>,
    pub second: Option<PodiumSlot>,
    pub third: Option<PodiumSlot>,
    pub photos: Vec<PhotoRef>,
}

/// Ranking page: every game score as a table row.
#[derive(Template)]
#[template(path = "ranking.html")]
pub struct RankingPage {
    pub db_error: bool,
    pub mode: SortMode,
    pub rows: Vec<RankingRow>,
}

/// Builds the landing page from the podium and gallery query results.
/// Pure: everything the template needs is resolved here.
pub fn gallery_page(
    podium: &[ScoreRecord],
    photos: &[ScoreRecord],
    error: Option<&StoreError>,
    photos_base: &str,
) -> GalleryPage {
    let mut slots = podium.iter().map(|record| PodiumSlot {
        score: record.score,
        photo: photo_ref(photos_base, &record.image_path),
    });

    GalleryPage {
        db_error: error.is_some(),
        first: slots.next(),
        second: slots.next(),
        third: slots.next(),
        photos: photos
            .iter()
            .filter_map(|record| photo_ref(photos_base, &record.image_path))
            .collect(),
    }
}

/// Builds the ranking page in the given mode. Positions are 1-based over the
/// sequence exactly as the query returned it.
pub fn ranking_page(
    scores: &[ScoreRecord],
    error: Option<&StoreError>,
    mode: SortMode,
    photos_base: &str,
) -> RankingPage {
    let rows = scores
        .iter()
        .enumerate()
        .map(|(index, record)| RankingRow {
            position: index + 1,
            score: record.score,
            photo: photo_ref(photos_base, &record.image_path),
            when: format_timestamp(record.created_at),
        })
        .collect();

    RankingPage {
        db_error: error.is_some(),
        mode,
        rows,
    }
}

/// `DD/MM/YYYY HH:MM`, or an empty cell when the store had no usable value.
fn format_timestamp(created_at: Option<NaiveDateTime>) -> String {
    match created_at {
        Some(timestamp) => timestamp.format("%d/%m/%Y %H:%M").to_string(),
        None => String::new(),
    }
}

/// Joins a stored file name onto the public photo directory. Names that
/// could escape the directory yield no reference at all.
fn photo_ref(photos_base: &str, image_path: &str) -> Option<PhotoRef> {
    if !is_safe_image_name(image_path) {
        return None;
    }
    Some(PhotoRef {
        url: format!("{}/{}", photos_base.trim_end_matches('/'), image_path),
        file_name: image_path.to_owned(),
    })
}

/// A stored name is safe when it is a bare file name: non-empty, no leading
/// dot, only ASCII alphanumerics, `.`, `_` and `-`.
fn is_safe_image_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}
