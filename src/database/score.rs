use chrono::NaiveDateTime;

// Types the `Any` driver decodes across backends:
// i16 / i32 / i64 (widened)
// f32 / f64
// bool
// String
// Timestamps must be selected as text and parsed here.

pub type ScoreValue = i64;
pub type RecordId = i64;

/// One row of the `highscores` table. `score == 0` marks a plain photo
/// (camera capture or drawing), `score > 0` a game result.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreRecord {
    pub id: RecordId,
    pub score: ScoreValue,
    /// Bare file name of the photo, as stored by the capture application.
    pub image_path: String,
    pub created_at: Option<NaiveDateTime>,
}

impl ScoreRecord {
    pub fn new(
        id: RecordId,
        score: ScoreValue,
        image_path: impl Into<String>,
        created_at: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            id,
            score,
            image_path: image_path.into(),
            created_at,
        }
    }
}
