use askama::Template;
use rocket::response::content::RawHtml;
use rocket::*;

use crate::config::Config;
use crate::database::{self, DatabasePool, ScoreQuery};
use crate::RenderResult;

pub mod view;

use view::SortMode;

/// Landing page: the game podium (top 3 scores) plus the photo gallery,
/// fetched as two sequential reads on this request's connection. A store
/// failure becomes a page banner, never a transport fault.
#[get("/")]
pub async fn index(
    database: &State<DatabasePool>,
    config: &State<Config>,
) -> RenderResult<RawHtml<String>> {
    let mut podium_scores = Vec::new();
    let mut gallery_photos = Vec::new();
    let mut db_error = None;

    match database::connect(database.inner()).await {
        Ok(mut connection) => {
            match database::fetch_scores(&mut connection, &ScoreQuery::podium()).await {
                Ok(records) => podium_scores = records,
                Err(error) => {
                    ::log::error!("podium query: {}", error);
                    db_error = Some(error);
                }
            }
            match database::fetch_scores(&mut connection, &ScoreQuery::gallery()).await {
                Ok(records) => gallery_photos = records,
                Err(error) => {
                    ::log::error!("gallery query: {}", error);
                    db_error = db_error.or(Some(error));
                }
            }
        }
        Err(error) => {
            ::log::error!("index page: {}", error);
            db_error = Some(error);
        }
    }

    let page = view::gallery_page(
        &podium_scores,
        &gallery_photos,
        db_error.as_ref(),
        &config.photos_base,
    );
    Ok(RawHtml(page.render()?))
}

/// Full ranking of every game score. The `sort` query parameter picks the
/// order: `top` (default) for best score first, `recent` for newest first.
/// Unknown values fall back to `top` silently.
#[get("/ranking?<sort>")]
pub async fn ranking(
    sort: Option<&str>,
    database: &State<DatabasePool>,
    config: &State<Config>,
) -> RenderResult<RawHtml<String>> {
    let mode = SortMode::from_param(sort);

    let mut all_scores = Vec::new();
    let mut db_error = None;

    match database::connect(database.inner()).await {
        Ok(mut connection) => {
            match database::fetch_scores(&mut connection, &ScoreQuery::ranking(mode.order())).await
            {
                Ok(records) => all_scores = records,
                Err(error) => {
                    ::log::error!("ranking query: {}", error);
                    db_error = Some(error);
                }
            }
        }
        Err(error) => {
            ::log::error!("ranking page: {}", error);
            db_error = Some(error);
        }
    }

    let page = view::ranking_page(&all_scores, db_error.as_ref(), mode, &config.photos_base);
    Ok(RawHtml(page.render()?))
}
