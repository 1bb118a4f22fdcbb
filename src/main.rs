use rocket::*;

use config::Config;
use database::DatabasePool;

mod config;
mod database;
mod pages;

/// Handler result: template rendering is the only failure that surfaces as a
/// 500; store failures render as an in-page banner instead.
type RenderResult<T, E = rocket::response::Debug<askama::Error>> = std::result::Result<T, E>;

/// Assembles the rocket serving the gallery and ranking pages. The pool and
/// configuration are injected so tests can bring their own.
pub fn build_rocket(database_pool: DatabasePool, config: Config) -> Rocket<Build> {
    rocket::build()
        .mount("/", routes![pages::index, pages::ranking])
        .manage::<DatabasePool>(database_pool)
        .manage::<Config>(config)
}

#[launch]
fn rocket() -> _ {
    // Load configuration and prepare the database pool
    dotenv::dotenv().ok();
    let config = Config::load();

    let database_pool =
        database::create_pool(&config.database_url).expect("failed to create a database pool");

    build_rocket(database_pool, config)
}
