use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;

use color_eyre::Result;
use maud::html;
use warp::Filter;

use crate::data::flatten::{self, FlattenConfig};
use crate::names;
use crate::rejections::{self, InternalServerError};
use crate::views;

/// The static data endpoint. The `/api` routes flatten the character files
/// on every request (the generated-API-route form of the endpoint);
/// `/data` serves previously generated documents as plain files.
#[derive(Clone)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub image_dir: PathBuf,
    pub output_dir: PathBuf,
    pub base_url: String,
}

pub async fn run(config: ServerConfig, address: SocketAddr) -> Result<()> {
    let index = warp::get().and(warp::path::end()).map(index_page);

    let standard = warp::get()
        .and(warp::path("api"))
        .and(warp::path(names::STANDARD_DATASET_FILE))
        .and(warp::path::end())
        .and(with_config(config.clone()))
        .and_then(standard_dataset);

    let random = warp::get()
        .and(warp::path("api"))
        .and(warp::path(names::RANDOM_DATASET_FILE))
        .and(warp::path::end())
        .and(with_config(config.clone()))
        .and_then(random_dataset);

    let data_files = warp::get()
        .and(warp::path("data"))
        .and(warp::fs::dir(config.output_dir.clone()));

    let routes = index
        .or(standard)
        .or(random)
        .or(data_files)
        .recover(rejections::handle_rejection);

    tracing::info!("serving datasets on http://{address}");
    warp::serve(routes).run(address).await;

    Ok(())
}

fn with_config(
    config: ServerConfig,
) -> impl Filter<Extract = (ServerConfig,), Error = Infallible> + Clone {
    warp::any().map(move || config.clone())
}

async fn standard_dataset(config: ServerConfig) -> Result<impl warp::Reply, warp::Rejection> {
    dataset_reply(config, flatten::STANDARD_FIELDS).await
}

async fn random_dataset(config: ServerConfig) -> Result<impl warp::Reply, warp::Rejection> {
    dataset_reply(config, flatten::RANDOM_POOL_FIELDS).await
}

async fn dataset_reply(
    config: ServerConfig,
    fields: &'static [&'static str],
) -> Result<impl warp::Reply, warp::Rejection> {
    let flatten_config = FlattenConfig {
        data_dir: config.data_dir,
        image_dir: config.image_dir,
        base_url: config.base_url,
        fields,
    };
    match flatten::build_dataset(&flatten_config).await {
        Ok(dataset) => Ok(warp::reply::json(&dataset)),
        Err(err) => {
            tracing::error!("could not build dataset: {err:#}");
            Err(warp::reject::custom(InternalServerError))
        }
    }
}

fn index_page() -> impl warp::Reply {
    let page = views::page(
        "Datasets",
        html! {
            h1 { "Character datasets" }
            ul {
                li {
                    a href=(names::dataset_api_url(names::STANDARD_DATASET_FILE)) {
                        (names::STANDARD_DATASET_FILE)
                    }
                }
                li {
                    a href=(names::dataset_api_url(names::RANDOM_DATASET_FILE)) {
                        (names::RANDOM_DATASET_FILE)
                    }
                }
            }
        },
    );
    warp::reply::html(page.into_string())
}
