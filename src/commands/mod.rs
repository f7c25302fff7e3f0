mod good;
mod hot;
mod latest;
mod rank;

use anyhow::Result;
use clap::Subcommand;
use log::info;

use bbs_pic::{
    bbs_api::{BbsClient, Query},
    downloader::download_all,
};

use crate::options::Global;

pub use good::*;
pub use hot::*;
pub use latest::*;
pub use rank::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Downloads the images of a forum's daily, weekly or monthly image
    /// ranking.
    Rank(RankOptions),

    /// Downloads the images of a forum's hot posts.
    Hot(HotOptions),

    /// Downloads the images of a forum's curated posts.
    Good(GoodOptions),

    /// Downloads the images of a forum's newest posts, ordered by latest
    /// reply or by creation time.
    Latest(LatestOptions),
}

/// Lists the images matched by `query` and downloads them into
/// `<output>/<game name>`.
async fn download_query(global: Global, query: Query, size: u32) -> Result<()> {
    let client = BbsClient::with_base_url(&global.api_base)?;

    let urls = client.image_urls(&query, size).await?;
    info!(
        "Found {} images in {} {} posts",
        urls.len(),
        query.forum(),
        query.kind()
    );

    let folder = global.output.join(query.game().name());
    let written = download_all(client.http(), &folder, &urls).await?;

    info!("Downloaded {} images to {}", written.len(), folder.display());

    Ok(())
}
