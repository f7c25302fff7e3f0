use std::str::FromStr;

use clap::Args;

use bbs_pic::{
    bbs_api::{Query, DEFAULT_PAGE_SIZE},
    catalog::{ForumCategory, LatestSort},
};

use crate::options::Global;

#[derive(Debug, Args)]
pub struct LatestOptions {
    /// The forum to download from, like GenshinPic or StarRailPic.
    #[clap(long, short, value_parser(clap::builder::ValueParser::new(ForumCategory::from_str)))]
    pub forum: ForumCategory,

    /// How to order posts: LatestComment or LatestPost.
    #[clap(
        long = "type",
        short = 't',
        value_parser(clap::builder::ValueParser::new(LatestSort::from_str))
    )]
    pub sort: LatestSort,

    /// How many posts to request.
    #[clap(long, short, default_value_t = DEFAULT_PAGE_SIZE, value_parser(clap::value_parser!(u32).range(1..)))]
    pub size: u32,
}

pub async fn latest(global: Global, options: LatestOptions) -> anyhow::Result<()> {
    let query = Query::Latest {
        forum: options.forum,
        sort: options.sort,
    };

    super::download_query(global, query, options.size).await
}
