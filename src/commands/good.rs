use std::str::FromStr;

use clap::Args;

use bbs_pic::{
    bbs_api::{Query, DEFAULT_PAGE_SIZE},
    catalog::ForumCategory,
};

use crate::options::Global;

#[derive(Debug, Args)]
pub struct GoodOptions {
    /// The forum to download from, like GenshinPic or StarRailPic. Some
    /// forums, GenshinCos among them, have no curated posts at all.
    #[clap(long, short, value_parser(clap::builder::ValueParser::new(ForumCategory::from_str)))]
    pub forum: ForumCategory,

    /// How many posts to request.
    #[clap(long, short, default_value_t = DEFAULT_PAGE_SIZE, value_parser(clap::value_parser!(u32).range(1..)))]
    pub size: u32,
}

pub async fn good(global: Global, options: GoodOptions) -> anyhow::Result<()> {
    let query = Query::Good {
        forum: options.forum,
    };

    super::download_query(global, query, options.size).await
}
