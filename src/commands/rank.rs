use std::str::FromStr;

use clap::Args;

use bbs_pic::{
    bbs_api::{Query, DEFAULT_PAGE_SIZE},
    catalog::{ForumCategory, RankPeriod},
};

use crate::options::Global;

#[derive(Debug, Args)]
pub struct RankOptions {
    /// The forum to download from, like GenshinPic or StarRailPic.
    #[clap(long, short, value_parser(clap::builder::ValueParser::new(ForumCategory::from_str)))]
    pub forum: ForumCategory,

    /// The ranking to download: Daily, Weekly or Monthly.
    #[clap(
        long = "type",
        short = 't',
        value_parser(clap::builder::ValueParser::new(RankPeriod::from_str))
    )]
    pub period: RankPeriod,

    /// How many posts to request.
    #[clap(long, short, default_value_t = DEFAULT_PAGE_SIZE, value_parser(clap::value_parser!(u32).range(1..)))]
    pub size: u32,
}

pub async fn rank(global: Global, options: RankOptions) -> anyhow::Result<()> {
    let query = Query::Rank {
        forum: options.forum,
        period: options.period,
    };

    super::download_query(global, query, options.size).await
}
