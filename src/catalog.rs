//! Fixed catalog of the forums, games and sort orders known to the BBS API.
//!
//! Every forum belongs to exactly one game. The game's display name is used
//! as the name of the folder images are downloaded into.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// A category name that isn't part of the catalog.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} '{name}', expected one of: {expected}")]
pub struct UnknownCategory {
    pub kind: &'static str,
    pub name: String,
    pub expected: String,
}

impl UnknownCategory {
    fn new<T: fmt::Display>(kind: &'static str, name: &str, all: &[T]) -> Self {
        let expected = all
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            kind,
            name: name.to_owned(),
            expected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameCategory {
    Honkai3rd,
    Genshin,
    Honkai2,
    TearsOfThemis,
    DBY,
    StarRail,
}

impl GameCategory {
    pub const ALL: [GameCategory; 6] = [
        GameCategory::Honkai3rd,
        GameCategory::Genshin,
        GameCategory::Honkai2,
        GameCategory::TearsOfThemis,
        GameCategory::DBY,
        GameCategory::StarRail,
    ];

    /// The platform's game id, sent as `gids`.
    pub fn id(self) -> u32 {
        match self {
            GameCategory::Honkai3rd => 1,
            GameCategory::Genshin => 2,
            GameCategory::Honkai2 => 3,
            GameCategory::TearsOfThemis => 4,
            GameCategory::DBY => 5,
            GameCategory::StarRail => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GameCategory::Honkai3rd => "Honkai3rd",
            GameCategory::Genshin => "Genshin",
            GameCategory::Honkai2 => "Honkai2",
            GameCategory::TearsOfThemis => "TearsOfThemis",
            GameCategory::DBY => "DBY",
            GameCategory::StarRail => "StarRail",
        }
    }
}

impl fmt::Display for GameCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForumCategory {
    GenshinCos,
    GenshinPic,
    Honkai3rdPic,
    DBYCOS,
    DBYPIC,
    StarRailPic,
    Honkai2Pic,
    TearsOfThemisPic,
}

impl ForumCategory {
    pub const ALL: [ForumCategory; 8] = [
        ForumCategory::GenshinCos,
        ForumCategory::GenshinPic,
        ForumCategory::Honkai3rdPic,
        ForumCategory::DBYCOS,
        ForumCategory::DBYPIC,
        ForumCategory::StarRailPic,
        ForumCategory::Honkai2Pic,
        ForumCategory::TearsOfThemisPic,
    ];

    /// The platform's forum id, sent as `forum_id`.
    pub fn id(self) -> u32 {
        match self {
            ForumCategory::GenshinCos => 49,
            ForumCategory::GenshinPic => 29,
            ForumCategory::Honkai3rdPic => 4,
            ForumCategory::DBYCOS => 47,
            ForumCategory::DBYPIC => 39,
            ForumCategory::StarRailPic => 56,
            ForumCategory::Honkai2Pic => 40,
            ForumCategory::TearsOfThemisPic => 38,
        }
    }

    /// The game this forum belongs to.
    pub fn game(self) -> GameCategory {
        match self {
            ForumCategory::GenshinCos | ForumCategory::GenshinPic => GameCategory::Genshin,
            ForumCategory::Honkai3rdPic => GameCategory::Honkai3rd,
            ForumCategory::DBYCOS | ForumCategory::DBYPIC => GameCategory::DBY,
            ForumCategory::StarRailPic => GameCategory::StarRail,
            ForumCategory::Honkai2Pic => GameCategory::Honkai2,
            ForumCategory::TearsOfThemisPic => GameCategory::TearsOfThemis,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ForumCategory::GenshinCos => "GenshinCos",
            ForumCategory::GenshinPic => "GenshinPic",
            ForumCategory::Honkai3rdPic => "Honkai3rdPic",
            ForumCategory::DBYCOS => "DBYCOS",
            ForumCategory::DBYPIC => "DBYPIC",
            ForumCategory::StarRailPic => "StarRailPic",
            ForumCategory::Honkai2Pic => "Honkai2Pic",
            ForumCategory::TearsOfThemisPic => "TearsOfThemisPic",
        }
    }
}

impl fmt::Display for ForumCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for ForumCategory {
    type Err = UnknownCategory;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|forum| forum.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownCategory::new("forum", name, &Self::ALL))
    }
}

/// Time window of an image ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl RankPeriod {
    pub const ALL: [RankPeriod; 3] = [RankPeriod::Daily, RankPeriod::Weekly, RankPeriod::Monthly];

    pub fn id(self) -> u32 {
        match self {
            RankPeriod::Daily => 1,
            RankPeriod::Weekly => 2,
            RankPeriod::Monthly => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RankPeriod::Daily => "Daily",
            RankPeriod::Weekly => "Weekly",
            RankPeriod::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for RankPeriod {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for RankPeriod {
    type Err = UnknownCategory;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|period| period.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownCategory::new("rank type", name, &Self::ALL))
    }
}

/// Ordering of a forum's latest posts: by newest reply or by newest post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LatestSort {
    LatestComment,
    LatestPost,
}

impl LatestSort {
    pub const ALL: [LatestSort; 2] = [LatestSort::LatestComment, LatestSort::LatestPost];

    pub fn id(self) -> u32 {
        match self {
            LatestSort::LatestComment => 1,
            LatestSort::LatestPost => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LatestSort::LatestComment => "LatestComment",
            LatestSort::LatestPost => "LatestPost",
        }
    }
}

impl fmt::Display for LatestSort {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for LatestSort {
    type Err = UnknownCategory;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|sort| sort.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownCategory::new("latest type", name, &Self::ALL))
    }
}
