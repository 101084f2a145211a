use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use crate::text_utils::{format_post_date, parse_post_date};

/// Publish or update date of a post, written to front-matter as an ISO-8601 UTC string
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct PostDate(pub NaiveDateTime);

impl Serialize for PostDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
    {
        serializer.serialize_str(&format_post_date(&self.0))
    }
}

impl FromStr for PostDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(parse_post_date(s)?))
    }
}

impl Display for PostDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
