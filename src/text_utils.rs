use std::ops::Index;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

type DateParser = fn(&str) -> Option<NaiveDateTime>;

const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATE_TIME_FORMATS: [&str; 2] = [
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S%z",
];

fn to_int<T: std::str::FromStr>(num_str: &str) -> Option<T> {
    num_str.trim().parse::<T>().ok()
}

/// Runs every parser in order and keeps the first one that succeeds
pub fn first_parse<T>(input: &str, parsers: &[fn(&str) -> Option<T>]) -> Option<T> {
    parsers.iter().find_map(|parse| parse(input))
}

fn parse_rfc3339(buf: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(buf).ok().map(|d| d.naive_utc())
}

fn parse_offset_formats(buf: &str) -> Option<NaiveDateTime> {
    OFFSET_DATE_TIME_FORMATS.iter()
        .find_map(|fmt| DateTime::parse_from_str(buf, fmt).ok())
        .map(|d| d.naive_utc())
}

fn parse_date_time_formats(buf: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS.iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(buf, fmt).ok())
}

fn parse_plain_date(buf: &str) -> Option<NaiveDateTime> {
    NaiveDate::parse_from_str(buf, "%Y-%m-%d").ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn parse_direct(buf: &str) -> Option<NaiveDateTime> {
    const DIRECT: [DateParser; 4] = [parse_rfc3339, parse_offset_formats, parse_date_time_formats, parse_plain_date];
    first_parse(buf, &DIRECT)
}

/// Two digit years 00-49 are 20xx, 50-99 are 19xx
fn full_year(year_str: &str) -> Option<i32> {
    let year_str = year_str.trim();
    let y: i32 = to_int(year_str)?;
    match year_str.len() {
        1 | 2 if y < 50 => Some(2000 + y),
        1 | 2 => Some(1900 + y),
        _ => Some(y),
    }
}

/// Month/day/year, e.g. 11/5/2022 or 11/5/22. Exactly three components are accepted.
fn parse_month_day_year(buf: &str) -> Option<NaiveDateTime> {
    let parts: Vec<&str> = buf.split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let m: u32 = to_int(parts[0])?;
    let d: u32 = to_int(parts[1])?;
    let y = full_year(parts[2])?;

    NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(0, 0, 0)
}

/// Dash separated dates where the components are not zero padded, e.g. 2022-1-5 9:03
fn parse_lenient_dash(buf: &str) -> Option<NaiveDateTime> {
    lazy_static! {
        static ref DASH_REGEX: Regex = Regex::new(
            r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[ T](\d{1,2}):(\d{1,2})(?::(\d{1,2}))?(?:\.\d{1,9})?)?$"
        ).unwrap();
    }

    let caps = DASH_REGEX.captures(buf)?;

    let y: i32 = to_int(caps.index(1))?;
    let m: u32 = to_int(caps.index(2))?;
    let d: u32 = to_int(caps.index(3))?;
    let opt_u32 = |i: usize| match caps.get(i) {
        Some(v) => to_int::<u32>(v.as_str()),
        None => Some(0),
    };
    let h = opt_u32(4)?;
    let mn = opt_u32(5)?;
    let s = opt_u32(6)?;

    let date = NaiveDate::from_ymd_opt(y, m, d)?;
    let time = NaiveTime::from_hms_opt(h, mn, s)?;
    Some(NaiveDateTime::new(date, time))
}

/// Parses the date shapes found in Hexo front-matter.
///
/// Slash dates are always read as month/day/year, so 05/11/2022 is May 11th even
/// when the author meant the 5th of November.
pub fn parse_post_date(buf: &str) -> Result<NaiveDateTime, String> {
    let buf = buf.trim();

    if let Some(date) = parse_direct(buf) {
        return Ok(date);
    }

    if buf.contains('/') {
        if let Some(date) = parse_month_day_year(buf) {
            return Ok(date);
        }
    }

    if buf.contains('-') {
        if let Some(date) = parse_lenient_dash(buf) {
            return Ok(date);
        }
    }

    Err(format!("Could not parse date \"{}\"", buf))
}

pub fn format_post_date(date_time: &NaiveDateTime) -> String {
    date_time.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

pub fn format_day(date_time: &NaiveDateTime) -> String {
    date_time.format("%Y-%m-%d").to_string()
}

pub fn strip_md_extension(file_name: &str) -> &str {
    file_name.strip_suffix(".md").unwrap_or(file_name)
}

/// URL-safe identifier for a post file name. slugify(slugify(x)) == slugify(x)
pub fn slugify(file_name: &str) -> String {
    lazy_static! {
        static ref NON_ALNUM_REGEX: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    }

    let stem = strip_md_extension(file_name);
    let lower = unidecode::unidecode(stem).to_lowercase();
    NON_ALNUM_REGEX.replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}
