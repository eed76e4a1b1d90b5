use crate::error::invalid_input;
use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use std::str::FromStr;
use vsla_core::domain::UserId;

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn parse_user_id(input: &str) -> Result<UserId> {
    UserId::from_str(input.trim()).map_err(|_| invalid_input(format!("invalid user id: {input}")))
}

pub fn format_timestamp_datetime(ts: i64) -> String {
    let dt = DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_else(|| DateTime::<Utc>::from_timestamp(0, 0).unwrap())
        .with_timezone(&Local);
    dt.format("%Y-%m-%d %H:%M").to_string()
}
