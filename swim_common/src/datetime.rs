/*
 * Copyright © 2026, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use std::fmt;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Serialize,Deserialize};

/// epoch milliseconds - msec is enough precision for surveillance data and keeps
/// timestamped records dense
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,PartialOrd)]
pub struct EpochMillis(i64);

impl EpochMillis {
    pub fn now ()->Self { EpochMillis( Utc::now().timestamp_millis()) }

    pub fn new (millis: i64)->Self { EpochMillis(millis) }

    pub fn from_secs (secs: i64)->Self { EpochMillis(secs*1000) }

    pub fn millis (&self)->i64 { self.0 }

    pub fn is_after (&self, other: EpochMillis)->bool { self.0 > other.0 }

    pub fn millis_since (&self, other: EpochMillis)->i64 { self.0 - other.0 }
}

impl fmt::Display for EpochMillis {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp_millis(self.0) {
            Some(dt) => write!(f, "{}", dt),
            None => write!(f, "EpochMillis({})", self.0)
        }
    }
}

impl<Tz> From<DateTime<Tz>> for EpochMillis where Tz: TimeZone {
    fn from (date: DateTime<Tz>)->Self { EpochMillis( date.timestamp_millis()) }
}

#[inline]
pub fn utc_now ()->DateTime<Utc> {
    Utc::now()
}

#[inline]
pub fn epoch_millis ()->i64 {
    Utc::now().timestamp_millis()
}

pub fn from_epoch_millis (millis: i64)->Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
}

/// parse an ISO-8601 / RFC-3339 timestamp such as "2016-03-11T20:07:16.663Z" into EpochMillis
pub fn parse_iso_millis (s: &str)->Option<EpochMillis> {
    DateTime::parse_from_rfc3339(s).ok().map( |dt| EpochMillis( dt.timestamp_millis()))
}

/// parse separate utc date ("2016/03/11") and time ("13:07:16.663") strings, as reported by SBS feeds
pub fn parse_utc_date_time_millis (date: &str, time: &str)->Option<EpochMillis> {
    let date = NaiveDate::parse_from_str( date, "%Y/%m/%d").ok()?;
    let time = NaiveTime::parse_from_str( time, "%H:%M:%S%.3f").ok()?;
    let ndt = NaiveDateTime::new( date, time);
    Some( EpochMillis( ndt.and_utc().timestamp_millis()))
}
