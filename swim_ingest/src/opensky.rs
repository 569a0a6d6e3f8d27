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

//! JSON snapshot feed translator. A message is one object with a `time` field and a
//! `states` array of fixed-position arrays, one per aircraft:
//!
//!   0: icao24, 1: callsign, 3: time_position, 5: longitude, 6: latitude,
//!   7: baro altitude (m), 9: velocity (m/s), 10: true track (deg), 11: vertical rate (m/s)
//!
//! Entries without a position are skipped, null fields stay unset

use serde::{Serialize,Deserialize};
use serde_json::Value;
use tracing::{debug,warn};

use swim_common::angle::Angle360;
use swim_common::datetime::EpochMillis;
use swim_common::geo::GeoPos;
use swim_track::{Track, TrackEvent, TrackStatus};
use crate::{meters, mps, Translator};
use crate::errors::{parse_error, Result, SwimIngestError};

const ICAO24: usize = 0;
const CALLSIGN: usize = 1;
const TIME_POSITION: usize = 3;
const LONGITUDE: usize = 5;
const LATITUDE: usize = 6;
const BARO_ALTITUDE: usize = 7;
const VELOCITY: usize = 9;
const TRUE_TRACK: usize = 10;
const VERTICAL_RATE: usize = 11;

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct OpenSkyConfig {
    /// use the transponder id as callsign for entries without one
    pub temp_cs: bool,
}

impl Default for OpenSkyConfig {
    fn default ()->Self {
        OpenSkyConfig { temp_cs: true }
    }
}

pub struct OpenSkyTranslator {
    config: OpenSkyConfig,
}

impl OpenSkyTranslator {
    pub fn new (config: OpenSkyConfig)->Self {
        OpenSkyTranslator { config }
    }

    fn translate_states (&self, msg: &[u8])->Result<Vec<TrackEvent>> {
        let mut events: Vec<TrackEvent> = Vec::new();

        let v: Value = serde_json::from_slice( msg)?;
        let snapshot_time = v.get( "time").and_then( Value::as_i64)
            .ok_or_else( || parse_error!( "snapshot without time field"))?;

        let Some(states) = v.get( "states").and_then( Value::as_array) else {
            return Ok( events) // an empty region answers states:null
        };

        for state in states {
            if let Some(event) = self.translate_state( state, snapshot_time) {
                events.push( event);
            }
        }
        Ok( events)
    }

    fn translate_state (&self, state: &Value, snapshot_time: i64)->Option<TrackEvent> {
        let fields = state.as_array()?;

        let icao24 = fields.get( ICAO24)?.as_str()?;
        let lon = fields.get( LONGITUDE)?.as_f64()?;
        let lat = fields.get( LATITUDE)?.as_f64()?;

        let cs = match fields.get( CALLSIGN).and_then( Value::as_str).map( str::trim) {
            Some(cs) if !cs.is_empty() => cs.to_string(),
            _ if self.config.temp_cs => icao24.to_string(),
            _ => return None
        };

        let secs = fields.get( TIME_POSITION).and_then( Value::as_i64).unwrap_or( snapshot_time);
        let date = EpochMillis::from_secs( secs);

        let mut track = Track::new( icao24, cs, date, GeoPos::from_degrees( lat, lon));
        track.altitude = fields.get( BARO_ALTITUDE).and_then( Value::as_f64).map( meters);
        track.speed = fields.get( VELOCITY).and_then( Value::as_f64).map( mps);
        track.heading = fields.get( TRUE_TRACK).and_then( Value::as_f64).map( Angle360::from_degrees);
        track.vertical_rate = fields.get( VERTICAL_RATE).and_then( Value::as_f64).map( mps);

        Some( TrackEvent::Update( track))
    }
}

impl Translator for OpenSkyTranslator {
    fn name (&self)->&'static str { "opensky" }

    fn translate (&mut self, msg: &[u8])->Vec<TrackEvent> {
        match self.translate_states( msg) {
            Ok(events) => events,
            Err(e) => {
                warn!( "dropping snapshot message: {}", e);
                Vec::new()
            }
        }
    }
}
