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

//! decoded ADS-B line protocol (SBS) translator. Identification, position and velocity
//! arrive as separate message kinds for the same transponder id, so state is accumulated
//! per id and a Track is emitted once a position-capable snapshot exists.
//!
//! Message examples:
//!   MSG,1,111,11111,AA2BC2,111111,2016/03/11,13:07:16.663,2016/03/11,13:07:16.626,UAL814  ,,,,,,,,,,,0
//!   MSG,3,111,11111,A04424,111111,2016/03/11,13:07:05.343,2016/03/11,13:07:05.288,,11025,,,37.17274,-122.03935,,,,,,0
//!   MSG,4,111,11111,AC1FCC,111111,2016/03/11,13:07:07.777,2016/03/11,13:07:07.713,,,316,106,,,1536,,,,,0

use std::collections::HashMap;
use serde::{Serialize,Deserialize};
use tracing::{debug,warn};
use uom::si::f64::{Length,Velocity};

use swim_common::angle::Angle360;
use swim_common::csv::CsvLine;
use swim_common::datetime::{parse_utc_date_time_millis, EpochMillis};
use swim_common::extract_fields;
use swim_common::geo::GeoPos;
use swim_track::{Track, TrackAmendment, TrackEvent, TrackStatus};
use crate::{feet, fpm, knots, Translator};
use crate::errors::{parse_error, Result, SwimIngestError};

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct SbsConfig {
    /// emit position updates before an identification message has been seen, using the
    /// transponder id as a temporary callsign. The later real callsign is then reported
    /// as a callsign change
    pub temp_cs: bool,
}

impl Default for SbsConfig {
    fn default ()->Self {
        SbsConfig { temp_cs: false }
    }
}

/// accumulated per-transponder state
#[derive(Debug,Clone,Default)]
struct SbsEntry {
    cs: Option<String>,
    position: Option<GeoPos>,
    altitude: Option<Length>,
    heading: Option<Angle360>,
    speed: Option<Velocity>,
    vertical_rate: Option<Velocity>,
    emitted_cs: Option<String>, // callsign of the last emitted Track, if any
}

pub struct SbsTranslator {
    config: SbsConfig,
    entries: HashMap<String,SbsEntry>,
}

impl SbsTranslator {
    pub fn new (config: SbsConfig)->Self {
        SbsTranslator { config, entries: HashMap::new() }
    }

    pub fn n_entries (&self)->usize { self.entries.len() }

    fn translate_line (&mut self, line: &str)->Result<Option<TrackEvent>> {
        let csv = CsvLine::new( line);

        extract_fields!{ csv ?
            let kind: &str = [0],
            let msg_type: u64 = [1],
            let icao24: &str = [4],
            let date: &str = [6],
            let time: &str = [7] => {
                if kind != "MSG" { return Ok(None) } // SEL/ID/AIR/STA/CLK carry nothing we track

                let Some(date) = parse_utc_date_time_millis( date, time) else {
                    return Err( parse_error!( "bad date/time in SBS message: {}", line))
                };

                match msg_type {
                    1 => Ok( self.aircraft_identification( icao24, date, &csv)),
                    3 => Ok( self.airborne_position( icao24, date, &csv)),
                    4 => Ok( self.airborne_velocity( icao24, date, &csv)),
                    _ => Ok( None) // surveillance replies etc. don't change track state
                }
            } else {
                Err( parse_error!( "missing common fields in SBS message: {}", line))
            }
        }
    }

    fn aircraft_identification (&mut self, icao24: &str, date: EpochMillis, csv: &CsvLine)->Option<TrackEvent> {
        let cs = csv.field::<&str>(10)?.trim();
        if cs.is_empty() { return None }

        let entry = self.entries.entry( icao24.to_string()).or_default();
        let changed = entry.cs.as_deref().is_some_and( |prev| prev != cs);
        let prev_cs = if changed { entry.cs.clone() } else { None };
        entry.cs = Some( cs.to_string());

        // a callsign (or callsign change) makes the accumulated position emittable
        if entry.position.is_some() && (entry.emitted_cs.as_deref() != Some(cs)) {
            return self.emit( icao24, date, prev_cs)
        }
        None
    }

    fn airborne_position (&mut self, icao24: &str, date: EpochMillis, csv: &CsvLine)->Option<TrackEvent> {
        let alt_ft = csv.field::<f64>(11);

        extract_fields!{ csv ?
            let lat: f64 = [14],
            let lon: f64 = [15] => {
                let temp_cs = self.config.temp_cs;
                let entry = self.entries.entry( icao24.to_string()).or_default();
                entry.position = Some( GeoPos::from_degrees( lat, lon));
                if let Some(alt) = alt_ft { entry.altitude = Some( feet( alt)) }

                if entry.cs.is_none() && temp_cs {
                    // emittable under the transponder id until identification arrives
                    entry.cs = Some( icao24.to_string());
                }

                if entry.cs.is_some() {
                    self.emit( icao24, date, None)
                } else {
                    None // not emittable yet - the identification message will flush it
                }
            } else {
                if let Some(alt) = alt_ft { // altitude-only position message
                    let entry = self.entries.entry( icao24.to_string()).or_default();
                    entry.altitude = Some( feet( alt));
                }
                None
            }
        }
    }

    fn airborne_velocity (&mut self, icao24: &str, date: EpochMillis, csv: &CsvLine)->Option<TrackEvent> {
        let gs_kn = csv.field::<f64>(12);
        let trk_deg = csv.field::<f64>(13);
        let vr_fpm = csv.field::<f64>(16);
        if gs_kn.is_none() && trk_deg.is_none() && vr_fpm.is_none() { return None }

        let entry = self.entries.entry( icao24.to_string()).or_default();
        if let Some(gs) = gs_kn { entry.speed = Some( knots( gs)) }
        if let Some(trk) = trk_deg { entry.heading = Some( Angle360::from_degrees( trk)) }
        if let Some(vr) = vr_fpm { entry.vertical_rate = Some( fpm( vr)) }
        None // velocity alone is not position-capable
    }

    fn emit (&mut self, icao24: &str, date: EpochMillis, prev_cs: Option<String>)->Option<TrackEvent> {
        let entry = self.entries.get_mut( icao24)?;
        let cs = entry.cs.clone()?;
        let position = entry.position?;

        let first = entry.emitted_cs.is_none();
        let mut track = Track::new( icao24, cs.clone(), date, position);
        track.altitude = entry.altitude;
        track.heading = entry.heading;
        track.speed = entry.speed;
        track.vertical_rate = entry.vertical_rate;
        track.set_status( if first { TrackStatus::NEW } else { TrackStatus::CHANGED });

        // the temporary id-as-callsign placeholder is not a reportable change
        if let Some(prev) = prev_cs {
            if prev != icao24 {
                track.set_status( TrackStatus::CHANGED_CS);
                track.amend( TrackAmendment::PreviousCallsign( prev));
            }
        }

        entry.emitted_cs = Some( cs);
        Some( TrackEvent::Update( track))
    }
}

impl Translator for SbsTranslator {
    fn name (&self)->&'static str { "sbs" }

    fn translate (&mut self, msg: &[u8])->Vec<TrackEvent> {
        let mut events: Vec<TrackEvent> = Vec::new();

        let Ok(text) = std::str::from_utf8( msg) else {
            warn!( "dropping non-UTF8 SBS buffer ({} bytes)", msg.len());
            return events
        };

        for line in text.lines() {
            if line.is_empty() { continue }
            match self.translate_line( line) {
                Ok(Some(event)) => events.push( event),
                Ok(None) => {}
                Err(e) => debug!( "skipped SBS line: {}", e)
            }
        }
        events
    }
}
