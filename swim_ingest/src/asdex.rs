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

//! ground-surface (airport surveillance) XML translator. Messages carry an airport id
//! followed by a batch of positionReport records, most of which are deltas that have to
//! be completed from the per-airport track cache

use serde::{Serialize,Deserialize};
use tracing::{debug,warn};

use swim_common::angle::Angle360;
use swim_common::datetime::{parse_iso_millis, EpochMillis};
use swim_common::dispatch::NameDispatch;
use swim_common::geo::GeoPos;
use swim_common::xml::XmlPullParser;
use swim_track::{Track, TrackAmendment, TrackEvent, TrackStatus};
use swim_track::cache::{CacheScope, TrackCache};
use crate::{feet, mph, Translator};

/// some surface feeds report this aircraft id before the flight plan is correlated
const PLACEHOLDER_ID: &str = "UNKN";

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct AsdexConfig {
    pub cache_scope: CacheScope,
    pub allow_incomplete: bool, // emit position-less deltas if the cache can fill them
}

impl Default for AsdexConfig {
    fn default ()->Self {
        AsdexConfig { cache_scope: CacheScope::PerPartition, allow_incomplete: false }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum TargetType { Aircraft, Vehicle, Unknown }

impl TargetType {
    /// unrecognized values deliberately map to Unknown, the feed is known to emit
    /// undocumented ones
    fn from_str (s: &str)->TargetType {
        match s {
            "aircraft" => TargetType::Aircraft,
            "vehicle" => TargetType::Vehicle,
            _ => TargetType::Unknown
        }
    }

    fn as_str (&self)->&'static str {
        match self {
            TargetType::Aircraft => "aircraft",
            TargetType::Vehicle => "vehicle",
            TargetType::Unknown => "unknown"
        }
    }
}

#[derive(Debug,Clone,Copy)]
enum Field {
    Time, Latitude, Longitude, Track, AircraftId, TgtType, AcType,
    Tse, Di, Altitude, Heading, Speed, Ud, Gbs
}

pub struct AsdexTranslator {
    config: AsdexConfig,
    cache: TrackCache,
    fields: NameDispatch<Field>,
}

impl AsdexTranslator {
    pub fn new (config: AsdexConfig)->Self {
        let fields = NameDispatch::new( &[
            ("time", Field::Time),
            ("latitude", Field::Latitude),
            ("longitude", Field::Longitude),
            ("track", Field::Track),
            ("aircraftId", Field::AircraftId),
            ("tgtType", Field::TgtType),
            ("acType", Field::AcType),
            ("tse", Field::Tse),
            ("di", Field::Di),
            ("altitude", Field::Altitude),
            ("heading", Field::Heading),
            ("speed", Field::Speed),
            ("ud", Field::Ud),
            ("gbs", Field::Gbs),
        ]);
        let cache = TrackCache::new( config.cache_scope);
        AsdexTranslator { config, cache, fields }
    }

    fn parse_position_report (&mut self, parser: &mut XmlPullParser)->Option<TrackEvent> {
        let mut date: Option<EpochMillis> = None;
        let mut lat: Option<f64> = None;
        let mut lon: Option<f64> = None;
        let mut track_id: Option<String> = None;
        let mut acid: Option<String> = None;
        let mut tgt_type = TargetType::Unknown;
        let mut ac_type: Option<String> = None;
        let mut tse = false;
        let mut alt_ft: Option<f64> = None;
        let mut hdg_deg: Option<f64> = None;
        let mut spd_mph: Option<f64> = None;
        let mut ud: Option<String> = None;
        let mut on_ground = false;

        while parser.parse_next_tag() {
            if parser.is_start_tag() {
                // aircraftId occasionally carries unrelated child markup, which the
                // dispatch just skips over
                if let Some(field) = self.fields.lookup( parser.tag_bytes()) {
                    match field {
                        Field::Time => date = parser.parse_content_string().and_then( parse_iso_millis),
                        Field::Latitude => lat = parser.read_f64_content(),
                        Field::Longitude => lon = parser.read_f64_content(),
                        Field::Track => track_id = parser.read_interned_string_content(),
                        Field::AircraftId => acid = parser.read_interned_string_content(),
                        Field::TgtType => {
                            if let Some(s) = parser.parse_content_string() { tgt_type = TargetType::from_str(s) }
                        }
                        Field::AcType => ac_type = parser.read_interned_string_content(),
                        Field::Tse => tse = parse_flag( parser),
                        Field::Di => { parse_flag( parser); } // display hint, not ours to enforce
                        Field::Altitude => alt_ft = parser.read_f64_content(),
                        Field::Heading => hdg_deg = parser.read_f64_content(),
                        Field::Speed => spd_mph = parser.read_f64_content(),
                        Field::Ud => ud = parser.read_interned_string_content(),
                        Field::Gbs => on_ground = parse_flag( parser),
                    }
                }
            } else if parser.tag_bytes() == b"positionReport" {
                break
            }
        }

        let id = track_id?;
        let date = date?;

        if tse { // track service ends - terminal event, evict the cache entry
            let cs = self.cache.remove( &id).map_or_else( || id.clone(), |t| t.cs);
            return Some( TrackEvent::Dropped { id, cs, date })
        }

        let position = match (lat, lon) {
            (Some(lat), Some(lon)) => GeoPos::from_degrees( lat, lon),
            _ => {
                if !self.config.allow_incomplete { return None }
                self.cache.get( &id)?.position // position-less delta without prior sighting is unusable
            }
        };

        let cs = match acid {
            Some(acid) if acid != PLACEHOLDER_ID => acid,
            _ => String::new() // merge falls back to the track id
        };

        let mut track = Track::new( id, cs, date, position);
        track.altitude = alt_ft.map( feet);
        track.heading = hdg_deg.map( Angle360::from_degrees);
        track.speed = spd_mph.map( mph);
        track.amend( TrackAmendment::Annotation { key: "tgtType".into(), value: tgt_type.as_str().into() });
        if let Some(ac_type) = ac_type {
            track.amend( TrackAmendment::Annotation { key: "acType".into(), value: ac_type });
        }
        if on_ground {
            track.amend( TrackAmendment::Annotation { key: "gbs".into(), value: "1".into() });
        }
        if let Some(ud) = ud {
            track.amend( TrackAmendment::Annotation { key: "ud".into(), value: ud });
        }

        self.cache.merge( &mut track);
        if !track.status.is_new() { track.set_status( TrackStatus::CHANGED) }

        Some( TrackEvent::Update( track))
    }
}

impl Translator for AsdexTranslator {
    fn name (&self)->&'static str { "asdex" }

    fn translate (&mut self, msg: &[u8])->Vec<TrackEvent> {
        let mut events: Vec<TrackEvent> = Vec::new();

        let Some(mut parser) = XmlPullParser::new( msg) else {
            warn!( "not a parseable surface message ({} bytes)", msg.len());
            return events
        };

        while parser.parse_next_tag() {
            if parser.is_start_tag() {
                match parser.tag_bytes() {
                    b"airport" => {
                        if let Some(airport) = parser.parse_content_string() {
                            self.cache.set_partition( airport);
                        }
                    }
                    b"positionReport" => {
                        if let Some(event) = self.parse_position_report( &mut parser) {
                            events.push( event);
                        } else {
                            debug!( "skipped incomplete positionReport");
                        }
                    }
                    _ => {}
                }
            }
        }
        events
    }
}

fn parse_flag (parser: &mut XmlPullParser)->bool {
    parser.parse_content_string().is_some_and( |s| s == "1" || s == "true" || s == "on")
}
