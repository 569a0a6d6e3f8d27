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

//! flow-management XML translator. Each fltdMessage is a single-flight track/route
//! update identified by flight ref and acid, with the infamous letter-suffixed altitude
//! text ('T' thousands, 'C' hundreds, bare values hundreds of feet)

use serde::{Serialize,Deserialize};
use tracing::{debug,warn};

use swim_common::datetime::{parse_iso_millis, EpochMillis};
use swim_common::dispatch::NameDispatch;
use swim_common::geo::GeoPos;
use swim_common::xml::XmlPullParser;
use swim_track::{Track, TrackAmendment, TrackEvent, TrackStatus};
use swim_track::cache::{CacheScope, TrackCache};
use crate::{knots, parse_suffixed_altitude, Translator};

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct TfmConfig {
    pub cache_scope: CacheScope,
    pub allow_incomplete: bool,
}

impl Default for TfmConfig {
    fn default ()->Self {
        TfmConfig { cache_scope: CacheScope::Global, allow_incomplete: false }
    }
}

#[derive(Debug,Clone,Copy)]
enum Field {
    Speed, SimpleAltitude, LatitudeDecimal, LongitudeDecimal, NextEvent, Eta
}

pub struct TfmTranslator {
    config: TfmConfig,
    cache: TrackCache,
    fields: NameDispatch<Field>,
}

impl TfmTranslator {
    pub fn new (config: TfmConfig)->Self {
        let fields = NameDispatch::new( &[
            ("speed", Field::Speed),
            ("simpleAltitude", Field::SimpleAltitude),
            ("latitudeDecimal", Field::LatitudeDecimal),
            ("longitudeDecimal", Field::LongitudeDecimal),
            ("nextEvent", Field::NextEvent),
            ("eta", Field::Eta),
        ]);
        let cache = TrackCache::new( config.cache_scope);
        TfmTranslator { config, cache, fields }
    }

    fn parse_fltd_message (&mut self, parser: &mut XmlPullParser)->Option<TrackEvent> {
        let mut acid: Option<String> = None;
        let mut flight_ref: Option<String> = None;
        let mut arr_apt: Option<String> = None;
        let mut dep_apt: Option<String> = None;
        let mut facility: Option<String> = None;
        let mut date: Option<EpochMillis> = None;

        while parser.parse_next_attr() {
            match parser.attr_name() {
                b"acid" => acid = Some( parser.attr_value().to_string()),
                b"flightRef" => flight_ref = Some( parser.attr_value().to_string()),
                b"arrApt" => arr_apt = Some( parser.attr_value().to_string()),
                b"depApt" => dep_apt = Some( parser.attr_value().to_string()),
                b"sourceFacility" => facility = Some( parser.attr_value().to_string()),
                b"sourceTimeStamp" => date = parse_iso_millis( parser.attr_value()),
                _ => {}
            }
        }

        let mut spd_kn: Option<f64> = None;
        let mut altitude = None;
        let mut lat: Option<f64> = None;
        let mut lon: Option<f64> = None;
        let mut next_eta: Option<String> = None;
        let mut actual_eta: Option<EpochMillis> = None;

        while parser.parse_next_tag() {
            if parser.is_start_tag() {
                if let Some(field) = self.fields.lookup( parser.tag_bytes()) {
                    match field {
                        Field::Speed => spd_kn = parser.read_f64_content(),
                        Field::SimpleAltitude => {
                            altitude = parser.parse_content_string().and_then( parse_suffixed_altitude);
                        }
                        Field::LatitudeDecimal => lat = parser.read_f64_content(),
                        Field::LongitudeDecimal => lon = parser.read_f64_content(),
                        Field::NextEvent => {
                            if parser.has_ancestor( b"ncsmTrackData") {
                                next_eta = parser.parse_attr( b"eta").map( |s| s.to_string());
                            }
                        }
                        Field::Eta => {
                            // only the airline-data actual ETA counts as landed
                            if parser.has_ancestor( b"airlineData") {
                                let mut is_actual = false;
                                let mut time: Option<EpochMillis> = None;
                                while parser.parse_next_attr() {
                                    match parser.attr_name() {
                                        b"etaType" => is_actual = parser.attr_value() == "ACTUAL",
                                        b"timeValue" => time = parse_iso_millis( parser.attr_value()),
                                        _ => {}
                                    }
                                }
                                if is_actual { actual_eta = time }
                            }
                        }
                    }
                }
            } else if parser.tag_bytes() == b"fltdMessage" {
                break
            }
        }

        let cs = acid?;
        let id = flight_ref.unwrap_or_else( || cs.clone());

        if let Some(arrival_date) = actual_eta {
            let arrival = match (lat, lon) {
                (Some(lat), Some(lon)) => Some( GeoPos::from_degrees( lat, lon)),
                _ => self.cache.get( &id).map( |t| t.position)
            };
            self.cache.remove( &id);
            return Some( TrackEvent::Completed { id, cs, date: arrival_date, arrival })
        }

        let date = date?;
        let position = match (lat, lon) {
            (Some(lat), Some(lon)) => GeoPos::from_degrees( lat, lon),
            _ => {
                if !self.config.allow_incomplete { return None }
                self.cache.get( &id)?.position
            }
        };

        let mut track = Track::new( id, cs, date, position);
        track.altitude = altitude;
        track.speed = spd_kn.map( knots);
        if let Some(apt) = arr_apt {
            track.amend( TrackAmendment::Annotation { key: "arrApt".into(), value: apt });
        }
        if let Some(apt) = dep_apt {
            track.amend( TrackAmendment::Annotation { key: "depApt".into(), value: apt });
        }
        if let Some(fac) = facility {
            track.amend( TrackAmendment::Annotation { key: "sourceFacility".into(), value: fac });
        }
        if let Some(eta) = next_eta {
            track.amend( TrackAmendment::Annotation { key: "nextEta".into(), value: eta });
        }

        self.cache.merge( &mut track);
        if !track.status.is_new() { track.set_status( TrackStatus::CHANGED) }

        Some( TrackEvent::Update( track))
    }
}

impl Translator for TfmTranslator {
    fn name (&self)->&'static str { "tfm" }

    fn translate (&mut self, msg: &[u8])->Vec<TrackEvent> {
        let mut events: Vec<TrackEvent> = Vec::new();

        let Some(mut parser) = XmlPullParser::new( msg) else {
            warn!( "not a parseable flow-management message ({} bytes)", msg.len());
            return events
        };

        while parser.parse_next_tag() {
            if parser.is_start_tag() && parser.tag_bytes() == b"fltdMessage" {
                if let Some(event) = self.parse_fltd_message( &mut parser) {
                    events.push( event);
                } else {
                    debug!( "skipped incomplete fltdMessage record");
                }
            }
        }
        events
    }
}
