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

//! en-route flight-collection XML translator. A message is a collection of flight
//! records, each a full or partial snapshot identified by computer id and aircraft
//! identification. Flights report an actual arrival time when they land, which becomes a
//! terminal completion event

use serde::{Serialize,Deserialize};
use tracing::{debug,warn};
use uom::si::f64::Velocity;

use swim_common::angle::Angle360;
use swim_common::datetime::{parse_iso_millis, EpochMillis};
use swim_common::dispatch::NameDispatch;
use swim_common::geo::{heading_from_vxy, speed_from_vxy, GeoPos};
use swim_common::xml::XmlPullParser;
use swim_track::{Track, TrackEvent, TrackStatus};
use swim_track::cache::{CacheScope, TrackCache};
use crate::{altitude_from_uom, knots, speed_from_uom, Translator};

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct SfdpsConfig {
    pub cache_scope: CacheScope,
    pub allow_incomplete: bool,
}

impl Default for SfdpsConfig {
    fn default ()->Self {
        // en-route flights have no useful partition key
        SfdpsConfig { cache_scope: CacheScope::Global, allow_incomplete: false }
    }
}

#[derive(Debug,Clone,Copy)]
enum Field {
    FlightIdentification, Position, Pos, X, Y, ActualSpeed, Altitude, Actual
}

pub struct SfdpsTranslator {
    config: SfdpsConfig,
    cache: TrackCache,
    fields: NameDispatch<Field>,
}

impl SfdpsTranslator {
    pub fn new (config: SfdpsConfig)->Self {
        let fields = NameDispatch::new( &[
            ("flightIdentification", Field::FlightIdentification),
            ("position", Field::Position),
            ("pos", Field::Pos),
            ("x", Field::X),
            ("y", Field::Y),
            ("actualSpeed", Field::ActualSpeed),
            ("altitude", Field::Altitude),
            ("actual", Field::Actual),
        ]);
        let cache = TrackCache::new( config.cache_scope);
        SfdpsTranslator { config, cache, fields }
    }

    fn parse_flight (&mut self, parser: &mut XmlPullParser)->Option<TrackEvent> {
        let mut id: Option<String> = None;
        let mut cs: Option<String> = None;
        let mut date: Option<EpochMillis> = None;
        let mut position: Option<GeoPos> = None;
        let mut vx: Option<f64> = None;
        let mut vy: Option<f64> = None;
        let mut speed: Option<Velocity> = None;
        let mut altitude = None;
        let mut arrival_time: Option<EpochMillis> = None;

        while parser.parse_next_tag() {
            if parser.is_start_tag() {
                if let Some(field) = self.fields.lookup( parser.tag_bytes()) {
                    match field {
                        Field::FlightIdentification => {
                            while parser.parse_next_attr() {
                                match parser.attr_name() {
                                    b"computerId" => id = Some( parser.attr_value().to_string()),
                                    b"aircraftIdentification" => cs = Some( parser.attr_value().to_string()),
                                    _ => {}
                                }
                            }
                        }
                        Field::Position => {
                            // only the outer enRoute position element carries the time
                            if let Some(t) = parser.parse_attr( b"positionTime") {
                                date = parse_iso_millis( t);
                            }
                        }
                        Field::Pos => {
                            // space separated "lat lon" decimal pair
                            if parser.has_ancestor( b"location") {
                                if let Some(s) = parser.parse_content_string() {
                                    position = parse_lat_lon_pair( s);
                                }
                            }
                        }
                        Field::X => if parser.has_parent( b"trackVelocity") { vx = parser.read_f64_content() },
                        Field::Y => if parser.has_parent( b"trackVelocity") { vy = parser.read_f64_content() },
                        Field::ActualSpeed => {
                            let uom = parser.parse_attr( b"uom").map( |s| s.to_string());
                            if let (Some(uom), Some(v)) = (uom, parser.read_f64_content()) {
                                speed = speed_from_uom( v, &uom);
                            }
                        }
                        Field::Altitude => {
                            let uom = parser.parse_attr( b"uom").map( |s| s.to_string());
                            if let (Some(uom), Some(v)) = (uom, parser.read_f64_content()) {
                                altitude = altitude_from_uom( v, &uom);
                            }
                        }
                        Field::Actual => {
                            if parser.has_ancestor( b"arrival") {
                                if let Some(t) = parser.parse_attr( b"time") {
                                    arrival_time = parse_iso_millis( t);
                                }
                            }
                        }
                    }
                }
            } else if parser.tag_bytes() == b"flight" {
                break
            }
        }

        let cs = cs?;
        let id = id.unwrap_or_else( || cs.clone());

        if let Some(arrival_date) = arrival_time {
            let arrival = position.or_else( || self.cache.get( &id).map( |t| t.position));
            self.cache.remove( &id);
            return Some( TrackEvent::Completed { id, cs, date: arrival_date, arrival })
        }

        let date = date?;
        let position = match position {
            Some(p) => p,
            None => {
                if !self.config.allow_incomplete { return None }
                self.cache.get( &id)?.position
            }
        };

        let mut track = Track::new( id, cs, date, position);
        track.altitude = altitude;
        if let (Some(vx), Some(vy)) = (vx, vy) {
            track.heading = Some( heading_from_vxy( vx, vy));
            if speed.is_none() { speed = Some( knots( speed_from_vxy( vx, vy))) }
        }
        track.speed = speed;

        self.cache.merge( &mut track);
        if !track.status.is_new() { track.set_status( TrackStatus::CHANGED) }

        Some( TrackEvent::Update( track))
    }
}

impl Translator for SfdpsTranslator {
    fn name (&self)->&'static str { "sfdps" }

    fn translate (&mut self, msg: &[u8])->Vec<TrackEvent> {
        let mut events: Vec<TrackEvent> = Vec::new();

        let Some(mut parser) = XmlPullParser::new( msg) else {
            warn!( "not a parseable flight collection ({} bytes)", msg.len());
            return events
        };

        while parser.parse_next_tag() {
            if parser.is_start_tag() && parser.tag_bytes() == b"flight" {
                if let Some(event) = self.parse_flight( &mut parser) {
                    events.push( event);
                } else {
                    debug!( "skipped incomplete flight record");
                }
            }
        }
        events
    }
}

fn parse_lat_lon_pair (s: &str)->Option<GeoPos> {
    let mut it = s.split_ascii_whitespace();
    let lat: f64 = it.next()?.parse().ok()?;
    let lon: f64 = it.next()?.parse().ok()?;
    Some( GeoPos::from_degrees( lat, lon))
}
