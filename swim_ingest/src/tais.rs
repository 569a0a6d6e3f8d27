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

//! terminal-area radar XML translator. Track positions come as x/y offsets in 1/256
//! nautical mile fixed point relative to the radar site, so translation needs a
//! configured site table to produce geographic positions

use std::collections::HashMap;
use serde::{Serialize,Deserialize};
use tracing::{debug,warn};

use swim_common::datetime::{parse_iso_millis, EpochMillis};
use swim_common::dispatch::NameDispatch;
use swim_common::geo::{heading_from_vxy, speed_from_vxy, GeoPos, NM_IN_METERS};
use swim_common::xml::XmlPullParser;
use swim_track::{Track, TrackAmendment, TrackEvent, TrackStatus};
use swim_track::cache::{CacheScope, TrackCache};
use crate::{fpm, knots, Translator};

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct TaisConfig {
    pub cache_scope: CacheScope,
    pub allow_incomplete: bool,

    /// radar site reference positions keyed by the src element value. Records from an
    /// unknown src cannot be georeferenced and are skipped
    pub sites: HashMap<String,GeoPos>,
}

impl Default for TaisConfig {
    fn default ()->Self {
        TaisConfig { cache_scope: CacheScope::PerPartition, allow_incomplete: false, sites: HashMap::new() }
    }
}

#[derive(Debug,Clone,Copy)]
enum Field {
    TrackNum, MrtTime, Status, XPos, YPos, Vx, Vy, VVert, Acid,
    Frozen, New, Pseudo, Adsb
}

pub struct TaisTranslator {
    config: TaisConfig,
    cache: TrackCache,
    fields: NameDispatch<Field>,
}

impl TaisTranslator {
    pub fn new (config: TaisConfig)->Self {
        let fields = NameDispatch::new( &[
            ("trackNum", Field::TrackNum),
            ("mrtTime", Field::MrtTime),
            ("status", Field::Status),
            ("xPos", Field::XPos),
            ("yPos", Field::YPos),
            ("vx", Field::Vx),
            ("vy", Field::Vy),
            ("vVert", Field::VVert),
            ("acid", Field::Acid),
            ("frozen", Field::Frozen),
            ("new", Field::New),
            ("pseudo", Field::Pseudo),
            ("adsb", Field::Adsb),
        ]);
        let cache = TrackCache::new( config.cache_scope);
        TaisTranslator { config, cache, fields }
    }

    fn parse_record (&mut self, parser: &mut XmlPullParser, site: &GeoPos)->Option<TrackEvent> {
        let mut track_num: Option<String> = None;
        let mut date: Option<EpochMillis> = None;
        let mut status: Option<String> = None;
        let mut x256: Option<i64> = None;
        let mut y256: Option<i64> = None;
        let mut vx_kn: Option<f64> = None;
        let mut vy_kn: Option<f64> = None;
        let mut vr_fpm: Option<f64> = None;
        let mut acid: Option<String> = None;
        let mut frozen = false;
        let mut pseudo = false;
        let mut adsb = false;

        while parser.parse_next_tag() {
            if parser.is_start_tag() {
                if let Some(field) = self.fields.lookup( parser.tag_bytes()) {
                    match field {
                        Field::TrackNum => track_num = parser.read_interned_string_content(),
                        Field::MrtTime => date = parser.parse_content_string().and_then( parse_iso_millis),
                        Field::Status => status = parser.read_interned_string_content(),
                        Field::XPos => x256 = parser.read_i64_content(),
                        Field::YPos => y256 = parser.read_i64_content(),
                        Field::Vx => vx_kn = parser.read_f64_content(),
                        Field::Vy => vy_kn = parser.read_f64_content(),
                        Field::VVert => vr_fpm = parser.read_f64_content(),
                        Field::Acid => acid = parser.read_interned_string_content(),
                        Field::Frozen => frozen = parse_flag( parser),
                        Field::New => { parse_flag( parser); } // cache merge decides what is new
                        Field::Pseudo => pseudo = parse_flag( parser),
                        Field::Adsb => adsb = parse_flag( parser),
                    }
                }
            } else if parser.tag_bytes() == b"record" {
                break
            }
        }

        let id = track_num?;
        let date = date?;

        if status.as_deref() == Some("drop") {
            let cs = self.cache.remove( &id).map_or_else( || id.clone(), |t| t.cs);
            return Some( TrackEvent::Dropped { id, cs, date })
        }

        let position = match (x256, y256) {
            (Some(x), Some(y)) => {
                // 1/256 NM fixed point, x east / y north of the radar site
                let x_m = x as f64 / 256.0 * NM_IN_METERS;
                let y_m = y as f64 / 256.0 * NM_IN_METERS;
                site.move_by_meters( x_m, y_m)
            }
            _ => {
                if !self.config.allow_incomplete { return None }
                self.cache.get( &id)?.position
            }
        };

        let mut track = Track::new( id, acid.unwrap_or_default(), date, position);
        if let (Some(vx), Some(vy)) = (vx_kn, vy_kn) {
            track.heading = Some( heading_from_vxy( vx, vy));
            track.speed = Some( knots( speed_from_vxy( vx, vy)));
        }
        track.vertical_rate = vr_fpm.map( fpm);
        if frozen || status.as_deref() == Some("coasting") {
            track.set_status( TrackStatus::FROZEN);
        }
        if pseudo {
            track.amend( TrackAmendment::Annotation { key: "pseudo".into(), value: "1".into() });
        }
        if adsb {
            track.amend( TrackAmendment::Annotation { key: "adsb".into(), value: "1".into() });
        }

        self.cache.merge( &mut track);
        if !track.status.is_new() { track.set_status( TrackStatus::CHANGED) }

        Some( TrackEvent::Update( track))
    }
}

impl Translator for TaisTranslator {
    fn name (&self)->&'static str { "tais" }

    fn translate (&mut self, msg: &[u8])->Vec<TrackEvent> {
        let mut events: Vec<TrackEvent> = Vec::new();

        let Some(mut parser) = XmlPullParser::new( msg) else {
            warn!( "not a parseable terminal-radar message ({} bytes)", msg.len());
            return events
        };

        let mut site: Option<GeoPos> = None;

        while parser.parse_next_tag() {
            if parser.is_start_tag() {
                match parser.tag_bytes() {
                    b"src" => {
                        if let Some(src) = parser.parse_content_string() {
                            site = self.config.sites.get( src).copied();
                            if site.is_some() {
                                self.cache.set_partition( src);
                            } else {
                                warn!( "unknown terminal-radar source {:?}, records skipped", src);
                            }
                        }
                    }
                    b"record" => {
                        // a record before a known src cannot be georeferenced
                        if let Some(site) = site {
                            if let Some(event) = self.parse_record( &mut parser, &site) {
                                events.push( event);
                            } else {
                                debug!( "skipped incomplete terminal-radar record");
                            }
                        } else {
                            parser.skip_element();
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
    parser.parse_content_string().is_some_and( |s| s == "1" || s == "true")
}
