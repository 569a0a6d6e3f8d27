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

/// run with `cargo test test_cache -- --nocapture`

use std::time::Duration;

use uom::si::f64::{Length,Velocity};
use uom::si::length::foot;
use uom::si::velocity::knot;

use swim_common::angle::Angle360;
use swim_common::datetime::EpochMillis;
use swim_common::geo::GeoPos;
use swim_track::{Track, TrackStatus};
use swim_track::cache::{CacheScope, SharedTrackCache, TrackCache};

const T0: i64 = 1_700_000_000_000;

fn full_track (id: &str, cs: &str, dt_millis: i64)->Track {
    let mut track = Track::new( id, cs, EpochMillis::new( T0 + dt_millis), GeoPos::from_degrees( 33.434, -112.011));
    track.altitude = Some( Length::new::<foot>( 2500.0));
    track.heading = Some( Angle360::from_degrees( 270.0));
    track.speed = Some( Velocity::new::<knot>( 140.0));
    track.vertical_rate = Some( Velocity::new::<knot>( 0.0));
    track
}

fn delta_track (id: &str, dt_millis: i64)->Track {
    Track::new( id, "", EpochMillis::new( T0 + dt_millis), GeoPos::from_degrees( 33.435, -112.012))
}

#[test]
fn test_delta_completion () {
    let mut cache = TrackCache::new( CacheScope::PerPartition);
    cache.set_partition( "PHX");

    let mut full = full_track( "1422", "SWA1234", 0);
    cache.merge( &mut full);
    assert!( full.status.is_new());

    // a position-only delta gets the remaining fields from the cache
    let mut delta = delta_track( "1422", 1000);
    cache.merge( &mut delta);

    assert_eq!( delta.cs, "SWA1234");
    assert!( delta.altitude.is_some());
    assert!( delta.heading.is_some());
    assert!( delta.speed.is_some());
    assert!( delta.vertical_rate.is_some());
    assert!( !delta.status.is_new());

    // but keeps its own position and date
    assert_eq!( delta.position, GeoPos::from_degrees( 33.435, -112.012));
    assert_eq!( delta.date.millis(), T0 + 1000);
}

#[test]
fn test_unseen_id_callsign_fallback () {
    let mut cache = TrackCache::new( CacheScope::PerPartition);
    cache.set_partition( "PHX");

    let mut delta = delta_track( "7733", 0);
    cache.merge( &mut delta);
    assert_eq!( delta.cs, "7733"); // no callsign ever seen - id stands in
    assert!( delta.status.is_new());
}

#[test]
fn test_changed_callsign () {
    let mut cache = TrackCache::new( CacheScope::PerPartition);
    cache.set_partition( "PHX");

    let mut t1 = full_track( "1422", "SWA1234", 0);
    cache.merge( &mut t1);

    let mut t2 = full_track( "1422", "SWA4321", 1000);
    cache.merge( &mut t2);

    assert!( t2.status.is_changed_cs());
    assert_eq!( t2.previous_cs(), Some("SWA1234"));

    // the id-as-callsign placeholder is not a real callsign change
    let mut cache = TrackCache::new( CacheScope::PerPartition);
    cache.set_partition( "PHX");
    let mut t1 = delta_track( "7733", 0);
    cache.merge( &mut t1);
    let mut t2 = full_track( "7733", "N7733K", 1000);
    cache.merge( &mut t2);
    assert!( !t2.status.is_changed_cs());
}

#[test]
fn test_partition_scope () {
    let mut cache = TrackCache::new( CacheScope::PerPartition);
    cache.set_partition( "PHX");
    let mut t = full_track( "1422", "SWA1234", 0);
    cache.merge( &mut t);
    assert_eq!( cache.len(), 1);

    cache.set_partition( "SFO"); // airport change drops the PHX entries
    assert_eq!( cache.len(), 0);

    let mut cache = TrackCache::new( CacheScope::Global);
    cache.set_partition( "PHX");
    let mut t = full_track( "1422", "SWA1234", 0);
    cache.merge( &mut t);
    cache.set_partition( "SFO");
    assert_eq!( cache.len(), 1);
}

#[test]
fn test_inert_scope () {
    let mut cache = TrackCache::new( CacheScope::None);
    let mut full = full_track( "1422", "SWA1234", 0);
    cache.merge( &mut full);
    assert_eq!( cache.len(), 0);
    assert!( cache.get( "1422").is_none());

    let mut delta = delta_track( "1422", 1000);
    cache.merge( &mut delta);
    assert_eq!( delta.cs, "1422"); // fallback still applies, completion does not
    assert!( delta.altitude.is_none());
}

#[test]
fn test_terminal_eviction () {
    let mut cache = TrackCache::new( CacheScope::Global);
    let mut t = full_track( "1422", "SWA1234", 0);
    cache.merge( &mut t);
    assert_eq!( cache.len(), 1);

    let mut dropped = full_track( "1422", "SWA1234", 1000);
    dropped.set_status( TrackStatus::DROPPED);
    cache.merge( &mut dropped);
    assert_eq!( cache.len(), 0);
}

#[test]
fn test_shared_cache_merge () {
    let shared = SharedTrackCache::new();

    // surface channel knows position and callsign
    let t1 = Track::new( "A12", "UAL89", EpochMillis::new(T0), GeoPos::from_degrees( 37.62, -122.38));
    shared.merge( &t1);

    // radar channel adds altitude and speed for the same id, slightly later
    let mut t2 = Track::new( "A12", "", EpochMillis::new( T0 + 500), GeoPos::from_degrees( 37.621, -122.381));
    t2.altitude = Some( Length::new::<foot>( 1200.0));
    t2.speed = Some( Velocity::new::<knot>( 180.0));
    shared.merge( &t2);

    let merged = shared.get( "A12").unwrap();
    assert_eq!( merged.cs, "UAL89");                 // set field survives
    assert!( merged.altitude.is_some());             // unset field filled
    assert_eq!( merged.date.millis(), T0 + 500);     // newest observation wins the when/where
    assert_eq!( merged.position, GeoPos::from_degrees( 37.621, -122.381));
}

#[test]
fn test_shared_cache_remove_stale () {
    let shared = SharedTrackCache::new();
    shared.merge( &Track::new( "A12", "UAL89", EpochMillis::new(T0), GeoPos::from_degrees( 37.62, -122.38)));
    shared.merge( &Track::new( "B77", "DAL7", EpochMillis::new( T0 + 50_000), GeoPos::from_degrees( 33.43, -112.01)));

    let dropped = shared.remove_stale( EpochMillis::new( T0 + 60_000), Duration::from_secs(30));
    assert_eq!( dropped, vec!["A12".to_string()]);
    assert_eq!( shared.len(), 1);
    assert!( shared.get( "B77").is_some());
}
