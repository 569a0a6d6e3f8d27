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

/// run with `cargo test test_trajectory -- --nocapture`

use swim_common::datetime::EpochMillis;
use swim_common::geo::GeoPos;
use swim_track::trajectory::{
    AttCodec, PosCodec, Trace, TrackPoint, Trajectory, TrajectoryPoint, MAX_TIME_OFFSET_MILLIS
};

const T0: i64 = 1_700_000_000_000;

fn pos_point (dt_millis: i64, lat_deg: f64, lon_deg: f64, alt_m: f64)->TrajectoryPoint {
    TrajectoryPoint { date: EpochMillis::new( T0 + dt_millis), lat_deg, lon_deg, alt_m }
}

fn att_point (dt_millis: i64, hdg_deg: f64, spd_mps: f64, vr_mps: f64)->TrackPoint {
    TrackPoint {
        date: EpochMillis::new( T0 + dt_millis),
        lat_deg: 37.62, lon_deg: -122.38, alt_m: 1000.0,
        hdg_deg, spd_mps, vr_mps
    }
}

#[test]
fn test_position_roundtrip () {
    let coords = [
        (37.615223, -122.389977),
        (-33.946111, 151.177222),
        (0.0, 0.0),
        (90.0, 180.0),
        (-90.0, -180.0),
        (89.9999999, -179.9999999),
    ];

    let mut traj: Trajectory<PosCodec> = Trajectory::new();
    for (i,(lat,lon)) in coords.iter().enumerate() {
        assert!( traj.append( &pos_point( i as i64 * 1000, *lat, *lon, 123.45)));
    }

    for (i,(lat,lon)) in coords.iter().enumerate() {
        let p = traj.point_at(i).unwrap();
        let d = GeoPos::from_degrees( *lat, *lon).distance_meters( &GeoPos::from_degrees( p.lat_deg, p.lon_deg));
        println!("({:.7},{:.7}) -> ({:.7},{:.7})  err = {:.4} m", lat, lon, p.lat_deg, p.lon_deg, d);
        assert!( d < 1.0);
        assert_eq!( p.date.millis(), T0 + i as i64 * 1000);
    }
}

#[test]
fn test_altitude_centimeters_exact () {
    let alts = [0.0, 0.01, -0.01, 1234.56, -304.8, 19812.0];

    let mut traj: Trajectory<PosCodec> = Trajectory::new();
    for (i,alt) in alts.iter().enumerate() {
        assert!( traj.append( &pos_point( i as i64 * 1000, 37.0, -122.0, *alt)));
    }
    for (i,alt) in alts.iter().enumerate() {
        let p = traj.point_at(i).unwrap();
        assert!( (p.alt_m - alt).abs() < 1e-9, "alt {} -> {}", alt, p.alt_m);
    }
}

#[test]
fn test_attitude_resolution () {
    let samples = [
        // hdg, spd, vr
        (0.0, 0.0, 0.0),
        (359.99, 123.4567, -12.3456),
        (180.005, 0.0001, 0.0001),
        (90.0, 257.1111, -30.9999),
    ];

    let mut traj: Trajectory<AttCodec> = Trajectory::new();
    for (i,(h,s,v)) in samples.iter().enumerate() {
        assert!( traj.append( &att_point( i as i64 * 1000, *h, *s, *v)));
    }

    for (i,(h,s,v)) in samples.iter().enumerate() {
        let p = traj.point_at(i).unwrap();
        println!("hdg {} -> {}, spd {} -> {}, vr {} -> {}", h, p.hdg_deg, s, p.spd_mps, v, p.vr_mps);
        assert!( (p.hdg_deg - h).abs() < 0.005 + 1e-9);
        assert!( (p.spd_mps - s).abs() < 0.00005 + 1e-9);
        assert!( (p.vr_mps - v).abs() < 0.00005 + 1e-9);
        assert!( !(*s > 0.0 && p.spd_mps < 0.0) && !(*s < 0.0 && p.spd_mps > 0.0));
        assert!( !(*v > 0.0 && p.vr_mps < 0.0) && !(*v < 0.0 && p.vr_mps > 0.0));
    }

    // zero never comes back negative
    let p = traj.point_at(0).unwrap();
    assert!( p.spd_mps == 0.0 && p.spd_mps.is_sign_positive());
    assert!( p.vr_mps == 0.0 && p.vr_mps.is_sign_positive());
}

#[test]
fn test_rate_saturation () {
    let mut traj: Trajectory<AttCodec> = Trajectory::new();
    assert!( traj.append( &att_point( 0, 10.0, 5000.0, -5000.0)));
    let p = traj.point_at(0).unwrap();
    assert!( (p.spd_mps - 838.8607).abs() < 1e-6);
    assert!( (p.vr_mps + 838.8607).abs() < 1e-6);
}

#[test]
fn test_growth_policy () {
    let mut traj: Trajectory<PosCodec> = Trajectory::new();
    assert_eq!( traj.capacity(), 0);

    for i in 0..100 {
        traj.append( &pos_point( i * 1000, 37.0 + (i as f64)*0.001, -122.0, 100.0));
    }
    assert_eq!( traj.len(), 100);
    assert_eq!( traj.capacity(), 128); // 32 point increments below 256

    for i in 0..300 {
        traj.append( &pos_point( (100 + i) * 1000, 37.0, -122.0, 100.0));
    }
    assert_eq!( traj.len(), 400);
    assert_eq!( traj.capacity(), 512); // doubling from 256 on

    let mut n = 0;
    let mut last = 0;
    for p in traj.iter() {
        assert!( p.date.millis() >= last);
        last = p.date.millis();
        n += 1;
    }
    assert_eq!( n, 400);
}

#[test]
fn test_reverse_iteration () {
    let mut traj: Trajectory<PosCodec> = Trajectory::new();
    for i in 0..50 {
        traj.append( &pos_point( i * 1000, 37.0 + (i as f64)*0.001, -122.0 - (i as f64)*0.001, 100.0 + i as f64));
    }

    let mut forward: Vec<TrajectoryPoint> = traj.iter().collect();
    let backward: Vec<TrajectoryPoint> = traj.iter().rev().collect();

    assert_eq!( forward.len(), 50);
    assert_eq!( backward.len(), 50);

    forward.reverse();
    assert_eq!( forward, backward);
    assert_eq!( backward[0].date.millis(), T0 + 49_000);
}

#[test]
fn test_archive_header () {
    let mut traj: Trajectory<PosCodec> = Trajectory::new();
    assert_eq!( traj.archive_header( "c123", "UAL89"), "trajectory c123 cs=UAL89 t0=0 points=0 words/point=2\n");

    traj.append( &pos_point( 0, 37.615223, -122.389977, 100.0));
    traj.append( &pos_point( 1000, 37.616223, -122.388977, 110.0));
    traj.append( &pos_point( 2000, 37.617223, -122.387977, 120.0));

    let header = traj.archive_header( "c123", "UAL89");
    println!("{header}");
    assert_eq!( header,
        "trajectory c123 cs=UAL89 t0=1700000000000 points=3 words/point=2 first=37.6152230,-122.3899770\n");
}

#[test]
fn test_branch_and_snapshot () {
    let mut traj: Trajectory<PosCodec> = Trajectory::new();
    for i in 0..10 {
        traj.append( &pos_point( i * 1000, 37.0, -122.0 + (i as f64)*0.01, 100.0));
    }

    let mut branch = traj.branch();
    branch.append( &pos_point( 10_000, 37.0, -121.0, 100.0));

    assert_eq!( traj.len(), 10);
    assert_eq!( branch.len(), 11);
    assert_eq!( traj.point_at(9).unwrap(), branch.point_at(9).unwrap());

    let snap = traj.snapshot();
    assert_eq!( snap.len(), 10 * 2); // exact size, 2 words per position point
    assert_eq!( &snap[..], traj.words());
}

#[test]
fn test_time_offset_overflow () {
    let mut traj: Trajectory<PosCodec> = Trajectory::new();
    assert!( traj.append( &pos_point( 0, 37.0, -122.0, 100.0)));
    assert!( traj.append( &pos_point( MAX_TIME_OFFSET_MILLIS, 37.0, -122.0, 100.0)));
    assert!( !traj.append( &pos_point( MAX_TIME_OFFSET_MILLIS + 1, 37.0, -122.0, 100.0)));
    assert!( !traj.append( &pos_point( -1, 37.0, -122.0, 100.0)));
    assert_eq!( traj.len(), 2);
}

#[test]
fn test_non_finite_rejected () {
    let mut traj: Trajectory<PosCodec> = Trajectory::new();
    assert!( !traj.append( &pos_point( 0, f64::NAN, -122.0, 100.0)));
    assert!( !traj.append( &pos_point( 0, 37.0, -122.0, f64::INFINITY)));
    assert!( traj.is_empty());
}

#[test]
fn test_trace_ring () {
    let mut trace: Trace<PosCodec> = Trace::new(4);
    assert_eq!( trace.capacity(), 4);

    for i in 0..6 {
        assert!( trace.append( &pos_point( i * 1000, 37.0 + i as f64, -122.0, 100.0)));
    }
    assert_eq!( trace.len(), 4);

    // the last 4 points, oldest first
    let dates: Vec<i64> = trace.iter().map( |p| (p.date.millis() - T0)/1000).collect();
    assert_eq!( dates, vec![2,3,4,5]);

    let rev: Vec<i64> = trace.iter_reverse().map( |p| (p.date.millis() - T0)/1000).collect();
    assert_eq!( rev, vec![5,4,3,2]);

    assert_eq!( trace.point_at(0).unwrap().lat_deg, 39.0);
    assert!( trace.point_at(4).is_none());
}

#[test]
fn test_trace_partial_fill () {
    let mut trace: Trace<AttCodec> = Trace::new(8);
    for i in 0..3 {
        trace.append( &att_point( i * 1000, 90.0, 100.0, 0.0));
    }
    assert_eq!( trace.len(), 3);
    assert_eq!( trace.iter().count(), 3);
    assert_eq!( trace.time_base().unwrap().millis(), T0);
}
