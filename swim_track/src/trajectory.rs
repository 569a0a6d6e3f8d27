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

//! compressed trajectory storage. Points are bit-packed into 64 bit words relative to the
//! time base of the first stored point, which caps memory at 2-3 words per point while
//! keeping positions within 1m of the input. Two containers share the codecs: the growable
//! [`Trajectory`] for completed flight paths and the fixed-capacity [`Trace`] ring that
//! keeps the last N points of a live track

use std::fmt::Write as FmtWrite;
use std::marker::PhantomData;

use uom::si::length::meter;
use uom::si::velocity::meter_per_second;

use swim_common::angle::normalize_360;
use swim_common::datetime::EpochMillis;
use crate::Track;

const LATLON_SCALE: f64 = 1.0e7;       // ~1cm at the equator
const ALT_SCALE: f64 = 100.0;          // centimeters
const HDG_SCALE: f64 = 100.0;          // 1/100 degree
const RATE_SCALE: f64 = 10000.0;       // 0.1 mm/sec
const RATE_MAX: u32 = 0x7f_ffff;       // 23 bit magnitude
const RATE_SIGN: u32 = 0x80_0000;

pub const MAX_TIME_OFFSET_MILLIS: i64 = i32::MAX as i64; // ~24.8 days per time base

/* #region word codecs *******************************************************************/

fn pack_latlon (lat_deg: f64, lon_deg: f64)->Option<u64> {
    if !lat_deg.is_finite() || !lon_deg.is_finite() { return None }
    if lat_deg < -90.0 || lat_deg > 90.0 || lon_deg < -180.0 || lon_deg > 180.0 { return None }

    let lat = (lat_deg * LATLON_SCALE).round() as i32;
    let lon = (lon_deg * LATLON_SCALE).round() as i32;
    Some( ((lat as u32 as u64) << 32) | (lon as u32 as u64))
}

fn unpack_latlon (w: u64)->(f64,f64) {
    let lat = ((w >> 32) as u32) as i32 as f64 / LATLON_SCALE;
    let lon = (w as u32) as i32 as f64 / LATLON_SCALE;
    (lat, lon)
}

fn pack_time_alt (dt_millis: i64, alt_m: f64)->Option<u64> {
    if dt_millis < 0 || dt_millis > MAX_TIME_OFFSET_MILLIS { return None }
    if !alt_m.is_finite() { return None }

    let cm = (alt_m * ALT_SCALE).round();
    if cm > i32::MAX as f64 || cm < i32::MIN as f64 { return None }
    Some( ((dt_millis as u64) << 32) | ((cm as i32) as u32 as u64))
}

fn unpack_time_alt (w: u64)->(i64,f64) {
    let dt = (w >> 32) as i64;
    let alt = (w as u32) as i32 as f64 / ALT_SCALE;
    (dt, alt)
}

/// 24 bit sign-magnitude rate in 0.0001 m/s steps. Zero is always stored non-negative,
/// out-of-range magnitudes saturate at ~838.8 m/s
fn pack_rate (v_mps: f64)->Option<u32> {
    if !v_mps.is_finite() { return None }

    let mut mag = (v_mps.abs() * RATE_SCALE).round() as u64;
    if mag > RATE_MAX as u64 { mag = RATE_MAX as u64 }

    let mut w = mag as u32;
    if v_mps < 0.0 && w > 0 { w |= RATE_SIGN }
    Some(w)
}

fn unpack_rate (w: u32)->f64 {
    let mag = (w & RATE_MAX) as f64 / RATE_SCALE;
    if (w & RATE_SIGN) != 0 { -mag } else { mag }
}

fn pack_att (hdg_deg: f64, spd_mps: f64, vr_mps: f64)->Option<u64> {
    if !hdg_deg.is_finite() { return None }

    let mut h = (normalize_360(hdg_deg) * HDG_SCALE).round() as u64;
    if h >= 36000 { h = 0 } // 359.996.. rounds up and wraps

    let spd = pack_rate( spd_mps)?;
    let vr = pack_rate( vr_mps)?;
    Some( (h << 48) | ((spd as u64) << 24) | (vr as u64))
}

fn unpack_att (w: u64)->(f64,f64,f64) {
    let hdg = ((w >> 48) as u16) as f64 / HDG_SCALE;
    let spd = unpack_rate( ((w >> 24) & 0xff_ffff) as u32);
    let vr = unpack_rate( (w & 0xff_ffff) as u32);
    (hdg, spd, vr)
}

/* #endregion word codecs */

/* #region points and point codecs *******************************************************/

/// the minimal where-and-when point (2 words per point)
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct TrajectoryPoint {
    pub date: EpochMillis,
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub alt_m: f64,
}

/// position plus attitude point (3 words per point)
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct TrackPoint {
    pub date: EpochMillis,
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub alt_m: f64,
    pub hdg_deg: f64,
    pub spd_mps: f64,
    pub vr_mps: f64,
}

impl From<&Track> for TrackPoint {
    fn from (track: &Track)->Self {
        TrackPoint {
            date: track.date,
            lat_deg: track.position.lat.degrees(),
            lon_deg: track.position.lon.degrees(),
            alt_m: track.altitude.map_or( 0.0, |l| l.get::<meter>()),
            hdg_deg: track.heading.map_or( 0.0, |h| h.degrees()),
            spd_mps: track.speed.map_or( 0.0, |v| v.get::<meter_per_second>()),
            vr_mps: track.vertical_rate.map_or( 0.0, |v| v.get::<meter_per_second>()),
        }
    }
}

impl From<&Track> for TrajectoryPoint {
    fn from (track: &Track)->Self {
        TrajectoryPoint {
            date: track.date,
            lat_deg: track.position.lat.degrees(),
            lon_deg: track.position.lon.degrees(),
            alt_m: track.altitude.map_or( 0.0, |l| l.get::<meter>()),
        }
    }
}

/// the pluggable pack/unpack strategy of [`Trajectory`] and [`Trace`]. Implementors fix
/// the number of words per point at compile time so that containers can index without a
/// per-point length table
pub trait PointCodec {
    type Point;
    const WORDS: usize;

    fn date_of (p: &Self::Point)->EpochMillis;

    fn lat_lon_of (p: &Self::Point)->(f64,f64);

    /// answers false if the point cannot be represented (non-finite values or a time
    /// offset past [`MAX_TIME_OFFSET_MILLIS`]) in which case `out` is left unchanged
    fn pack (t0: EpochMillis, p: &Self::Point, out: &mut [u64])->bool;

    fn unpack (t0: EpochMillis, words: &[u64])->Self::Point;
}

/// 2 words per point: lat/lon and time/altitude
pub struct PosCodec;

impl PointCodec for PosCodec {
    type Point = TrajectoryPoint;
    const WORDS: usize = 2;

    fn date_of (p: &TrajectoryPoint)->EpochMillis { p.date }

    fn lat_lon_of (p: &TrajectoryPoint)->(f64,f64) { (p.lat_deg, p.lon_deg) }

    fn pack (t0: EpochMillis, p: &TrajectoryPoint, out: &mut [u64])->bool {
        let Some(w0) = pack_latlon( p.lat_deg, p.lon_deg) else { return false };
        let Some(w1) = pack_time_alt( p.date.millis_since(t0), p.alt_m) else { return false };
        out[0] = w0;
        out[1] = w1;
        true
    }

    fn unpack (t0: EpochMillis, words: &[u64])->TrajectoryPoint {
        let (lat_deg, lon_deg) = unpack_latlon( words[0]);
        let (dt, alt_m) = unpack_time_alt( words[1]);
        TrajectoryPoint { date: EpochMillis::new( t0.millis() + dt), lat_deg, lon_deg, alt_m }
    }
}

/// 3 words per point, adding heading, ground speed and vertical rate
pub struct AttCodec;

impl PointCodec for AttCodec {
    type Point = TrackPoint;
    const WORDS: usize = 3;

    fn date_of (p: &TrackPoint)->EpochMillis { p.date }

    fn lat_lon_of (p: &TrackPoint)->(f64,f64) { (p.lat_deg, p.lon_deg) }

    fn pack (t0: EpochMillis, p: &TrackPoint, out: &mut [u64])->bool {
        let Some(w0) = pack_latlon( p.lat_deg, p.lon_deg) else { return false };
        let Some(w1) = pack_time_alt( p.date.millis_since(t0), p.alt_m) else { return false };
        let Some(w2) = pack_att( p.hdg_deg, p.spd_mps, p.vr_mps) else { return false };
        out[0] = w0;
        out[1] = w1;
        out[2] = w2;
        true
    }

    fn unpack (t0: EpochMillis, words: &[u64])->TrackPoint {
        let (lat_deg, lon_deg) = unpack_latlon( words[0]);
        let (dt, alt_m) = unpack_time_alt( words[1]);
        let (hdg_deg, spd_mps, vr_mps) = unpack_att( words[2]);
        TrackPoint {
            date: EpochMillis::new( t0.millis() + dt),
            lat_deg, lon_deg, alt_m, hdg_deg, spd_mps, vr_mps
        }
    }
}

const MAX_PACK_WORDS: usize = 4;

/* #endregion points and point codecs */

/* #region growable trajectory ***********************************************************/

/// append-only, growable point container. Capacity grows in 32 point increments up to 256
/// points and doubles thereafter, which keeps re-allocation rare for long flights without
/// over-committing for the short ones
pub struct Trajectory<C: PointCodec> {
    t0: Option<EpochMillis>,
    words: Vec<u64>,
    cap: usize, // in points
    _codec: PhantomData<C>,
}

impl<C: PointCodec> Trajectory<C> {
    pub fn new ()->Self {
        Trajectory { t0: None, words: Vec::new(), cap: 0, _codec: PhantomData }
    }

    pub fn len (&self)->usize { self.words.len() / C::WORDS }

    pub fn is_empty (&self)->bool { self.words.is_empty() }

    pub fn capacity (&self)->usize { self.cap }

    /// the time base all stored points are relative to (the date of the first point)
    pub fn time_base (&self)->Option<EpochMillis> { self.t0 }

    pub fn words (&self)->&[u64] { &self.words }

    fn grow (&mut self) {
        let new_cap = if self.cap < 256 { self.cap + 32 } else { self.cap * 2 };
        self.words.reserve_exact( (new_cap - self.cap) * C::WORDS);
        self.cap = new_cap;
    }

    /// answers false and stores nothing if the point cannot be packed
    pub fn append (&mut self, p: &C::Point)->bool {
        let t0 = *self.t0.get_or_insert_with( || C::date_of(p));

        let mut buf = [0u64; MAX_PACK_WORDS];
        if !C::pack( t0, p, &mut buf[..C::WORDS]) { return false }

        if self.len() == self.cap { self.grow() }
        self.words.extend_from_slice( &buf[..C::WORDS]);
        true
    }

    pub fn point_at (&self, i: usize)->Option<C::Point> {
        if i >= self.len() { return None }
        let t0 = self.t0?;
        Some( C::unpack( t0, &self.words[i*C::WORDS .. (i+1)*C::WORDS]))
    }

    /// an independent copy that can diverge from `self` (e.g. for what-if extrapolation)
    pub fn branch (&self)->Self {
        let mut words = Vec::with_capacity( self.cap * C::WORDS);
        words.extend_from_slice( &self.words);
        Trajectory { t0: self.t0, words, cap: self.cap, _codec: PhantomData }
    }

    /// an exact-size immutable copy of the stored words, for archiving or sharing
    pub fn snapshot (&self)->Box<[u64]> {
        self.words.clone().into_boxed_slice()
    }

    pub fn iter (&self)->TrajectoryIter<'_,C> {
        TrajectoryIter { traj: self, i: 0, j: self.len() }
    }

    /// human readable header line preceding the raw words of a stored trajectory
    pub fn archive_header (&self, id: &str, cs: &str)->String {
        let mut s = String::new();
        let t0 = self.t0.map_or( 0, |d| d.millis());
        let _ = write!( s, "trajectory {} cs={} t0={} points={} words/point={}", id, cs, t0, self.len(), C::WORDS);
        if let Some(p) = self.point_at(0) {
            let (lat_deg, lon_deg) = C::lat_lon_of( &p);
            let _ = write!( s, " first={:.7},{:.7}", lat_deg, lon_deg);
        }
        s.push('\n');
        s
    }
}

pub struct TrajectoryIter<'a, C: PointCodec> {
    traj: &'a Trajectory<C>,
    i: usize,
    j: usize,
}

impl<'a, C: PointCodec> Iterator for TrajectoryIter<'a,C> {
    type Item = C::Point;

    fn next (&mut self)->Option<C::Point> {
        if self.i >= self.j { return None }
        let p = self.traj.point_at( self.i);
        self.i += 1;
        p
    }

    fn size_hint (&self)->(usize,Option<usize>) {
        let n = self.j - self.i;
        (n, Some(n))
    }
}

impl<'a, C: PointCodec> DoubleEndedIterator for TrajectoryIter<'a,C> {
    fn next_back (&mut self)->Option<C::Point> {
        if self.i >= self.j { return None }
        self.j -= 1;
        self.traj.point_at( self.j)
    }
}

/* #endregion growable trajectory */

/* #region fixed trace ring **************************************************************/

/// fixed-capacity ring that keeps the most recent `cap` points of a live track. Storage
/// is allocated once, appends past capacity overwrite the oldest point. Iteration is in
/// either direction and does not copy or re-order the backing store
pub struct Trace<C: PointCodec> {
    t0: Option<EpochMillis>,
    words: Vec<u64>,
    cap: usize,   // in points
    head: usize,  // next write slot
    size: usize,
    _codec: PhantomData<C>,
}

impl<C: PointCodec> Trace<C> {
    pub fn new (cap: usize)->Self {
        assert!( cap > 0);
        Trace { t0: None, words: vec![0u64; cap * C::WORDS], cap, head: 0, size: 0, _codec: PhantomData }
    }

    pub fn len (&self)->usize { self.size }

    pub fn is_empty (&self)->bool { self.size == 0 }

    pub fn capacity (&self)->usize { self.cap }

    pub fn time_base (&self)->Option<EpochMillis> { self.t0 }

    /// answers false and stores nothing if the point cannot be packed. Note the time base
    /// stays pinned to the first point ever stored, so a trace that is fed for longer than
    /// [`MAX_TIME_OFFSET_MILLIS`] starts rejecting points
    pub fn append (&mut self, p: &C::Point)->bool {
        let t0 = *self.t0.get_or_insert_with( || C::date_of(p));

        let mut buf = [0u64; MAX_PACK_WORDS];
        if !C::pack( t0, p, &mut buf[..C::WORDS]) { return false }

        let off = self.head * C::WORDS;
        self.words[off .. off + C::WORDS].copy_from_slice( &buf[..C::WORDS]);
        self.head = (self.head + 1) % self.cap;
        if self.size < self.cap { self.size += 1 }
        true
    }

    /// logical index 0 is the oldest retained point
    pub fn point_at (&self, i: usize)->Option<C::Point> {
        if i >= self.size { return None }
        let t0 = self.t0?;
        let slot = (self.head + self.cap - self.size + i) % self.cap;
        let off = slot * C::WORDS;
        Some( C::unpack( t0, &self.words[off .. off + C::WORDS]))
    }

    /// oldest to newest
    pub fn iter (&self)->TraceIter<'_,C> {
        TraceIter { trace: self, i: 0, j: self.size }
    }

    /// newest to oldest
    pub fn iter_reverse (&self)->std::iter::Rev<TraceIter<'_,C>> {
        self.iter().rev()
    }
}

pub struct TraceIter<'a, C: PointCodec> {
    trace: &'a Trace<C>,
    i: usize,
    j: usize,
}

impl<'a, C: PointCodec> Iterator for TraceIter<'a,C> {
    type Item = C::Point;

    fn next (&mut self)->Option<C::Point> {
        if self.i >= self.j { return None }
        let p = self.trace.point_at( self.i);
        self.i += 1;
        p
    }

    fn size_hint (&self)->(usize,Option<usize>) {
        let n = self.j - self.i;
        (n, Some(n))
    }
}

impl<'a, C: PointCodec> DoubleEndedIterator for TraceIter<'a,C> {
    fn next_back (&mut self)->Option<C::Point> {
        if self.i >= self.j { return None }
        self.j -= 1;
        self.trace.point_at( self.j)
    }
}

/* #endregion fixed trace ring */
