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

//! gap filling state estimation for tracks with irregular update intervals. Estimators
//! consume observations as they arrive and answer a state for arbitrary query times at or
//! after the last observation

use uom::si::length::meter;
use uom::si::velocity::meter_per_second;

use swim_common::angle::normalize_360;
use swim_common::datetime::EpochMillis;
use swim_common::geo::GeoPos;
use crate::Track;

/// the answer of an [`TrackEstimator::estimate`] query
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct EstimatedState {
    pub date: EpochMillis,
    pub position: GeoPos,
    pub alt_m: f64,
    pub hdg_deg: f64,
    pub spd_mps: f64,
    pub vr_mps: f64,
}

impl EstimatedState {
    pub fn new ()->Self {
        EstimatedState {
            date: EpochMillis::new(0),
            position: GeoPos::from_degrees( 0.0, 0.0),
            alt_m: 0.0, hdg_deg: 0.0, spd_mps: 0.0, vr_mps: 0.0
        }
    }
}

pub trait TrackEstimator {
    /// feed the next observation. Answers false (and ignores the observation) if its
    /// timestamp is not strictly after the previous one
    fn add_observation (&mut self, track: &Track)->bool;

    /// fill `state` with the estimate for `date`. Answers false if there is no
    /// observation yet or `date` lies before the last observation
    fn estimate (&self, date: EpochMillis, state: &mut EstimatedState)->bool;
}

/* #region hold estimator ****************************************************************/

/// zero order hold, i.e. the last observation is the estimate. This is the right choice
/// for high rate feeds where extrapolation noise would exceed the gap error
pub struct HoldEstimator {
    last: Option<EstimatedState>,
}

impl HoldEstimator {
    pub fn new ()->Self {
        HoldEstimator { last: None }
    }
}

impl TrackEstimator for HoldEstimator {
    fn add_observation (&mut self, track: &Track)->bool {
        if let Some(last) = &self.last {
            if !track.date.is_after( last.date) { return false }
        }
        self.last = Some( observed_state( track, self.last.as_ref()));
        true
    }

    fn estimate (&self, date: EpochMillis, state: &mut EstimatedState)->bool {
        let Some(last) = &self.last else { return false };
        if date < last.date { return false }

        *state = *last;
        state.date = date;
        true
    }
}

/* #endregion hold estimator */

/* #region smoothing estimator ***********************************************************/

/// one double exponentially smoothed scalar (level + trend)
#[derive(Debug,Clone,Copy)]
struct Channel {
    s: f64, // level
    b: f64, // trend per second
}

impl Channel {
    fn init (x: f64)->Self {
        Channel { s: x, b: 0.0 }
    }

    fn update (&mut self, x: f64, dt_s: f64, alpha: f64, gamma: f64) {
        // observation intervals vary widely so the per-update weights have to be scaled
        // to the elapsed time or slow feeds would barely move the level
        let a = 1.0 - (1.0 - alpha).powf( dt_s);
        let g = 1.0 - (1.0 - gamma).powf( dt_s);

        let s_prev = self.s;
        self.s = a * x + (1.0 - a) * (self.s + self.b * dt_s);
        self.b = g * (self.s - s_prev) / dt_s + (1.0 - g) * self.b;
    }

    fn predict (&self, dt_s: f64)->f64 {
        self.s + self.b * dt_s
    }
}

/// double exponential smoothing over six channels (lat, lon, altitude, heading, ground
/// speed, vertical rate) with time-scaled smoothing factors. Heading is unwrapped into a
/// continuous angle before smoothing so that a 359 -> 1 deg transition does not estimate
/// through 180
pub struct SmoothingEstimator {
    alpha: f64,
    gamma: f64,
    last_date: Option<EpochMillis>,
    lat: Channel,
    lon: Channel,
    alt: Channel,
    hdg: Channel, // continuous (unwrapped) degrees
    spd: Channel,
    vr: Channel,
}

impl SmoothingEstimator {
    /// `alpha`/`gamma` are the level/trend weights per second of elapsed time, both in (0,1)
    pub fn new (alpha: f64, gamma: f64)->Self {
        SmoothingEstimator {
            alpha, gamma,
            last_date: None,
            lat: Channel::init(0.0), lon: Channel::init(0.0), alt: Channel::init(0.0),
            hdg: Channel::init(0.0), spd: Channel::init(0.0), vr: Channel::init(0.0),
        }
    }

    fn unwrap_heading (&self, hdg_deg: f64)->f64 {
        let mut d = (hdg_deg - self.hdg.s).rem_euclid( 360.0);
        if d > 180.0 { d -= 360.0 }
        self.hdg.s + d
    }
}

impl TrackEstimator for SmoothingEstimator {
    fn add_observation (&mut self, track: &Track)->bool {
        let obs = observed_channels( track, self);

        match self.last_date {
            None => {
                self.lat = Channel::init( obs.0);
                self.lon = Channel::init( obs.1);
                self.alt = Channel::init( obs.2);
                self.hdg = Channel::init( obs.3);
                self.spd = Channel::init( obs.4);
                self.vr = Channel::init( obs.5);
            }
            Some(last) => {
                if !track.date.is_after( last) { return false }
                let dt_s = track.date.millis_since( last) as f64 / 1000.0;

                let hdg_cont = self.unwrap_heading( obs.3);
                self.lat.update( obs.0, dt_s, self.alpha, self.gamma);
                self.lon.update( obs.1, dt_s, self.alpha, self.gamma);
                self.alt.update( obs.2, dt_s, self.alpha, self.gamma);
                self.hdg.update( hdg_cont, dt_s, self.alpha, self.gamma);
                self.spd.update( obs.4, dt_s, self.alpha, self.gamma);
                self.vr.update( obs.5, dt_s, self.alpha, self.gamma);
            }
        }
        self.last_date = Some( track.date);
        true
    }

    fn estimate (&self, date: EpochMillis, state: &mut EstimatedState)->bool {
        let Some(last) = self.last_date else { return false };
        if date < last { return false }
        let dt_s = date.millis_since( last) as f64 / 1000.0;

        state.date = date;
        state.position = GeoPos::from_degrees( self.lat.predict( dt_s), self.lon.predict( dt_s));
        state.alt_m = self.alt.predict( dt_s);
        state.hdg_deg = normalize_360( self.hdg.predict( dt_s));
        state.spd_mps = self.spd.predict( dt_s).max( 0.0);
        state.vr_mps = self.vr.predict( dt_s);
        true
    }
}

/* #endregion smoothing estimator */

fn observed_state (track: &Track, prev: Option<&EstimatedState>)->EstimatedState {
    EstimatedState {
        date: track.date,
        position: track.position,
        alt_m: track.altitude.map_or_else( || prev.map_or( 0.0, |p| p.alt_m), |l| l.get::<meter>()),
        hdg_deg: track.heading.map_or_else( || prev.map_or( 0.0, |p| p.hdg_deg), |h| h.degrees()),
        spd_mps: track.speed.map_or_else( || prev.map_or( 0.0, |p| p.spd_mps), |v| v.get::<meter_per_second>()),
        vr_mps: track.vertical_rate.map_or_else( || prev.map_or( 0.0, |p| p.vr_mps), |v| v.get::<meter_per_second>()),
    }
}

/// unset optional fields hold the previous channel level
fn observed_channels (track: &Track, est: &SmoothingEstimator)->(f64,f64,f64,f64,f64,f64) {
    (
        track.position.lat.degrees(),
        track.position.lon.degrees(),
        track.altitude.map_or( est.alt.s, |l| l.get::<meter>()),
        track.heading.map_or( normalize_360( est.hdg.s), |h| h.degrees()),
        track.speed.map_or( est.spd.s, |v| v.get::<meter_per_second>()),
        track.vertical_rate.map_or( est.vr.s, |v| v.get::<meter_per_second>()),
    )
}
