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

use std::fmt;
use serde::{Serialize,Deserialize};
use uom::si::f64::{Length,Velocity};
use uom::si::length::foot;
use uom::si::velocity::{knot,foot_per_minute};

use swim_common::angle::Angle360;
use swim_common::datetime::EpochMillis;
use swim_common::geo::GeoPos;

pub mod cache;
pub mod trajectory;
pub mod estimator;

/// the normalized data model for a tracked object, plus its per-id last-known-state cache,
/// the packed trajectory/trace storage and the gap-filling state estimator.
///
/// Field absence is modeled with explicit Options - translators and the delta merge never
/// use NaN or magic sentinel values.

/* #region track status ******************************************************************/

/// track status bit field. The flag values follow the wire conventions of the legacy
/// track adapter protocol so that archived data stays comparable
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(transparent)]
pub struct TrackStatus(u32);

impl TrackStatus {
    pub const NEW: TrackStatus        = TrackStatus(0x01);
    pub const CHANGED: TrackStatus    = TrackStatus(0x02);
    pub const DROPPED: TrackStatus    = TrackStatus(0x04);
    pub const COMPLETED: TrackStatus  = TrackStatus(0x08);
    pub const FROZEN: TrackStatus     = TrackStatus(0x10);
    pub const CHANGED_CS: TrackStatus = TrackStatus(0x20);

    pub fn empty ()->TrackStatus { TrackStatus(0) }

    #[inline] pub fn with (self, flag: TrackStatus)->TrackStatus { TrackStatus(self.0 | flag.0) }
    #[inline] pub fn has (&self, flag: TrackStatus)->bool { (self.0 & flag.0) != 0 }

    #[inline] pub fn is_new (&self)->bool { self.has(Self::NEW) }
    #[inline] pub fn is_changed (&self)->bool { self.has(Self::CHANGED) }
    #[inline] pub fn is_dropped (&self)->bool { self.has(Self::DROPPED) }
    #[inline] pub fn is_completed (&self)->bool { self.has(Self::COMPLETED) }
    #[inline] pub fn is_frozen (&self)->bool { self.has(Self::FROZEN) }
    #[inline] pub fn is_changed_cs (&self)->bool { self.has(Self::CHANGED_CS) }

    /// no further position updates for this id until it is re-seen as new
    #[inline] pub fn is_terminal (&self)->bool { self.has(Self::DROPPED) || self.has(Self::COMPLETED) }

    pub fn bits (&self)->u32 { self.0 }
}

impl fmt::Display for TrackStatus {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        for (flag,name) in [
            (Self::NEW,"new"), (Self::CHANGED,"changed"), (Self::DROPPED,"dropped"),
            (Self::COMPLETED,"completed"), (Self::FROZEN,"frozen"), (Self::CHANGED_CS,"changedCS")
        ] {
            if self.has(flag) { write!(f, "{}{}", sep, name)?; sep = "|"; }
        }
        Ok(())
    }
}

/* #endregion track status */

/* #region track *************************************************************************/

/// untyped side channel amendments that travel with a track record
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum TrackAmendment {
    PreviousCallsign(String),
    Annotation { key: String, value: String },
}

/// a normalized track snapshot as produced by the format translators
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct Track {
    pub id: String, // source-local track identifier
    pub cs: String, // callsign - the cross-channel identifier

    pub date: EpochMillis,
    pub position: GeoPos,

    pub altitude: Option<Length>,
    pub heading: Option<Angle360>,
    pub speed: Option<Velocity>,
    pub vertical_rate: Option<Velocity>,

    pub status: TrackStatus,
    pub amendments: Vec<TrackAmendment>,
}

impl Track {
    pub fn new (id: impl ToString, cs: impl ToString, date: EpochMillis, position: GeoPos)->Self {
        Track {
            id: id.to_string(),
            cs: cs.to_string(),
            date,
            position,
            altitude: None,
            heading: None,
            speed: None,
            vertical_rate: None,
            status: TrackStatus::empty(),
            amendments: Vec::new(),
        }
    }

    pub fn set_status (&mut self, flag: TrackStatus) { self.status = self.status.with(flag) }

    pub fn amend (&mut self, amendment: TrackAmendment) { self.amendments.push(amendment) }

    pub fn previous_cs (&self)->Option<&str> {
        self.amendments.iter().find_map( |a| {
            if let TrackAmendment::PreviousCallsign(cs) = a { Some(cs.as_str()) } else { None }
        })
    }

    /// fill every unset optional field from the given (usually cached) track. Set fields
    /// are never overwritten
    pub fn fill_unset_from (&mut self, other: &Track) {
        if self.altitude.is_none() { self.altitude = other.altitude }
        if self.heading.is_none() { self.heading = other.heading }
        if self.speed.is_none() { self.speed = other.speed }
        if self.vertical_rate.is_none() { self.vertical_rate = other.vertical_rate }
        if self.cs.is_empty() { self.cs = other.cs.clone() }
    }
}

impl fmt::Display for Track {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Track( id: {}", self.id)?;
        if !self.cs.is_empty() && self.cs != self.id { write!( f, ", cs: \"{}\"", self.cs)?; }
        write!( f, ", pos: {}", self.position)?;
        if let Some(alt) = self.altitude { write!( f, ", alt: {:.0}ft", alt.get::<foot>())?; }
        if let Some(hdg) = self.heading { write!( f, ", hdg: {:.0}", hdg.degrees())?; }
        if let Some(spd) = self.speed { write!( f, ", spd: {:.1}kn", spd.get::<knot>())?; }
        if let Some(vr) = self.vertical_rate { write!( f, ", vr: {:.0}fpm", vr.get::<foot_per_minute>())?; }
        if self.status.bits() != 0 { write!( f, ", status: {}", self.status)?; }
        write!( f, ", date: {})", self.date)
    }
}

/* #endregion track */

/* #region track events ******************************************************************/

/// what a translator emits per input record: a track update or a terminal event.
/// Terminal events end the update stream for an id until it is re-seen as new
#[derive(Debug,Clone,Serialize,Deserialize)]
pub enum TrackEvent {
    Update(Track),
    Completed { id: String, cs: String, date: EpochMillis, arrival: Option<GeoPos> },
    Dropped { id: String, cs: String, date: EpochMillis },
}

impl TrackEvent {
    pub fn id (&self)->&str {
        match self {
            TrackEvent::Update(track) => &track.id,
            TrackEvent::Completed{id,..} => id,
            TrackEvent::Dropped{id,..} => id,
        }
    }

    pub fn date (&self)->EpochMillis {
        match self {
            TrackEvent::Update(track) => track.date,
            TrackEvent::Completed{date,..} => *date,
            TrackEvent::Dropped{date,..} => *date,
        }
    }
}

impl fmt::Display for TrackEvent {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackEvent::Update(track) => write!( f, "{}", track),
            TrackEvent::Completed{id,cs,date,arrival} => {
                write!( f, "Completed( id: {}, cs: \"{}\", date: {}", id, cs, date)?;
                if let Some(pos) = arrival { write!( f, ", arrival: {}", pos)?; }
                write!( f, ")")
            }
            TrackEvent::Dropped{id,cs,date} => write!( f, "Dropped( id: {}, cs: \"{}\", date: {})", id, cs, date),
        }
    }
}

/* #endregion track events */
