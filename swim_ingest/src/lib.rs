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

//! translators for SWIM and third party surveillance feeds. Each translator owns one
//! stateful parse/merge pipeline for one wire schema and turns raw message buffers into
//! normalized [`swim_track::TrackEvent`]s

pub mod errors;
pub mod asdex;
pub mod sfdps;
pub mod tfm;
pub mod tais;
pub mod sbs;
pub mod opensky;

use std::fs;
use std::path::Path;
use serde::de::DeserializeOwned;

use uom::si::f64::{Length,Velocity};
use uom::si::length::{foot,meter};
use uom::si::velocity::{knot,kilometer_per_hour,mile_per_hour,meter_per_second,foot_per_minute};

use swim_track::TrackEvent;
use crate::errors::{Result,SwimIngestError,parse_error};

/// the public contract of all feed translators. A single translate() call is synchronous
/// and CPU only, the instance is stateful and single owner. Parse failures never cross
/// this boundary - a bad record is logged and skipped, the caller always gets a (possibly
/// empty) event sequence
pub trait Translator {
    /// the feed/schema name, for logging
    fn name (&self)->&'static str;

    fn translate (&mut self, msg: &[u8])->Vec<TrackEvent>;
}

/* #region config ************************************************************************/

pub fn load_config<C: DeserializeOwned, P: AsRef<Path>> (path: P)->Result<C> {
    let data = fs::read_to_string( path)?;
    from_ron( &data)
}

pub fn from_ron<C: DeserializeOwned> (input: &str)->Result<C> {
    Ok( ron::from_str( input)?)
}

/* #endregion config */

/* #region unit helpers ******************************************************************/

/// speed value with explicit unit-of-measure attribute as used by the en-route feed
pub fn speed_from_uom (value: f64, uom: &str)->Option<Velocity> {
    match uom {
        "KNOTS" => Some( Velocity::new::<knot>( value)),
        "MPH" => Some( Velocity::new::<mile_per_hour>( value)),
        "KMH" => Some( Velocity::new::<kilometer_per_hour>( value)),
        _ => None
    }
}

pub fn altitude_from_uom (value: f64, uom: &str)->Option<Length> {
    match uom {
        "FEET" => Some( Length::new::<foot>( value)),
        "METERS" => Some( Length::new::<meter>( value)),
        _ => None
    }
}

pub fn feet (value: f64)->Length { Length::new::<foot>( value) }
pub fn meters (value: f64)->Length { Length::new::<meter>( value) }
pub fn knots (value: f64)->Velocity { Velocity::new::<knot>( value) }
pub fn mph (value: f64)->Velocity { Velocity::new::<mile_per_hour>( value) }
pub fn mps (value: f64)->Velocity { Velocity::new::<meter_per_second>( value) }
pub fn fpm (value: f64)->Velocity { Velocity::new::<foot_per_minute>( value) }

/// flow-management altitude text: suffix 'T' scales by 1000, 'C' by 100, no suffix
/// defaults to 100 (values are in hundreds of feet per source convention). Answers feet
pub fn parse_suffixed_altitude (s: &str)->Option<Length> {
    let s = s.trim();
    if s.is_empty() { return None }

    let (digits, scale) = match s.as_bytes()[s.len()-1] {
        b'T' => (&s[..s.len()-1], 1000.0),
        b'C' => (&s[..s.len()-1], 100.0),
        _ => (s, 100.0)
    };
    let v: f64 = digits.trim().parse().ok()?;
    Some( feet( v * scale))
}

/* #endregion unit helpers */
