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

use std::{fmt, ops};
use serde::{Serialize,Deserialize};

#[inline]
pub fn normalize_90 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -90.0 { -180.0 - x }
    else if x > 90.0 { 180.0 - x }
    else { x }
}

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d % 360.0;
    if x < 0.0 { 360.0 + x } else { x }
}

/// degrees-based angle newtypes that normalize on construction.
/// We keep these as concrete types (not uom angles) since latitude/longitude/heading have
/// different normalization semantics that should not be mixed up by the type system
macro_rules! define_normalized_angle {
    ($name:ident, $normalize:ident) => {
        #[derive(Clone,Copy,PartialEq,PartialOrd,Serialize)]
        pub struct $name(f64);

        impl $name {
            #[inline]
            pub fn from_degrees (deg: f64) -> Self { $name( $normalize(deg)) }

            #[inline]
            pub fn from_radians (rad: f64) -> Self { Self::from_degrees( rad.to_degrees()) }

            #[inline] pub fn degrees (&self) -> f64 { self.0 }
            #[inline] pub fn radians (&self) -> f64 { self.0.to_radians() }

            #[inline] pub fn sin (&self) -> f64 { self.radians().sin() }
            #[inline] pub fn cos (&self) -> f64 { self.radians().cos() }
        }

        impl fmt::Display for $name {
            fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}deg", self.0) }
        }

        impl fmt::Debug for $name {
            fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}({})", stringify!($name), self.0) }
        }

        impl From<$name> for f64 {
            fn from (a: $name) -> f64 { a.0 }
        }

        impl ops::Sub<$name> for $name {
            type Output = Self;
            fn sub (self, rhs: $name) -> Self::Output { Self::from_degrees( self.0 - rhs.0) }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D> (deserializer: D) -> Result<$name, D::Error> where D: serde::Deserializer<'de> {
                let deg = f64::deserialize(deserializer)?;
                Ok( $name::from_degrees(deg))
            }
        }
    };
}

define_normalized_angle!{ Latitude, normalize_90 }
define_normalized_angle!{ Longitude, normalize_180 }
define_normalized_angle!{ Angle360, normalize_360 }
