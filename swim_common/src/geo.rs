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

use crate::angle::{Angle360, Latitude, Longitude, normalize_90, normalize_180};

pub const MEAN_EARTH_RADIUS: f64 = 6371000.0;

pub const NM_IN_METERS: f64 = 1852.0;
pub const FT_IN_METERS: f64 = 0.3048;

/// a geodetic surface position in degrees. Altitude is kept out of this type since most
/// surveillance formats report it separately (and optionally)
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct GeoPos {
    pub lat: Latitude,
    pub lon: Longitude,
}

impl GeoPos {
    pub fn from_lat_lon (lat: Latitude, lon: Longitude)->Self {
        GeoPos { lat, lon }
    }

    pub fn from_degrees (lat_deg: f64, lon_deg: f64)->Self {
        GeoPos { lat: Latitude::from_degrees(lat_deg), lon: Longitude::from_degrees(lon_deg) }
    }

    /// great circle distance in meters (haversine, spherical earth)
    pub fn distance_meters (&self, other: &GeoPos)->f64 {
        let d_lat = (other.lat.degrees() - self.lat.degrees()).to_radians();
        let d_lon = (other.lon.degrees() - self.lon.degrees()).to_radians();

        let a = (d_lat/2.0).sin().powi(2) + self.lat.cos() * other.lat.cos() * (d_lon/2.0).sin().powi(2);
        2.0 * MEAN_EARTH_RADIUS * a.sqrt().asin()
    }

    /// initial great circle bearing towards other position
    pub fn bearing_to (&self, other: &GeoPos)->Angle360 {
        let d_lon = (other.lon.degrees() - self.lon.degrees()).to_radians();

        let y = d_lon.sin() * other.lat.cos();
        let x = self.lat.cos() * other.lat.sin() - self.lat.sin() * other.lat.cos() * d_lon.cos();
        Angle360::from_radians( y.atan2(x))
    }

    /// position displaced by x/y meters in a local east/north tangent plane.
    /// Good enough for terminal area ranges (< 100nm), where flat earth errors stay below
    /// sensor resolution
    pub fn move_by_meters (&self, x_east: f64, y_north: f64)->GeoPos {
        let lat_deg = self.lat.degrees() + (y_north / MEAN_EARTH_RADIUS).to_degrees();
        let cos_lat = Latitude::from_degrees(lat_deg).cos();
        let lon_deg = self.lon.degrees() + (x_east / (MEAN_EARTH_RADIUS * cos_lat)).to_degrees();

        GeoPos::from_degrees( lat_deg, lon_deg)
    }
}

impl fmt::Display for GeoPos {
    fn fmt (&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.5},{:.5}]", self.lat.degrees(), self.lon.degrees())
    }
}

/// derive heading from east/north velocity components
#[inline]
pub fn heading_from_vxy (vx_east: f64, vy_north: f64)->Angle360 {
    Angle360::from_radians( vx_east.atan2(vy_north))
}

/// derive ground speed from east/north velocity components (same unit as inputs)
#[inline]
pub fn speed_from_vxy (vx_east: f64, vy_north: f64)->f64 {
    (vx_east*vx_east + vy_north*vy_north).sqrt()
}
