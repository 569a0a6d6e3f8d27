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

/// common infrastructure for SWIM track ingestion crates: zero-allocation XML pull parsing,
/// declarative tag name dispatch, zero-copy CSV field extraction, normalized angles and
/// epoch-millisecond timestamps.
///
/// Note that nothing in here does I/O - buffers arrive already read into memory.

pub mod macros;
pub mod angle;
pub mod datetime;
pub mod geo;
pub mod csv;
pub mod xml;
pub mod dispatch;

// syntactic sugar - this is just more readable in many cases
#[inline(always)] pub fn sin(x:f64) -> f64 { x.sin() }
#[inline(always)] pub fn cos(x:f64) -> f64 { x.cos() }
#[inline(always)] pub fn atan2(y:f64, x:f64) -> f64 { y.atan2(x) }
#[inline(always)] pub fn squared(x:f64) -> f64 { x * x }

/// answer the unqualified type name of T
pub fn type_base_name<T>()->&'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
