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

use memchr::memchr_iter;

/// zero-copy access to comma separated fields of a single line.
/// Field bounds are computed once on construction, typed values are parsed on demand.
/// We use a fixed bounds array since surveillance line protocols have a small known field
/// count (SBS has 22) - excess fields are ignored

pub const MAX_FIELDS: usize = 32;

pub struct CsvLine<'a> {
    line: &'a str,
    n_fields: usize,
    bounds: [(u32,u32); MAX_FIELDS], // (start,end) byte offsets per field
}

impl<'a> CsvLine<'a> {
    pub fn new (line: &'a str)->Self {
        let line = line.trim_end_matches( ['\r','\n']);
        let bytes = line.as_bytes();
        let mut bounds = [(0u32,0u32); MAX_FIELDS];
        let mut n_fields = 0;
        let mut start = 0u32;

        for i in memchr_iter( b',', bytes) {
            if n_fields >= MAX_FIELDS { break }
            bounds[n_fields] = (start, i as u32);
            n_fields += 1;
            start = (i + 1) as u32;
        }
        if n_fields < MAX_FIELDS {
            bounds[n_fields] = (start, bytes.len() as u32);
            n_fields += 1;
        }

        CsvLine { line, n_fields, bounds }
    }

    pub fn line (&self)->&'a str { self.line }

    pub fn n_fields (&self)->usize { self.n_fields }

    /// raw field including surrounding whitespace, None if index out of range
    pub fn raw_field (&self, i: usize)->Option<&'a str> {
        if i < self.n_fields {
            let (start,end) = self.bounds[i];
            Some( &self.line[start as usize..end as usize])
        } else {
            None
        }
    }

    /// typed field access - answers None for out-of-range, empty or unparseable fields
    pub fn field<T> (&self, i: usize)->Option<T> where T: CsvField<'a> {
        let s = self.raw_field(i)?;
        if s.is_empty() { return None }
        T::from_field(s)
    }
}

/// a type that can be parsed from a single CSV field
pub trait CsvField<'a>: Sized {
    fn from_field (s: &'a str)->Option<Self>;
}

impl<'a> CsvField<'a> for &'a str {
    fn from_field (s: &'a str)->Option<Self> { Some(s) }
}

impl<'a> CsvField<'a> for u64 {
    fn from_field (s: &'a str)->Option<Self> { s.trim().parse().ok() }
}

impl<'a> CsvField<'a> for i64 {
    fn from_field (s: &'a str)->Option<Self> { s.trim().parse().ok() }
}

impl<'a> CsvField<'a> for f64 {
    fn from_field (s: &'a str)->Option<Self> { s.trim().parse().ok() }
}
