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

use std::collections::HashMap;

/// allocation-free name matching for the tag/attribute hot path.
///
/// Each wire schema only cares about a small fixed set of names. Instead of comparing
/// decoded strings we discriminate first on (length, first byte) and then run a short
/// ordered list of byte-sequence comparisons that short-circuits on the first mismatch.
/// The table is built once from a declarative (name, handler) list - translators keep
/// their tag sets data-driven instead of hand-written comparison cascades.
pub struct NameDispatch<T> where T: Copy {
    buckets: HashMap<(u8,u8), Vec<(&'static [u8], T)>>,
}

impl<T> NameDispatch<T> where T: Copy {

    /// build the dispatch structure from a declarative (name, handler) list.
    /// Names longer than 255 bytes are not supported (no schema comes close)
    pub fn new (entries: &[(&'static str, T)])->Self {
        let mut buckets: HashMap<(u8,u8), Vec<(&'static [u8], T)>> = HashMap::new();

        for (name, handler) in entries {
            let bs = name.as_bytes();
            assert!( !bs.is_empty() && bs.len() <= u8::MAX as usize, "invalid dispatch name: {:?}", name);

            let key = (bs.len() as u8, bs[0]);
            buckets.entry(key).or_default().push( (bs, *handler));
        }

        NameDispatch { buckets }
    }

    /// answer the handler for the given raw name bytes, None if not in the table.
    /// O(1) amortized - bucket lists hold the few names sharing length and first byte
    pub fn lookup (&self, name: &[u8])->Option<T> {
        if name.is_empty() || name.len() > u8::MAX as usize { return None }

        let key = (name.len() as u8, name[0]);
        let bucket = self.buckets.get(&key)?;

        for (bs, handler) in bucket {
            if name[1..] == bs[1..] { // length and first byte already matched
                return Some(*handler)
            }
        }
        None
    }
}
