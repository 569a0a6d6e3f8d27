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
use std::sync::Arc;
use std::time::Duration;
use serde::{Serialize,Deserialize};
use dashmap::DashMap;

use swim_common::datetime::EpochMillis;
use crate::{Track, TrackAmendment, TrackStatus};

/// per-id last-known-state store used by "full" translator variants to complete delta
/// reports. A TrackCache is owned by exactly one translator instance and is NOT safe for
/// concurrent access - cross-channel merging goes through [`SharedTrackCache`].

/// cache scope strategy - this replaces a subclass-per-policy translator hierarchy with a
/// single construction-time configuration value
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum CacheScope {
    None,            // no caching - deltas pass through with documented fallbacks
    PerPartition,    // entries are dropped when the partition key (e.g. airport) changes
    Global,          // entries survive partition changes
}

pub struct TrackCache {
    scope: CacheScope,
    partition: Option<String>,
    map: HashMap<String,Track>,
}

impl TrackCache {
    pub fn new (scope: CacheScope)->Self {
        TrackCache { scope, partition: None, map: HashMap::new() }
    }

    pub fn scope (&self)->CacheScope { self.scope }

    pub fn len (&self)->usize { self.map.len() }

    pub fn is_empty (&self)->bool { self.map.is_empty() }

    pub fn get (&self, id: &str)->Option<&Track> {
        if self.scope == CacheScope::None { return None }
        self.map.get(id)
    }

    /// switch to a new partition key (e.g. the observed airport). A PerPartition cache
    /// drops all entries of the old key, a Global cache keeps them
    pub fn set_partition (&mut self, key: &str) {
        if self.scope == CacheScope::PerPartition {
            if self.partition.as_deref().is_some_and( |p| p != key) {
                self.map.clear();
            }
        }
        self.partition = Some( key.to_string());
    }

    /// complete a (possibly partial) track record from the cached last known state and
    /// update the cache accordingly:
    ///  - unset fields are substituted from the cache entry, if any
    ///  - a missing callsign falls back to the track id
    ///  - an id re-seen under a changed callsign is flagged changed-callsign and carries
    ///    the previous callsign as an amendment - it is never silently overwritten
    ///  - the entry is replaced on each merge and removed when the record is terminal
    pub fn merge (&mut self, track: &mut Track) {
        if self.scope == CacheScope::None {
            if track.cs.is_empty() { track.cs = track.id.clone(); }
            return
        }

        match self.map.get(&track.id) {
            Some(cached) => {
                if !track.cs.is_empty() && track.cs != cached.cs && cached.cs != cached.id {
                    track.set_status( TrackStatus::CHANGED_CS);
                    track.amend( TrackAmendment::PreviousCallsign( cached.cs.clone()));
                }
                track.fill_unset_from( cached);
            }
            None => {
                track.set_status( TrackStatus::NEW);
            }
        }
        if track.cs.is_empty() { track.cs = track.id.clone(); }

        if track.status.is_terminal() {
            self.map.remove(&track.id);
        } else {
            self.map.insert( track.id.clone(), track.clone());
        }
    }

    /// terminal event for an id without a new snapshot - just evict
    pub fn remove (&mut self, id: &str)->Option<Track> {
        self.map.remove(id)
    }
}

/* #region shared cache ******************************************************************/

/// the one sanctioned shared mutable structure: an explicitly shared, concurrency-safe
/// map for merging information about the same track id across independent channels.
/// Merge policy per entry: an unset field is set by the last writer, an already-set field
/// is never overwritten; timestamp and position advance with newer observations only
#[derive(Clone)]
pub struct SharedTrackCache {
    map: Arc<DashMap<String,Track>>,
}

impl SharedTrackCache {
    pub fn new ()->Self {
        SharedTrackCache { map: Arc::new( DashMap::new()) }
    }

    pub fn len (&self)->usize { self.map.len() }

    pub fn get (&self, id: &str)->Option<Track> {
        self.map.get(id).map( |e| e.value().clone())
    }

    pub fn merge (&self, track: &Track) {
        match self.map.get_mut(&track.id) {
            Some(mut entry) => {
                let cached = entry.value_mut();
                cached.fill_unset_from( track);
                if track.date.is_after( cached.date) {
                    cached.date = track.date;
                    cached.position = track.position;
                    cached.status = track.status;
                }
            }
            None => {
                self.map.insert( track.id.clone(), track.clone());
            }
        }

        if track.status.is_terminal() {
            self.map.remove(&track.id);
        }
    }

    /// drop entries that have not been updated within the given duration, answering the
    /// removed ids
    pub fn remove_stale (&self, now: EpochMillis, drop_after: Duration)->Vec<String> {
        let max_age = drop_after.as_millis() as i64;
        let mut dropped: Vec<String> = Vec::new();

        for e in self.map.iter() {
            if now.millis_since( e.value().date) > max_age {
                dropped.push( e.key().clone());
            }
        }
        for id in &dropped {
            self.map.remove( id);
        }
        dropped
    }
}

/* #endregion shared cache */
