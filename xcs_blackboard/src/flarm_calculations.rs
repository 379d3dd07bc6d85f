/*
 * Copyright © 2024, United States Government, as represented by the Administrator of 
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
use tracing::debug;
use xcs_stats::ClimbAverageCalculator;

use crate::flarm::FlarmId;

pub const AVERAGE_TIME: f64 = 30.0;

#[derive(Debug)]
struct Entry {
    calc: ClimbAverageCalculator,
    last_use: u64,
    average: f64,
}

/// per traffic climb rate averages. The number of tracked objects is bounded: once `max_entries` is
/// reached the least recently updated calculator is dropped to make room for a new id
#[derive(Debug)]
pub struct FlarmCalculations {
    entries: HashMap<FlarmId,Entry>,
    max_entries: usize,
    use_count: u64,
}

impl FlarmCalculations {
    pub fn new (max_entries: usize)->Self {
        FlarmCalculations { entries: HashMap::new(), max_entries: max_entries.max(1), use_count: 0 }
    }

    /// record the current altitude of `id` and return its climb rate over the last 30 sec.
    /// Only one sample per GPS time is recorded, repeated calls for the same time return the last average.
    /// Time going backwards restarts the average
    pub fn average_30s (&mut self, id: FlarmId, time: f64, altitude: f64)->f64 {
        self.use_count += 1;

        if !self.entries.contains_key(&id) && self.entries.len() >= self.max_entries {
            self.evict_least_recently_used();
        }

        let use_count = self.use_count;
        let e = self.entries.entry(id).or_insert_with( || Entry { calc: ClimbAverageCalculator::new(), last_use: 0, average: 0.0 });
        e.last_use = use_count;

        match e.calc.newest_time() {
            Some(t) if time == t => return e.average,
            Some(t) if time < t => e.calc.reset(),
            _ => {}
        }

        e.average = e.calc.get_average( time, altitude, AVERAGE_TIME);
        e.average
    }

    fn evict_least_recently_used (&mut self) {
        let lru = self.entries.iter().min_by_key( |(_,e)| e.last_use).map( |(id,_)| *id);
        if let Some(id) = lru {
            debug!("evicting climb average of {}", id);
            self.entries.remove(&id);
        }
    }

    /// drop calculators of traffic that has not been seen for `max_age` seconds. Returns the number of removed entries
    pub fn cleanup (&mut self, now: f64, max_age: f64)->usize {
        let n = self.entries.len();
        self.entries.retain( |_,e| !e.calc.expired( now, max_age));
        n - self.entries.len()
    }

    pub fn contains (&self, id: FlarmId)->bool { self.entries.contains_key(&id) }

    pub fn len (&self)->usize { self.entries.len() }

    pub fn is_empty (&self)->bool { self.entries.is_empty() }

    pub fn clear (&mut self) { self.entries.clear() }
}
