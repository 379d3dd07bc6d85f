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

pub const MAX_HISTORY: usize = 40;

#[derive(Clone,Copy,Debug,PartialEq)]
struct HistoryItem {
    time: f64,
    altitude: f64,
}

/// sliding window climb rate over the last `MAX_HISTORY` (time,altitude) samples.
/// Slots that were never written are `None`
#[derive(Clone,Debug)]
pub struct ClimbAverageCalculator {
    history: [Option<HistoryItem>; MAX_HISTORY],
    newest: Option<usize>,
}

impl ClimbAverageCalculator {
    pub fn new ()->Self {
        ClimbAverageCalculator { history: [None; MAX_HISTORY], newest: None }
    }

    pub fn reset (&mut self) {
        self.history = [None; MAX_HISTORY];
        self.newest = None;
    }

    /// record (cur_time,cur_altitude) and return the climb rate against the oldest sample that is still within
    /// `average_time` of `cur_time`, or 0 if there is no such older sample.
    /// Only samples with a time strictly less than `cur_time` qualify, hence repeated calls with the same time
    /// return 0 instead of dividing by zero
    pub fn get_average (&mut self, cur_time: f64, cur_altitude: f64, average_time: f64)->f64 {
        let idx = match self.newest {
            Some(i) => (i + 1) % MAX_HISTORY,
            None => 0
        };
        self.history[idx] = Some( HistoryItem { time: cur_time, altitude: cur_altitude });
        self.newest = Some(idx);

        let mut best: Option<HistoryItem> = None;
        let mut best_time = cur_time;

        for h in self.history.iter().flatten() {
            if h.time + average_time >= cur_time && h.time < best_time {
                best = Some(*h);
                best_time = h.time;
            }
        }

        match best {
            Some(h) => (cur_altitude - h.altitude) / (cur_time - h.time),
            None => 0.0
        }
    }

    /// time of the last recorded sample
    pub fn newest_time (&self)->Option<f64> {
        self.newest.and_then( |i| self.history[i]).map( |h| h.time)
    }

    /// true if there is no sample or the newest sample is older than `max_age`
    pub fn expired (&self, now: f64, max_age: f64)->bool {
        match self.newest_time() {
            Some(t) => now < t || now > t + max_age,
            None => true
        }
    }

    pub fn len (&self)->usize {
        self.history.iter().filter( |h| h.is_some()).count()
    }
}

impl Default for ClimbAverageCalculator {
    fn default()->Self { ClimbAverageCalculator::new() }
}
