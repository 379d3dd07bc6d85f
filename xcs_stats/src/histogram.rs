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

use serde::{Serialize,Deserialize};

pub const NUM_SLOTS: usize = 61;

/// fraction of each sample that is spread into each adjacent slot
pub const SPREAD: f64 = 0.15;

/// fixed range histogram with smoothing into neighbor slots
#[derive(Clone,Debug,Serialize,Deserialize)]
pub struct Histogram {
    slots: Vec<f64>,
    n_pts: f64,
    y_max: f64,
    m: f64, // slots per x unit
    b: f64, // x of slot 0
}

impl Histogram {
    pub fn new (min_x: f64, max_x: f64)->Self {
        let mut h = Histogram { slots: vec![0.0; NUM_SLOTS], n_pts: 0.0, y_max: 0.0, m: 1.0, b: 0.0 };
        h.reset( min_x, max_x);
        h
    }

    pub fn reset (&mut self, min_x: f64, max_x: f64) {
        let span = max_x - min_x;
        self.m = if span > 0.0 { (NUM_SLOTS - 1) as f64 / span } else { 1.0 };
        self.b = min_x;
        self.clear();
    }

    /// drop all samples but keep the range
    pub fn clear (&mut self) {
        self.slots.iter_mut().for_each( |y| *y = 0.0);
        self.n_pts = 0.0;
        self.y_max = 0.0;
    }

    pub fn slot_number (&self, x: f64)->usize {
        let i = ((x - self.b) * self.m).round();
        i.clamp( 0.0, (NUM_SLOTS - 1) as f64) as usize
    }

    /// x at the center of slot `i`
    #[inline] pub fn slot_x (&self, i: usize)->f64 { i as f64 / self.m + self.b }

    pub fn update_histogram (&mut self, x: f64) {
        let i = self.slot_number(x);
        let mut mag = 1.0;

        if i > 0 {
            self.add_to_slot( i-1, SPREAD);
            mag -= SPREAD;
        }
        if i < NUM_SLOTS-1 {
            self.add_to_slot( i+1, SPREAD);
            mag -= SPREAD;
        }
        self.add_to_slot( i, mag);

        self.n_pts += 1.0;
    }

    fn add_to_slot (&mut self, i: usize, v: f64) {
        let y = self.slots[i] + v;
        self.slots[i] = y;
        if y > self.y_max { self.y_max = y }
    }

    /// x below which a fraction `p` of the accumulated samples lies, linearly interpolated within the slot
    pub fn get_percentile (&self, p: f64)->f64 {
        let np = self.n_pts * p.clamp( 0.0, 1.0);
        let mut acc = 0.0;

        for (i,&y) in self.slots.iter().enumerate() {
            if y <= 0.0 { continue }

            if acc + y >= np - 1e-9 {
                let frac = ((np - acc) / y).clamp( 0.0, 1.0);
                return self.slot_x(i) + (frac - 0.5) / self.m
            }
            acc += y;
        }

        // only reached if there are no samples
        self.b + (NUM_SLOTS - 1) as f64 / (2.0 * self.m)
    }

    #[inline] pub fn get_max_y (&self)->f64 { self.y_max }
    #[inline] pub fn n_points (&self)->f64 { self.n_pts }
    #[inline] pub fn is_empty (&self)->bool { self.n_pts == 0.0 }
    #[inline] pub fn min_x (&self)->f64 { self.b }
    #[inline] pub fn max_x (&self)->f64 { self.slot_x( NUM_SLOTS - 1) }

    pub fn slots (&self)->&[f64] { self.slots.as_slice() }
}
