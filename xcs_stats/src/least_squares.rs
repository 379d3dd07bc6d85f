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

use std::collections::VecDeque;
use serde::{Serialize,Deserialize};

pub const DEFAULT_CAPACITY: usize = 1000;

/// a single weighted sample
#[derive(Clone,Copy,Debug,PartialEq,Serialize,Deserialize)]
pub struct Slot {
    pub x: f64,
    pub y: f64,
    pub weight: f64,
    pub error: f64, // residual against the fit at insertion time
}

/// online weighted linear regression `y = m*x + b` over a bounded sample ring.
/// The regression sums are maintained incrementally, which makes update O(1) also once the ring is full and
/// the oldest sample gets evicted. Removal subtracts the sample contribution from the sums and hence can
/// accumulate (bounded) floating point drift.
///
/// The x/y bounds and `max_error` cover all samples observed since the last `reset`, they do not shrink if
/// samples are evicted or removed
#[derive(Clone,Debug)]
pub struct LeastSquares {
    capacity: usize,
    slots: VecDeque<Slot>,

    sum_weights: f64,
    sum_x: f64,
    sum_y: f64,
    sum_xx: f64,
    sum_xy: f64,
    sum_yy: f64,

    m: f64,
    b: f64,

    n_observed: usize,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,

    max_error: f64,
    sum_error_sq: f64,
}

impl LeastSquares {
    pub fn new ()->Self {
        LeastSquares::with_capacity( DEFAULT_CAPACITY)
    }

    pub fn with_capacity (capacity: usize)->Self {
        let capacity = capacity.max(1);
        LeastSquares {
            capacity,
            slots: VecDeque::with_capacity( capacity.min( DEFAULT_CAPACITY)),
            sum_weights: 0.0, sum_x: 0.0, sum_y: 0.0, sum_xx: 0.0, sum_xy: 0.0, sum_yy: 0.0,
            m: 0.0, b: 0.0,
            n_observed: 0, min_x: 0.0, max_x: 0.0, min_y: 0.0, max_y: 0.0,
            max_error: 0.0, sum_error_sq: 0.0,
        }
    }

    pub fn reset (&mut self) {
        let capacity = self.capacity;
        *self = LeastSquares::with_capacity( capacity);
    }

    #[inline] pub fn update (&mut self, x: f64, y: f64) {
        self.update_weighted( x, y, 1.0)
    }

    pub fn update_weighted (&mut self, x: f64, y: f64, weight: f64) {
        if self.slots.len() >= self.capacity {
            if let Some(s) = self.slots.pop_front() {
                self.subtract( &s);
            }
        }

        if self.n_observed == 0 {
            self.min_x = x; self.max_x = x;
            self.min_y = y; self.max_y = y;
        } else {
            self.min_x = self.min_x.min(x); self.max_x = self.max_x.max(x);
            self.min_y = self.min_y.min(y); self.max_y = self.max_y.max(y);
        }
        self.n_observed += 1;

        self.add_sums( x, y, weight);
        self.compute();

        let error = (y - self.get_y_at(x)).abs();
        self.sum_error_sq += weight * error * error;
        if error > self.max_error { self.max_error = error }

        self.slots.push_back( Slot{x, y, weight, error});
    }

    /// remove the sample at index `i` (insertion order), reversing its contribution to the fit
    pub fn remove (&mut self, i: usize) {
        if let Some(s) = self.slots.remove(i) {
            if self.slots.is_empty() {
                self.clear_sums();
            } else {
                self.subtract( &s);
            }
        }
    }

    fn add_sums (&mut self, x: f64, y: f64, w: f64) {
        self.sum_weights += w;
        self.sum_x += w * x;
        self.sum_y += w * y;
        self.sum_xx += w * x * x;
        self.sum_xy += w * x * y;
        self.sum_yy += w * y * y;
    }

    fn subtract (&mut self, s: &Slot) {
        let w = s.weight;
        self.sum_weights -= w;
        self.sum_x -= w * s.x;
        self.sum_y -= w * s.y;
        self.sum_xx -= w * s.x * s.x;
        self.sum_xy -= w * s.x * s.y;
        self.sum_yy -= w * s.y * s.y;
        self.sum_error_sq = (self.sum_error_sq - w * s.error * s.error).max(0.0);
        self.compute();
    }

    /// the fit is empty but the observed bounds remain
    fn clear_sums (&mut self) {
        self.sum_weights = 0.0; self.sum_x = 0.0; self.sum_y = 0.0;
        self.sum_xx = 0.0; self.sum_xy = 0.0; self.sum_yy = 0.0;
        self.sum_error_sq = 0.0;
        self.m = 0.0; self.b = 0.0;
    }

    fn compute (&mut self) {
        if self.sum_weights <= 0.0 {
            self.m = 0.0;
            self.b = 0.0;
            return;
        }

        let denom = self.sum_weights * self.sum_xx - self.sum_x * self.sum_x;
        if denom.abs() <= f64::EPSILON * (self.sum_weights * self.sum_xx).abs().max(1.0) {
            self.m = 0.0; // no spread in x
        } else {
            self.m = (self.sum_weights * self.sum_xy - self.sum_x * self.sum_y) / denom;
        }
        self.b = (self.sum_y - self.m * self.sum_x) / self.sum_weights;
    }

    /// value of the regression line at `x`. Only meaningful if `has_result()`
    #[inline] pub fn get_y_at (&self, x: f64)->f64 { self.m * x + self.b }

    #[inline] pub fn gradient (&self)->f64 { self.m }
    #[inline] pub fn intercept (&self)->f64 { self.b }

    #[inline] pub fn count (&self)->usize { self.slots.len() }
    #[inline] pub fn capacity (&self)->usize { self.capacity }
    #[inline] pub fn is_empty (&self)->bool { self.slots.is_empty() }
    #[inline] pub fn has_result (&self)->bool { !self.slots.is_empty() }

    #[inline] pub fn min_x (&self)->f64 { self.min_x }
    #[inline] pub fn max_x (&self)->f64 { self.max_x }
    #[inline] pub fn min_y (&self)->f64 { self.min_y }
    #[inline] pub fn max_y (&self)->f64 { self.max_y }

    #[inline] pub fn sum_weights (&self)->f64 { self.sum_weights }

    /// weighted mean of y
    pub fn average_y (&self)->f64 {
        if self.sum_weights > 0.0 { self.sum_y / self.sum_weights } else { 0.0 }
    }

    pub fn variance_y (&self)->f64 {
        if self.sum_weights > 0.0 {
            let avg = self.average_y();
            (self.sum_yy / self.sum_weights - avg * avg).max(0.0)
        } else {
            0.0
        }
    }

    #[inline] pub fn std_dev_y (&self)->f64 { self.variance_y().sqrt() }

    #[inline] pub fn max_error (&self)->f64 { self.max_error }

    pub fn mean_squared_error (&self)->f64 {
        if self.sum_weights > 0.0 { self.sum_error_sq / self.sum_weights } else { 0.0 }
    }

    #[inline] pub fn rms_error (&self)->f64 { self.mean_squared_error().sqrt() }

    pub fn slots (&self)->&VecDeque<Slot> { &self.slots }

    pub fn last (&self)->Option<&Slot> { self.slots.back() }
}

impl Default for LeastSquares {
    fn default()->Self { LeastSquares::new() }
}
