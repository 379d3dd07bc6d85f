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

use std::ops::Deref;
use crate::least_squares::LeastSquares;

/// online upper (positive) or lower (negative) convex envelope of a monotonic-x sequence,
/// with a regression fit over the remaining hull points
#[derive(Clone,Debug,Default)]
pub struct ConvexFilter {
    ls: LeastSquares,
}

impl ConvexFilter {
    pub fn new ()->Self { ConvexFilter { ls: LeastSquares::new() } }

    pub fn reset (&mut self) { self.ls.reset() }

    /// upper envelope (e.g. altitude ceiling). Returns false if `x` does not advance
    pub fn update_convex_positive (&mut self, x: f64, y: f64)->bool {
        self.update_convex( x, y, 1.0)
    }

    /// lower envelope (e.g. altitude base). Returns false if `x` does not advance
    pub fn update_convex_negative (&mut self, x: f64, y: f64)->bool {
        self.update_convex( x, y, -1.0)
    }

    fn update_convex (&mut self, x: f64, y: f64, sign: f64)->bool {
        if !self.ls.is_empty() && x <= self.ls.max_x() {
            return false
        }

        self.ls.update( x, y);

        // walk back from the newest point. Everything before the first kept point is already convex
        loop {
            let n = self.ls.count();
            if n < 3 { break }

            let s = self.ls.slots();
            let (a, b, c) = (s[n-3], s[n-2], s[n-1]);
            let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);

            if sign * cross >= 0.0 {
                self.ls.remove( n-2);
            } else {
                break
            }
        }

        true
    }

    pub fn least_squares (&self)->&LeastSquares { &self.ls }
}

impl Deref for ConvexFilter {
    type Target = LeastSquares;
    fn deref (&self)->&LeastSquares { &self.ls }
}
