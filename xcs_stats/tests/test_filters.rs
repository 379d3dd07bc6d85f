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

use xcs_stats::{LeastSquares, ConvexFilter, Histogram, least_squares::DEFAULT_CAPACITY};

/// tests for LeastSquares, ConvexFilter and Histogram
/// run with "cargo test --test test_filters -- --nocapture"

fn approx (a: f64, b: f64, eps: f64)->bool { (a - b).abs() < eps }

#[test]
fn test_least_squares_exact () {
    println!("--- testing LeastSquares on y=x");
    let mut ls = LeastSquares::new();
    assert!( ls.is_empty());
    assert!( !ls.has_result());

    for i in 0..10 {
        ls.update( i as f64, i as f64);
    }

    assert_eq!( ls.count(), 10);
    assert!( approx( ls.gradient(), 1.0, 1e-9));
    assert!( approx( ls.intercept(), 0.0, 1e-9));
    for x in [-3.0, 0.5, 4.0, 100.0] {
        assert!( approx( ls.get_y_at(x), x, 1e-6));
    }
    assert!( approx( ls.average_y(), 4.5, 1e-9));
    assert!( ls.max_error() < 1e-9);
    assert_eq!( ls.min_x(), 0.0);
    assert_eq!( ls.max_y(), 9.0);
}

#[test]
fn test_least_squares_degenerate () {
    println!("--- testing LeastSquares with a single x value");
    let mut ls = LeastSquares::new();
    ls.update( 2.0, 10.0);
    assert!( ls.has_result());
    assert_eq!( ls.gradient(), 0.0);
    assert!( approx( ls.get_y_at(2.0), 10.0, 1e-9));

    ls.update( 2.0, 20.0);
    assert_eq!( ls.gradient(), 0.0);
    assert!( approx( ls.get_y_at(5.0), 15.0, 1e-9));
    assert!( approx( ls.variance_y(), 25.0, 1e-9));
}

#[test]
fn test_least_squares_remove () {
    println!("--- testing LeastSquares::remove");
    let mut ls = LeastSquares::new();
    ls.update( 0.0, 100.0); // outlier
    for i in 1..6 {
        ls.update( i as f64, 2.0 * i as f64);
    }
    ls.remove(0);

    assert_eq!( ls.count(), 5);
    assert!( approx( ls.gradient(), 2.0, 1e-6));
    assert!( approx( ls.intercept(), 0.0, 1e-6));
    // bounds cover everything observed since reset
    assert_eq!( ls.min_x(), 0.0);
    assert_eq!( ls.max_y(), 100.0);
    assert!( ls.mean_squared_error() < 1e-9);

    ls.remove(99); // out of range is ignored
    assert_eq!( ls.count(), 5);
}

#[test]
fn test_least_squares_capacity () {
    println!("--- testing bounded LeastSquares store");
    let mut ls = LeastSquares::with_capacity(4);
    for i in 0..10 {
        ls.update( i as f64, 3.0 * i as f64 + 1.0);
    }
    assert_eq!( ls.count(), 4);
    assert_eq!( ls.slots().front().map( |s| s.x), Some(6.0));
    assert_eq!( ls.min_x(), 0.0);
    assert!( approx( ls.gradient(), 3.0, 1e-6));
    assert!( approx( ls.intercept(), 1.0, 1e-6));
}

#[test]
fn test_least_squares_overflow () {
    println!("--- testing LeastSquares fed with more samples than its capacity");
    let mut ls = LeastSquares::new();
    let n = 3 * DEFAULT_CAPACITY;

    ls.update( 0.0, 5000.0); // early peak, evicted later
    for i in 1..n {
        ls.update( i as f64, 1000.0 - 0.5 * i as f64);
    }

    assert_eq!( ls.count(), DEFAULT_CAPACITY);
    assert_eq!( ls.slots().front().map( |s| s.x), Some( (n - DEFAULT_CAPACITY) as f64));
    assert_eq!( ls.last().map( |s| s.x), Some( (n-1) as f64));
    assert!( approx( ls.gradient(), -0.5, 1e-6));
    assert!( approx( ls.intercept(), 1000.0, 1e-3));

    // whole series extremes survive eviction
    assert_eq!( ls.max_y(), 5000.0);
    assert_eq!( ls.min_y(), 1000.0 - 0.5 * (n-1) as f64);
    assert_eq!( ls.min_x(), 0.0);

    // the outlier's residual left with it
    assert!( ls.rms_error() < 1e-3);
}

#[test]
fn test_least_squares_weighted () {
    println!("--- testing weighted LeastSquares");
    let mut ls = LeastSquares::new();
    ls.update_weighted( 0.0, 1.0, 3.0);
    ls.update_weighted( 1.0, 5.0, 1.0);
    assert!( approx( ls.average_y(), 2.0, 1e-9));
    assert!( approx( ls.get_y_at(0.0), 1.0, 1e-9));
    assert!( approx( ls.get_y_at(1.0), 5.0, 1e-9));
}

#[test]
fn test_convex_monotonic_guard () {
    println!("--- testing ConvexFilter ignores non-increasing x");
    let mut cf = ConvexFilter::new();
    assert!( cf.update_convex_positive( 1.0, 10.0));
    assert!( cf.update_convex_positive( 2.0, 12.0));
    let n = cf.count();

    assert!( !cf.update_convex_positive( 2.0, 50.0));
    assert!( !cf.update_convex_positive( 1.5, 50.0));
    assert_eq!( cf.count(), n);
}

#[test]
fn test_convex_upper_envelope () {
    println!("--- testing upper convex envelope");
    let mut cf = ConvexFilter::new();
    // (1,5) is below the line (0,0)-(2,20) and gets pruned
    for (x,y) in [(0.0,0.0), (1.0,5.0), (2.0,20.0)] {
        cf.update_convex_positive( x, y);
    }
    assert_eq!( cf.count(), 2);

    // a hull vertex survives
    cf.update_convex_positive( 3.0, 21.0);
    assert_eq!( cf.count(), 3);
    let xs: Vec<f64> = cf.slots().iter().map(|s| s.x).collect();
    assert_eq!( xs, vec![0.0, 2.0, 3.0]);
}

#[test]
fn test_convex_lower_envelope () {
    println!("--- testing lower convex envelope");
    let mut cf = ConvexFilter::new();
    for (x,y) in [(0.0,10.0), (1.0,8.0), (2.0,2.0), (3.0,1.0)] {
        cf.update_convex_negative( x, y);
    }
    // (1,8) lies above the chord (0,10)-(2,2)
    let xs: Vec<f64> = cf.slots().iter().map(|s| s.x).collect();
    assert_eq!( xs, vec![0.0, 2.0, 3.0]);

    cf.reset();
    assert!( cf.is_empty());
}

#[test]
fn test_histogram_percentile_order () {
    println!("--- testing Histogram percentile ordering");
    let mut h = Histogram::new( -5.0, 5.0);
    for v in [-2.0, -1.0, 0.0, 0.5, 1.0, 1.0, 2.5, 3.0, 4.9, -4.9] {
        h.update_histogram(v);
    }
    assert_eq!( h.n_points(), 10.0);

    let p0 = h.get_percentile(0.0);
    let p5 = h.get_percentile(0.5);
    let p1 = h.get_percentile(1.0);
    println!("  p0={p0:.3}, p50={p5:.3}, p100={p1:.3}");
    assert!( p0 <= p5 && p5 <= p1);
    assert!( p0 >= -5.5 && p1 <= 5.5);
}

#[test]
fn test_histogram_converges () {
    println!("--- testing Histogram median of identical values");
    let x = 1.7;
    let mut h = Histogram::new( x - 1.0, x + 1.0);
    for _ in 0..100 {
        h.update_histogram(x);
    }
    let median = h.get_percentile(0.5);
    println!("  median: {median}");
    assert!( approx( median, x, 0.05));
    assert!( approx( h.get_max_y(), 70.0, 1e-6));

    // smoothing weights per sample
    let s = h.slot_number(x);
    assert!( approx( h.slots()[s-1], 15.0, 1e-6));
    assert!( approx( h.slots()[s+1], 15.0, 1e-6));
}

#[test]
fn test_histogram_edges () {
    println!("--- testing Histogram clamping at the range edges");
    let mut h = Histogram::new( 0.0, 6.0);
    h.update_histogram( -10.0);
    assert!( approx( h.slots()[0], 0.85, 1e-9));
    assert!( approx( h.slots()[1], 0.15, 1e-9));

    let e = Histogram::new( 0.0, 6.0);
    assert!( e.is_empty());
    assert!( approx( e.get_percentile(0.5), 3.0, 1e-9));
}
