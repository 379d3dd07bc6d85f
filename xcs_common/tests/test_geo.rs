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

use uom::si::{f64::Length, length::{meter,kilometer}};
use xcs_common::{angle::Angle, geo::GeoPoint, clock::{Clock,ManualClock}};

/// run with "cargo test --test test_geo -- --nocapture"

#[test]
fn test_distance_bearing () {
    println!("--- testing GeoPoint distance and bearing");
    let p0 = GeoPoint::from_lon_lat_degrees( 7.0, 51.0);
    let p1 = GeoPoint::from_lon_lat_degrees( 7.0, 52.0);

    let d = p0.distance(&p1).get::<kilometer>();
    println!("  1deg latitude: {d:.3}km");
    assert!( (d - 111.2).abs() < 0.5);

    let b = p0.bearing(&p1).degrees();
    assert!( b.abs() < 1e-6 || (b - 360.0).abs() < 1e-6);

    let b = p1.bearing(&p0).degrees();
    assert!( (b - 180.0).abs() < 1e-6);

    let v = p0.distance_bearing( &GeoPoint::from_lon_lat_degrees( 8.0, 51.0));
    assert!( (v.bearing.degrees() - 90.0).abs() < 1.0);
}

#[test]
fn test_destination () {
    println!("--- testing GeoPoint destination");
    let p0 = GeoPoint::from_lon_lat_degrees( -122.0, 37.0);
    let p1 = p0.destination( Angle::from_degrees(45.0), Length::new::<meter>(10_000.0));
    println!("  {p0} -> {p1}");

    let d = p0.distance(&p1).get::<meter>();
    assert!( (d - 10_000.0).abs() < 1.0);
    assert!( p1.lat_degrees() > p0.lat_degrees());
    assert!( p1.lon_degrees() > p0.lon_degrees());
}

#[test]
fn test_serde () {
    println!("--- testing GeoPoint serialization");
    let p = GeoPoint::from_lon_lat_degrees( 190.0, 10.0);
    assert!( (p.lon_degrees() + 170.0).abs() < 1e-9);

    let json = serde_json::to_string(&p).unwrap();
    println!("  {json}");
    let p1: GeoPoint = serde_json::from_str(&json).unwrap();
    assert_eq!( p, p1);
}

#[test]
fn test_manual_clock () {
    println!("--- testing ManualClock");
    let clock = ManualClock::new( 100.0);
    assert_eq!( clock.now(), 100.0);
    clock.advance( 2.5);
    assert_eq!( clock.now(), 102.5);
    clock.set( 5.0);
    assert_eq!( clock.now(), 5.0);
}
