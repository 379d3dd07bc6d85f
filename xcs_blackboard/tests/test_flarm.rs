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

use std::{sync::Arc, str::FromStr};
use xcs_common::{clock::ManualClock, geo::GeoPoint, units::{meters, to_meters, to_meters_per_second}};
use xcs_blackboard::{
    BlackboardConfig, DeviceBlackboard, NmeaInfo,
    flarm::{FlarmId,FlarmTraffic,FlarmState,MAX_TRAFFIC}, flarm_calculations::FlarmCalculations,
};

/// run with "cargo test --test test_flarm -- --nocapture"

const ID: u32 = 0xDD1234;

fn flarm_device (now: f64, time: f64, own: Option<GeoPoint>, north: f64, rel_alt: f64)->NmeaInfo {
    let mut info = NmeaInfo::new();
    info.update_clock( now);
    info.alive.update( now);
    info.provide_time( time);
    if let Some(loc) = own {
        info.provide_location( loc);
        info.provide_gps_altitude( meters( 1000.0));
    }
    info.flarm.available.update( now);
    info.flarm.add_traffic( FlarmTraffic::with_relative_position( FlarmId::new(ID), meters( north), meters( 0.0), meters( rel_alt), now));
    info
}

#[test]
fn test_flarm_id () {
    println!("--- testing FlarmId parse and format");
    let id = FlarmId::from_str("dd1234").unwrap();
    assert_eq!( id, FlarmId::new( ID));
    assert_eq!( id.to_string(), "DD1234");
    assert_eq!( FlarmId::new( 0x1_DD1234), id); // 24 bit
    assert!( FlarmId::from_str("xyz").is_err());

    let json = serde_json::to_string( &id).unwrap();
    assert_eq!( json, "\"DD1234\"");
    let id2: FlarmId = serde_json::from_str( &json).unwrap();
    assert_eq!( id, id2);
}

#[test]
fn test_flarm_state () {
    println!("--- testing FlarmState bounds and refresh");
    let mut state = FlarmState::default();
    state.available.update( 0.0);

    for i in 0..MAX_TRAFFIC {
        assert!( state.add_traffic( FlarmTraffic::with_relative_position( FlarmId::new( i as u32 + 1), meters(0.0), meters(0.0), meters(0.0), 0.0)));
    }
    assert!( !state.add_traffic( FlarmTraffic::with_relative_position( FlarmId::new( 0xFFFF), meters(0.0), meters(0.0), meters(0.0), 0.0)));

    // replacing known traffic is always possible
    assert!( state.add_traffic( FlarmTraffic::with_relative_position( FlarmId::new(1), meters(10.0), meters(0.0), meters(0.0), 1.5)));
    assert_eq!( state.traffic.len(), MAX_TRAFFIC);

    state.refresh( 3.0); // only the one reported at 1.5 survives
    assert_eq!( state.traffic.len(), 1);
    assert!( state.find_traffic( FlarmId::new(1)).is_some());

    state.refresh( 20.0); // device gone
    assert!( !state.is_detected());
    assert!( !state.has_traffic());
}

#[test]
fn test_process_flarm () {
    println!("--- testing traffic position, altitude, names and climb average");
    let clock = Arc::new( ManualClock::new( 100.0));
    let mut config = BlackboardConfig::default();
    config.flarm_names.insert( FlarmId::new( ID), "D-1234".to_string());
    let mut bb = DeviceBlackboard::new( &config, clock.clone());

    let own = GeoPoint::from_lon_lat_degrees( 8.0, 47.0);
    bb.set_device_data( 0, flarm_device( 100.0, 1000.0, Some(own), 1000.0, 200.0)).unwrap();
    bb.tick();

    let t = bb.basic().flarm.find_traffic( FlarmId::new( ID)).unwrap().clone();
    assert_eq!( t.name.as_deref(), Some("D-1234"));
    assert_eq!( to_meters( t.distance), 1000.0);
    assert!( t.location_available);
    assert!( (to_meters( own.distance( &t.location)) - 1000.0).abs() < 1.0);
    assert!( t.location.lat_degrees() > own.lat_degrees());
    assert!( t.altitude_available);
    assert_eq!( to_meters( t.altitude), 1200.0);
    assert!( t.climb_rate_avg30s_available);
    assert_eq!( to_meters_per_second( t.climb_rate_avg30s), 0.0);

    clock.set( 101.0);
    bb.set_device_data( 0, flarm_device( 101.0, 1001.0, Some(own), 1000.0, 210.0)).unwrap();
    bb.tick();

    let t = bb.basic().flarm.find_traffic( FlarmId::new( ID)).unwrap();
    assert!( (to_meters_per_second( t.climb_rate_avg30s) - 10.0).abs() < 1e-9);
    assert!( (to_meters_per_second( t.climb_rate) - 10.0).abs() < 1e-9); // estimated from previous report
    assert!( bb.flarm_calculations().contains( FlarmId::new( ID)));
}

#[test]
fn test_process_flarm_without_fix () {
    println!("--- testing traffic without own position");
    let clock = Arc::new( ManualClock::new( 100.0));
    let mut bb = DeviceBlackboard::new( &BlackboardConfig::default(), clock.clone());

    bb.set_device_data( 0, flarm_device( 100.0, 1000.0, None, 300.0, 50.0)).unwrap();
    bb.tick();

    let t = bb.basic().flarm.find_traffic( FlarmId::new( ID)).unwrap();
    assert!( t.name.is_none());
    assert_eq!( to_meters( t.distance), 300.0);
    assert!( !t.location_available);
    assert!( !t.altitude_available);
    assert!( bb.flarm_calculations().is_empty());
}

#[test]
fn test_flarm_calculations_bounded () {
    println!("--- testing FlarmCalculations LRU eviction and cleanup");
    let (a,b,c) = (FlarmId::new(1), FlarmId::new(2), FlarmId::new(3));
    let mut fc = FlarmCalculations::new(2);

    fc.average_30s( a, 0.0, 100.0);
    fc.average_30s( b, 0.0, 100.0);
    assert_eq!( fc.average_30s( a, 1.0, 110.0), 10.0);

    fc.average_30s( c, 1.0, 100.0); // evicts b
    assert_eq!( fc.len(), 2);
    assert!( fc.contains(a));
    assert!( !fc.contains(b));
    assert!( fc.contains(c));

    // b starts from scratch
    fc.average_30s( b, 2.0, 500.0);
    assert!( !fc.contains(a));

    assert_eq!( fc.cleanup( 40.0, 30.0), 2);
    assert!( fc.is_empty());
}

#[test]
fn test_flarm_climb_average_with_fast_ticks () {
    println!("--- testing 30 sec climb average with two ticks per GPS second");
    let clock = Arc::new( ManualClock::new( 100.0));
    let mut bb = DeviceBlackboard::new( &BlackboardConfig::default(), clock.clone());
    let own = GeoPoint::from_lon_lat_degrees( 8.0, 47.0);

    // climbs with 2 m/s for 10 sec, then flies level
    for t in 0..=35 {
        let now = 100.0 + t as f64;
        let rel_alt = 2.0 * t.min(10) as f64;

        clock.set( now);
        bb.set_device_data( 0, flarm_device( now, 1000.0 + t as f64, Some(own), 500.0, rel_alt)).unwrap();
        bb.tick();
        clock.set( now + 0.5);
        bb.tick();
    }

    let t = bb.basic().flarm.find_traffic( FlarmId::new( ID)).unwrap();
    assert!( t.climb_rate_avg30s_available);
    let avg = to_meters_per_second( t.climb_rate_avg30s);
    println!("avg30s at t=35: {}", avg);
    assert!( (avg - (20.0 - 10.0) / 30.0).abs() < 1e-9);
}

#[test]
fn test_process_flarm_at_pole () {
    println!("--- testing traffic placement with degenerate east scale");
    let clock = Arc::new( ManualClock::new( 100.0));
    let mut bb = DeviceBlackboard::new( &BlackboardConfig::default(), clock.clone());

    let own = GeoPoint::from_lon_lat_degrees( 8.0, 90.0);
    let mut info = flarm_device( 100.0, 1000.0, Some(own), 0.0, 0.0);
    info.flarm.traffic.clear();
    info.flarm.add_traffic( FlarmTraffic::with_relative_position( FlarmId::new(ID), meters( -1000.0), meters( 500.0), meters( 30.0), 100.0));
    bb.set_device_data( 0, info).unwrap();
    bb.tick();

    let t = bb.basic().flarm.find_traffic( FlarmId::new( ID)).unwrap();
    assert!( t.location_available);
    assert!( t.location.is_valid());
    assert_eq!( t.location.lon_degrees(), 8.0); // east offset collapses
    assert!( t.location.lat_degrees() < 90.0);
    assert!( (to_meters( own.distance( &t.location)) - 1000.0).abs() < 5.0);
    assert!( (to_meters( t.distance) - 1000.0_f64.hypot( 500.0)).abs() < 1e-9);
    assert_eq!( to_meters( t.altitude), 1030.0);
}

#[test]
fn test_flarm_calculations_same_time () {
    println!("--- testing FlarmCalculations ignores repeated GPS time");
    let id = FlarmId::new(1);
    let mut fc = FlarmCalculations::new(4);

    fc.average_30s( id, 0.0, 100.0);
    assert_eq!( fc.average_30s( id, 1.0, 110.0), 10.0);
    assert_eq!( fc.average_30s( id, 1.0, 500.0), 10.0); // same time, not recorded
    assert_eq!( fc.average_30s( id, 2.0, 120.0), 10.0);

    assert_eq!( fc.average_30s( id, 0.5, 300.0), 0.0); // time went backwards, restart
    assert_eq!( fc.average_30s( id, 1.5, 310.0), 10.0);
}
