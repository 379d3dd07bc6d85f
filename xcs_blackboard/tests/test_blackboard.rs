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

use std::sync::{Arc, atomic::{AtomicUsize,Ordering}};
use xcs_common::{angle::Angle, clock::ManualClock, geo::GeoPoint, units::{meters, meters_per_second, to_meters, to_meters_per_second}};
use xcs_blackboard::{
    BlackboardConfig, DeviceBlackboard, DataSource, NmeaInfo,
    pressure::AtmosphericPressure, triggers::BlackboardTriggers,
};

/// run with "cargo test --test test_blackboard -- --nocapture"

fn new_blackboard (clock: &Arc<ManualClock>)->DeviceBlackboard {
    DeviceBlackboard::new( &BlackboardConfig::default(), clock.clone())
}

fn device_info (now: f64)->NmeaInfo {
    let mut info = NmeaInfo::new();
    info.update_clock( now);
    info.alive.update( now);
    info
}

#[derive(Default)]
struct CountingTriggers {
    gps: AtomicUsize,
    vario: AtomicUsize,
    lost: AtomicUsize,
}

impl BlackboardTriggers for CountingTriggers {
    fn gps_update (&self) { self.gps.fetch_add( 1, Ordering::Relaxed); }
    fn vario_update (&self) { self.vario.fetch_add( 1, Ordering::Relaxed); }
    fn connection_lost (&self) { self.lost.fetch_add( 1, Ordering::Relaxed); }
}

impl CountingTriggers {
    fn counts (&self)->(usize,usize,usize) {
        (self.gps.load( Ordering::Relaxed), self.vario.load( Ordering::Relaxed), self.lost.load( Ordering::Relaxed))
    }
}

#[test]
fn test_merge_priority () {
    println!("--- testing replay > simulator > real priority");
    let clock = Arc::new( ManualClock::new( 100.0));
    let mut bb = new_blackboard( &clock);

    let mut dev = device_info( 100.0);
    dev.provide_ground_speed( meters_per_second( 10.0));
    bb.set_device_data( 0, dev).unwrap();
    assert_eq!( bb.source(), DataSource::Real);
    assert_eq!( to_meters_per_second( bb.basic().ground_speed), 10.0);

    bb.set_speed( meters_per_second( 30.0));
    assert_eq!( bb.source(), DataSource::Simulator);
    assert_eq!( to_meters_per_second( bb.basic().ground_speed), 30.0);

    let loc = GeoPoint::from_lon_lat_degrees( 8.5, 47.2);
    bb.set_location( loc, meters_per_second( 20.0), Angle::from_degrees( 10.0), meters( 500.0), meters( 510.0), 1000.0);
    assert_eq!( bb.source(), DataSource::Replay);
    assert_eq!( bb.basic().location, loc);
    assert_eq!( to_meters_per_second( bb.basic().ground_speed), 20.0);
    assert!( bb.basic().gps.replay);
    assert_eq!( bb.basic().time, 1000.0);

    bb.stop_replay();
    assert_eq!( bb.source(), DataSource::Simulator);
    assert_eq!( to_meters_per_second( bb.basic().ground_speed), 30.0);

    // the real devices are merged regardless of the selected source
    assert_eq!( to_meters_per_second( bb.real_state().ground_speed), 10.0);
}

#[test]
fn test_field_complement () {
    println!("--- testing field-wise merge of device slots");
    let clock = Arc::new( ManualClock::new( 100.0));
    let mut bb = new_blackboard( &clock);

    let loc = GeoPoint::from_lon_lat_degrees( -121.5, 37.0);

    let mut dev0 = device_info( 100.0);
    dev0.provide_gps_altitude( meters( 1000.0));
    bb.set_device_data( 0, dev0).unwrap();

    let mut dev1 = device_info( 100.0);
    dev1.provide_location( loc);
    dev1.provide_gps_altitude( meters( 2000.0));
    bb.set_device_data( 1, dev1).unwrap();

    let basic = bb.basic();
    assert!( basic.connected());
    assert!( basic.location_available.is_valid());
    assert_eq!( basic.location, loc);
    assert_eq!( to_meters( basic.gps_altitude), 1000.0); // lower slot wins
    assert_eq!( basic.nav_altitude.map( to_meters), Some(1000.0));

    assert!( bb.set_device_data( 42, device_info( 100.0)).is_err());
}

#[test]
fn test_dead_device_ignored () {
    println!("--- testing that devices without alive data are not merged");
    let clock = Arc::new( ManualClock::new( 100.0));
    let mut bb = new_blackboard( &clock);

    let mut dev = NmeaInfo::new();
    dev.update_clock( 100.0);
    dev.provide_location( GeoPoint::from_lon_lat_degrees( 1.0, 1.0));
    bb.set_device_data( 0, dev).unwrap();

    assert!( !bb.basic().connected());
    assert!( !bb.basic().location_available.is_valid());
}

#[test]
fn test_edge_triggers () {
    println!("--- testing edge triggered GPS and vario updates");
    let clock = Arc::new( ManualClock::new( 100.0));
    let triggers = Arc::new( CountingTriggers::default());
    let mut bb = new_blackboard( &clock).with_triggers( triggers.clone());
    bb.fire_pending_triggers();
    assert_eq!( triggers.counts(), (0,0,0));

    let loc = GeoPoint::from_lon_lat_degrees( 8.0, 47.0);
    let mut dev = device_info( 100.0);
    dev.provide_location( loc);
    bb.set_device_data( 0, dev.clone()).unwrap();
    bb.fire_pending_triggers();
    assert_eq!( triggers.counts(), (1,0,0));

    // nothing changed, nothing fires
    bb.merge();
    bb.fire_pending_triggers();
    assert_eq!( triggers.counts(), (1,0,0));

    dev.provide_total_energy_vario( meters_per_second( 1.5));
    bb.set_device_data( 0, dev).unwrap();
    bb.fire_pending_triggers();
    assert_eq!( triggers.counts(), (1,1,0));

    // device goes stale
    clock.advance( 11.0);
    bb.merge();
    bb.fire_pending_triggers();
    assert!( !bb.basic().location_available.is_valid());
    assert_eq!( triggers.counts(), (2,2,0));
}

#[test]
fn test_expire_wall_clock () {
    println!("--- testing connection lost detection");
    let clock = Arc::new( ManualClock::new( 100.0));
    let triggers = Arc::new( CountingTriggers::default());
    let mut bb = new_blackboard( &clock).with_triggers( triggers.clone());

    let mut dev = device_info( 100.0);
    dev.provide_location( GeoPoint::from_lon_lat_degrees( 8.0, 47.0));
    bb.set_device_data( 0, dev).unwrap();
    assert!( bb.basic().connected());

    clock.set( 105.0);
    assert!( !bb.expire_wall_clock());
    assert!( bb.basic().connected());

    clock.set( 111.0);
    assert!( bb.expire_wall_clock());
    assert!( !bb.basic().connected());
    assert!( !bb.device_state(0).unwrap().alive.is_valid());

    // already disconnected
    clock.set( 112.0);
    assert!( !bb.expire_wall_clock());

    bb.fire_pending_triggers();
    assert_eq!( triggers.counts().2, 1);
}

#[test]
fn test_simulation () {
    println!("--- testing simulator setters and simulation step");
    let clock = Arc::new( ManualClock::new( 100.0));
    let mut bb = new_blackboard( &clock);

    let start = GeoPoint::from_lon_lat_degrees( -121.0, 37.0);
    bb.process_simulation(); // not initialized, ignored
    assert_eq!( bb.source(), DataSource::Real);

    bb.init_simulator( start, meters( 1000.0));
    bb.set_speed( meters_per_second( 50.0));
    bb.set_track_bearing( Angle::from_degrees( 90.0));
    bb.process_simulation();

    let basic = bb.basic();
    assert_eq!( bb.source(), DataSource::Simulator);
    assert!( basic.gps.simulator);
    assert_eq!( basic.time, 1.0);
    assert!( (to_meters( start.distance( &basic.location)) - 50.0).abs() < 0.1);
    assert!( (start.bearing( &basic.location).degrees() - 90.0).abs() < 0.1);
    assert_eq!( to_meters( basic.gps_altitude), 1000.0);
    assert!( basic.airspeed_available.is_valid());

    bb.set_altitude( meters( 1500.0));
    assert_eq!( bb.basic().nav_altitude.map( to_meters), Some(1500.0));

    bb.set_qnh( AtmosphericPressure::hectopascal( 1020.0));
    let basic = bb.basic();
    assert!( basic.pressure_altitude_available.is_valid());
    assert!( (to_meters( basic.baro_altitude) - 1500.0).abs() < 0.5);
    assert!( basic.pressure_altitude < basic.baro_altitude);
    assert_eq!( bb.settings().qnh, Some( AtmosphericPressure::hectopascal( 1020.0)));

    bb.set_mc( meters_per_second( 1.5));
    assert!( bb.basic().settings.mac_cready_available.is_valid());
    assert_eq!( to_meters_per_second( bb.settings().mac_cready), 1.5);
}

#[test]
fn test_startup_location () {
    println!("--- testing startup location");
    let clock = Arc::new( ManualClock::new( 10.0));
    let mut bb = new_blackboard( &clock);

    let home = GeoPoint::from_lon_lat_degrees( 11.0, 48.0);
    bb.set_startup_location( home, meters( 500.0));

    let basic = bb.basic();
    assert_eq!( basic.location, home);
    assert!( !basic.location_available.is_valid());
    assert!( !basic.gps_altitude_available.is_valid());
}

#[test]
fn test_tick_compute () {
    println!("--- testing tick with rates of change");
    let clock = Arc::new( ManualClock::new( 100.0));
    let mut bb = new_blackboard( &clock);

    let loc = GeoPoint::from_lon_lat_degrees( 8.0, 47.0);
    let mut dev = device_info( 100.0);
    dev.provide_time( 1000.0);
    dev.provide_location( loc);
    dev.provide_gps_altitude( meters( 1000.0));
    bb.set_device_data( 0, dev).unwrap();
    bb.tick();
    assert_eq!( bb.last_basic().time, 1000.0);
    assert!( !bb.calculated().flying);

    clock.set( 101.0);
    let mut dev = device_info( 101.0);
    dev.provide_time( 1001.0);
    dev.provide_location( loc.destination( Angle::zero(), meters( 30.0)));
    dev.provide_gps_altitude( meters( 1002.0));
    bb.set_device_data( 0, dev).unwrap();
    bb.tick();

    let basic = bb.basic();
    assert!( basic.track_available.is_valid());
    assert!( basic.track.as_delta().degrees().abs() < 0.1);
    assert!( (to_meters_per_second( basic.ground_speed) - 30.0).abs() < 0.1);
    assert!( (to_meters_per_second( basic.gps_vario) - 2.0).abs() < 1e-9);
    assert!( (to_meters_per_second( basic.brutto_vario) - 2.0).abs() < 1e-9);
    assert!( basic.netto_vario_available.is_valid()); // derived without a netto device
    assert!( (to_meters_per_second( basic.netto_vario) - 2.0).abs() < 1e-9); // not flying before, no sink yet
    assert_eq!( bb.last_basic().time, 1001.0);

    let calculated = bb.calculated();
    assert!( calculated.flying);
    assert_eq!( calculated.takeoff_time, Some(1001.0));

    let n = bb.flight_statistics().with_data( |d| d.altitude.count());
    assert_eq!( n, 1);

    // same GPS time, nothing recomputed
    bb.tick();
    assert_eq!( bb.flight_statistics().with_data( |d| d.altitude.count()), 1);
}
