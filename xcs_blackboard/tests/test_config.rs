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

use std::time::Duration;
use xcs_common::units::{meters, to_meters, to_meters_per_second};
use xcs_blackboard::{
    BlackboardConfig, XcsBlackboardError, load_config, config::parse_config, flarm::FlarmId,
};

/// run with "cargo test --test test_config -- --nocapture"

#[test]
fn test_load_config () {
    println!("--- testing config file");
    let config = load_config( "configs/blackboard.ron").unwrap();

    assert_eq!( config.num_devices, 4);
    assert_eq!( config.tick_interval, Duration::from_millis(500));
    assert_eq!( config.flarm_max_age, Duration::from_secs(60));
    assert_eq!( config.flarm_names.get( &FlarmId::new( 0xDD8F12)).map( String::as_str), Some("D-KXCS"));

    let loc = config.startup_location.unwrap();
    assert_eq!( loc.lat_degrees(), 37.3);
    assert_eq!( to_meters( config.startup_altitude), 180.0);

    let computer = &config.computer;
    assert!( computer.nav_baro_altitude_enabled);
    assert!( computer.qnh.is_some_and( |q| (q.get_hectopascal() - 1013.25).abs() < 1e-9));
    assert_eq!( to_meters_per_second( computer.mac_cready), 1.0);
    assert_eq!( computer.polar.c, -1.24);
}

#[test]
fn test_config_roundtrip () {
    println!("--- testing default config serialization");
    let config = BlackboardConfig::default();
    let s = ron::to_string( &config).unwrap();
    let config2 = parse_config( &s).unwrap();

    assert_eq!( config2.num_devices, config.num_devices);
    assert_eq!( config2.expire_interval, config.expire_interval);
    assert_eq!( config2.computer, config.computer);
}

#[test]
fn test_config_errors () {
    println!("--- testing config errors");
    let mut config = BlackboardConfig::default();
    config.num_devices = 0;
    let s = ron::to_string( &config).unwrap();
    assert!( matches!( parse_config( &s), Err(XcsBlackboardError::ConfigError(_))));

    assert!( matches!( parse_config( "(num_devices: 2"), Err(XcsBlackboardError::RonError(_))));
    assert!( matches!( load_config( "configs/does_not_exist.ron"), Err(XcsBlackboardError::IOError(_))));
}
