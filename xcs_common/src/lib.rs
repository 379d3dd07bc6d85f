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

use std::f64::consts::{PI as STD_PI};

pub mod angle;
pub mod geo;
pub mod clock;
pub mod units;

pub const PI: f64 = STD_PI;
pub const TWO_PI: f64 = STD_PI * 2.0;
pub const HALF_PI: f64 = STD_PI / 2.0;

/// standard gravity [m/s²]
pub const GRAVITY: f64 = 9.81;
