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

//! numeric filters for flight statistics: online regression, convex envelopes, smoothed
//! histograms and sliding window climb averages

pub mod least_squares;
pub mod convex_filter;
pub mod histogram;
pub mod climb_average;
pub mod flight_statistics;

pub use least_squares::{LeastSquares,Slot};
pub use convex_filter::ConvexFilter;
pub use histogram::Histogram;
pub use climb_average::ClimbAverageCalculator;
pub use flight_statistics::{FlightStatistics,FlightStatisticsData,BarographSummary,ClimbSummary};
