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

use serde::{Serialize,Deserialize};
use crate::{YearRange, Result, invalid_param};

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2023;
pub const MIN_THRESHOLD: i32 = 1000;
pub const MAX_THRESHOLD: i32 = 2000;

/// the user controls of the dashboard. Missing values are filled in with defaults when deserializing
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(default)]
pub struct DashboardParams {
    pub start_year: i32,
    pub end_year: i32,
    /// raw (ppb) cutoff for the high emission mask
    pub threshold: i32,
    /// the year shown on the map
    pub year: i32,
}

impl Default for DashboardParams {
    fn default()->Self {
        DashboardParams { start_year: 2019, end_year: 2023, threshold: 1850, year: 2019 }
    }
}

impl DashboardParams {
    /// the controls used by the time series (start_year, end_year). Errors name the first violated field
    pub fn validate_range (&self)->Result<()> {
        check_bounds( "start_year", self.start_year, MIN_YEAR, MAX_YEAR)?;
        check_bounds( "end_year", self.end_year, self.start_year, MAX_YEAR)
    }

    /// the controls used by the map (threshold, year)
    pub fn validate_map (&self)->Result<()> {
        check_bounds( "threshold", self.threshold, MIN_THRESHOLD, MAX_THRESHOLD)?;
        check_bounds( "year", self.year, MIN_YEAR, MAX_YEAR)
    }

    pub fn year_range (&self)->YearRange { YearRange::new( self.start_year, self.end_year) }

    pub fn threshold_value (&self)->f64 { self.threshold as f64 }
}

fn check_bounds (field: &'static str, v: i32, min: i32, max: i32)->Result<()> {
    if v < min || v > max {
        Err( invalid_param( field, format!("{v} not within [{min},{max}]")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ch4EmissionError;

    fn violated (p: DashboardParams)->Option<&'static str> {
        match p.validate_range().and_then( |_| p.validate_map()) {
            Err(Ch4EmissionError::InvalidParam{field,..}) => Some(field),
            _ => None
        }
    }

    #[test]
    fn test_bounds() {
        let p = DashboardParams::default();
        assert!( violated(p).is_none());

        assert_eq!( violated( DashboardParams{ start_year: 1999, ..p }), Some("start_year"));
        assert_eq!( violated( DashboardParams{ end_year: 2018, ..p }), Some("end_year"));
        assert_eq!( violated( DashboardParams{ end_year: 2024, ..p }), Some("end_year"));
        assert_eq!( violated( DashboardParams{ threshold: 999, ..p }), Some("threshold"));
        assert_eq!( violated( DashboardParams{ threshold: 2001, ..p }), Some("threshold"));
        assert_eq!( violated( DashboardParams{ year: 2024, ..p }), Some("year"));

        // first violation wins
        assert_eq!( violated( DashboardParams{ start_year: 2030, threshold: 0, ..p }), Some("start_year"));

        // end == start is ok
        assert!( DashboardParams{ start_year: 2023, end_year: 2023, ..p }.validate_range().is_ok());
    }

    #[test]
    fn test_partial_validation() {
        let p = DashboardParams::default();

        let bad_threshold = DashboardParams{ threshold: 5000, ..p };
        assert!( bad_threshold.validate_range().is_ok());
        assert!( bad_threshold.validate_map().is_err());

        let bad_range = DashboardParams{ start_year: 2023, end_year: 2019, ..p };
        assert!( bad_range.validate_map().is_ok());
        assert!( matches!( bad_range.validate_range(), Err(Ch4EmissionError::InvalidParam{field:"end_year",..})));
    }
}
