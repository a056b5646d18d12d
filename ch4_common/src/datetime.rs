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

use std::fmt;
use chrono::{Datelike, NaiveDate};
use serde::{Serialize,Deserialize};

/// a calendar day without a year, e.g. to define seasonal windows that are re-used for different years
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub const fn new (month: u32, day: u32)->Self { MonthDay{month,day} }

    /// this returns None if the day does not exist in the given year (e.g. Feb 29 in non-leap years)
    pub fn in_year (&self, year: i32)->Option<NaiveDate> {
        NaiveDate::from_ymd_opt( year, self.month, self.day)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// a date window given by start and end dates. The end date is exclusive, as in Earth Engine date filters
/// (`filterDate(start,end)`). Both are passed on as "YYYY-MM-DD"
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new (start: NaiveDate, end: NaiveDate)->Self { DateRange{start,end} }

    /// `[year-01-01, year-12-31]`. Returns None for years outside of what chrono can represent
    pub fn calendar_year (year: i32)->Option<Self> {
        Self::within_year( year, MonthDay::new(1,1), MonthDay::new(12,31))
    }

    /// `[year-from, year-to]`
    pub fn within_year (year: i32, from: MonthDay, to: MonthDay)->Option<Self> {
        Some( DateRange { start: from.in_year(year)?, end: to.in_year(year)? } )
    }

    pub fn start_str (&self)->String { self.start.format("%Y-%m-%d").to_string() }
    pub fn end_str (&self)->String { self.end.format("%Y-%m-%d").to_string() }

    pub fn year (&self)->i32 { self.start.year() }

    /// `start <= d < end`
    pub fn contains (&self, d: &NaiveDate)->bool {
        *d >= self.start && *d < self.end
    }

    pub fn is_empty (&self)->bool { self.end < self.start }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{})", self.start_str(), self.end_str())
    }
}
