// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Time related utils.

use chrono::SecondsFormat;
use chrono::Utc;

pub use chrono::TimeDelta;

use crate::{Error, Result};

/// DateTime is the alias for chrono's UTC datetime.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a new DateTime with current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Build a clock drift from a signed number of seconds.
///
/// Used to compensate clock skew between client and server.
pub fn drift(seconds: i64) -> Result<TimeDelta> {
    TimeDelta::try_seconds(seconds)
        .ok_or_else(|| Error::config_invalid(format!("clock drift of {seconds}s is out of range")))
}

/// Shift a DateTime by a clock drift.
pub fn add_drift(time: DateTime, drift: TimeDelta) -> Result<DateTime> {
    time.checked_add_signed(drift)
        .ok_or_else(|| Error::unexpected(format!("{time} shifted by {drift} is out of range")))
}

/// Format time into a `wsu:Created` value: "2022-03-13T07:20:04.123456Z"
///
/// The offset is always written as a literal `Z`.
pub fn format_created(t: DateTime) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse time from RFC3339.
///
/// All offsets will be converted into UTC.
pub fn parse_rfc3339(s: &str) -> Result<DateTime> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|v| v.with_timezone(&Utc))
        .map_err(|e| {
            Error::unexpected(format!("parse '{s}' into rfc3339 failed")).with_source(e)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_time() -> DateTime {
        Utc.with_ymd_and_hms(2022, 3, 1, 8, 12, 34)
            .single()
            .expect("valid time")
    }

    #[test]
    fn test_format_created() {
        assert_eq!(format_created(test_time()), "2022-03-01T08:12:34.000000Z");
    }

    #[test]
    fn test_add_drift() -> Result<()> {
        assert_eq!(
            format_created(add_drift(test_time(), drift(-34)?)?),
            "2022-03-01T08:12:00.000000Z"
        );
        assert_eq!(
            format_created(add_drift(test_time(), drift(3600)?)?),
            "2022-03-01T09:12:34.000000Z"
        );
        assert!(drift(i64::MAX).is_err());
        assert!(add_drift(DateTime::MAX_UTC, drift(1)?).is_err());
        Ok(())
    }

    #[test]
    fn test_parse_rfc3339() -> Result<()> {
        assert_eq!(parse_rfc3339("2022-03-01T08:12:34Z")?, test_time());
        assert_eq!(parse_rfc3339("2022-03-01T09:12:34+01:00")?, test_time());
        assert_eq!(parse_rfc3339(&format_created(test_time()))?, test_time());
        Ok(())
    }
}
