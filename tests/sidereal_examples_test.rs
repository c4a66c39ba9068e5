// Copyright (c) 2024-2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

extern crate wgs84_frames;

use angle_sc::is_within_tolerance;
use chrono::{DateTime, Utc};
use wgs84_frames::{inertial, time, Cartesian, Epoch};

const FILENAME: &str = "data/julian_sidereal_examples.json";

/// Read the (timestamp, Julian date, GMST) examples.
fn read_examples() -> Result<Vec<(DateTime<Utc>, f64, f64)>, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(FILENAME)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    let records = value.as_array().ok_or("expected an array of examples")?;

    let mut examples = Vec::new();
    for record in records {
        let utc = record["utc"].as_str().ok_or("missing utc")?;
        let time = DateTime::parse_from_rfc3339(utc)?.with_timezone(&Utc);
        let julian_date = record["julian_date"].as_f64().ok_or("missing julian_date")?;
        let gmst = record["gmst_rad"].as_f64().ok_or("missing gmst_rad")?;
        examples.push((time, julian_date, gmst));
    }
    Ok(examples)
}

#[test]
fn test_julian_date_and_gmst_examples() -> Result<(), Box<dyn std::error::Error>> {
    let examples = read_examples()?;
    assert!(!examples.is_empty());

    for (time, julian_date, gmst) in &examples {
        let result = time::julian_date(time);
        assert!(
            is_within_tolerance(*julian_date, result, 1e-9),
            "time: {time} expected: {julian_date} result: {result}"
        );

        let result = time::gmst(result);
        assert!(
            is_within_tolerance(*gmst, result, 1e-9),
            "time: {time} expected: {gmst} result: {result}"
        );
    }

    Ok(())
}

#[test]
fn test_gmst_batch_examples() -> Result<(), Box<dyn std::error::Error>> {
    let examples = read_examples()?;
    let mut times: Vec<Option<DateTime<Utc>>> = examples.iter().map(|e| Some(e.0)).collect();
    times.insert(1, None);

    let result = time::gmst_batch(&times);
    assert_eq!(times.len(), result.len());
    assert!(result[1].is_nan());
    assert!(is_within_tolerance(examples[0].2, result[0], 1e-9));
    assert!(is_within_tolerance(examples[1].2, result[2], 1e-9));

    // the missing timestamp's row is NaN after rotation, the others are not
    let position = Cartesian::new(4_000_000.0, -2_500_000.0, 4_200_000.0);
    let epochs: Vec<Epoch> = result.iter().map(|&theta| Epoch::Sidereal(theta)).collect();
    let eci = inertial::ecef_to_eci(&vec![position; epochs.len()], &epochs)?;
    assert!(eci[1].x.is_nan());
    assert!(eci[1].y.is_nan());
    assert_eq!(position.z, eci[1].z);
    assert!(eci[0].x.is_finite() && eci[2].y.is_finite());

    Ok(())
}

#[test]
fn test_civil_and_sidereal_epochs_agree() -> Result<(), Box<dyn std::error::Error>> {
    let examples = read_examples()?;
    let position = Cartesian::new(4_000_000.0, -2_500_000.0, 4_200_000.0);
    let positions = vec![position; examples.len()];

    let civil: Vec<Epoch> = examples.iter().map(|e| Epoch::Civil(e.0)).collect();
    let sidereal: Vec<Epoch> = examples.iter().map(|e| Epoch::Sidereal(e.2)).collect();

    let civil = inertial::ecef_to_eci(&positions, &civil)?;
    let sidereal = inertial::ecef_to_eci(&positions, &sidereal)?;
    for (a, b) in civil.iter().zip(&sidereal) {
        assert!(is_within_tolerance(a.x, b.x, 1e-2));
        assert!(is_within_tolerance(a.y, b.y, 1e-2));
        assert_eq!(a.z, b.z);
    }

    Ok(())
}
