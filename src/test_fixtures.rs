//! Small in-memory tables shared by the unit tests.
//!
//! | row | station | year | hour | PM2.5 | TEMP | PRES | DEWP |
//! |---|---|---|---|---|---|---|---|
//! | 0 | Dongsi  | 2013 | 0 | 10    | -10  | 1010 | 5 |
//! | 1 | Dongsi  | 2013 | 1 | 20    | 0    | 1012 | 5 |
//! | 2 | Dongsi  | 2014 | 2 | NaN   | 10   | 1014 | 5 |
//! | 3 | Gucheng | 2013 | 3 | 100   | 30   | 1016 | 5 |
//! | 4 | Gucheng | 2014 | 4 | 200   | 20   | 1018 | 5 |
//! | 5 | Gucheng | 2014 | 5 | 150   | null | 1020 | 5 |
//! | 6 | Unknown | 2013 | 6 | 60    | 5    | 1022 | 5 |
//! | 7 | Unknown | 2014 | 7 | 80    | 15   | 1024 | 5 |
//!
//! All rows fall on March 1st. `CO` is entirely missing.

use crate::types::air_quality_frame::AirQualityFrame;
use polars::prelude::*;
use std::path::{Path, PathBuf};

pub const SAMPLE_CSV: &str = "\
No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station
1,2013,3,1,0,10,12,4,7,NA,77,-10,1010,5,0,NNW,4.4,Dongsi
2,2013,3,1,1,20,24,4,7,NA,77,0,1012,5,0,N,4.7,Dongsi
3,2014,3,1,2,NA,30,5,9,NA,70,10,1014,5,0,NNW,5.6,Dongsi
4,2013,3,1,3,100,110,6,11,NA,72,30,1016,5,0,NW,3.1,Gucheng
5,2014,3,1,4,200,220,6,12,NA,71,20,1018,5,0,N,2.0,Gucheng
6,2014,3,1,5,150,160,7,12,NA,69,NA,1020,5,0,NNE,2.5,Gucheng
7,2013,3,1,6,60,66,3,8,NA,80,5,1022,5,0,NE,1.2,Unknown
8,2014,3,1,7,80,85,3,8,NA,79,15,1024,5,0,E,1.9,Unknown
";

pub fn sample_dataframe() -> DataFrame {
    df!(
        "station" => ["Dongsi", "Dongsi", "Dongsi", "Gucheng", "Gucheng", "Gucheng", "Unknown", "Unknown"],
        "year" => [2013i64, 2013, 2014, 2013, 2014, 2014, 2013, 2014],
        "month" => [3i64; 8],
        "day" => [1i64; 8],
        "hour" => [0i64, 1, 2, 3, 4, 5, 6, 7],
        "PM2.5" => [10.0, 20.0, f64::NAN, 100.0, 200.0, 150.0, 60.0, 80.0],
        "PM10" => [12.0, 24.0, 30.0, 110.0, 220.0, 160.0, 66.0, 85.0],
        "SO2" => [4.0, 4.0, 5.0, 6.0, 6.0, 7.0, 3.0, 3.0],
        "NO2" => [7.0, 7.0, 9.0, 11.0, 12.0, 12.0, 8.0, 8.0],
        "CO" => [None::<f64>; 8],
        "O3" => [77.0, 77.0, 70.0, 72.0, 71.0, 69.0, 80.0, 79.0],
        "TEMP" => [Some(-10.0), Some(0.0), Some(10.0), Some(30.0), Some(20.0), None, Some(5.0), Some(15.0)],
        "PRES" => [1010.0, 1012.0, 1014.0, 1016.0, 1018.0, 1020.0, 1022.0, 1024.0],
        "DEWP" => [5.0; 8]
    )
    .expect("fixture frame is well-formed")
}

pub fn sample_frame() -> AirQualityFrame {
    AirQualityFrame::try_from_dataframe(sample_dataframe()).expect("fixture frame is valid")
}

/// Writes `contents` to `all_data.csv` inside `dir`.
pub fn write_csv(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("all_data.csv");
    std::fs::write(&path, contents).expect("failed to write fixture CSV");
    path
}
