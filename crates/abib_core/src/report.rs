//! Plain-text report rendering.
//!
//! Output goes through the [`OutputWriter`] seam so hosts decide where text
//! lands (a console, a UI pane, a capture buffer in tests). The layouts are
//! fixed-width; [`format_field`] produces the numeric columns.

use chrono::{NaiveTime, Timelike};

use abib_astronomy::LunarYear;
use abib_calendar::to_civil_date;
use abib_feasts::FloodTable;
use abib_types::{format_year, CivilDate, CreationCandidate, FeastCandidate, Location,
    MONTH_ABBREV};

/// Text sink for the report renderers.
pub trait OutputWriter {
    fn write(&mut self, text: &str);

    fn write_line(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }

    fn clear(&mut self) {}
}

/// An in-memory writer.
#[derive(Debug, Default, Clone)]
pub struct BufferWriter {
    buffer: String,
}

impl BufferWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> &str {
        &self.buffer
    }
}

impl OutputWriter for BufferWriter {
    fn write(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }
}

/// Formats a number into a fixed-width column of `width + 1` characters.
///
/// Decimal places shrink as the integer part grows; integers keep a single
/// trailing `.0`; anything longer than the column is cut to fit.
pub fn format_field(value: f64, width: usize) -> String {
    let width = width.max(2);
    let mut int_len = 0usize;
    let mut t = value;
    while t.abs() > 1.0 {
        t /= 10.0;
        int_len += 1;
    }
    let eff_width = if int_len >= width { int_len + 1 } else { width };
    let decimals = if value.abs() < 1.0 {
        eff_width.saturating_sub(int_len + 2)
    } else {
        eff_width.saturating_sub(int_len + 1)
    };
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;

    let mut s = if rounded.fract() == 0.0 {
        format!("{rounded:.1}")
    } else {
        let mut s = format!("{rounded:.decimals$}");
        while s.contains('.') && s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
        s
    };

    let target = width + 1;
    s.truncate(target);
    while s.len() < target {
        s.push(' ');
    }
    s
}

/// Era-suffixed year padded right to nine characters.
fn year_column(year: i32) -> String {
    let mut s = format_year(year);
    while s.len() < 9 {
        s.push(' ');
    }
    s
}

fn civil(jd: f64) -> String {
    let d = to_civil_date(jd);
    format!("{}/{}/{}", d.day.floor() as i64, d.month, d.year)
}

/// The listings read in a 12-hour evening frame: 19:48 prints as "7:48".
fn clock(t: NaiveTime) -> String {
    format!("{:2}:{:02}", t.hour() % 12, t.minute())
}

fn degrees_minutes(value: f64) -> (i64, i64) {
    let deg = value.abs().floor();
    let min = ((value.abs() - deg) * 60.0).round();
    (deg as i64, min as i64)
}

/// `(Name, 31°47'N 35°13'E GMT +2)` location header line.
fn location_line(w: &mut dyn OutputWriter, name: &str, location: &Location) {
    let (lat_d, lat_m) = degrees_minutes(location.latitude);
    let (lon_d, lon_m) = degrees_minutes(location.longitude);
    let lat_dir = if location.latitude >= 0.0 { "N" } else { "S" };
    let lon_dir = if location.longitude >= 0.0 { "E" } else { "W" };
    let offset = location.utc_offset_hours;
    let gmt = if offset >= 0.0 { format!("+{offset}") } else { format!("{offset}") };
    w.write_line(&format!(
        "({name}, {lat_d}\u{b0}{lat_m}'{lat_dir} {lon_d}\u{b0}{lon_m}'{lon_dir} GMT {gmt})"
    ));
    w.write_line("");
}

/// The per-lunation new-moon table for a year of observations.
pub fn new_moons_report(
    w: &mut dyn OutputWriter,
    observed: &LunarYear,
    name: &str,
    location: &Location,
) {
    w.write_line(&format!("{} CALCULATED NEW MOONS", year_column(observed.year)));
    w.write_line("");
    location_line(w, name, location);

    for month in &observed.months {
        w.write_line(" Date     Sunset Moonset   Illum. Sun's  [Moon's at Sunset]  Sun's    Visib   Visible?");
        w.write_line("(Evening)                    %    Azimuth Azimuth Altitude   Alt(M)   Number");
        for e in &month.evenings {
            let month_name = MONTH_ABBREV.get(e.date.month as usize).copied().unwrap_or("???");
            w.write(&format!("{:<2} {}", e.date.day.floor() as i64, month_name));
            w.write(&format!("   {}", clock(e.sunset)));
            w.write(&format!("  {}", clock(e.moonset)));
            w.write(&format!("    {}", format_field(e.illumination_pct, 4)));
            w.write(&format!("  {}", format_field(e.sun_azimuth, 5)));
            w.write(&format!("  {}", format_field(e.moon_azimuth, 5)));
            w.write(&format!("   {}", format_field(e.moon_altitude, 4)));
            w.write(&format!("      {}", format_field(e.sun_altitude_at_moonset, 4)));
            w.write(&format!("    {}", format_field(e.visibility_index, 5)));
            w.write_line(&format!("  {}", e.tier));
        }
        w.write_line("");
    }
}

/// Crucifixion candidates: the detailed single-year layout, or the year list
/// for a range.
pub fn crucifixion_report(
    w: &mut dyn OutputWriter,
    start: i32,
    end: i32,
    candidates: &[FeastCandidate],
) {
    if end > start {
        w.write_line("The following years may have the Passover sacrifice on Wednesday.");
        w.write_line(&format!("First year of run is {}", format_year(start)));
        w.write_line(&format!("Last year of run is {}", format_year(end)));
        w.write_line("==============================");
        for c in candidates {
            w.write(&format!("{}  ", format_year(c.year)));
        }
        w.write_line("");
        return;
    }

    w.write_line(&format!(
        "Possible Dates for Jesus' Crucifixion, Resurrection and Pentecost in {}",
        format_year(start)
    ));
    for c in candidates {
        w.write_line(&format!("Abib 1 is {}", civil(c.abib1_jd)));
        w.write_line(&format!("Passover sacrifice is {}", civil(c.passover_jd)));
        w.write_line("********** This year has the proper day of the week for Christ's death. **********");
        w.write_line(&format!(
            "Feast of Unleavened Bread runs from {} to {}",
            civil(c.unleavened_start_jd),
            civil(c.unleavened_end_jd)
        ));
        w.write_line(&format!("The Wave Offering (the First-Fruit) is {}", civil(c.wave_offering_jd)));
        w.write_line(&format!("First-Fruits (Pentecost) is {}", civil(c.pentecost_jd)));
    }
}

/// Jordan-crossing candidates.
pub fn jordan_report(w: &mut dyn OutputWriter, start: i32, end: i32, candidates: &[FeastCandidate]) {
    if end > start {
        w.write_line("The following years may have the Passover sacrifice on the Sabbath.");
        for c in candidates {
            w.write(&format!("{}  ", format_year(c.year)));
        }
        w.write_line("");
        return;
    }

    w.write_line(&format!("Possible Dates for the Jordan Crossing in {}", format_year(start)));
    for c in candidates {
        w.write_line(&format!("Passover sacrifice is {}", civil(c.passover_jd)));
        w.write_line(&format!("The Wave Offering (the First-Fruit) is {}", civil(c.wave_offering_jd)));
        w.write_line(&format!("First-Fruits (Pentecost) is {}", civil(c.pentecost_jd)));
    }
}

/// Creation candidates (Abib 1 on Sunday).
pub fn creation_report(
    w: &mut dyn OutputWriter,
    start: i32,
    end: i32,
    candidates: &[CreationCandidate],
) {
    if end > start {
        w.write_line("The following years may have Abib 1 on Sunday.");
        for c in candidates {
            w.write(&format!("{}  ", format_year(c.year)));
        }
        w.write_line("");
        return;
    }

    w.write_line(&format!("Possible Dates for Creation in {}", format_year(start)));
    for c in candidates {
        w.write_line(&format!("Abib 1 is {}", civil(c.abib1_jd)));
    }
}

/// The three-column Flood-duration table.
pub fn flood_report(w: &mut dyn OutputWriter, table: &FloodTable) {
    w.write_line(&format!(
        "First year of run is {}          Last year of run is {}",
        format_year(table.start_year),
        format_year(table.end_year)
    ));
    w.write_line(" 150 days           149(+1)             148(+2)");
    w.write_line(" ===================================================================");

    let exact: Vec<i32> = table.exact_150().map(|y| y.year).collect();
    let plus1: Vec<i32> = table.plus_one().map(|y| y.year).collect();
    let plus2: Vec<i32> = table.plus_two().map(|y| y.year).collect();
    let rows = exact.len().max(plus1.len()).max(plus2.len());

    for i in 0..rows {
        let mut line = String::new();
        for column in [&exact, &plus1] {
            match column.get(i) {
                Some(y) => line.push_str(&format!("{:<20}", format_year(*y))),
                None => line.push_str(&" ".repeat(20)),
            }
        }
        if let Some(y) = plus2.get(i) {
            line.push_str(&format_year(*y));
        }
        w.write_line(&line);
    }
}

/// Daily sunset listing for the opening months of a year, four to a row.
pub fn sunsets_report(
    w: &mut dyn OutputWriter,
    year: i32,
    location: &Location,
    days: &[(CivilDate, NaiveTime)],
) {
    w.write_line(&format!("{} CALCULATED SUNSETS", year_column(year)));
    w.write_line(&format!(
        "Location: Latitude {}, Longitude {}, GMT Offset {}",
        location.latitude, location.longitude, location.utc_offset_hours
    ));
    w.write_line("Times do not reflect changes in 'Daylight Saving Time'");
    w.write_line("________________________________________________________________________________________");

    for (i, (date, time)) in days.iter().enumerate() {
        if i % 4 == 0 && i > 0 {
            w.write_line("");
        }
        w.write(&format!("{}/{} {} PM    ", date.day.floor() as i64, date.month, clock(*time)));
    }
    w.write_line("");
}
