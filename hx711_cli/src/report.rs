//! Discovery report rendering: the fixed text layout plus a JSON form.

use std::fmt::Write;

use serde_json::json;

use hx711_core::{Stats, TimingCollection};

fn push_block(out: &mut String, title: &str, stats: &Stats) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "Min: {:.2} us", stats.min);
    let _ = writeln!(out, "Max: {:.2} us", stats.max);
    let _ = writeln!(out, "Med: {:.2} us", stats.median);
    let _ = writeln!(out, "Std: {:.2} us", stats.std_dev);
    let _ = writeln!(out);
}

/// The classic three-block report followed by one CSV row per sample.
///
/// Rows outside `band` standard deviations of the median get a trailing
/// `*` (wait phase) or `#` (conversion phase); a row can carry both.
pub fn render_text(timings: &TimingCollection, band: f64) -> String {
    let wait = timings.wait_stats();
    let conv = timings.conversion_stats();
    let total = timings.total_stats();

    let mut out = String::new();
    push_block(&mut out, "Wait Times", &wait);
    push_block(&mut out, "Conversion Times", &conv);
    push_block(&mut out, "Total Times", &total);
    out.push('\n');
    out.push_str("Total,Wait,Conversion,Value\n");
    for s in timings {
        let t = &s.timing;
        let _ = write!(
            out,
            "{:.2},{:.2},{:.2},{}",
            t.total_us(),
            t.wait_us(),
            t.conversion_us(),
            s.raw
        );
        if !wait.in_range(t.wait_us(), band) {
            out.push('*');
        }
        if !conv.in_range(t.conversion_us(), band) {
            out.push('#');
        }
        out.push('\n');
    }
    out
}

fn stats_json(s: &Stats) -> serde_json::Value {
    json!({
        "min": s.min,
        "max": s.max,
        "median": s.median,
        "std_dev": s.std_dev,
    })
}

/// Same content as [`render_text`], as a single JSON object.
pub fn render_json(timings: &TimingCollection, band: f64) -> String {
    let wait = timings.wait_stats();
    let conv = timings.conversion_stats();
    let total = timings.total_stats();

    let rows: Vec<serde_json::Value> = timings
        .iter()
        .map(|s| {
            json!({
                "total_us": s.timing.total_us(),
                "wait_us": s.timing.wait_us(),
                "conversion_us": s.timing.conversion_us(),
                "value": s.raw,
                "wait_in_range": wait.in_range(s.timing.wait_us(), band),
                "conversion_in_range": conv.in_range(s.timing.conversion_us(), band),
            })
        })
        .collect();

    json!({
        "samples": timings.len(),
        "band_sigmas": band,
        "wait_us": stats_json(&wait),
        "conversion_us": stats_json(&conv),
        "total_us": stats_json(&total),
        "rows": rows,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use hx711_core::{ReadTiming, TimedSample};

    fn collection(rows: &[(u64, u64, i32)]) -> TimingCollection {
        TimingCollection::from_samples(
            rows.iter()
                .map(|&(wait, conv, raw)| TimedSample {
                    raw,
                    timing: ReadTiming::new(
                        Duration::from_micros(wait),
                        Duration::from_micros(conv),
                    ),
                })
                .collect(),
        )
    }

    #[test]
    fn text_layout_matches_the_reference_report() {
        let timings = collection(&[(100, 50, 1), (300, 52, -2)]);
        let out = render_text(&timings, 10.0);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 22);
        assert_eq!(lines[0], "Wait Times");
        assert_eq!(lines[1], "Min: 100.00 us");
        assert_eq!(lines[2], "Max: 300.00 us");
        assert_eq!(lines[3], "Med: 200.00 us");
        assert_eq!(lines[4], "Std: 100.00 us");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "Conversion Times");
        assert_eq!(lines[12], "Total Times");
        assert_eq!(lines[17], "");
        assert_eq!(lines[18], "");
        assert_eq!(lines[19], "Total,Wait,Conversion,Value");
        assert_eq!(lines[20], "150.00,100.00,50.00,1");
        assert_eq!(lines[21], "352.00,300.00,52.00,-2");
    }

    #[test]
    fn out_of_band_wait_rows_get_a_star() {
        // Identical conversion times keep `#` out of the picture.
        let timings = collection(&[(100, 50, 1), (300, 50, 2)]);
        let out = render_text(&timings, 0.5);
        let rows: Vec<&str> = out.lines().skip(20).collect();
        assert_eq!(rows, vec!["150.00,100.00,50.00,1*", "350.00,300.00,50.00,2*"]);
    }

    #[test]
    fn out_of_band_conversion_rows_get_a_hash() {
        let timings = collection(&[(100, 50, 1), (100, 52, 2)]);
        let out = render_text(&timings, 0.5);
        let rows: Vec<&str> = out.lines().skip(20).collect();
        assert_eq!(rows, vec!["150.00,100.00,50.00,1#", "152.00,100.00,52.00,2#"]);
    }

    #[test]
    fn json_report_parses_and_carries_the_stats() {
        let timings = collection(&[(100, 50, 1), (300, 52, -2)]);
        let v: serde_json::Value = serde_json::from_str(&render_json(&timings, 3.0)).unwrap();

        assert_eq!(v["samples"], 2);
        assert_eq!(v["band_sigmas"], 3.0);
        assert_eq!(v["wait_us"]["median"], 200.0);
        assert_eq!(v["rows"][0]["value"], 1);
        assert_eq!(v["rows"][1]["value"], -2);
        assert_eq!(v["rows"][0]["wait_in_range"], true);
    }
}
