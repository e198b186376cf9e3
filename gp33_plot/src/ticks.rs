// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Given x ≠ 0, find (r, s) such that x = r * 10^s, and 1.0 <= |r| < 10.

fn normalize(x: f64) -> (f64, i32) {
    let s = x.abs().log10().floor() as i32;
    (x * 10.0_f64.powi(-s), s)
}

// Render n * 10^p as a decimal string, e.g. (15, -1) => "1.5", (3, 2) => "300".

fn scaled_int_string(n: i32, p: i32) -> String {
    let mut tick = n.abs().to_string();
    if p >= 0 {
        tick += &"0".repeat(p as usize);
    } else {
        let q = (-p) as usize;
        if q < tick.len() {
            tick.insert(tick.len() - q, '.');
        } else {
            tick = format!("0.{}{}", "0".repeat(q - tick.len()), tick);
        }
    }
    if n < 0 {
        tick.insert(0, '-');
    }
    tick
}

// Choose at most max_ticks round tick values in [low, high].  The values are multiples of 1, 2 or
// 5 times a power of ten, and are returned as strings, which is what we need to decide on the
// number of decimal places in axis labels.  Returns an empty vector if there is no sensible
// answer, e.g. if high is zero.

pub fn ticks(low: f64, high: f64, max_ticks: usize) -> Vec<String> {
    if !(low <= high) || high == 0.0 || !high.is_finite() || !low.is_finite() {
        return Vec::new();
    }
    let low = if low == 0.0 { 0.00001 } else { low };

    // low  = r1 x 10^s1 where -10 < r1 < +10
    // high = r2 x 10^s2 where -10 < r2 < +10.

    let (r1, s1) = normalize(low);
    let (r2, s2) = normalize(high);

    // Find the first decimal position p where low and high disagree.

    let mut p;
    if s1 != s2 {
        p = s1.max(s2);
    } else {
        p = s1;
        let (mut x1, mut x2) = (r1, r2);
        while x1.floor() == x2.floor() && p > s1 - 8 {
            p -= 1;
            x1 *= 10.0;
            x2 *= 10.0;
        }
    }

    // Try p and p - 1, thinning to multiples of 2 or 5 if there are too many.

    let mut best_ns = Vec::<i32>::new();
    let mut best_p = 0;
    for q in [p, p - 1].iter() {
        let q = *q;
        let n1 = (r1 * 10.0_f64.powi(s1 - q)).ceil() as i32;
        let n2 = (r2 * 10.0_f64.powi(s2 - q)).floor() as i32;
        let ns = (n1..=n2).collect::<Vec<i32>>();
        if ns.len() > 1 {
            if ns.len() > best_ns.len() && ns.len() <= max_ticks {
                best_ns = ns.clone();
                best_p = q;
            } else {
                for div in [2, 5].iter() {
                    let nsx = ns.iter().copied().filter(|n| n % div == 0).collect::<Vec<_>>();
                    if nsx.len() > best_ns.len() && nsx.len() <= max_ticks {
                        best_ns = nsx;
                        best_p = q;
                    }
                }
            }
        }
        if ns.len() >= max_ticks {
            break;
        }
    }
    best_ns.iter().map(|n| scaled_int_string(*n, best_p)).collect()
}

// Number of digits after the decimal point in a tick label.

pub fn precision(tick: &str) -> usize {
    match tick.find('.') {
        Some(dot) => tick.len() - dot - 1,
        None => 0,
    }
}
