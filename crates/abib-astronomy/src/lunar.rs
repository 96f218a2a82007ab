//! Lunar position: "formula 30" longitude, latitude and horizontal-parallax
//! series. The argument angles keep their additive perturbation terms; the
//! latitude series carries the (1 - w1 - w2) node scaling.

use crate::math::{norm360, DR};

/// Lunar terms at one Julian-century fraction.
#[derive(Debug, Clone, Copy)]
pub struct LunarSeries {
    /// Geocentric longitude, radians.
    pub longitude: f64,
    /// Geocentric latitude, radians.
    pub latitude: f64,
    /// Equatorial horizontal parallax, degrees.
    pub parallax: f64,
    /// Moon's mean anomaly, radians.
    pub moon_anomaly: f64,
    /// Sun's mean anomaly (with its additive term), radians.
    pub sun_anomaly: f64,
}

impl LunarSeries {
    /// Evaluates the series at Julian-century fraction `jt` (1900.0 epoch).
    pub fn at(jt: f64) -> Self {
        let jt2 = jt * jt;
        let jt3 = jt2 * jt;

        // Additive perturbation arguments.
        let a4 = norm360(51.2 + 20.2 * jt) * DR;
        let a5 = norm360(346.56 + 132.87 * jt - 0.0091731 * jt2) * DR;
        let a6 = 0.003964 * a5.sin();
        let ax = 259.183275 - 1934.142 * jt + 0.002078 * jt2 + 0.0000022 * jt3;
        let node = norm360(ax) * DR;
        let a7 = norm360(ax + 275.05 - 2.3 * jt) * DR;

        // Moon's mean anomaly.
        let mut mm = 296.104608 + 477198.8491 * jt + 0.009192 * jt2 + 0.0000144 * jt3
            + 0.000817 * a4.sin();
        mm = mm + a6 + 0.002541 * node.sin();
        let mm = norm360(mm) * DR;

        // Moon's mean longitude, kept in degrees for the series sum.
        let mut lm = 270.434164 + 481267.8831 * jt - 0.001133 * jt2 + 0.0000019 * jt3;
        lm = lm + 0.000233 * a4.sin() + a6 + 0.001964 * node.sin();
        let lm = norm360(lm);

        // Sun's mean anomaly with its additive term.
        let mut s1 = 358.475833 + 35999.0498 * jt - 0.00015 * jt2 - 0.0000033 * jt3;
        s1 -= 0.001778 * a4.sin();
        let s1 = norm360(s1) * DR;

        // Mean elongation.
        let mut dm = 350.737486 + 445267.1142 * jt - 0.001436 * jt2 + 0.0000019 * jt3;
        dm = dm + 0.002011 * a4.sin() + a6 + 0.001964 * node.sin();
        let dm = norm360(dm) * DR;

        // Argument of latitude.
        let mut fm = 11.250889 + 483202.0251 * jt - 0.003211 * jt2 - 0.0000003 * jt3;
        fm = fm + a6 - 0.024691 * node.sin() - 0.004328 * a7.sin();
        let fm = norm360(fm) * DR;

        // Secular decrease of the Sun's eccentricity.
        let e1 = 1.0 - 0.002495 * jt - 0.00000752 * jt2;
        let e1sq = e1 * e1;

        // Longitude series, degrees.
        let mut l = lm + 6.28875 * mm.sin() + 1.274018 * (2.0 * dm - mm).sin()
            + 0.658309 * (2.0 * dm).sin();
        l = l + 0.213616 * (2.0 * mm).sin() - 0.185596 * s1.sin() * e1
            - 0.114336 * (2.0 * fm).sin();
        l = l + 0.058793 * (2.0 * dm - 2.0 * mm).sin()
            + 0.057212 * (2.0 * dm - s1 - mm).sin() * e1;
        l = l + 0.05332 * (2.0 * dm + mm).sin() + 0.045874 * (2.0 * dm - s1).sin() * e1;
        l = l + 0.041024 * (mm - s1).sin() * e1 - 0.034718 * dm.sin();
        l = l - e1 * 0.030465 * (s1 + mm).sin() + 0.015326 * (2.0 * dm - 2.0 * fm).sin();
        l = l - 0.012528 * (2.0 * fm + mm).sin() - 0.01098 * (2.0 * fm - mm).sin()
            + 0.010674 * (4.0 * dm - mm).sin();
        l = l + 0.010034 * (3.0 * mm).sin() + 0.008548 * (4.0 * dm - 2.0 * mm).sin();
        l = l - 0.00791 * (s1 - mm + 2.0 * dm).sin() * e1
            - e1 * 0.006783 * (2.0 * dm + s1).sin();
        l = l + 0.005162 * (mm - dm).sin() + e1 * 0.005 * (s1 + dm).sin();
        l = l + e1 * 0.004049 * (mm - s1 + 2.0 * dm).sin()
            + 0.003996 * (2.0 * mm + 2.0 * dm).sin();
        l = l + 0.003862 * (4.0 * dm).sin() + 0.003665 * (2.0 * dm - 3.0 * mm).sin();
        l = l + e1 * 0.002695 * (2.0 * mm - s1).sin()
            + 0.002602 * (mm - 2.0 * fm - 2.0 * dm).sin();
        l = l + e1 * 0.002396 * (2.0 * dm - s1 - 2.0 * mm).sin() - 0.002349 * (mm + dm).sin();
        l = l + e1sq * 0.002249 * (2.0 * dm - 2.0 * s1).sin()
            - e1 * 0.002125 * (2.0 * mm + s1).sin();
        l = l - e1sq * 0.002079 * (2.0 * s1).sin()
            + e1sq * 0.002059 * (2.0 * dm - mm - 2.0 * s1).sin();
        l = l - 0.001773 * (mm + 2.0 * dm - 2.0 * fm).sin()
            - 0.001595 * (2.0 * fm + 2.0 * dm).sin();
        l = l + e1 * 0.00122 * (4.0 * dm - s1 - mm).sin() - 0.00111 * (2.0 * mm + 2.0 * fm).sin();
        l = l + 0.000892 * (mm - 3.0 * dm).sin() - e1 * 0.000811 * (s1 + mm + 2.0 * dm).sin();
        l = l + e1 * 0.000761 * (4.0 * dm - s1 - 2.0 * mm).sin()
            + e1sq * 0.000717 * (mm - 2.0 * s1).sin();
        l = l + e1sq * 0.000704 * (mm - 2.0 * s1 - 2.0 * dm).sin()
            + e1 * 0.000693 * (s1 - 2.0 * mm + 2.0 * dm).sin();
        l += e1 * 0.000598 * (2.0 * dm - s1 - 2.0 * fm).sin();
        l = l + 0.00055 * (mm + 4.0 * dm).sin() + 0.000538 * (4.0 * mm).sin();
        l = l + e1 * 0.000521 * (4.0 * dm - s1).sin() + 0.000486 * (2.0 * mm - dm).sin();

        // Latitude series, degrees.
        let mut lb = 5.128189 * fm.sin() + 0.280606 * (mm + fm).sin() + 0.277693 * (mm - fm).sin();
        lb = lb + 0.173238 * (2.0 * dm - fm).sin() + 0.055413 * (2.0 * dm + fm - mm).sin();
        lb = lb + 0.046272 * (2.0 * dm - fm - mm).sin() + 0.032573 * (2.0 * dm + fm).sin();
        lb = lb + 0.017198 * (2.0 * mm + fm).sin() + 0.009267 * (2.0 * dm + mm - fm).sin();
        lb = lb + 0.008823 * (2.0 * mm - fm).sin() + e1 * 0.008247 * (2.0 * dm - s1 - fm).sin();
        lb = lb + 0.004323 * (2.0 * dm - fm - 2.0 * mm).sin() + 0.0042 * (2.0 * dm + fm + mm).sin();
        lb = lb + e1 * 0.003372 * (fm - s1 - 2.0 * dm).sin()
            + e1 * 0.002472 * (2.0 * dm + fm - s1 - mm).sin();
        lb = lb + e1 * 0.002222 * (2.0 * dm + fm - s1).sin()
            + e1 * 0.002072 * (2.0 * dm - fm - s1 - mm).sin();
        lb = lb + e1 * 0.001877 * (fm - s1 + mm).sin() + 0.001828 * (4.0 * dm - fm - mm).sin();
        lb = lb - e1 * 0.001803 * (fm + s1).sin() - 0.00175 * (3.0 * fm).sin()
            + e1 * 0.00157 * (mm - s1 - fm).sin();
        lb = lb - 0.001487 * (fm + dm).sin() - e1 * 0.001481 * (fm + s1 + mm).sin();
        lb = lb + e1 * 0.001417 * (fm - s1 - mm).sin() + e1 * 0.00135 * (fm - s1).sin()
            + 0.00133 * (fm - dm).sin();
        lb = lb + 0.001106 * (fm + 3.0 * mm).sin() + 0.00102 * (4.0 * dm - fm).sin();
        lb = lb + 0.000833 * (fm + 4.0 * dm - mm).sin() + 0.000781 * (mm - 3.0 * fm).sin();
        lb = lb + 0.00067 * (fm + 4.0 * dm - 2.0 * mm).sin() + 0.000606 * (2.0 * dm - 3.0 * fm).sin();
        lb = lb + 0.000597 * (2.0 * dm + 2.0 * mm - fm).sin()
            + e1 * 0.000492 * (2.0 * dm + mm - s1 - fm).sin();
        lb = lb + 0.00045 * (2.0 * mm - fm - 2.0 * dm).sin() + 0.000439 * (3.0 * mm - fm).sin();
        lb = lb + 0.000423 * (fm + 2.0 * dm + 2.0 * mm).sin()
            + 0.000422 * (2.0 * dm - fm - 3.0 * mm).sin();
        lb = lb - e1 * 0.000367 * (s1 + fm + 2.0 * dm - mm).sin()
            - e1 * 0.000353 * (s1 + fm + 2.0 * dm).sin();
        lb = lb + 0.000331 * (fm + 4.0 * dm).sin() + e1 * 0.000317 * (2.0 * dm + fm - s1 + mm).sin();
        lb = lb + e1sq * 0.000306 * (2.0 * dm - 2.0 * s1 - fm).sin() - 0.000283 * (mm + 3.0 * fm).sin();

        // Horizontal parallax, degrees.
        let mut hp = 0.950724 + 0.051818 * mm.cos() + 0.009531 * (2.0 * dm - mm).cos();
        hp = hp + 0.007843 * (2.0 * dm).cos() + 0.002824 * (2.0 * mm).cos();
        hp = hp + 0.000857 * (2.0 * dm + mm).cos() + e1 * 0.000533 * (2.0 * dm - s1).cos();
        hp = hp + e1 * 0.000401 * (2.0 * dm - s1 - mm).cos() + e1 * 0.00032 * (mm - s1).cos();
        hp = hp - 0.000271 * dm.cos() - e1 * 0.000264 * (s1 + mm).cos();
        hp = hp - 0.000198 * (2.0 * fm - mm).cos() + 0.000173 * (3.0 * mm).cos();
        hp = hp + 0.000167 * (4.0 * dm - mm).cos() - e1 * 0.000111 * s1.cos();
        hp = hp + 0.000103 * (4.0 * dm - 2.0 * mm).cos() - 0.000084 * (2.0 * mm - 2.0 * dm).cos();
        hp = hp - e1 * 0.000083 * (2.0 * dm + s1).cos() + 0.000079 * (2.0 * dm + 2.0 * mm).cos();
        hp = hp + 0.000072 * (4.0 * dm).cos() + e1 * 0.000064 * (2.0 * dm - s1 + mm).cos();
        hp = hp - e1 * 0.000063 * (2.0 * dm + s1 - mm).cos() + e1 * 0.000041 * (s1 + dm).cos();
        hp = hp + e1 * 0.000035 * (2.0 * mm - s1).cos() - 0.000033 * (3.0 * mm - 2.0 * dm).cos();
        hp = hp - 0.00003 * (mm + dm).cos() - 0.000029 * (2.0 * fm - 2.0 * dm).cos();
        hp = hp - e1 * 0.000029 * (2.0 * mm + s1).cos() + e1sq * 0.000026 * (2.0 * dm - 2.0 * s1).cos();
        hp = hp - 0.000023 * (2.0 * fm - 2.0 * dm + mm).cos()
            + e1 * 0.000019 * (4.0 * dm - s1 - mm).cos();

        // Node scaling of the latitude.
        let w1 = 0.0004664 * node.cos();
        let w3 = (275.05 - 2.3 * jt) * DR;
        let w2 = 0.0000754 * (node + w3).cos();
        let lb = lb * (1.0 - w1 - w2);

        Self {
            longitude: l * DR,
            latitude: lb * DR,
            parallax: hp,
            moon_anomaly: mm,
            sun_anomaly: s1,
        }
    }
}
