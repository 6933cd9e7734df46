use std::io::Write;

use csv::WriterBuilder;

use crate::error::Result;

/// Flat latitude/longitude pairs, latitude-major.
#[derive(Debug, Clone, PartialEq)]
pub struct LatLongGrid {
    pub lat:  Vec<f64>,
    pub long: Vec<f64>,
    pub num:  usize,
}

impl LatLongGrid {
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.lat.iter().copied().zip(self.long.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.num
    }

    pub fn is_empty(&self) -> bool {
        self.num == 0
    }

    /// Writes `lat,long` rows, one per grid point.
    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().from_writer(out);
        wtr.write_record(["lat", "long"])?;
        for (lat, long) in self.pairs() {
            wtr.write_record([lat.to_string(), long.to_string()])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Half-open `[min, max)` range stepped by `step`, endpoints in either order.
fn arange(lims: [f64; 2], step: f64) -> Vec<f64> {
    let lo = lims[0].min(lims[1]);
    let hi = lims[0].max(lims[1]);
    if !(step.is_finite() && step > 0.0) || !(hi - lo).is_finite() {
        return Vec::new();
    }
    let n = ((hi - lo) / step).ceil().max(0.0) as usize;
    (0..n).map(|i| lo + i as f64 * step).collect()
}

/// Every (lat, long) pair over the two stepped ranges. The upper limit of
/// each range is normally not part of the grid.
///
/// ```
/// let g = nsrdb_tools::make_lat_long_grid([25.0, 47.0], [-124.0, -66.0], 1.0, 1.0);
/// assert_eq!(g.num, 1276);
/// ```
pub fn make_lat_long_grid(
    lat_lims:  [f64; 2],
    long_lims: [f64; 2],
    lat_step:  f64,
    long_step: f64,
) -> LatLongGrid {
    let lat_flat  = arange(lat_lims, lat_step);
    let long_flat = arange(long_lims, long_step);

    let total = lat_flat.len() * long_flat.len();
    let mut lat  = Vec::with_capacity(total);
    let mut long = Vec::with_capacity(total);
    for &la in &lat_flat {
        for &lo in &long_flat {
            lat.push(la);
            long.push(lo);
        }
    }

    LatLongGrid { num: lat.len(), lat, long }
}
