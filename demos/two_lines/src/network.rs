//! The demo's two-line network.
//!
//! ```text
//!                 S (star)
//!                 |
//!   A (circle) -- X (triangle) -- B (square)
//!                 |
//!                 C (circle)
//! ```
//!
//! Line 1 runs A–X–B, line 2 runs S–X–C; X is the only interchange.

use anyhow::Result;

use mt_core::{LineId, Point, StationId, StationType};
use mt_sim::Engine;

pub struct Network {
    pub lines:    [LineId; 2],
    /// `[a, x, b, s, c]`.
    pub stations: [StationId; 5],
}

/// Build the network on an empty engine.
pub fn build_network(engine: &mut Engine) -> Result<Network> {
    let a = engine.add_station_at(StationType::Circle,   Point::new(  0.0,    0.0))?;
    let x = engine.add_station_at(StationType::Triangle, Point::new(200.0,    0.0))?;
    let b = engine.add_station_at(StationType::Square,   Point::new(400.0,    0.0))?;
    let s = engine.add_station_at(StationType::Star,     Point::new(200.0, -200.0))?;
    let c = engine.add_station_at(StationType::Circle,   Point::new(300.0,  200.0))?;

    let red = engine.add_line()?;
    for id in [a, x, b] {
        engine.add_station_to_line(red, id, None)?;
    }
    let blue = engine.add_line()?;
    for id in [s, x, c] {
        engine.add_station_to_line(blue, id, None)?;
    }

    Ok(Network { lines: [red, blue], stations: [a, x, b, s, c] })
}
