// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where an overlay lands for triggers at different heights of the window.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p overstory_demos --example placement_flip`

use kurbo::{Rect, Size};
use overstory_placement::{Direction, OverlayRequest, PlacementConfig, place};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = PlacementConfig::default();
    let viewport = Size::new(800.0, 600.0);
    let overlay = Size::new(200.0, 250.0);

    for (bottom, direction) in [
        (60.0, Direction::BOTTOM_LEFT),
        (400.0, Direction::BOTTOM_LEFT),
        (500.0, Direction::BOTTOM_LEFT),
        (500.0, Direction::TOP_RIGHT),
        (580.0, Direction::BOTTOM_RIGHT),
    ] {
        let trigger = Rect::new(560.0, bottom - 20.0, 760.0, bottom);
        let request = OverlayRequest::new(trigger, overlay, viewport)
            .with_direction(direction)
            .with_gap(config.gap);
        let placement = place(&request, &config);
        let label = direction.to_string();
        println!(
            "{label:>12} trigger bottom {bottom:>5}: top {:>6.1} left {:>6.1} max height {:>6.1}{}",
            placement.top,
            placement.left,
            placement.max_height,
            if placement.flipped { " (flipped)" } else { "" },
        );
    }
}
