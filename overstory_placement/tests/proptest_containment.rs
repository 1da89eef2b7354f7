// Copyright 2025 the Overstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests: placements stay inside the viewport.

use kurbo::{Rect, Size};
use overstory_placement::{Direction, Horizontal, OverlayRequest, PlacementConfig, Vertical, place};
use proptest::prelude::*;

const EPS: f64 = 1e-6;

fn direction_strategy() -> impl Strategy<Value = Direction> {
    (any::<bool>(), any::<bool>()).prop_map(|(above, end)| Direction {
        vertical: if above { Vertical::Above } else { Vertical::Below },
        horizontal: if end { Horizontal::End } else { Horizontal::Start },
    })
}

/// Fractions of the viewport for a scroll container's top-left corner and size.
fn container_strategy() -> impl Strategy<Value = Option<(f64, f64, f64, f64)>> {
    prop::option::of((0.0f64..1.0, 0.0f64..1.0, 0.0f64..=1.0, 0.0f64..=1.0))
}

/// A viewport, a trigger fully inside it, an overlay no larger than it, and
/// sometimes a scroll container inside the viewport.
fn request_strategy() -> impl Strategy<Value = OverlayRequest> {
    (200.0f64..2000.0, 200.0f64..2000.0)
        .prop_flat_map(|(vw, vh)| {
            (
                Just(Size::new(vw, vh)),
                0.0..vw,
                0.0..vh,
                0.0f64..1.0,
                0.0f64..1.0,
                0.0..=vw,
                0.0..=vh,
                0.0f64..24.0,
                direction_strategy(),
                container_strategy(),
            )
        })
        .prop_map(|(viewport, x0, y0, fw, fh, ow, oh, gap, direction, container)| {
            let x1 = x0 + (viewport.width - x0) * fw;
            let y1 = y0 + (viewport.height - y0) * fh;
            let request =
                OverlayRequest::new(Rect::new(x0, y0, x1, y1), Size::new(ow, oh), viewport)
                    .with_gap(gap)
                    .with_direction(direction);
            match container {
                Some((cx, cy, cw, ch)) => {
                    let cx0 = viewport.width * cx;
                    let cy0 = viewport.height * cy;
                    request.with_container(Rect::new(
                        cx0,
                        cy0,
                        cx0 + (viewport.width - cx0) * cw,
                        cy0 + (viewport.height - cy0) * ch,
                    ))
                }
                None => request,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn placement_is_contained_in_viewport(request in request_strategy()) {
        let placement = place(&request, &PlacementConfig::default());
        let rect = placement.rect(request.overlay.height);

        prop_assert!(rect.y0 >= 0.0, "top {} < 0", rect.y0);
        prop_assert!(
            rect.y1 <= request.viewport.height + EPS,
            "bottom {} > viewport {}",
            rect.y1,
            request.viewport.height
        );
        prop_assert!(rect.x0 >= 0.0, "left {} < 0", rect.x0);
        prop_assert!(
            rect.x1 <= request.viewport.width + EPS,
            "right {} > viewport {}",
            rect.x1,
            request.viewport.width
        );
    }

    #[test]
    fn flipped_placements_end_above(request in request_strategy()) {
        let request = request.with_direction(Direction::BOTTOM_LEFT);
        let placement = place(&request, &PlacementConfig::default());
        if placement.flipped {
            prop_assert_eq!(placement.vertical, Vertical::Above);
        } else {
            prop_assert_eq!(placement.vertical, Vertical::Below);
        }
    }
}

#[test]
fn container_shift_near_viewport_top_stays_contained() {
    // Sliding up to fit the container would put the top at -120; the clamp holds it at 0.
    let container = Rect::new(0.0, 0.0, 400.0, 60.0);
    let request = OverlayRequest::new(
        Rect::new(10.0, 10.0, 110.0, 26.0),
        Size::new(100.0, 180.0),
        Size::new(800.0, 600.0),
    )
    .with_container(container);
    let placement = place(&request, &PlacementConfig::default());
    assert_eq!(placement.top, 0.0);
    assert!(!placement.flipped);
    assert_eq!(placement.vertical, Vertical::Below);
}

#[test]
fn select_overlay_near_bottom_flips_above_trigger() {
    // Trigger spans 480..500; 600 - 500 - 8 = 92 is below the 160px usable minimum.
    let trigger = Rect::new(100.0, 480.0, 300.0, 500.0);
    let request = OverlayRequest::new(trigger, Size::new(200.0, 250.0), Size::new(800.0, 600.0));
    let placement = place(&request, &PlacementConfig::default());

    let trigger_height = 20.0;
    let gap = 0.0;
    assert!(placement.flipped);
    assert_eq!(placement.top, 500.0 - trigger_height - 250.0 - gap);
    assert_eq!(placement.left, 100.0);
}
