// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `canopy_view` crate.
//!
//! These combine the fitting, minimap and query helpers the way a viewer does
//! at startup and when following a link.

use core::f64::consts::FRAC_PI_2;

use canopy_view::{
    NodeBox, Projection, TreeCoord, ViewError, ViewQuery, ViewportState, fit_tree,
    indicator_geometry, minimap_zoom, reset_to_tree, zoom_into_box,
};
use kurbo::{Point, Size, Vec2};

const SCREEN: Size = Size::new(800.0, 600.0);

#[test]
fn fitted_tree_fills_the_minimap_indicator_proportionally() {
    let tree = Size::new(100.0, 50.0);
    let mut vp = ViewportState::new(SCREEN);
    reset_to_tree(&mut vp, tree).unwrap();

    let minimap = Size::new(100.0, 50.0);
    let mz = minimap_zoom(tree, minimap, Projection::Rectangular, 0.0).unwrap();
    let g = indicator_geometry(&vp, mz, minimap, Size::new(5.0, 5.0));
    // The fit shows 1/0.6 of the tree width, so the indicator overflows the
    // minimap and gets clipped to it.
    assert_eq!(g.position, Point::ZERO);
    assert_eq!(g.size.width, 100.0);
    assert_eq!(g.size.height, 50.0);
}

#[test]
fn sector_fit_keeps_sector_on_screen() {
    let mut vp = ViewportState::new(SCREEN);
    vp.set_projection(Projection::Circular);
    let node = NodeBox::sector(50.0, 0.0, 25.0, FRAC_PI_2);
    zoom_into_box(&mut vp, &node, 0.1).unwrap();

    let zoom = vp.zoom();
    assert_eq!(zoom.x, zoom.y);
    for corner in node.sector_corners() {
        let s = vp.tree_to_screen_point(corner);
        assert!(s.x >= -1e-9 && s.x <= SCREEN.width + 1e-9);
        assert!(s.y >= -1e-9 && s.y <= SCREEN.height + 1e-9);
    }

    let TreeCoord::Polar(center) = vp.screen_to_tree(Point::new(400.0, 300.0)) else {
        panic!("circular viewports report polar coordinates");
    };
    assert!(center.angle > 0.0 && center.angle < 90.0);
}

#[test]
fn link_round_trip_on_another_screen() {
    let tree = Size::new(100.0, 50.0);
    let vp = ViewportState::from_parts(
        SCREEN,
        Projection::Rectangular,
        Point::new(12.5, -3.0),
        Vec2::new(8.0, 20.0),
    )
    .unwrap();
    let link = ViewQuery::from_viewport(&vp).to_string();
    assert_eq!(link, "x=12.5&y=-3&w=100&h=30");

    // Twice the screen shows the same region at twice the zoom.
    let bigger = Size::new(1600.0, 1200.0);
    let restored = ViewQuery::parse(&format!("?tree=demo&{link}"))
        .unwrap()
        .resolve(bigger, Projection::Rectangular, 0.0, tree)
        .unwrap();
    assert_eq!(restored.top_left(), Point::new(12.5, -3.0));
    assert_eq!(restored.zoom(), Vec2::new(16.0, 40.0));
    assert_eq!(restored.visible_tree_rect(), vp.visible_tree_rect());
}

#[test]
fn partial_link_falls_back_to_fit() {
    let tree = Size::new(100.0, 50.0);
    let restored = ViewQuery::parse("x=5")
        .unwrap()
        .resolve(SCREEN, Projection::Rectangular, 0.0, tree)
        .unwrap();
    let mut fitted = ViewportState::new(SCREEN);
    fit_tree(&fitted, tree).unwrap().apply(&mut fitted).unwrap();
    assert_eq!(restored.zoom(), fitted.zoom());
    assert_eq!(restored.top_left().x, 5.0);
    assert_eq!(restored.top_left().y, fitted.top_left().y);
}

#[test]
fn bad_link_values_are_rejected() {
    assert_eq!(
        ViewQuery::parse("x=abc"),
        Err(ViewError::InvalidQueryValue { key: "x" })
    );
    assert_eq!(
        ViewQuery::parse("w=0"),
        Err(ViewError::InvalidQueryValue { key: "w" })
    );
    assert!(ViewQuery::parse("h=inf").is_err());
}
