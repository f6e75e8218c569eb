use roomgraph_layout::pack_circles;

#[test]
fn empty_and_single_inputs() {
    assert!(pack_circles(&[]).is_empty());
    let one = pack_circles(&[2.5]);
    assert_eq!(one.len(), 1);
    assert_eq!((one[0].x, one[0].y, one[0].r), (0.0, 0.0, 2.5));
}

#[test]
fn first_circle_is_at_origin() {
    let out = pack_circles(&[1.0, 2.0, 3.0]);
    assert_eq!((out[0].x, out[0].y), (0.0, 0.0));
}

#[test]
fn packed_circles_do_not_overlap() {
    let radii = [0.5, 0.7, 1.0, 1.0, 1.2, 1.5, 2.0, 2.2, 3.0, 4.5, 6.0];
    let out = pack_circles(&radii);
    assert_eq!(out.len(), radii.len());
    for (i, c) in out.iter().enumerate() {
        assert_eq!(c.r, radii[i]);
        for d in &out[i + 1..] {
            let dist = (c.x - d.x).hypot(c.y - d.y);
            assert!(dist + 1e-6 >= c.r + d.r, "{c:?} overlaps {d:?}");
        }
    }
}

#[test]
fn two_circles_are_tangent() {
    let out = pack_circles(&[1.0, 3.0]);
    let dist = (out[0].x - out[1].x).hypot(out[0].y - out[1].y);
    assert!((dist - 4.0).abs() < 1e-9);
}

#[test]
fn zero_radii_pack_to_finite_positions() {
    let radii = [0.0, 0.0, 0.0, 1.0, 2.0];
    let out = pack_circles(&radii);
    assert_eq!((out[0].x, out[0].y), (0.0, 0.0));
    for (i, c) in out.iter().enumerate() {
        assert!(c.x.is_finite() && c.y.is_finite(), "{c:?}");
        for d in &out[i + 1..] {
            let dist = (c.x - d.x).hypot(c.y - d.y);
            assert!(dist + 1e-6 >= c.r + d.r, "{c:?} overlaps {d:?}");
        }
    }
}
