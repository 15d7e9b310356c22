use super::*;
use crate::model::gradient::{Artifact, ColorFunction};

const RED: Color = Color::rgb(255, 0, 0);
const BLUE: Color = Color::rgb(0, 0, 255);
const GREEN: Color = Color::rgb(0, 255, 0);

#[test]
fn yields_exactly_n_colors_then_none() {
    let g = Gradient::new(BLUE, GradientShape::Top);
    let mut it = color_iterator(RED, &g, 5);
    assert_eq!(it.len(), 5);
    for _ in 0..5 {
        assert!(it.next().is_some());
    }
    assert_eq!(it.next(), None);
    assert_eq!(it.next(), None);
}

#[test]
fn endpoints_are_the_stops() {
    let g = Gradient::new(BLUE, GradientShape::Top);
    let colors: Vec<_> = color_iterator(RED, &g, 3).collect();
    assert_eq!(colors[0], RED);
    assert_eq!(colors[2], BLUE);
    assert_eq!(colors[1], Color::rgb(128, 0, 128));
}

#[test]
fn single_step_is_primary() {
    let g = Gradient::new(BLUE, GradientShape::Top);
    assert_eq!(color_iterator(RED, &g, 1).collect::<Vec<_>>(), vec![RED]);
    assert_eq!(color_iterator(RED, &g, 0).next(), None);
}

#[test]
fn reverse_swaps_direction() {
    let g = Gradient::new(BLUE, GradientShape::Top).reversed();
    let colors: Vec<_> = color_iterator(RED, &g, 4).collect();
    assert_eq!(colors[0], BLUE);
    assert_eq!(colors[3], RED);
}

#[test]
fn tertiary_splits_in_halves() {
    let g = Gradient::new(GREEN, GradientShape::Top).with_tertiary(BLUE);
    let colors: Vec<_> = color_iterator(RED, &g, 5).collect();
    assert_eq!(colors[0], RED);
    assert_eq!(colors[2], GREEN);
    assert_eq!(colors[4], BLUE);
}

#[test]
fn excluded_channels_keep_primary() {
    let g = Gradient::new(Color::rgba(0, 0, 255, 0), GradientShape::Top)
        .with_channels(ChannelMask::B | ChannelMask::R);
    let last = color_iterator(RED, &g, 2).color_at(1).unwrap();
    assert_eq!(last, Color::rgba(0, 0, 255, 255));
}

#[test]
fn artifact_overrides_periodic_steps() {
    let a = Artifact {
        period: 3,
        length: 1,
        color: GREEN,
    };
    let g = Gradient::new(BLUE, GradientShape::Top).with_artifact(a);
    let colors: Vec<_> = color_iterator(RED, &g, 7).collect();
    assert_eq!(colors[0], GREEN);
    assert_eq!(colors[3], GREEN);
    assert_eq!(colors[6], GREEN);
    assert_ne!(colors[1], GREEN);
}

#[test]
fn function_replaces_interpolation() {
    let f = ColorFunction::new(|step, count| Color::rgb(step as u8, count as u8, 0));
    let g = Gradient::new(BLUE, GradientShape::Top).with_function(f);
    let colors: Vec<_> = color_iterator(RED, &g, 3).collect();
    assert_eq!(colors, vec![
        Color::rgb(0, 3, 0),
        Color::rgb(1, 3, 0),
        Color::rgb(2, 3, 0)
    ]);
}

#[test]
fn every_shape_terminates_with_its_step_count() {
    for shape in GradientShape::ALL {
        let n = step_count(&[shape], 12, 8, 0);
        assert!(n >= 1, "{shape:?}");
        let g = Gradient::new(BLUE, shape);
        let it = color_iterator(RED, &g, n);
        assert_eq!(it.count(), n as usize, "{shape:?}");
    }
}

#[test]
fn step_count_rules() {
    use GradientShape as S;
    assert_eq!(step_count(&[S::Square], 10, 6, 0), 3);
    assert_eq!(step_count(&[S::Top], 10, 6, 2), 4);
    assert_eq!(step_count(&[S::Left], 10, 6, 0), 10);
    assert_eq!(step_count(&[S::TopBottom], 10, 6, 0), 3);
    assert_eq!(step_count(&[S::TopBottomLeft], 10, 6, 0), 3);
    assert_eq!(step_count(&[S::TopLeft], 10, 6, 0), 6);
    assert_eq!(step_count(&[S::CenterVertical], 10, 6, 0), 5);
    assert_eq!(step_count(&[S::DiagonalTopLeft], 10, 6, 0), 15);
    assert_eq!(step_count(&[S::Ellipse], 10, 6, 0), 3);
    assert_eq!(step_count(&[S::EllipseTop], 10, 6, 0), 5);
    assert_eq!(step_count(&[S::EllipseLeft], 10, 6, 0), 3);
    assert_eq!(step_count(&[S::EllipseTopLeft], 10, 6, 0), 6);
    assert_eq!(step_count(&[S::Top, S::Left], 10, 6, 0), 10);
    assert_eq!(step_count(&[S::Square], 1, 1, 0), 1);
    assert_eq!(step_count(&[], 10, 10, 0), 1);
}

#[test]
fn side_indices_measure_edge_distance() {
    use GradientShape as S;
    assert_eq!(step_index(S::Top, 3, 0, 10, 10, 0), Some(0));
    assert_eq!(step_index(S::Top, 3, 4, 10, 10, 0), Some(4));
    assert_eq!(step_index(S::Bottom, 3, 9, 10, 10, 0), Some(0));
    assert_eq!(step_index(S::Square, 5, 2, 10, 10, 0), Some(2));
    assert_eq!(step_index(S::DiagonalBottomRight, 9, 9, 10, 10, 0), Some(0));
    assert_eq!(step_index(S::DiagonalTopLeft, 9, 9, 10, 10, 0), Some(18));
}

#[test]
fn partial_ellipses_leave_outside_unpainted() {
    use GradientShape as S;
    // Top half: centre at the bottom edge, so the top corners are outside.
    assert_eq!(step_index(S::EllipseTop, 0, 0, 10, 10, 0), None);
    assert!(step_index(S::EllipseTop, 5, 9, 10, 10, 0).is_some());
    assert_eq!(step_index(S::EllipseBottomRight, 9, 9, 10, 10, 0), None);
    // Full ellipse clamps the corners to the first step instead.
    assert_eq!(step_index(S::Ellipse, 0, 0, 10, 10, 0), Some(0));
}

#[test]
fn sampler_clamps_beyond_last_step() {
    let g = Gradient::new(BLUE, GradientShape::Top).with_primary(RED);
    // Radius shortens the ramp: rows past it reuse the last color.
    let s = GradientSampler::new(Color::WHITE, &g, 4, 10, 6);
    assert_eq!(s.sample(0, 0), Some(RED));
    assert_eq!(s.sample(0, 3), Some(BLUE));
    assert_eq!(s.sample(0, 9), Some(BLUE));
}

#[test]
fn sampler_maps_fixed_step_counts() {
    let g = Gradient::new(BLUE, GradientShape::Left).with_steps(2);
    let s = GradientSampler::new(RED, &g, 10, 1, 0);
    assert_eq!(s.sample(0, 0), Some(RED));
    assert_eq!(s.sample(4, 0), Some(RED));
    assert_eq!(s.sample(5, 0), Some(BLUE));
    assert_eq!(s.sample(9, 0), Some(BLUE));
}
