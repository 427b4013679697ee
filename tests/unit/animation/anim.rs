use super::*;

fn two_keys(mode: InterpMode) -> Anim<f64> {
    Anim::Keyframes(Keyframes {
        keys: vec![
            Keyframe {
                time: 0.0,
                value: 0.0,
                ease: Ease::Linear,
            },
            Keyframe {
                time: 10.0,
                value: 10.0,
                ease: Ease::Linear,
            },
        ],
        mode,
    })
}

#[test]
fn keyframes_hold_is_constant_between_keys() {
    let anim = two_keys(InterpMode::Hold);
    assert_eq!(anim.sample(5.0).unwrap(), 0.0);
    assert_eq!(anim.sample(10.0).unwrap(), 10.0);
}

#[test]
fn keyframes_linear_interpolates_subframes() {
    let anim = two_keys(InterpMode::Linear);
    assert_eq!(anim.sample(5.0).unwrap(), 5.0);
    assert!((anim.sample(2.5).unwrap() - 2.5).abs() < 1e-12);
}

#[test]
fn keyframes_clamp_outside_range() {
    let anim = two_keys(InterpMode::Linear);
    assert_eq!(anim.sample(-4.0).unwrap(), 0.0);
    assert_eq!(anim.sample(40.0).unwrap(), 10.0);
}

#[test]
fn validate_rejects_empty_and_unsorted() {
    let empty: Anim<f64> = Anim::Keyframes(Keyframes {
        keys: Vec::new(),
        mode: InterpMode::Linear,
    });
    assert!(empty.validate().is_err());
    assert!(empty.sample(0.0).is_err());

    let unsorted = Anim::Keyframes(Keyframes {
        keys: vec![
            Keyframe {
                time: 3.0,
                value: 1.0,
                ease: Ease::Linear,
            },
            Keyframe {
                time: 1.0,
                value: 2.0,
                ease: Ease::Linear,
            },
        ],
        mode: InterpMode::Linear,
    });
    assert!(unsorted.validate().is_err());
}

#[test]
fn points_and_colors_interpolate() {
    let p = <Point as Lerp>::lerp(&Point::new(0.0, 0.0), &Point::new(10.0, -4.0), 0.5);
    assert_eq!(p, Point::new(5.0, -2.0));
    let c = <Rgb as Lerp>::lerp(&Rgb::new(0.0, 0.0, 0.0), &Rgb::WHITE, 0.25);
    assert_eq!(c, Rgb::new(0.25, 0.25, 0.25));
}
