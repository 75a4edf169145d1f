use super::*;

#[test]
fn test_channel_minor_addressing() {
    let samples = vec![
        10, 11, 12, /**/ 20, 21, 22, // row 0
        30, 31, 32, /**/ 40, 41, 42, // row 1
    ];
    let raster = Raster::new(2, 2, 3, samples).unwrap();

    assert_eq!(raster.sample(0, 0, 0), Some(10));
    assert_eq!(raster.sample(0, 1, 2), Some(22));
    assert_eq!(raster.sample(1, 0, 1), Some(31));
    assert_eq!(raster.sample(1, 1, 0), Some(40));
}

#[test]
fn test_sample_out_of_bounds() {
    let raster = Raster::new(2, 2, 1, vec![0, 1, 2, 3]).unwrap();

    assert_eq!(raster.sample(2, 0, 0), None);
    assert_eq!(raster.sample(0, 2, 0), None);
    assert_eq!(raster.sample(0, 0, 1), None);
}

#[test]
fn test_shape_mismatch() {
    let result = Raster::new(2, 2, 1, vec![0, 1, 2]);

    assert!(matches!(
        result,
        Err(CodecError::ShapeMismatch { expected: 4, actual: 3 })
    ));
}

#[test]
fn test_from_integer_samples() {
    let samples: Vec<i32> = vec![0, 255, 128, 7];
    let raster = Raster::from_samples(&samples, 2, 2, 1).unwrap();

    assert_eq!(raster.samples(), &[0, 255, 128, 7]);
}

#[test]
fn test_from_samples_rejects_out_of_range() {
    let samples: Vec<i32> = vec![0, 256, 1, 2];
    let result = Raster::from_samples(&samples, 2, 2, 1);

    assert!(matches!(result, Err(CodecError::SampleRange { index: 1 })));

    let negative: Vec<i32> = vec![-1, 0, 1, 2];
    let result = Raster::from_samples(&negative, 2, 2, 1);

    assert!(matches!(result, Err(CodecError::SampleRange { index: 0 })));
}
